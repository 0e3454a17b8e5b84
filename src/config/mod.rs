//! # Hydration Configuration
//!
//! Depth bounds and policies applied by the hydration engine. Values come from
//! built-in defaults, an optional configuration file and `HYDRATOR_*`
//! environment variables, in that order of precedence (see [`loader`]).
//!
//! ```rust
//! use entity_hydrator::config::{AbsentConstraintPolicy, HydrationConfig};
//!
//! let config = HydrationConfig::default();
//! assert_eq!(config.max_depth, 2);
//! assert_eq!(config.absent_constraint_policy, AbsentConstraintPolicy::LeaveUnset);
//! ```

pub mod loader;

use crate::constants::{DEFAULT_MAX_DEPTH, DEFAULT_VIEW_START_DEPTH};
use crate::error::{HydrationError, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// What to do with a constraint whose local column is absent from the row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbsentConstraintPolicy {
    /// Leave the relation field untouched
    #[default]
    LeaveUnset,
    /// Hydrate the target from the whole row when the field holds no value
    /// and depth remains; serves views that omit join columns
    HydrateFromRow,
}

/// Configuration of the hydration engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HydrationConfig {
    /// Deepest level that is still populated
    pub max_depth: u32,
    /// Starting level of view hydration
    pub view_start_depth: u32,
    pub absent_constraint_policy: AbsentConstraintPolicy,
    /// Run the registration enforcer on first use of each entity
    pub enforce_registration: bool,
}

impl Default for HydrationConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            view_start_depth: DEFAULT_VIEW_START_DEPTH,
            absent_constraint_policy: AbsentConstraintPolicy::LeaveUnset,
            enforce_registration: true,
        }
    }
}

impl HydrationConfig {
    /// Test configuration: shallow recursion, enforcement on
    pub fn for_test() -> Self {
        Self {
            max_depth: 1,
            ..Self::default()
        }
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_absent_constraint_policy(mut self, policy: AbsentConstraintPolicy) -> Self {
        self.absent_constraint_policy = policy;
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.view_start_depth > self.max_depth.saturating_add(1) {
            return Err(HydrationError::Configuration(format!(
                "view_start_depth ({}) must not exceed max_depth + 1 ({})",
                self.view_start_depth,
                self.max_depth.saturating_add(1)
            )));
        }

        if self.max_depth == 0 {
            warn!("max_depth is 0 - nested entities will never be populated");
        }

        Ok(())
    }

    /// Log current configuration for debugging
    pub fn log_configuration(&self) {
        info!(
            max_depth = self.max_depth,
            view_start_depth = self.view_start_depth,
            absent_constraint_policy = ?self.absent_constraint_policy,
            enforce_registration = self.enforce_registration,
            "Hydration configuration"
        );
    }
}
