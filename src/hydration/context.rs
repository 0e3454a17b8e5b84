use crate::config::{AbsentConstraintPolicy, HydrationConfig};

/// Depth bounds and policy of one hydration call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HydrationContext {
    pub max_depth: u32,
    pub current_depth: u32,
    pub absent_constraints: AbsentConstraintPolicy,
}

impl HydrationContext {
    pub fn new(max_depth: u32, current_depth: u32) -> Self {
        Self {
            max_depth,
            current_depth,
            absent_constraints: AbsentConstraintPolicy::default(),
        }
    }

    /// Top-level context for the given configuration
    pub fn from_config(config: &HydrationConfig) -> Self {
        Self {
            max_depth: config.max_depth,
            current_depth: 0,
            absent_constraints: config.absent_constraint_policy,
        }
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_current_depth(mut self, current_depth: u32) -> Self {
        self.current_depth = current_depth;
        self
    }

    pub fn with_policy(mut self, policy: AbsentConstraintPolicy) -> Self {
        self.absent_constraints = policy;
        self
    }

    /// Check if an instance at this level is still populated
    pub fn within_bounds(&self) -> bool {
        self.current_depth <= self.max_depth
    }

    /// Context of the entities nested one level below
    pub fn descend(&self) -> Self {
        Self {
            current_depth: self.current_depth.saturating_add(1),
            ..*self
        }
    }
}
