//! # Hydration Constants
//!
//! Defaults and environment variable names that bound the hydration engine.

/// Default maximum recursion level for nested entities
pub const DEFAULT_MAX_DEPTH: u32 = 2;

/// Default starting level for view hydration
pub const DEFAULT_VIEW_START_DEPTH: u32 = 1;

/// Placeholder schema/table identity of a descriptor that never declared one
pub const ABSTRACT_IDENTITY: &str = "abstract";

/// Environment variables consulted by configuration and logging
pub mod env {
    /// Prefix of configuration overrides, e.g. `HYDRATOR_MAX_DEPTH=3`
    pub const CONFIG_PREFIX: &str = "HYDRATOR";
    pub const ENVIRONMENT: &str = "HYDRATOR_ENV";
    pub const FALLBACK_ENVIRONMENT: &str = "APP_ENV";
    pub const LOG_FORMAT: &str = "HYDRATOR_LOG_FORMAT";
}
