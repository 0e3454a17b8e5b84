//! Configuration Loader
//!
//! Layers defaults, an optional configuration file and `HYDRATOR_*`
//! environment variables with the `config` crate.

use super::HydrationConfig;
use crate::constants::env::CONFIG_PREFIX;
use crate::error::Result;
use config::{Config, Environment, File};
use std::path::Path;
use tracing::{debug, warn};

impl HydrationConfig {
    /// Load configuration from an optional file plus environment overrides.
    ///
    /// The file format follows its extension (TOML, YAML, JSON). A file that
    /// is named but missing is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            debug!("Loading hydration configuration from: {}", path.display());
            builder = builder.add_source(File::from(path).required(true));
        }

        let settings = builder
            .add_source(Environment::with_prefix(CONFIG_PREFIX).try_parsing(true))
            .build()?;

        let config: HydrationConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the environment only, falling back to defaults on error
    pub fn from_environment() -> Self {
        Self::load(None).unwrap_or_else(|err| {
            warn!(error = %err, "Invalid hydration configuration in environment, using defaults");
            Self::default()
        })
    }
}
