//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the
//! `AD_ROLES` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use ad_roles::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod directory;
mod error;
mod sync;

pub use directory::DirectoryConfig;
pub use error::{ConfigError, ValidationError};
pub use sync::SyncConfig;

use serde::Deserialize;

/// Root application configuration.
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Directory endpoint configuration (consumed by the directory client)
    #[serde(default)]
    pub directory: DirectoryConfig,

    /// Synchronization policy configuration
    #[serde(default)]
    pub sync: SyncConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Loads a `.env` file if present (for development), then reads
    /// environment variables with the `AD_ROLES` prefix.
    ///
    /// # Environment Variable Format
    ///
    /// - `AD_ROLES__DIRECTORY__HOST=dc01.example.org` -> `directory.host`
    /// - `AD_ROLES__SYNC__ADMIN_GROUP_MARKERS=admin` -> `sync.admin_group_markers`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("AD_ROLES")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.directory.validate()?;
        self.sync.validate()?;
        Ok(())
    }
}
