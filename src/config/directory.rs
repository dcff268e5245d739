//! Directory endpoint configuration
//!
//! The reconciliation engine itself never opens a connection; these values
//! are handed to the injected directory client.

use serde::Deserialize;

use super::error::ValidationError;

/// Directory endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryConfig {
    /// Directory server hostname
    #[serde(default)]
    pub host: String,

    /// Directory server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Whether to negotiate TLS when connecting
    #[serde(default = "default_use_tls")]
    pub use_tls: bool,

    /// Distinguished name used to bind
    #[serde(default)]
    pub bind_dn: String,

    /// Search base for account and group enumeration
    #[serde(default)]
    pub base_dn: String,

    /// Page size for directory paging
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl DirectoryConfig {
    /// Validate directory configuration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if self.page_size == 0 {
            return Err(ValidationError::InvalidPageSize);
        }
        Ok(())
    }
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: default_port(),
            use_tls: default_use_tls(),
            bind_dn: String::new(),
            base_dn: String::new(),
            page_size: default_page_size(),
        }
    }
}

fn default_port() -> u16 {
    636
}

fn default_use_tls() -> bool {
    true
}

fn default_page_size() -> u32 {
    500
}
