//! Configuration management using Figment
//!
//! Configuration is loaded from multiple sources with the following precedence (highest to lowest):
//! 1. Environment variables (prefix: PAGINATOR_)
//! 2. Current working directory: ./paginator.toml
//! 3. Default values
//!
//! ```toml
//! delimiter = "|"
//! null_sentinel = "::None"
//! max_page_size = 100
//! log_level = "info"
//! ```

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Default config file looked up by [`PaginatorConfig::load`]
pub const CONFIG_FILE: &str = "paginator.toml";

/// Prefix of environment variable overrides
pub const ENV_PREFIX: &str = "PAGINATOR_";

/// Separator between position values inside a decoded cursor
pub const DEFAULT_DELIMITER: &str = "|";

/// Stand-in for a null position value inside a decoded cursor
pub const DEFAULT_NULL_SENTINEL: &str = "::None";

/// Largest `first` / `last` accepted by default
pub const DEFAULT_MAX_PAGE_SIZE: usize = 100;

/// Paginator configuration
///
/// The delimiter and null sentinel must not occur in real (stringified) sort
/// values. This is not checked against data; pick values with enough margin
/// for the fields being paginated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginatorConfig {
    /// Separator between position values
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    /// Marker for a null position value
    #[serde(default = "default_null_sentinel")]
    pub null_sentinel: String,

    /// Largest page size a request may ask for
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,

    /// Log level (trace, debug, info, warn, error) or a full filter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_delimiter() -> String {
    DEFAULT_DELIMITER.to_string()
}

fn default_null_sentinel() -> String {
    DEFAULT_NULL_SENTINEL.to_string()
}

fn default_max_page_size() -> usize {
    DEFAULT_MAX_PAGE_SIZE
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for PaginatorConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            null_sentinel: default_null_sentinel(),
            max_page_size: default_max_page_size(),
            log_level: default_log_level(),
        }
    }
}

impl PaginatorConfig {
    /// Load configuration from `./paginator.toml` and the environment
    ///
    /// A missing file is not an error; defaults apply.
    pub fn load() -> Result<Self> {
        Self::load_from(CONFIG_FILE)
    }

    /// Load configuration from a specific file
    ///
    /// Environment variables (PAGINATOR_ prefix) still override the file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            tracing::info!("Loading paginator configuration from: {}", path.display());
        } else {
            tracing::debug!("No paginator config at {}, using defaults", path.display());
        }

        let config: Self = Self::figment(path).extract()?;
        config.validate()?;
        Ok(config)
    }

    fn figment(path: &Path) -> Figment {
        Figment::new()
            // Start with defaults
            .merge(Serialized::defaults(Self::default()))
            // Load from config file (if exists)
            .merge(Toml::file(path))
            // Override with environment variables
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Check the codec constants and limits for consistency
    pub fn validate(&self) -> Result<()> {
        if self.delimiter.is_empty() {
            return Err(config_error("delimiter must not be empty"));
        }
        if self.null_sentinel.is_empty() {
            return Err(config_error("null_sentinel must not be empty"));
        }
        if self.null_sentinel.contains(&self.delimiter) {
            return Err(config_error(format!(
                "null_sentinel {:?} must not contain the delimiter {:?}",
                self.null_sentinel, self.delimiter
            )));
        }
        if self.max_page_size == 0 {
            return Err(config_error("max_page_size must be at least 1"));
        }
        Ok(())
    }

    /// Override the delimiter
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Override the null sentinel
    #[must_use]
    pub fn with_null_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.null_sentinel = sentinel.into();
        self
    }

    /// Override the maximum page size
    #[must_use]
    pub fn with_max_page_size(mut self, max_page_size: usize) -> Self {
        self.max_page_size = max_page_size;
        self
    }
}

fn config_error(message: impl Into<String>) -> Error {
    Error::from(figment::Error::from(message.into()))
}
