//! Dispatch configuration (jinvoke.toml)
//!
//! ```toml
//! unbox_arguments = false
//! global_results = false
//!
//! [loader]
//! class = "java/lang/ClassLoader"
//! factory = "getSystemClassLoader"
//! ```

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Validation error
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Behavior switches for resolution and dispatch
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BridgeConfig {
    /// Let a boxed primitive argument match the primitive parameter it
    /// unboxes to. Off by default: only the runtime's assignability
    /// relation decides, so primitive parameters are never matched.
    #[serde(default)]
    pub unbox_arguments: bool,

    /// Promote every reference result of a dispatched call to a global
    /// reference
    #[serde(default)]
    pub global_results: bool,

    /// Where `Env::load_class` gets its class loader
    #[serde(default)]
    pub loader: LoaderConfig,
}

/// Class loader source: a static zero-argument factory method
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LoaderConfig {
    /// Slash-separated class declaring the factory
    #[serde(default = "default_loader_class")]
    pub class: String,

    /// Static method returning the loader
    #[serde(default = "default_loader_factory")]
    pub factory: String,
}

fn default_loader_class() -> String {
    "java/lang/ClassLoader".to_string()
}

fn default_loader_factory() -> String {
    "getSystemClassLoader".to_string()
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            class: default_loader_class(),
            factory: default_loader_factory(),
        }
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            unbox_arguments: false,
            global_results: false,
            loader: LoaderConfig::default(),
        }
    }
}

impl BridgeConfig {
    /// Load a configuration from a file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: BridgeConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.loader.class.is_empty() || self.loader.class.contains('.') {
            return Err(ConfigError::ValidationError(format!(
                "loader.class must be a slash-separated class name, got \"{}\"",
                self.loader.class
            )));
        }
        if self.loader.factory.is_empty() {
            return Err(ConfigError::ValidationError(
                "loader.factory cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
