//! Configuration management for the record viewer.
//!
//! Settings live in a single TOML file under the platform configuration
//! directory. A missing file means defaults.

mod settings;

use std::path::PathBuf;

use thiserror::Error;

pub use settings::Settings;

/// Directory name under the platform configuration directory.
pub const APP_DIR: &str = "record-table";

/// Settings file name.
pub const CONFIG_FILE: &str = "config.toml";

/// Errors raised while reading or writing settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine configuration directory")]
    NoConfigDir,

    #[error("could not create configuration directory: {0}")]
    CreateDirError(#[source] std::io::Error),

    #[error("could not read configuration file: {0}")]
    ReadError(#[source] std::io::Error),

    #[error("could not write configuration file: {0}")]
    WriteError(#[source] std::io::Error),

    #[error("invalid configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("could not serialize configuration: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("{0}")]
    ValidationError(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// The configuration directory, e.g. `~/.config/record-table` on Linux.
pub fn config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR))
        .ok_or(ConfigError::NoConfigDir)
}

/// The default settings file path.
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path_has_expected_structure() {
        let path = config_path().unwrap();
        assert!(path.ends_with("record-table/config.toml"));
    }

    #[test]
    fn test_validation_error_displays_message() {
        let err = ConfigError::ValidationError("double_click_ms must be positive".to_string());
        assert_eq!(err.to_string(), "double_click_ms must be positive");
    }
}
