//! Application error types.
//!
//! The table itself has no failure modes; these errors cover the viewer
//! around it: reading settings, loading records, and driving the terminal.

use thiserror::Error;

use crate::config::ConfigError;

/// The main application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// IO errors (file system, etc.).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Record data that is not a JSON array of objects.
    #[error("Invalid record data: {0}")]
    Data(#[from] serde_json::Error),

    /// Terminal-related errors.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Generic errors with a message.
    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// Create a terminal error.
    pub fn terminal(msg: impl Into<String>) -> Self {
        AppError::Terminal(msg.into())
    }

    /// Create a generic error.
    pub fn other(msg: impl Into<String>) -> Self {
        AppError::Other(msg.into())
    }

    /// Get a user-friendly message for display.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::NoConfigDir => {
                    "Could not find configuration directory. Please check your system settings."
                        .to_string()
                }
                ConfigError::CreateDirError(_) => {
                    "Could not create configuration directory. Check file permissions.".to_string()
                }
                ConfigError::ReadError(_) => {
                    "Could not read configuration file. Please check the file exists and is readable.".to_string()
                }
                ConfigError::WriteError(_) => {
                    "Could not save configuration. Please check file permissions.".to_string()
                }
                ConfigError::ParseError(_) => {
                    "Configuration file is invalid. Please check the file format.".to_string()
                }
                ConfigError::SerializeError(_) => {
                    "Could not save configuration. Internal error.".to_string()
                }
                ConfigError::ValidationError(msg) => format!("Configuration error: {}", msg),
            },
            AppError::Io(_) => "A file operation failed. Please check file permissions.".to_string(),
            AppError::Data(e) => format!("Could not read records: {}", e),
            AppError::Terminal(msg) => format!("Terminal error: {}", msg),
            AppError::Other(msg) => msg.clone(),
        }
    }

    /// Check if this error is critical and prevents the viewer from starting.
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            AppError::Config(_) | AppError::Data(_) | AppError::Terminal(_)
        )
    }

    /// Get a suggested action for the user.
    pub fn suggested_action(&self) -> Option<&'static str> {
        match self {
            AppError::Config(ConfigError::ParseError(_))
            | AppError::Config(ConfigError::ValidationError(_)) => {
                Some("Fix or remove the configuration file, or pass another one with --config.")
            }
            AppError::Data(_) => Some("The input file must contain a JSON array of objects."),
            _ => None,
        }
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_from_config_error() {
        let config_err = ConfigError::NoConfigDir;
        let app_err: AppError = config_err.into();
        assert!(matches!(app_err, AppError::Config(ConfigError::NoConfigDir)));
    }

    #[test]
    fn test_app_error_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let app_err: AppError = json_err.into();
        assert!(matches!(app_err, AppError::Data(_)));
        assert!(app_err.user_message().starts_with("Could not read records"));
        assert!(app_err.is_critical());
    }

    #[test]
    fn test_user_message_config_validation() {
        let err = AppError::Config(ConfigError::ValidationError(
            "rows_per_page_options must not be empty".to_string(),
        ));
        let msg = err.user_message();
        assert!(msg.contains("rows_per_page_options"));
    }

    #[test]
    fn test_is_critical_config() {
        let err = AppError::Config(ConfigError::NoConfigDir);
        assert!(err.is_critical());
    }

    #[test]
    fn test_io_error_not_critical() {
        let err = AppError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        assert!(!err.is_critical());
        assert!(err.suggested_action().is_none());
    }

    #[test]
    fn test_suggested_action_data() {
        let json_err = serde_json::from_str::<serde_json::Value>("[").unwrap_err();
        let action = AppError::Data(json_err).suggested_action();
        assert!(action.unwrap().contains("JSON array"));
    }

    #[test]
    fn test_terminal_error() {
        let err = AppError::terminal("test error");
        assert!(matches!(err, AppError::Terminal(_)));
        assert_eq!(err.user_message(), "Terminal error: test error");
    }

    #[test]
    fn test_other_error() {
        let err = AppError::other("something went wrong");
        assert!(matches!(err, AppError::Other(_)));
        assert_eq!(err.user_message(), "something went wrong");
    }
}
