//! Centralized error types for membertable.
//!
//! This module provides a unified error hierarchy for the application with
//! user-friendly error messages.

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;

/// The main application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Errors fetching the member list.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// IO errors (file system, terminal streams).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal-related errors.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl AppError {
    /// Create a terminal error.
    pub fn terminal(msg: impl Into<String>) -> Self {
        AppError::Terminal(msg.into())
    }

    /// Get a user-friendly message for display.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::NoConfigDir => {
                    "Could not find configuration directory. Please check your system settings."
                        .to_string()
                }
                ConfigError::ReadError(_) => {
                    "Could not read configuration file. Please check it is readable.".to_string()
                }
                ConfigError::ParseError(_) => {
                    "Configuration file is invalid. Please check the file format.".to_string()
                }
                ConfigError::ValidationError(msg) => format!("Configuration error: {}", msg),
            },
            AppError::Api(e) => match e {
                ApiError::Unauthorized | ApiError::Forbidden => {
                    "The member list source refused access.".to_string()
                }
                ApiError::NotFound(resource) => format!("'{}' was not found.", resource),
                ApiError::RateLimited => "Too many requests. Please try again later.".to_string(),
                ApiError::ServerError(_) => "The member list source failed.".to_string(),
                ApiError::Network(_) => {
                    "Connection failed. Please check your internet connection.".to_string()
                }
                ApiError::InvalidUrl(url) => format!("'{}' is not a usable URL.", url),
                ApiError::InvalidResponse(_) => {
                    "The member list is not a JSON array of records.".to_string()
                }
            },
            AppError::Io(_) => "An IO operation failed.".to_string(),
            AppError::Terminal(msg) => format!("Terminal error: {}", msg),
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
        let app_err: AppError = ConfigError::NoConfigDir.into();
        assert!(matches!(app_err, AppError::Config(ConfigError::NoConfigDir)));
    }

    #[test]
    fn test_app_error_from_api_error() {
        let app_err: AppError = ApiError::Forbidden.into();
        assert!(matches!(app_err, AppError::Api(ApiError::Forbidden)));
    }

    #[test]
    fn test_user_message_not_found() {
        let err = AppError::Api(ApiError::NotFound("members.json".to_string()));
        let msg = err.user_message();
        assert!(msg.contains("members.json"));
        assert!(msg.contains("not found"));
    }

    #[test]
    fn test_user_message_config_validation() {
        let err = AppError::Config(ConfigError::ValidationError(
            "source_url cannot be empty".to_string(),
        ));
        assert!(err.user_message().contains("source_url cannot be empty"));
    }

    #[test]
    fn test_terminal_error() {
        let err = AppError::terminal("raw mode unavailable");
        assert!(matches!(err, AppError::Terminal(_)));
        assert_eq!(err.user_message(), "Terminal error: raw mode unavailable");
    }
}
