//! Error types for fetching member records.

use thiserror::Error;

/// Errors that can occur while fetching the record collection.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The source requires credentials we do not have.
    #[error("Authentication required by the record source")]
    Unauthorized,

    /// The source refused access.
    #[error("Access denied by the record source")]
    Forbidden,

    /// The resource does not exist.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Rate limited by the source.
    #[error("Rate limited: please wait before retrying")]
    RateLimited,

    /// Server-side or otherwise unexpected HTTP failure.
    #[error("Server error: {0}")]
    ServerError(String),

    /// Network or HTTP transport error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The configured URL cannot be used.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The body was not a JSON array of flat objects.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Result type for fetch operations.
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Create an error from an HTTP status code.
    pub fn from_status(status: reqwest::StatusCode, context: &str) -> Self {
        match status.as_u16() {
            401 => ApiError::Unauthorized,
            403 => ApiError::Forbidden,
            404 => ApiError::NotFound(context.to_string()),
            429 => ApiError::RateLimited,
            500..=599 => ApiError::ServerError(format!("HTTP {}: {}", status, context)),
            _ => ApiError::ServerError(format!("Unexpected HTTP {}: {}", status, context)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_error_from_status_403() {
        let err = ApiError::from_status(StatusCode::FORBIDDEN, "members.json");
        assert!(matches!(err, ApiError::Forbidden));
    }

    #[test]
    fn test_error_from_status_404() {
        let err = ApiError::from_status(StatusCode::NOT_FOUND, "members.json");
        match err {
            ApiError::NotFound(msg) => assert_eq!(msg, "members.json"),
            _ => panic!("Expected NotFound error"),
        }
    }

    #[test]
    fn test_error_from_status_429() {
        let err = ApiError::from_status(StatusCode::TOO_MANY_REQUESTS, "test");
        assert!(matches!(err, ApiError::RateLimited));
    }

    #[test]
    fn test_error_from_status_502() {
        let err = ApiError::from_status(StatusCode::BAD_GATEWAY, "test");
        assert!(matches!(err, ApiError::ServerError(_)));
    }

    #[test]
    fn test_error_from_unexpected_status() {
        let err = ApiError::from_status(StatusCode::IM_A_TEAPOT, "test");
        assert!(err.to_string().contains("Unexpected HTTP 418"));
    }
}
