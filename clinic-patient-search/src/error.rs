//! Error types for patient search

use clinic_common::{ErrorSeverity, Severity};
use thiserror::Error;

use crate::config::ConfigError;

/// Result type for patient search operations
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors from fetching patient candidates.
///
/// Ranking never fails; only the backend fetch and its configuration do.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Network or connection failure
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// Response body was not the expected JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Backend settings could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Any other backend failure
    #[error("backend error: {0}")]
    Backend(String),
}

impl Severity for SearchError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            SearchError::Config(_) => ErrorSeverity::Critical,
            SearchError::Http(_)
            | SearchError::Api { .. }
            | SearchError::Json(_)
            | SearchError::Backend(_) => ErrorSeverity::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = SearchError::Api {
            status: 503,
            body: "maintenance".into(),
        };
        assert_eq!(err.to_string(), "API error (503): maintenance");
        assert_eq!(err.severity(), ErrorSeverity::Error);
        assert!(!err.is_critical());
    }

    #[test]
    fn test_config_error_is_critical() {
        let err = SearchError::from(ConfigError::UnsupportedFormat {
            path: "clinic.ini".into(),
        });
        assert!(err.is_critical());
        assert!(err.to_string().contains("clinic.ini"));
    }
}
