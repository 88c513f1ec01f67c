//! Errors surfaced by `clinic` commands.

use clinic_common::{ErrorSeverity, Severity};
use clinic_fields::FieldsError;
use clinic_patient_search::{ConfigError, SearchError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Fields(#[from] FieldsError),

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Severity for CliError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            CliError::Fields(e) => e.severity(),
            CliError::Search(e) => e.severity(),
            CliError::Config(_) => ErrorSeverity::Critical,
            CliError::Json(_) | CliError::Yaml(_) => ErrorSeverity::Error,
        }
    }
}
