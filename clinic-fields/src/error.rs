//! Error types for the constraint registry

use std::path::PathBuf;

use clinic_common::{ErrorSeverity, Severity};
use thiserror::Error;

/// Result type for fields operations
pub type Result<T> = std::result::Result<T, FieldsError>;

/// Errors that can occur while building a constraint registry.
///
/// Validation itself has no error path; these only arise when naming an
/// entity from text or loading a constraint table.
#[derive(Debug, Error)]
pub enum FieldsError {
    /// Entity group name not recognised
    #[error("unknown entity: {name}")]
    UnknownEntity { name: String },

    /// Constraint table file could not be read
    #[error("cannot read constraint table {path}: {source}")]
    ReadTable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML deserialization error (includes invalid patterns)
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Severity for FieldsError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            FieldsError::UnknownEntity { .. } => ErrorSeverity::Error,
            FieldsError::ReadTable { .. } => ErrorSeverity::Critical,
            FieldsError::Yaml(_) => ErrorSeverity::Critical,
        }
    }
}
