//! Severity taxonomy for Clinic Desk errors
//!
//! Every crate defines its own `thiserror` enum; this module gives them a
//! shared way to say how bad a failure is so callers can pick a log level
//! and decide whether to surface it to the user.

/// Severity levels for error classification
///
/// - **Warning**: Potential issue but operation can proceed. A best-effort
///   step failed and the caller continues with a reduced result.
/// - **Error**: Operation failed but the system can continue.
/// - **Critical**: System cannot continue, requires immediate attention.
///
/// # Examples
///
/// ```rust
/// use clinic_common::ErrorSeverity;
///
/// // Warning: a fallback search failed, the primary result still stands
/// let widening_failed = ErrorSeverity::Warning;
///
/// // Error: the backend rejected the request
/// let rejected = ErrorSeverity::Error;
///
/// // Critical: the constraint table on disk cannot be parsed
/// let broken_table = ErrorSeverity::Critical;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Potential issue but operation can proceed
    Warning,

    /// Operation failed but system can continue
    ///
    /// # Examples
    /// - Backend returned a non-success status
    /// - Response body could not be decoded
    Error,

    /// System cannot continue, requires immediate attention
    ///
    /// # Examples
    /// - Invalid constraint table
    /// - Invalid configuration
    Critical,
}

/// Trait for error types that have severity levels
///
/// # Example
///
/// ```rust
/// use clinic_common::{ErrorSeverity, Severity};
///
/// #[derive(Debug)]
/// enum LookupError {
///     TableCorrupted,
///     Timeout,
/// }
///
/// impl Severity for LookupError {
///     fn severity(&self) -> ErrorSeverity {
///         match self {
///             LookupError::TableCorrupted => ErrorSeverity::Critical,
///             LookupError::Timeout => ErrorSeverity::Error,
///         }
///     }
/// }
///
/// assert_eq!(LookupError::Timeout.severity(), ErrorSeverity::Error);
/// ```
pub trait Severity {
    /// Get the severity level of this error
    fn severity(&self) -> ErrorSeverity;

    /// Whether the failure should stop the current command
    fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }
}
