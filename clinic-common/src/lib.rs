//! # Clinic Desk Common
//!
//! Foundational pieces shared by the Clinic Desk crates:
//!
//! - [`error`] - the severity taxonomy every crate-level error enum reports
//! - [`logging`] - helpers for rendering structured values inside log lines

pub mod error;
pub mod logging;

pub use error::{ErrorSeverity, Severity};
pub use logging::Pretty;
