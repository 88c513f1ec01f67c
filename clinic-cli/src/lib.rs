//! Clinic Desk command-line interface.
//!
//! - [`fields`] - validate values and inspect the constraint table
//! - [`search`] - ranked patient search against the clinic backend

pub mod cli;
pub mod error;
pub mod fields;
pub mod search;
pub mod table;

pub use cli::{Cli, Commands};
pub use error::CliError;
