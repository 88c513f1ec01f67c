//! Patient match ranking
//!
//! The backend patient search is a coarse full-text match returning a large
//! page of rows. This crate re-filters that page with name-aware and
//! contact-aware token matching, scores every survivor and returns them in
//! relevance order, ready for display.
//!
//! - [`rank`] - the synchronous filter-then-score pipeline
//! - [`search`] - the per-word fallback widening and the [`PatientSearch`] entry point
//! - [`backend`] - the backend seam and its HTTP implementation
//! - [`config`] - figment-backed settings for the HTTP backend
//!
//! Callers own cancellation: when a newer query supersedes an in-flight
//! search, its result must be discarded by the caller.

pub mod backend;
pub mod config;
pub mod error;
pub mod rank;
pub mod search;
pub mod types;

pub use backend::{HttpPatientBackend, PatientSearchBackend};
pub use config::{ConfigError, SearchConfig};
pub use error::{Result, SearchError};
pub use rank::{rank, SearchQuery};
pub use search::{merge_unique, rank_with_fallback, PatientSearch};
pub use types::{PatientCandidate, PatientPage, RankedResult};
