//! Field constraint registry and validation engine
//!
//! `clinic-fields` decides, on every keystroke, whether a candidate value for
//! a form field should be committed and what warning (if any) to show. It
//! knows nothing about screens or forms; callers name a field, optionally the
//! entity it belongs to, and hand over the raw value.
//!
//! # Architecture
//!
//! - **Registry**: an immutable table of [`ConstraintDescriptor`]s grouped by
//!   [`Entity`], built once from an embedded YAML document
//! - **Validator**: a pure function over the registry returning a
//!   [`ValidationOutcome`]; it never panics and never errors
//! - **Blocking vs. non-blocking**: excess length and illegal characters are
//!   rejected, range/format problems are accepted with a warning
//! - **Input helpers**: numeric filtering and fixed-pattern text validators
//!   that share the same blocking/warning split

pub mod error;
pub mod input;
pub mod registry;
pub mod types;
pub mod validation;

pub use error::{FieldsError, Result};
pub use input::{
    filter_numeric_input, is_valid_numeric_input, validate_description, validate_name,
    validate_text,
};
pub use registry::ConstraintRegistry;
pub use types::{ConstraintDescriptor, Entity, FieldKind, Pattern, ValidationOutcome};
pub use validation::{
    coerce_value, label_of, max_length_of, validate_field, FieldValidator, ValidateOptions,
};
