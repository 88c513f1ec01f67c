//! Keystroke validation against the constraint registry.
//!
//! [`FieldValidator::validate`] decides whether a candidate value may be
//! committed. Excess length and illegal characters block the edit; an
//! out-of-range number, a value sitting exactly at the length limit, a
//! malformed email or a short mobile number only produce a warning, since the
//! user may still be typing.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;
use tracing::trace;

use crate::registry::ConstraintRegistry;
use crate::types::{ConstraintDescriptor, Entity, ValidationOutcome};

pub(crate) const INVALID_FORMAT: &str = "Invalid format";
const ONLY_NUMBERS: &str = "Only numbers are allowed";
const INVALID_EMAIL: &str = "Invalid email format";
const SHORT_MOBILE: &str = "Mobile number must be 10 digits";

/// Fields that get the 10-digit mobile warning.
const MOBILE_FIELDS: [&str; 3] = ["mobileNumber", "mobile1", "mobile2"];
const MOBILE_LENGTH: usize = 10;

static DIGITS_ONLY: OnceLock<Regex> = OnceLock::new();
static EMAIL_SHAPE: OnceLock<Regex> = OnceLock::new();
static LEADING_NUMBER: OnceLock<Regex> = OnceLock::new();

fn digits_only() -> &'static Regex {
    DIGITS_ONLY.get_or_init(|| Regex::new(r"^[0-9]*$").expect("Invalid digits regex"))
}

fn email_shape() -> &'static Regex {
    EMAIL_SHAPE
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex"))
}

fn leading_number() -> &'static Regex {
    LEADING_NUMBER.get_or_init(|| {
        Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)").expect("Invalid leading number regex")
    })
}

/// Parse the leading decimal number of a value (`"12abc"` is 12).
/// `None` when the value does not start with a number.
pub(crate) fn parse_number(value: &str) -> Option<f64> {
    leading_number()
        .find(value.trim_start())
        .and_then(|m| m.as_str().parse().ok())
}

pub(crate) fn length_message(label: &str, max_length: usize) -> String {
    format!("{label} cannot exceed {max_length} characters")
}

fn range_message(label: &str, min: f64, max: f64) -> String {
    format!("{label} must be between {min} and {max}")
}

fn out_of_range(number: f64, (min, max): (f64, f64)) -> bool {
    number < min || number > max
}

/// Per-call overrides for [`FieldValidator::validate`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidateOptions {
    /// Replaces the descriptor's `maxLength`.
    pub max_length: Option<usize>,
    /// Replaces the descriptor's label in messages.
    pub label: Option<String>,
    /// Restricts the lookup to one entity group.
    pub entity: Option<Entity>,
}

impl ValidateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn entity(mut self, entity: Entity) -> Self {
        self.entity = Some(entity);
        self
    }
}

/// Validates candidate field values against a [`ConstraintRegistry`].
#[derive(Debug, Clone, Copy)]
pub struct FieldValidator<'r> {
    registry: &'r ConstraintRegistry,
}

impl FieldValidator<'static> {
    /// Validator over the built-in constraint table.
    pub fn builtin() -> Self {
        Self::new(ConstraintRegistry::builtin())
    }
}

impl<'r> FieldValidator<'r> {
    pub fn new(registry: &'r ConstraintRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r ConstraintRegistry {
        self.registry
    }

    /// Decide whether `value` may be committed to `field`.
    ///
    /// Fields without a resolved max length accept anything. Checks run in
    /// order and the first blocking failure wins: length (reported as a range
    /// problem when the over-long number is out of range), then the explicit
    /// pattern or, for numbers without one, digits only. A passing value may
    /// still carry one warning.
    pub fn validate(&self, field: &str, value: &str, options: &ValidateOptions) -> ValidationOutcome {
        let descriptor = self.registry.lookup(field, options.entity);
        let max_length = options
            .max_length
            .or_else(|| descriptor.and_then(|d| d.max_length));
        let label = options
            .label
            .as_deref()
            .or_else(|| descriptor.map(|d| d.label.as_str()))
            .unwrap_or(field);

        let Some(max_length) = max_length else {
            return ValidationOutcome::accept();
        };

        let length = value.chars().count();

        if length > max_length {
            if let Some(range) = descriptor.and_then(ConstraintDescriptor::range) {
                let truncated: String = value.chars().take(max_length).collect();
                if parse_number(&truncated).is_some_and(|n| out_of_range(n, range)) {
                    trace!(field, "blocked: over-long value out of range");
                    return ValidationOutcome::block(range_message(label, range.0, range.1));
                }
            }
            trace!(field, length, max_length, "blocked: too long");
            return ValidationOutcome::block(length_message(label, max_length));
        }

        if let Some(descriptor) = descriptor {
            if let Some(pattern) = descriptor.pattern() {
                if !pattern.is_full_match(value) {
                    trace!(field, "blocked: pattern mismatch");
                    return ValidationOutcome::block(INVALID_FORMAT);
                }
            } else if descriptor.is_numeric() && !digits_only().is_match(value) {
                trace!(field, "blocked: non-digit input");
                return ValidationOutcome::block(ONLY_NUMBERS);
            }
        }

        match warning(field, value, length, max_length, label, descriptor) {
            Some(message) => ValidationOutcome::warn(message),
            None => ValidationOutcome::accept(),
        }
    }

    /// Validate a loosely typed value, coercing it with [`coerce_value`].
    pub fn validate_json(
        &self,
        field: &str,
        value: &Value,
        options: &ValidateOptions,
    ) -> ValidationOutcome {
        self.validate(field, &coerce_value(value), options)
    }

    /// Effective max length of a field, if any.
    pub fn max_length_of(&self, field: &str, entity: Option<Entity>) -> Option<usize> {
        self.registry.lookup(field, entity)?.max_length
    }

    /// Human label of a field, falling back to the field name.
    pub fn label_of(&self, field: &str) -> String {
        self.registry
            .lookup(field, None)
            .map(|d| d.label.clone())
            .unwrap_or_else(|| field.to_string())
    }
}

/// The first applicable non-blocking warning for an accepted value.
fn warning(
    field: &str,
    value: &str,
    length: usize,
    max_length: usize,
    label: &str,
    descriptor: Option<&ConstraintDescriptor>,
) -> Option<String> {
    if let Some(d) = descriptor.filter(|d| d.is_numeric() && !value.is_empty()) {
        if let Some(range) = d.range() {
            if parse_number(value).is_some_and(|n| out_of_range(n, range)) {
                return Some(range_message(label, range.0, range.1));
            }
        }
    }

    // a complete mobile number sits exactly at its limit. Taken in plain
    // order the at-limit warning would fire for every complete number, yet
    // "1234567890" on mobile1 must carry no message, so for these fields the
    // short-mobile rule below replaces the at-limit warning entirely
    let mobile_rule = MOBILE_FIELDS.contains(&field) && max_length == MOBILE_LENGTH;

    if length == max_length && !mobile_rule {
        return Some(length_message(label, max_length));
    }

    if descriptor.is_some_and(ConstraintDescriptor::is_email)
        && !value.is_empty()
        && !email_shape().is_match(value)
    {
        return Some(INVALID_EMAIL.to_string());
    }

    if mobile_rule && !value.is_empty() && length < MOBILE_LENGTH {
        return Some(SHORT_MOBILE.to_string());
    }

    None
}

/// String form of a loosely typed input value.
///
/// `null` becomes empty, booleans and numbers stringify, arrays join their
/// items with commas and objects render as `[object Object]`.
pub fn coerce_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(coerce_value)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Validate against the built-in registry.
pub fn validate_field(
    field: &str,
    value: &str,
    custom_max_length: Option<usize>,
    custom_label: Option<&str>,
    entity: Option<Entity>,
) -> ValidationOutcome {
    let options = ValidateOptions {
        max_length: custom_max_length,
        label: custom_label.map(str::to_string),
        entity,
    };
    FieldValidator::builtin().validate(field, value, &options)
}

/// Max length of a built-in field.
pub fn max_length_of(field: &str, entity: Option<Entity>) -> Option<usize> {
    FieldValidator::builtin().max_length_of(field, entity)
}

/// Label of a built-in field, or the field name when undeclared.
pub fn label_of(field: &str) -> String {
    FieldValidator::builtin().label_of(field)
}
