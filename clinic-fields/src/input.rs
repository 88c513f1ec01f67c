//! Registry-independent input helpers.
//!
//! Numeric filtering for masked inputs, plus small text validators for
//! screens that validate a value against a fixed rule instead of a
//! registry entry. They follow the same split as the main validator: too
//! long or illegal characters block, reaching the limit warns.

use std::sync::OnceLock;

use regex::Regex;

use crate::types::{Pattern, ValidationOutcome};
use crate::validation::{length_message, INVALID_FORMAT};

static NUMERIC_INPUT: OnceLock<Regex> = OnceLock::new();
static NAME_PATTERN: OnceLock<Pattern> = OnceLock::new();

fn numeric_input() -> &'static Regex {
    NUMERIC_INPUT.get_or_init(|| Regex::new(r"^[0-9]*\.?[0-9]*$").expect("Invalid numeric regex"))
}

fn name_pattern() -> &'static Pattern {
    NAME_PATTERN.get_or_init(|| Pattern::new(r"^[a-zA-Z\s\-'.]*$").expect("Invalid name regex"))
}

/// Strip everything but ASCII digits, keeping the first decimal point when
/// `allow_decimal` is set.
///
/// ```rust
/// use clinic_fields::filter_numeric_input;
///
/// assert_eq!(filter_numeric_input("1a2.3.4", true), "12.34");
/// assert_eq!(filter_numeric_input("1a2.3.4", false), "1234");
/// ```
pub fn filter_numeric_input(value: &str, allow_decimal: bool) -> String {
    let mut seen_point = false;
    value
        .chars()
        .filter(|c| match c {
            '0'..='9' => true,
            '.' if allow_decimal && !seen_point => {
                seen_point = true;
                true
            }
            _ => false,
        })
        .collect()
}

/// Whether a value is a (possibly partial) unsigned ASCII decimal: `""`, `"12"`,
/// `"12."` and `".5"` all qualify.
pub fn is_valid_numeric_input(value: &str) -> bool {
    numeric_input().is_match(value)
}

/// Validate a person or place name: letters, spaces, hyphens, apostrophes
/// and periods only.
pub fn validate_name(value: &str, max_length: usize, label: &str) -> ValidationOutcome {
    let length = value.chars().count();
    if length > max_length {
        return ValidationOutcome::block(length_message(label, max_length));
    }
    if !name_pattern().is_full_match(value) {
        return ValidationOutcome::block(format!(
            "{label} can only contain letters, spaces, hyphens, apostrophes and periods"
        ));
    }
    at_limit(length, max_length, label)
}

/// Validate free text where only the length matters.
pub fn validate_description(value: &str, max_length: usize, label: &str) -> ValidationOutcome {
    validate_text(value, max_length, label, None)
}

/// Validate text against an optional caller-supplied pattern.
pub fn validate_text(
    value: &str,
    max_length: usize,
    label: &str,
    pattern: Option<&Pattern>,
) -> ValidationOutcome {
    let length = value.chars().count();
    if length > max_length {
        return ValidationOutcome::block(length_message(label, max_length));
    }
    if pattern.is_some_and(|p| !p.is_full_match(value)) {
        return ValidationOutcome::block(INVALID_FORMAT);
    }
    at_limit(length, max_length, label)
}

fn at_limit(length: usize, max_length: usize, label: &str) -> ValidationOutcome {
    if length == max_length {
        ValidationOutcome::warn(length_message(label, max_length))
    } else {
        ValidationOutcome::accept()
    }
}
