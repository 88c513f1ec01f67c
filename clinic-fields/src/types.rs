//! Core constraint types for the field registry.
//!
//! Constraint descriptors serialize to/from YAML via serde. A descriptor
//! names a field's label, its optional maximum length and its kind; only the
//! numeric kind can carry a range.

use std::fmt;
use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::FieldsError;

/// Entity group a field belongs to.
///
/// Groups keep same-named fields of different screens apart: `priority` on a
/// complaint is a different constraint from `priority` on a lab test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Entity {
    Patient,
    Visit,
    ReferralDoctor,
    Lab,
    Complaint,
    Diagnosis,
    Medicine,
    Procedure,
    LabMaster,
    Billing,
    PrescriptionCategory,
    PrescriptionSubCategory,
    PrescriptionDetails,
}

impl Entity {
    /// Every entity, in the order an entity-less lookup scans them.
    pub const ALL: [Entity; 13] = [
        Entity::Patient,
        Entity::Visit,
        Entity::ReferralDoctor,
        Entity::Lab,
        Entity::Complaint,
        Entity::Diagnosis,
        Entity::Medicine,
        Entity::Procedure,
        Entity::LabMaster,
        Entity::Billing,
        Entity::PrescriptionCategory,
        Entity::PrescriptionSubCategory,
        Entity::PrescriptionDetails,
    ];

    /// The camelCase group name used in constraint tables.
    pub fn as_str(&self) -> &'static str {
        match self {
            Entity::Patient => "patient",
            Entity::Visit => "visit",
            Entity::ReferralDoctor => "referralDoctor",
            Entity::Lab => "lab",
            Entity::Complaint => "complaint",
            Entity::Diagnosis => "diagnosis",
            Entity::Medicine => "medicine",
            Entity::Procedure => "procedure",
            Entity::LabMaster => "labMaster",
            Entity::Billing => "billing",
            Entity::PrescriptionCategory => "prescriptionCategory",
            Entity::PrescriptionSubCategory => "prescriptionSubCategory",
            Entity::PrescriptionDetails => "prescriptionDetails",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Entity {
    type Err = FieldsError;

    /// Parse a group name, ignoring ASCII case (`labMaster`, `labmaster`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Entity::ALL
            .into_iter()
            .find(|entity| entity.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| FieldsError::UnknownEntity { name: s.into() })
    }
}

/// A compiled character-set pattern that must match a whole value.
///
/// The source expression is kept for display and serialization; matching
/// always anchors both ends regardless of how the source was written.
/// `\d` and `\w` (and their negations) are ASCII classes, so `\d` never
/// admits Arabic-Indic or Devanagari digits.
#[derive(Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    pub fn new(source: &str) -> std::result::Result<Self, regex::Error> {
        let regex = Regex::new(&format!("^(?:{})$", ascii_classes(source)))?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    /// The expression as written in the constraint table.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether the entire value matches.
    pub fn is_full_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

/// Replace the Unicode-aware `\d`, `\D`, `\w` and `\W` escapes with ASCII
/// classes. Nested classes are valid inside `[...]`, so the replacement
/// works there too.
fn ascii_classes(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('d') => out.push_str("[0-9]"),
            Some('D') => out.push_str("[^0-9]"),
            Some('w') => out.push_str("[0-9A-Za-z_]"),
            Some('W') => out.push_str("[^0-9A-Za-z_]"),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.source).finish()
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

impl<'de> Deserialize<'de> for Pattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        Pattern::new(&source)
            .map_err(|e| serde::de::Error::custom(format!("invalid pattern '{source}': {e}")))
    }
}

/// The kind of a field. Governs the default checks applied to its value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FieldKind {
    Text {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pattern: Option<Pattern>,
    },
    Email {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pattern: Option<Pattern>,
    },
    #[serde(rename = "textarea")]
    TextArea {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pattern: Option<Pattern>,
    },
    /// Digits only unless an explicit pattern says otherwise. The range is
    /// inclusive and only enforced when both bounds are present.
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pattern: Option<Pattern>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
}

/// Constraint descriptor for one field of one entity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintDescriptor {
    pub label: String,
    /// Absent means the field is unconstrained.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl ConstraintDescriptor {
    /// Explicit pattern, whatever the kind.
    pub fn pattern(&self) -> Option<&Pattern> {
        match &self.kind {
            FieldKind::Text { pattern }
            | FieldKind::Email { pattern }
            | FieldKind::TextArea { pattern }
            | FieldKind::Number { pattern, .. } => pattern.as_ref(),
        }
    }

    /// Inclusive `(min, max)` when this is a number field declaring both bounds.
    pub fn range(&self) -> Option<(f64, f64)> {
        match self.kind {
            FieldKind::Number {
                min: Some(min),
                max: Some(max),
                ..
            } => Some((min, max)),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self.kind, FieldKind::Number { .. })
    }

    pub fn is_email(&self) -> bool {
        matches!(self.kind, FieldKind::Email { .. })
    }
}

/// Result of validating one candidate edit.
///
/// `allowed` tells the caller whether to commit the value; `message` is empty
/// when there is nothing to show, otherwise a warning (allowed) or the reason
/// the edit was refused (not allowed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub allowed: bool,
    pub message: String,
}

impl ValidationOutcome {
    /// Accept with nothing to report.
    pub fn accept() -> Self {
        Self {
            allowed: true,
            message: String::new(),
        }
    }

    /// Accept but surface a warning.
    pub fn warn(message: impl Into<String>) -> Self {
        Self {
            allowed: true,
            message: message.into(),
        }
    }

    /// Refuse the edit.
    pub fn block(message: impl Into<String>) -> Self {
        Self {
            allowed: false,
            message: message.into(),
        }
    }

    pub fn is_blocking(&self) -> bool {
        !self.allowed
    }

    pub fn has_message(&self) -> bool {
        !self.message.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_parses_group_names() {
        assert_eq!("labMaster".parse::<Entity>().unwrap(), Entity::LabMaster);
        assert_eq!("LABMASTER".parse::<Entity>().unwrap(), Entity::LabMaster);
        assert_eq!(
            "prescriptionSubCategory".parse::<Entity>().unwrap(),
            Entity::PrescriptionSubCategory
        );
        assert!(matches!(
            "invoice".parse::<Entity>(),
            Err(FieldsError::UnknownEntity { .. })
        ));
    }

    #[test]
    fn entity_serde_matches_as_str() {
        for entity in Entity::ALL {
            let yaml = serde_yaml::to_string(&entity).unwrap();
            assert_eq!(yaml.trim(), entity.as_str());
            let parsed: Entity = serde_yaml::from_str(entity.as_str()).unwrap();
            assert_eq!(parsed, entity);
        }
    }

    #[test]
    fn pattern_matches_whole_value_only() {
        let digits = Pattern::new(r"\d+").unwrap();
        assert!(digits.is_full_match("123"));
        assert!(!digits.is_full_match("12a"));
        assert!(!digits.is_full_match("a12"));

        // already-anchored sources behave the same
        let anchored = Pattern::new(r"^[a-z]*$").unwrap();
        assert!(anchored.is_full_match(""));
        assert!(!anchored.is_full_match("abc1"));
    }

    #[test]
    fn pattern_digit_classes_are_ascii() {
        let decimal = Pattern::new(r"^\d*\.?\d*$").unwrap();
        assert!(decimal.is_full_match("98.6"));
        assert!(!decimal.is_full_match("٩٨"));
        assert!(!decimal.is_full_match("९८.६"));

        // inside a character class as well
        let mixed = Pattern::new(r"[\d/]*").unwrap();
        assert!(mixed.is_full_match("120/80"));
        assert!(!mixed.is_full_match("١٢٠/٨٠"));

        let word = Pattern::new(r"\w+").unwrap();
        assert!(word.is_full_match("CBC_1"));
        assert!(!word.is_full_match("é"));
        assert!(Pattern::new(r"\W").unwrap().is_full_match("é"));
        assert!(Pattern::new(r"\D").unwrap().is_full_match("٣"));
    }

    #[test]
    fn escaped_backslash_is_not_a_class() {
        let literal = Pattern::new(r"a\\d").unwrap();
        assert!(literal.is_full_match(r"a\d"));
        assert!(!literal.is_full_match("a1"));
        // the source is kept as written
        assert_eq!(Pattern::new(r"\d+").unwrap().as_str(), r"\d+");
    }

    #[test]
    fn invalid_pattern_fails_deserialization() {
        let yaml = "label: Broken\nkind: text\npattern: '[a-z'\n";
        let err = serde_yaml::from_str::<ConstraintDescriptor>(yaml).unwrap_err();
        assert!(err.to_string().contains("invalid pattern"));
    }

    #[test]
    fn number_descriptor_from_yaml() {
        let yaml = r#"
label: Pulse
maxLength: 3
kind: number
min: 30
max: 220
"#;
        let descriptor: ConstraintDescriptor = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(descriptor.label, "Pulse");
        assert_eq!(descriptor.max_length, Some(3));
        assert!(descriptor.is_numeric());
        assert_eq!(descriptor.range(), Some((30.0, 220.0)));
        assert!(descriptor.pattern().is_none());
    }

    #[test]
    fn range_requires_both_bounds() {
        let descriptor = ConstraintDescriptor {
            label: "Stock".into(),
            max_length: Some(6),
            kind: FieldKind::Number {
                pattern: None,
                min: Some(0.0),
                max: None,
            },
        };
        assert_eq!(descriptor.range(), None);
    }

    #[test]
    fn text_descriptor_with_pattern_from_yaml() {
        let yaml = r#"
label: Lab Test Name
maxLength: 80
kind: text
pattern: '^[a-zA-Z0-9\s.\-\(\)]*$'
"#;
        let descriptor: ConstraintDescriptor = serde_yaml::from_str(yaml).unwrap();
        let pattern = descriptor.pattern().unwrap();
        assert_eq!(pattern.as_str(), r"^[a-zA-Z0-9\s.\-\(\)]*$");
        assert!(pattern.is_full_match("Complete Blood Count (CBC)"));
        assert!(!pattern.is_full_match("CBC@Test"));
        assert!(!descriptor.is_numeric());
    }

    #[test]
    fn textarea_kind_uses_single_word_tag() {
        let descriptor = ConstraintDescriptor {
            label: "Notes".into(),
            max_length: Some(1000),
            kind: FieldKind::TextArea { pattern: None },
        };
        let yaml = serde_yaml::to_string(&descriptor).unwrap();
        assert!(yaml.contains("kind: textarea"));
        assert!(yaml.contains("maxLength: 1000"));
        assert!(!yaml.contains("pattern"));
    }

    #[test]
    fn outcome_constructors() {
        assert_eq!(
            ValidationOutcome::accept(),
            ValidationOutcome {
                allowed: true,
                message: String::new()
            }
        );
        assert!(!ValidationOutcome::accept().has_message());
        assert!(ValidationOutcome::warn("Invalid email format").allowed);
        assert!(ValidationOutcome::block("Invalid format").is_blocking());
    }
}
