//! Patient records as returned by the backend search, and ranked results.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Read a field that may arrive as a string, a number or `null`.
fn loose_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

/// A patient row from the backend search.
///
/// Only the fields used for ranking are typed; everything else the backend
/// sends is kept in `extra` and passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientCandidate {
    #[serde(default, deserialize_with = "loose_string")]
    pub id: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub first_name: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub middle_name: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub last_name: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub mobile1: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PatientCandidate {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_name(
        mut self,
        first: impl Into<String>,
        middle: impl Into<String>,
        last: impl Into<String>,
    ) -> Self {
        self.first_name = first.into();
        self.middle_name = middle.into();
        self.last_name = last.into();
        self
    }

    pub fn with_mobile(mut self, mobile: impl Into<String>) -> Self {
        self.mobile1 = mobile.into();
        self
    }

    /// First, middle and last name joined with single spaces.
    pub fn display_name(&self) -> String {
        [&self.first_name, &self.middle_name, &self.last_name]
            .iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Response body of the backend patient search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientPage {
    #[serde(default)]
    pub patients: Vec<PatientCandidate>,
}

/// A candidate paired with its relevance score for one search.
///
/// Scores order results within a single search and mean nothing across
/// searches.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedResult {
    #[serde(flatten)]
    pub patient: PatientCandidate,
    pub score: i64,
}
