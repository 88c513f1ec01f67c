//! Filter-then-score ranking of patient candidates.
//!
//! Phase 1 keeps a candidate when the query hits its id, its mobile number
//! or its name tokens. Phase 2 sums relevance bonuses for every survivor and
//! sorts by score, highest first, keeping filter order among equal scores.

use tracing::trace;

use crate::types::{PatientCandidate, RankedResult};

/// Digit runs shorter than this never match a contact number.
const MIN_CONTACT_DIGITS: usize = 3;

const ID_EXACT: i64 = 1000;
const ID_PREFIX: i64 = 800;
const ID_CONTAINS: i64 = 600;

const CONTACT_EXACT: i64 = 200;
const CONTACT_CONTAINS: i64 = 100;

const MULTI_FULL_PREFIX: i64 = 500;
const MULTI_FIRST_PREFIX: i64 = 450;
const MULTI_MIDDLE_PREFIX: i64 = 425;
const MULTI_LAST_PREFIX: i64 = 400;
const MULTI_ALL_WORDS: i64 = 350;

const SINGLE_FIRST_PREFIX: i64 = 500;
const SINGLE_LAST_PREFIX: i64 = 450;
const SINGLE_MIDDLE_PREFIX: i64 = 400;
const SINGLE_FULL_CONTAINS: i64 = 300;
const SINGLE_BASELINE: i64 = 200;

/// A normalized search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    text: String,
    words: Vec<String>,
    digits: String,
}

impl SearchQuery {
    /// Lower-case and trim the raw query, split it into words and pull out
    /// its digits.
    pub fn new(raw: &str) -> Self {
        let text = raw.trim().to_lowercase();
        let words = text.split_whitespace().map(str::to_string).collect();
        let digits = text.chars().filter(char::is_ascii_digit).collect();
        Self {
            text,
            words,
            digits,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn digits(&self) -> &str {
        &self.digits
    }

    pub fn is_multi_word(&self) -> bool {
        self.words.len() > 1
    }

    fn has_contact_digits(&self) -> bool {
        self.digits.len() >= MIN_CONTACT_DIGITS
    }
}

/// Lower-cased name and contact keys of one candidate.
struct CandidateKeys {
    patient_id: String,
    first: String,
    middle: String,
    last: String,
    full_name: String,
    first_last: String,
    last_first: String,
    contact: String,
}

impl CandidateKeys {
    fn new(candidate: &PatientCandidate) -> Self {
        let first = candidate.first_name.to_lowercase();
        let middle = candidate.middle_name.to_lowercase();
        let last = candidate.last_name.to_lowercase();
        Self {
            patient_id: candidate.id.to_lowercase(),
            full_name: collapse_whitespace(&format!("{first} {middle} {last}")),
            first_last: collapse_whitespace(&format!("{first} {last}")),
            last_first: collapse_whitespace(&format!("{last} {first}")),
            contact: candidate
                .mobile1
                .chars()
                .filter(char::is_ascii_digit)
                .collect(),
            first,
            middle,
            last,
        }
    }

    fn contains_all(haystack: &str, words: &[String]) -> bool {
        words.iter().all(|word| haystack.contains(word.as_str()))
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Phase 1: whether a candidate plausibly matches the query.
pub fn matches(query: &SearchQuery, candidate: &PatientCandidate) -> bool {
    let keys = CandidateKeys::new(candidate);
    let q = query.as_str();

    if keys.patient_id == q || keys.patient_id.contains(q) {
        return true;
    }

    if query.has_contact_digits() && keys.contact.contains(query.digits()) {
        return true;
    }

    if query.is_multi_word() {
        // every word must land in the same one of the three name strings
        [&keys.full_name, &keys.first_last, &keys.last_first]
            .iter()
            .any(|name| CandidateKeys::contains_all(name, query.words()))
    } else {
        keys.first.starts_with(q)
            || keys.middle.starts_with(q)
            || keys.last.starts_with(q)
            || keys.full_name.contains(q)
            || keys.first.contains(q)
            || keys.middle.contains(q)
            || keys.last.contains(q)
    }
}

/// Phase 2: additive relevance score of a matched candidate.
pub fn score(query: &SearchQuery, candidate: &PatientCandidate) -> i64 {
    let keys = CandidateKeys::new(candidate);
    let q = query.as_str();
    let mut score = 0;

    if keys.patient_id == q {
        score += ID_EXACT;
    } else if keys.patient_id.starts_with(q) {
        score += ID_PREFIX;
    } else if keys.patient_id.contains(q) {
        score += ID_CONTAINS;
    }

    // both bonuses apply to an exact contact match
    if query.has_contact_digits() {
        if keys.contact == query.digits() {
            score += CONTACT_EXACT;
        }
        if keys.contact.contains(query.digits()) {
            score += CONTACT_CONTAINS;
        }
    }

    score += if query.is_multi_word() {
        multi_word_name_score(query, &keys)
    } else {
        single_word_name_score(q, &keys)
    };

    trace!(id = %candidate.id, score, "scored candidate");
    score
}

fn multi_word_name_score(query: &SearchQuery, keys: &CandidateKeys) -> i64 {
    let words = query.words();
    if !CandidateKeys::contains_all(&keys.full_name, words) {
        return 0;
    }

    let first_word = words.first().map_or("", String::as_str);
    let second_word = words.get(1).map_or("", String::as_str);
    let last_word = words.last().map_or("", String::as_str);

    if keys.full_name.starts_with(query.as_str()) {
        MULTI_FULL_PREFIX
    } else if keys.first.starts_with(first_word) {
        MULTI_FIRST_PREFIX
    } else if !keys.middle.is_empty() && keys.middle.starts_with(second_word) {
        MULTI_MIDDLE_PREFIX
    } else if keys.last.starts_with(last_word) {
        MULTI_LAST_PREFIX
    } else {
        MULTI_ALL_WORDS
    }
}

fn single_word_name_score(q: &str, keys: &CandidateKeys) -> i64 {
    if keys.first.starts_with(q) {
        SINGLE_FIRST_PREFIX
    } else if keys.last.starts_with(q) {
        SINGLE_LAST_PREFIX
    } else if keys.middle.starts_with(q) {
        SINGLE_MIDDLE_PREFIX
    } else if keys.full_name.contains(q) {
        SINGLE_FULL_CONTAINS
    } else {
        SINGLE_BASELINE
    }
}

/// Keep the candidates that pass Phase 1, in their original order.
pub fn filter(
    query: &SearchQuery,
    candidates: impl IntoIterator<Item = PatientCandidate>,
) -> Vec<PatientCandidate> {
    candidates
        .into_iter()
        .filter(|candidate| matches(query, candidate))
        .collect()
}

/// Score already-filtered candidates and sort them, highest first. The sort
/// is stable, so equal scores keep their filter order.
pub fn sort_by_score(query: &SearchQuery, matched: Vec<PatientCandidate>) -> Vec<RankedResult> {
    let mut ranked: Vec<RankedResult> = matched
        .into_iter()
        .map(|patient| RankedResult {
            score: score(query, &patient),
            patient,
        })
        .collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

/// Filter and rank an in-memory candidate list.
pub fn rank(query: &str, candidates: impl IntoIterator<Item = PatientCandidate>) -> Vec<RankedResult> {
    let query = SearchQuery::new(query);
    let matched = filter(&query, candidates);
    sort_by_score(&query, matched)
}
