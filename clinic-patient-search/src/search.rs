//! Ranking with per-word fallback widening against the backend.

use std::collections::HashSet;

use futures::future::try_join_all;
use tracing::{debug, warn};

use crate::backend::PatientSearchBackend;
use crate::error::Result;
use crate::rank::{filter, sort_by_score, SearchQuery};
use crate::types::{PatientCandidate, RankedResult};

/// Concatenate candidate lists, dropping later rows whose id matches an
/// earlier one case-insensitively.
pub fn merge_unique(
    lists: impl IntoIterator<Item = Vec<PatientCandidate>>,
) -> Vec<PatientCandidate> {
    let mut seen = HashSet::new();
    lists
        .into_iter()
        .flatten()
        .filter(|candidate| seen.insert(candidate.id.to_lowercase()))
        .collect()
}

/// Rank an already-fetched candidate page, widening through the backend when
/// a multi-word query matches nothing.
///
/// Widening issues one backend search per query word, concurrently, and
/// re-runs the match filter over the merged pool. It is best effort: if any
/// of those searches fails the original empty result stands. This function
/// never returns an error.
pub async fn rank_with_fallback<B>(
    backend: &B,
    query: &str,
    candidates: Vec<PatientCandidate>,
) -> Vec<RankedResult>
where
    B: PatientSearchBackend + ?Sized,
{
    let query = SearchQuery::new(query);
    let mut matched = filter(&query, candidates);
    debug!(query = query.as_str(), matched = matched.len(), "Filtered candidates");

    if matched.is_empty() && query.is_multi_word() {
        matched = widen(backend, &query).await;
    }

    sort_by_score(&query, matched)
}

async fn widen<B>(backend: &B, query: &SearchQuery) -> Vec<PatientCandidate>
where
    B: PatientSearchBackend + ?Sized,
{
    debug!(words = query.words().len(), "Widening search word by word");
    let searches = query
        .words()
        .iter()
        .map(|word| backend.search_patients(word));

    match try_join_all(searches).await {
        Ok(pages) => {
            let pool = merge_unique(pages);
            let matched = filter(query, pool);
            debug!(matched = matched.len(), "Widened search");
            matched
        }
        Err(e) => {
            warn!("Fallback search for '{}' failed: {}", query.as_str(), e);
            Vec::new()
        }
    }
}

/// Search entry point: fetch a candidate page for the query, then rank it.
pub struct PatientSearch<B> {
    backend: B,
}

impl<B: PatientSearchBackend> PatientSearch<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Errors from the primary fetch propagate; the fallback never fails.
    pub async fn search(&self, query: &str) -> Result<Vec<RankedResult>> {
        let candidates = self.backend.search_patients(query.trim()).await?;
        debug!(rows = candidates.len(), "Primary fetch returned");
        Ok(rank_with_fallback(&self.backend, query, candidates).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_unique_keeps_first_occurrence() {
        let merged = merge_unique(vec![
            vec![
                PatientCandidate::new("P5").with_name("Asha", "", "Kumar"),
                PatientCandidate::new("P6"),
            ],
            vec![
                PatientCandidate::new("p5").with_name("Duplicate", "", "Row"),
                PatientCandidate::new("P7"),
            ],
        ]);
        let ids: Vec<_> = merged.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["P5", "P6", "P7"]);
        assert_eq!(merged[0].first_name, "Asha");
    }

    #[test]
    fn test_merge_unique_empty() {
        assert!(merge_unique(Vec::<Vec<PatientCandidate>>::new()).is_empty());
    }
}
