//! Filter to collapse duplicate records.
//!
//! Candidates gathered from several result pages can repeat; records are
//! the same movie when their ids match.

use crate::traits::Filter;
use crate::types::CandidateContext;
use anyhow::Result;
use catalog::{MovieId, MovieRecord};
use std::collections::HashSet;

/// Keeps the first occurrence of each movie id.
pub struct DedupFilter;

impl Filter for DedupFilter {
    fn name(&self) -> &str {
        "DedupFilter"
    }

    fn apply(
        &self,
        candidates: Vec<MovieRecord>,
        _context: &CandidateContext,
    ) -> Result<Vec<MovieRecord>> {
        let mut seen: HashSet<MovieId> = HashSet::with_capacity(candidates.len());
        Ok(candidates
            .into_iter()
            .filter(|movie| seen.insert(movie.id))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_keeps_first() {
        let candidates = vec![
            MovieRecord::new(1, "First"),
            MovieRecord::new(2, "Other"),
            MovieRecord::new(1, "Second copy"),
        ];

        let filtered = DedupFilter.apply(candidates, &CandidateContext::new()).unwrap();
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].title, "First");
        assert_eq!(filtered[1].id, 2);
    }
}
