//! Filter to remove movies the user has already watched.

use crate::traits::Filter;
use crate::types::CandidateContext;
use anyhow::Result;
use catalog::MovieRecord;

/// Removes candidates present in the user's watch history, rated or not.
pub struct AlreadyWatchedFilter;

impl Filter for AlreadyWatchedFilter {
    fn name(&self) -> &str {
        "AlreadyWatchedFilter"
    }

    fn apply(
        &self,
        candidates: Vec<MovieRecord>,
        context: &CandidateContext,
    ) -> Result<Vec<MovieRecord>> {
        Ok(candidates
            .into_iter()
            .filter(|movie| !context.watched.contains(&movie.id))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_watched_filter() {
        let context = CandidateContext::new().with_watched([100, 200].into_iter().collect());

        let candidates = vec![
            MovieRecord::new(100, "Seen"),
            MovieRecord::new(101, "New"),
            MovieRecord::new(200, "Also seen"),
            MovieRecord::new(300, "Also new"),
        ];

        let filtered = AlreadyWatchedFilter.apply(candidates, &context).unwrap();

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].id, 101);
        assert_eq!(filtered[1].id, 300);
    }
}
