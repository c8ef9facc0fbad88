//! Filter to enforce a minimum public rating.
//!
//! Candidates without a vote average are dropped too; there is nothing to
//! compare against the threshold.

use crate::traits::Filter;
use crate::types::CandidateContext;
use anyhow::Result;
use catalog::MovieRecord;

/// Removes candidates whose `vote_average` is missing or below `min_rating`.
pub struct MinimumRatingFilter {
    min_rating: f32,
}

impl MinimumRatingFilter {
    /// # Arguments
    /// * `min_rating` - Lowest acceptable public rating on the 0-10 scale
    pub fn new(min_rating: f32) -> Self {
        Self { min_rating }
    }
}

impl Filter for MinimumRatingFilter {
    fn name(&self) -> &str {
        "MinimumRatingFilter"
    }

    fn apply(
        &self,
        candidates: Vec<MovieRecord>,
        _context: &CandidateContext,
    ) -> Result<Vec<MovieRecord>> {
        Ok(candidates
            .into_iter()
            .filter(|movie| {
                movie
                    .vote_average
                    .is_some_and(|rating| rating >= self.min_rating)
            })
            .collect())
    }
}
