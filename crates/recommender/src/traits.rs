//! Core traits for candidate filtering.
//!
//! Filters run before ranking and drop candidates that should never be
//! suggested (already watched, part of the query, poorly rated).

use crate::types::CandidateContext;
use anyhow::Result;
use catalog::MovieRecord;

/// A composable step that removes unwanted candidates.
///
/// - `Send + Sync` so a pipeline can be shared across tasks
/// - Filters take ownership of the candidates and return the survivors in
///   their original order
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of candidates.
    fn apply(
        &self,
        candidates: Vec<MovieRecord>,
        context: &CandidateContext,
    ) -> Result<Vec<MovieRecord>>;
}
