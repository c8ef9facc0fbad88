//! Filter to drop the movies a request is built around.
//!
//! When asking for "movies like X", X itself must not come back.

use crate::traits::Filter;
use crate::types::CandidateContext;
use anyhow::Result;
use catalog::MovieRecord;

pub struct ExcludedFilter;

impl Filter for ExcludedFilter {
    fn name(&self) -> &str {
        "ExcludedFilter"
    }

    fn apply(
        &self,
        candidates: Vec<MovieRecord>,
        context: &CandidateContext,
    ) -> Result<Vec<MovieRecord>> {
        Ok(candidates
            .into_iter()
            .filter(|movie| !context.excluded.contains(&movie.id))
            .collect())
    }
}
