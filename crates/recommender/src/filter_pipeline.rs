//! The FilterPipeline chains filters together.

use crate::traits::Filter;
use crate::types::CandidateContext;
use anyhow::Result;
use catalog::MovieRecord;

/// Runs a sequence of filters over a candidate list.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(DedupFilter)
///     .add_filter(ExcludedFilter)
///     .add_filter(AlreadyWatchedFilter);
///
/// let candidates = pipeline.apply(candidates, &context)?;
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Apply all filters in order, logging counts before and after each one.
    pub fn apply(
        &self,
        candidates: Vec<MovieRecord>,
        context: &CandidateContext,
    ) -> Result<Vec<MovieRecord>> {
        let mut current = candidates;
        for filter in &self.filters {
            let before = current.len();
            current = filter.apply(current, context)?;
            tracing::debug!(
                "Filter {}: {} -> {} candidates",
                filter.name(),
                before,
                current.len()
            );
        }
        Ok(current)
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}
