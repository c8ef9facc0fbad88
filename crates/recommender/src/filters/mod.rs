//! Filter implementations for the candidate pipeline.

pub mod already_watched;
pub mod dedup;
pub mod excluded;
pub mod minimum_rating;

// Re-export for convenience
pub use already_watched::AlreadyWatchedFilter;
pub use dedup::DedupFilter;
pub use excluded::ExcludedFilter;
pub use minimum_rating::MinimumRatingFilter;
