//! # Recommender Crate
//!
//! The flickpick recommendation engine. Everything here is a pure,
//! synchronous function of in-memory records: no I/O, no shared state.
//!
//! ## Components
//!
//! - **taste_profile**: rating history → per-genre affinity scores
//! - **vectorizer** / **text**: TF-IDF over genre + plot documents
//! - **similarity**: "more like these" ranking by cosine similarity
//! - **profile_scorer**: rank candidates against a taste profile
//! - **filters** / **filter_pipeline**: drop watched, excluded, duplicate
//!   or poorly rated candidates before ranking
//!
//! ## Example Usage
//!
//! ```ignore
//! use recommender::{build_taste_profile, find_similar_movies, score_by_profile};
//!
//! let profile = build_taste_profile(&store.rated_movies()?);
//! let suggestions = score_by_profile(&popular, &profile);
//!
//! let similar = find_similar_movies(&[the_matrix], &popular, 10);
//! ```

pub mod filter_pipeline;
pub mod filters;
pub mod profile_scorer;
pub mod similarity;
pub mod taste_profile;
pub mod text;
pub mod traits;
pub mod types;
pub mod vectorizer;

// Re-export main types
pub use filter_pipeline::FilterPipeline;
pub use profile_scorer::score_by_profile;
pub use similarity::find_similar_movies;
pub use taste_profile::build_taste_profile;
pub use traits::Filter;
pub use types::{CandidateContext, Score, ScoredMovie, TOP_GENRE_COUNT, TasteProfile};
pub use vectorizer::{TfidfVectorizer, VectorizeError};
