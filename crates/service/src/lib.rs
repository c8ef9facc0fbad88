//! Service crate for flickpick.
//!
//! Contains the orchestrator that joins the TMDb client, the local movie
//! store, the ranking engine and the Ollama helper into the operations the
//! CLI exposes.

pub mod error;
pub mod orchestrator;
pub mod source;

pub use error::ServiceError;
pub use orchestrator::{
    MIN_RATINGS_FOR_SUGGEST, MoodReply, RecommendationOrchestrator, SimilarMovies, Suggestions,
    ask_for_mood,
};
pub use source::MovieSource;
