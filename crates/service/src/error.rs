//! Conditions the CLI reports as user guidance rather than failures.

use llm::Availability;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    #[error("Rate at least {required} movies first for personalized recommendations ({rated} rated so far)")]
    NotEnoughRatings { rated: usize, required: usize },

    #[error("Could not find any of the specified movies")]
    NoSourceMovies,

    #[error("Unknown genre: '{0}'")]
    UnknownGenre(String),

    #[error("{0}")]
    LlmUnavailable(Availability),
}
