//! Value types produced by the recommendation engine.

use catalog::{MovieId, MovieRecord};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// How many genres a profile lists as favourites.
pub const TOP_GENRE_COUNT: usize = 5;

/// A user's genre affinities, derived from their rating history.
///
/// Built fresh for every request and never persisted. `top_genres` is always
/// a subset of the keys of `genre_scores`, at most [`TOP_GENRE_COUNT`] long
/// and ordered by descending score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TasteProfile {
    pub top_genres: Vec<String>,
    pub genre_scores: HashMap<String, f64>,
    pub avg_rating: f64,
}

impl TasteProfile {
    /// Affinity for a genre, or 0 when the user has no history with it.
    pub fn affinity(&self, genre: &str) -> f64 {
        self.genre_scores.get(genre).copied().unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.genre_scores.is_empty()
    }
}

/// The single derived number attached to a ranked movie.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Score {
    /// Cosine similarity to the query movies, in [0, 1]
    Similarity(f64),
    /// Mean genre affinity against a taste profile
    Profile(f64),
}

impl Score {
    pub fn value(self) -> f64 {
        match self {
            Score::Similarity(v) | Score::Profile(v) => v,
        }
    }
}

/// A candidate movie annotated by one of the ranking operations.
///
/// `score` is `None` only on the pass-through paths (empty vocabulary for
/// similarity, empty profile for profile scoring).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredMovie {
    pub movie: MovieRecord,
    pub score: Option<Score>,
}

impl ScoredMovie {
    pub fn scored(movie: MovieRecord, score: Score) -> Self {
        Self {
            movie,
            score: Some(score),
        }
    }

    pub fn unscored(movie: MovieRecord) -> Self {
        Self { movie, score: None }
    }

    pub fn similarity(&self) -> Option<f64> {
        match self.score {
            Some(Score::Similarity(v)) => Some(v),
            _ => None,
        }
    }

    pub fn profile_score(&self) -> Option<f64> {
        match self.score {
            Some(Score::Profile(v)) => Some(v),
            _ => None,
        }
    }
}

/// What the candidate filters need to know about the current request.
#[derive(Debug, Clone, Default)]
pub struct CandidateContext {
    /// Everything in the user's watch history
    pub watched: HashSet<MovieId>,
    /// Movies the request is about (e.g. the titles given to "like")
    pub excluded: HashSet<MovieId>,
}

impl CandidateContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_watched(mut self, watched: HashSet<MovieId>) -> Self {
        self.watched = watched;
        self
    }

    pub fn with_excluded(mut self, excluded: impl IntoIterator<Item = MovieId>) -> Self {
        self.excluded.extend(excluded);
        self
    }
}
