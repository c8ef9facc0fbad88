//! Score candidates against a TasteProfile.
//!
//! A candidate's score is the mean affinity of its genres, so a movie with
//! many genres isn't boosted just for carrying more labels.

use crate::types::{Score, ScoredMovie, TasteProfile};
use catalog::MovieRecord;
use tracing::{debug, instrument};

/// Mean profile affinity over the movie's genres; 0 for a movie without genres.
pub fn profile_score(movie: &MovieRecord, profile: &TasteProfile) -> f64 {
    if movie.genres.is_empty() {
        return 0.0;
    }
    let total: f64 = movie.genres.iter().map(|g| profile.affinity(g)).sum();
    total / movie.genres.len() as f64
}

/// Score and sort every candidate, highest first.
///
/// Nothing is dropped; truncation is left to the caller. With an empty
/// profile the candidates come back in input order without a score.
#[instrument(skip_all, fields(candidates = candidates.len(), genres = profile.genre_scores.len()))]
pub fn score_by_profile(candidates: &[MovieRecord], profile: &TasteProfile) -> Vec<ScoredMovie> {
    if profile.is_empty() {
        debug!("Empty taste profile, returning candidates unscored");
        return candidates.iter().cloned().map(ScoredMovie::unscored).collect();
    }

    let mut scored: Vec<ScoredMovie> = candidates
        .iter()
        .map(|movie| ScoredMovie::scored(movie.clone(), Score::Profile(profile_score(movie, profile))))
        .collect();

    // Stable: equal scores keep input order
    scored.sort_by(|a, b| {
        let a = a.score.map(Score::value).unwrap_or(0.0);
        let b = b.score.map(Score::value).unwrap_or(0.0);
        b.total_cmp(&a)
    });

    scored
}
