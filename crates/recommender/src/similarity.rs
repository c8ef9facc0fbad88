//! Content-based ranking: "more movies like these".
//!
//! ## Algorithm
//! 1. Turn every movie into a document: its genres three times, then its plot
//! 2. Join the source documents into a single query document
//! 3. Fit TF-IDF over the query plus all candidate documents
//! 4. Rank candidates by cosine similarity to the query (stable on ties)
//! 5. Keep the first `limit`

use crate::types::{Score, ScoredMovie};
use crate::vectorizer::{TfidfVectorizer, cosine_similarity};
use catalog::MovieRecord;
use tracing::{debug, instrument, warn};

/// How many times genre names are repeated in a movie's document.
const GENRE_REPEAT: usize = 3;

/// Document text for a movie. Genres are repeated so they outweigh plot vocabulary.
pub fn movie_document(movie: &MovieRecord) -> String {
    let genres = movie.genres.join(" ");
    let mut parts = vec![genres.as_str(); GENRE_REPEAT];
    parts.push(movie.plot_text());
    parts.join(" ")
}

/// Rank `candidates` by content similarity to `sources`.
///
/// Returns at most `limit` movies carrying [`Score::Similarity`]. Empty
/// inputs give an empty result. If no usable terms remain after stop-word
/// removal, the first `limit` candidates are returned unscored in their
/// original order.
#[instrument(skip_all, fields(sources = sources.len(), candidates = candidates.len(), limit))]
pub fn find_similar_movies(
    sources: &[MovieRecord],
    candidates: &[MovieRecord],
    limit: usize,
) -> Vec<ScoredMovie> {
    if sources.is_empty() || candidates.is_empty() {
        return Vec::new();
    }

    let query = sources.iter().map(movie_document).collect::<Vec<_>>().join(" ");
    let mut documents = Vec::with_capacity(candidates.len() + 1);
    documents.push(query);
    documents.extend(candidates.iter().map(movie_document));

    let rows = match TfidfVectorizer::fit_transform(&documents) {
        Ok((_, rows)) => rows,
        Err(e) => {
            warn!("Falling back to unranked candidates: {}", e);
            return candidates
                .iter()
                .take(limit)
                .cloned()
                .map(ScoredMovie::unscored)
                .collect();
        }
    };

    let Some((query_row, candidate_rows)) = rows.split_first() else {
        return Vec::new();
    };

    let mut scored: Vec<(&MovieRecord, f64)> = candidates
        .iter()
        .zip(candidate_rows)
        .map(|(movie, row)| (movie, cosine_similarity(query_row, row)))
        .collect();

    // Stable: equal similarities keep candidate order
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(limit);

    debug!(
        "Ranked {} candidates, best similarity {:.3}",
        candidates.len(),
        scored.first().map(|s| s.1).unwrap_or(0.0)
    );

    scored
        .into_iter()
        .map(|(movie, similarity)| ScoredMovie::scored(movie.clone(), Score::Similarity(similarity)))
        .collect()
}
