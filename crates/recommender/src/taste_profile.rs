//! Build a TasteProfile from the user's rating history.
//!
//! Every genre gets a rating-weighted average "intensity": a movie rated `r`
//! contributes `(r / 10) * r` to each of its genres, and the total is divided
//! by how many movies carried the genre. Watched-but-unrated entries count
//! as the neutral rating 5.

use crate::types::{TOP_GENRE_COUNT, TasteProfile};
use catalog::RatedMovie;
use std::collections::HashMap;
use tracing::debug;

/// Aggregate rated movies into per-genre affinity scores.
///
/// An empty history yields an empty profile with a mean rating of 0.
pub fn build_taste_profile(rated_movies: &[RatedMovie]) -> TasteProfile {
    if rated_movies.is_empty() {
        return TasteProfile::default();
    }

    // (sum, count) per genre, plus first-seen order for stable tie-breaking
    let mut genre_stats: HashMap<&str, (f64, u32)> = HashMap::new();
    let mut seen_order: Vec<&str> = Vec::new();
    let mut total_rating = 0.0;

    for entry in rated_movies {
        let rating = f64::from(entry.effective_rating());
        let weight = rating / 10.0;

        for genre in &entry.movie.genres {
            let stats = genre_stats.entry(genre.as_str()).or_insert_with(|| {
                seen_order.push(genre.as_str());
                (0.0, 0)
            });
            stats.0 += weight * rating;
            stats.1 += 1;
        }

        total_rating += rating;
    }

    let mut ranked: Vec<(&str, f64)> = seen_order
        .iter()
        .map(|&genre| {
            let (sum, count) = genre_stats[genre];
            (genre, sum / f64::from(count))
        })
        .collect();

    let genre_scores: HashMap<String, f64> = ranked
        .iter()
        .map(|&(genre, score)| (genre.to_string(), score))
        .collect();

    // sort_by is stable, so equal scores keep first-seen order
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    let top_genres: Vec<String> = ranked
        .into_iter()
        .take(TOP_GENRE_COUNT)
        .map(|(genre, _)| genre.to_string())
        .collect();

    debug!(
        "Built taste profile from {} movies: {} genres, top = {:?}",
        rated_movies.len(),
        genre_scores.len(),
        top_genres
    );

    TasteProfile {
        top_genres,
        genre_scores,
        avg_rating: total_rating / rated_movies.len() as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{MovieRecord, UserRating};

    fn rated(id: u64, rating: Option<i64>, genres: &[&str]) -> RatedMovie {
        RatedMovie::new(
            MovieRecord::new(id, format!("Movie {id}")).with_genres(genres.iter().copied()),
            rating.map(|r| UserRating::try_from(r).unwrap()),
        )
    }

    #[test]
    fn test_empty_history() {
        let profile = build_taste_profile(&[]);
        assert!(profile.top_genres.is_empty());
        assert!(profile.genre_scores.is_empty());
        assert_eq!(profile.avg_rating, 0.0);
    }

    #[test]
    fn test_higher_rated_genre_wins() {
        let profile = build_taste_profile(&[
            rated(1, Some(9), &["Action"]),
            rated(2, Some(3), &["Comedy"]),
        ]);

        assert!(profile.genre_scores["Action"] > profile.genre_scores["Comedy"]);
        assert_eq!(profile.top_genres, vec!["Action", "Comedy"]);
        assert!((profile.avg_rating - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_scores_are_averaged_per_genre() {
        // Seen once at 10 vs. five times at 10: identical intensity
        let mut history = vec![rated(1, Some(10), &["Western"])];
        for id in 2..7 {
            history.push(rated(id, Some(10), &["Noir"]));
        }
        history.push(rated(7, Some(10), &["Drama"]));
        history.push(rated(8, Some(2), &["Drama"]));

        let profile = build_taste_profile(&history);
        assert!((profile.genre_scores["Western"] - 10.0).abs() < 1e-9);
        assert!((profile.genre_scores["Noir"] - 10.0).abs() < 1e-9);
        // (10.0 + 0.4) / 2
        assert!((profile.genre_scores["Drama"] - 5.2).abs() < 1e-9);
    }

    #[test]
    fn test_unrated_counts_as_neutral() {
        let profile = build_taste_profile(&[rated(1, None, &["Horror"])]);
        // weight 0.5 * rating 5
        assert!((profile.genre_scores["Horror"] - 2.5).abs() < 1e-9);
        assert!((profile.avg_rating - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_top_genres_truncated_and_ordered() {
        let profile = build_taste_profile(&[
            rated(1, Some(4), &["A", "B", "C"]),
            rated(2, Some(8), &["D", "E", "F", "G"]),
        ]);

        assert_eq!(profile.genre_scores.len(), 7);
        assert_eq!(profile.top_genres.len(), 5);
        // Ties keep first-seen order: D, E, F, G at 6.4, then A at 1.6
        assert_eq!(profile.top_genres, vec!["D", "E", "F", "G", "A"]);

        for pair in profile.top_genres.windows(2) {
            assert!(profile.genre_scores[&pair[0]] >= profile.genre_scores[&pair[1]]);
        }
    }

    #[test]
    fn test_movie_without_genres_still_counts_toward_mean() {
        let profile = build_taste_profile(&[rated(1, Some(10), &[]), rated(2, Some(2), &["Drama"])]);
        assert_eq!(profile.genre_scores.len(), 1);
        assert!((profile.avg_rating - 6.0).abs() < 1e-9);
    }
}
