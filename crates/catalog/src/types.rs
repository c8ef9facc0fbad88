//! Core record types shared by every flickpick crate.
//!
//! Records are plain, owned values. Optional fields carry `#[serde(default)]`
//! so a payload that omits them deserializes into the neutral default
//! (empty genre list, no plot, no rating) instead of failing.

use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Type Aliases
// =============================================================================

/// TMDb movie identifier
pub type MovieId = u64;

/// Rating used for watched movies that were never given an explicit score.
pub const NEUTRAL_RATING: u8 = 5;

// =============================================================================
// Movie Types
// =============================================================================

/// A movie as supplied by the metadata provider or the local cache.
///
/// Two records describe the same movie when their `id`s match; the other
/// fields are only descriptive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub year: Option<i32>,
    /// Genre names; order is irrelevant and duplicates are tolerated
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub plot: Option<String>,
    #[serde(default)]
    pub poster_url: Option<String>,
    /// Public vote average on a 0-10 scale
    #[serde(default)]
    pub vote_average: Option<f32>,
}

impl MovieRecord {
    /// Create a record with only an id and a title set.
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genres = genres.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_plot(mut self, plot: impl Into<String>) -> Self {
        self.plot = Some(plot.into());
        self
    }

    pub fn with_vote_average(mut self, vote_average: f32) -> Self {
        self.vote_average = Some(vote_average);
        self
    }

    /// Plot text, or the empty string when the provider had none.
    pub fn plot_text(&self) -> &str {
        self.plot.as_deref().unwrap_or("")
    }
}

/// Extra fields only returned by a fetch-by-id lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub record: MovieRecord,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub tagline: Option<String>,
}

// =============================================================================
// Rating Types
// =============================================================================

/// A user score on the 1-10 scale.
///
/// The only way to build one is through `TryFrom`, so holding a `UserRating`
/// means the value is in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct UserRating(u8);

impl UserRating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for UserRating {
    type Error = CatalogError;

    fn try_from(value: i64) -> Result<Self> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(CatalogError::InvalidRating(value))
        }
    }
}

impl From<UserRating> for u8 {
    fn from(rating: UserRating) -> Self {
        rating.0
    }
}

impl fmt::Display for UserRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/10", self.0)
    }
}

/// A movie from the user's history, with the score they gave it (if any).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatedMovie {
    pub movie: MovieRecord,
    /// `None` means "watched, unrated"
    #[serde(default)]
    pub rating: Option<UserRating>,
    /// Store timestamp of when the entry was recorded
    #[serde(default)]
    pub watched_at: String,
}

impl RatedMovie {
    pub fn new(movie: MovieRecord, rating: Option<UserRating>) -> Self {
        Self {
            movie,
            rating,
            watched_at: String::new(),
        }
    }

    /// The explicit rating, or [`NEUTRAL_RATING`] for watched-but-unrated entries.
    pub fn effective_rating(&self) -> u8 {
        self.rating.map(UserRating::value).unwrap_or(NEUTRAL_RATING)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        assert!(UserRating::try_from(0).is_err());
        assert!(UserRating::try_from(11).is_err());
        assert_eq!(UserRating::try_from(1).unwrap().value(), 1);
        assert_eq!(UserRating::try_from(10).unwrap().value(), 10);
    }

    #[test]
    fn test_effective_rating_defaults_to_neutral() {
        let watched = RatedMovie::new(MovieRecord::new(1, "Heat"), None);
        assert_eq!(watched.effective_rating(), NEUTRAL_RATING);

        let rated = RatedMovie::new(
            MovieRecord::new(2, "Ronin"),
            Some(UserRating::try_from(8).unwrap()),
        );
        assert_eq!(rated.effective_rating(), 8);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let movie: MovieRecord = serde_json::from_str(r#"{"id": 7, "title": "Se7en"}"#).unwrap();
        assert!(movie.genres.is_empty());
        assert_eq!(movie.plot_text(), "");
        assert!(movie.year.is_none());
        assert!(movie.vote_average.is_none());
    }

    #[test]
    fn test_out_of_range_rating_rejected_on_deserialize() {
        let parsed: std::result::Result<RatedMovie, _> =
            serde_json::from_str(r#"{"movie": {"id": 1, "title": "X"}, "rating": 42}"#);
        assert!(parsed.is_err());
    }
}
