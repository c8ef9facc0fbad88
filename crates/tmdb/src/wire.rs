//! TMDb JSON payloads and their conversion into catalog records.
//!
//! List endpoints (search, popular, discover) only carry genre ids, which
//! are resolved through the client's genre map. The details endpoint embeds
//! genre names directly.

use catalog::{MovieDetails, MovieId, MovieRecord};
use serde::Deserialize;
use std::collections::HashMap;

pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Name used for genre ids missing from the genre map.
pub const UNKNOWN_GENRE: &str = "Unknown";

#[derive(Debug, Clone, Deserialize)]
pub struct GenreEntry {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct GenreList {
    #[serde(default)]
    pub genres: Vec<GenreEntry>,
}

impl GenreList {
    pub fn into_map(self) -> HashMap<u32, String> {
        self.genres.into_iter().map(|g| (g.id, g.name)).collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

/// A movie as it appears in list results.
#[derive(Debug, Clone, Deserialize)]
pub struct MovieSummary {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f32>,
}

impl MovieSummary {
    pub fn into_record(self, genre_map: &HashMap<u32, String>) -> MovieRecord {
        let genres = self
            .genre_ids
            .iter()
            .map(|id| {
                genre_map
                    .get(id)
                    .cloned()
                    .unwrap_or_else(|| UNKNOWN_GENRE.to_string())
            })
            .collect();

        MovieRecord {
            id: self.id,
            title: self.title,
            year: parse_year(self.release_date.as_deref()),
            genres,
            plot: non_empty(self.overview),
            poster_url: poster_url(self.poster_path.as_deref()),
            vote_average: self.vote_average,
        }
    }
}

/// The `/movie/{id}` payload.
#[derive(Debug, Clone, Deserialize)]
pub struct MovieDetailsPayload {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub genres: Vec<GenreEntry>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f32>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub tagline: Option<String>,
}

impl From<MovieDetailsPayload> for MovieDetails {
    fn from(payload: MovieDetailsPayload) -> Self {
        MovieDetails {
            record: MovieRecord {
                id: payload.id,
                title: payload.title,
                year: parse_year(payload.release_date.as_deref()),
                genres: payload.genres.into_iter().map(|g| g.name).collect(),
                plot: non_empty(payload.overview),
                poster_url: poster_url(payload.poster_path.as_deref()),
                vote_average: payload.vote_average,
            },
            runtime: payload.runtime,
            tagline: non_empty(payload.tagline),
        }
    }
}

/// Year from a `YYYY-MM-DD` release date; `None` when absent or malformed.
pub fn parse_year(release_date: Option<&str>) -> Option<i32> {
    release_date.and_then(|date| date.get(..4)).and_then(|y| y.parse().ok())
}

fn poster_url(poster_path: Option<&str>) -> Option<String> {
    poster_path
        .filter(|p| !p.is_empty())
        .map(|p| format!("{IMAGE_BASE_URL}{p}"))
}

fn non_empty(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn genre_map() -> HashMap<u32, String> {
        serde_json::from_str::<GenreList>(
            r#"{"genres": [{"id": 28, "name": "Action"}, {"id": 878, "name": "Science Fiction"}]}"#,
        )
        .unwrap()
        .into_map()
    }

    #[test]
    fn test_parse_year() {
        assert_eq!(parse_year(Some("2010-07-15")), Some(2010));
        assert_eq!(parse_year(Some("")), None);
        assert_eq!(parse_year(Some("20")), None);
        assert_eq!(parse_year(Some("abcd-01-01")), None);
        assert_eq!(parse_year(None), None);
    }

    #[test]
    fn test_search_page_conversion() {
        let page: Page<MovieSummary> = serde_json::from_str(
            r#"{
                "page": 1,
                "results": [{
                    "id": 27205,
                    "title": "Inception",
                    "release_date": "2010-07-15",
                    "genre_ids": [28, 878, 12],
                    "overview": "Cobb steals secrets from dreams.",
                    "poster_path": "/inception.jpg",
                    "vote_average": 8.4
                }]
            }"#,
        )
        .unwrap();

        let map = genre_map();
        let movie = page.results.into_iter().next().unwrap().into_record(&map);
        assert_eq!(movie.id, 27205);
        assert_eq!(movie.year, Some(2010));
        assert_eq!(movie.genres, vec!["Action", "Science Fiction", "Unknown"]);
        assert_eq!(movie.poster_url.as_deref(), Some("https://image.tmdb.org/t/p/w500/inception.jpg"));
        assert_eq!(movie.vote_average, Some(8.4));
    }

    #[test]
    fn test_sparse_summary_uses_defaults() {
        let summary: MovieSummary =
            serde_json::from_str(r#"{"id": 1, "title": "Obscure", "overview": "", "poster_path": null}"#).unwrap();
        let movie = summary.into_record(&HashMap::new());
        assert!(movie.genres.is_empty());
        assert!(movie.plot.is_none());
        assert!(movie.poster_url.is_none());
        assert!(movie.year.is_none());
    }

    #[test]
    fn test_missing_results_is_empty_page() {
        let page: Page<MovieSummary> = serde_json::from_str(r#"{"page": 3}"#).unwrap();
        assert!(page.results.is_empty());
    }

    #[test]
    fn test_details_conversion() {
        let payload: MovieDetailsPayload = serde_json::from_str(
            r#"{
                "id": 603,
                "title": "The Matrix",
                "release_date": "1999-03-30",
                "genres": [{"id": 28, "name": "Action"}, {"id": 878, "name": "Science Fiction"}],
                "overview": "A hacker discovers reality is a simulation.",
                "runtime": 136,
                "tagline": "Welcome to the Real World."
            }"#,
        )
        .unwrap();

        let details = MovieDetails::from(payload);
        assert_eq!(details.record.genres, vec!["Action", "Science Fiction"]);
        assert_eq!(details.record.year, Some(1999));
        assert_eq!(details.runtime, Some(136));
        assert_eq!(details.tagline.as_deref(), Some("Welcome to the Real World."));
        assert!(details.record.vote_average.is_none());
    }
}
