//! Client for The Movie Database (TMDb) REST API v3.
//!
//! Wraps a `reqwest::Client` and returns catalog records:
//! - search, popular and discover listings as `MovieRecord`s
//! - fetch-by-id as `MovieDetails`
//!
//! The genre id → name map is fetched lazily once per client and reused
//! for every listing call.

pub mod error;
pub mod wire;

use catalog::{MovieDetails, MovieId, MovieRecord};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, error, instrument};

pub use error::{Result, TmdbError};
use wire::{GenreList, MovieDetailsPayload, MovieSummary, Page};

pub const BASE_URL: &str = "https://api.themoviedb.org/3";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Filters for the `/discover/movie` endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiscoverQuery {
    /// Genre ids, all of which must match
    pub genre_ids: Vec<u32>,
    pub year: Option<i32>,
    pub min_rating: Option<f32>,
}

impl DiscoverQuery {
    /// Query parameters, always sorted by rating with at least 100 votes.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("sort_by", "vote_average.desc".to_string()),
            ("vote_count.gte", "100".to_string()),
        ];
        if !self.genre_ids.is_empty() {
            let ids: Vec<String> = self.genre_ids.iter().map(u32::to_string).collect();
            params.push(("with_genres", ids.join(",")));
        }
        if let Some(year) = self.year {
            params.push(("year", year.to_string()));
        }
        if let Some(min_rating) = self.min_rating {
            params.push(("vote_average.gte", min_rating.to_string()));
        }
        params
    }
}

/// TMDb API client.
pub struct TmdbClient {
    http: HttpClient,
    api_key: String,
    base_url: String,
    genres: OnceCell<HashMap<u32, String>>,
}

impl TmdbClient {
    /// Create a client for the public API.
    ///
    /// Fails with [`TmdbError::MissingApiKey`] if the key is blank.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(TmdbError::MissingApiKey);
        }
        let http = HttpClient::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            api_key,
            base_url: BASE_URL.to_string(),
            genres: OnceCell::new(),
        })
    }

    /// Point the client at another host (a proxy or a test server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Genre id → name map, fetched on first use.
    pub async fn genres(&self) -> Result<&HashMap<u32, String>> {
        self.genres
            .get_or_try_init(|| async {
                let list: GenreList = self.get_json("/genre/movie/list", &[]).await?;
                let map = list.into_map();
                debug!("Loaded {} TMDb genres", map.len());
                Ok::<_, TmdbError>(map)
            })
            .await
    }

    /// Look up a genre id by case-insensitive name.
    pub async fn genre_id(&self, name: &str) -> Result<Option<u32>> {
        let genres = self.genres().await?;
        Ok(genres
            .iter()
            .find(|(_, genre)| genre.eq_ignore_ascii_case(name))
            .map(|(&id, _)| id))
    }

    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<MovieRecord>> {
        let page: Page<MovieSummary> = self
            .get_json("/search/movie", &[("query", query.to_string())])
            .await?;
        self.resolve(page).await
    }

    #[instrument(skip(self))]
    pub async fn get_movie(&self, id: MovieId) -> Result<MovieDetails> {
        let payload: MovieDetailsPayload = self.get_json(&format!("/movie/{id}"), &[]).await?;
        Ok(payload.into())
    }

    #[instrument(skip(self))]
    pub async fn popular(&self, page: u32) -> Result<Vec<MovieRecord>> {
        let page: Page<MovieSummary> = self
            .get_json("/movie/popular", &[("page", page.to_string())])
            .await?;
        self.resolve(page).await
    }

    #[instrument(skip(self))]
    pub async fn discover(&self, query: &DiscoverQuery) -> Result<Vec<MovieRecord>> {
        let page: Page<MovieSummary> = self.get_json("/discover/movie", &query.to_params()).await?;
        self.resolve(page).await
    }

    async fn resolve(&self, page: Page<MovieSummary>) -> Result<Vec<MovieRecord>> {
        let genres = self.genres().await?;
        Ok(page
            .results
            .into_iter()
            .map(|summary| summary.into_record(genres))
            .collect())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            error!("TMDb request to {} failed with status {}", path, status);
            return Err(TmdbError::Api { status, body });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_api_key_rejected() {
        assert!(matches!(TmdbClient::new("  "), Err(TmdbError::MissingApiKey)));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = TmdbClient::new("key").unwrap().with_base_url("http://localhost:8080/3/");
        assert_eq!(client.base_url, "http://localhost:8080/3");
    }

    #[test]
    fn test_discover_params() {
        let query = DiscoverQuery {
            genre_ids: vec![27, 9648],
            year: Some(1999),
            min_rating: Some(7.5),
        };
        let params = query.to_params();
        assert!(params.contains(&("sort_by", "vote_average.desc".to_string())));
        assert!(params.contains(&("vote_count.gte", "100".to_string())));
        assert!(params.contains(&("with_genres", "27,9648".to_string())));
        assert!(params.contains(&("year", "1999".to_string())));
        assert!(params.contains(&("vote_average.gte", "7.5".to_string())));
    }

    #[test]
    fn test_default_discover_params() {
        assert_eq!(DiscoverQuery::default().to_params().len(), 2);
    }
}
