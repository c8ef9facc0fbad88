//! Where candidate and lookup movies come from.

use anyhow::Result;
use catalog::{MovieDetails, MovieId, MovieRecord};
use tmdb::{DiscoverQuery, TmdbClient};

/// A remote movie catalog.
///
/// [`TmdbClient`] is the production implementation.
#[allow(async_fn_in_trait)]
pub trait MovieSource {
    async fn search(&self, query: &str) -> Result<Vec<MovieRecord>>;

    async fn details(&self, id: MovieId) -> Result<MovieDetails>;

    /// One page of currently popular movies, 1-based.
    async fn popular(&self, page: u32) -> Result<Vec<MovieRecord>>;

    async fn discover(&self, query: &DiscoverQuery) -> Result<Vec<MovieRecord>>;

    async fn genre_id(&self, name: &str) -> Result<Option<u32>>;
}

impl MovieSource for TmdbClient {
    async fn search(&self, query: &str) -> Result<Vec<MovieRecord>> {
        Ok(TmdbClient::search(self, query).await?)
    }

    async fn details(&self, id: MovieId) -> Result<MovieDetails> {
        Ok(self.get_movie(id).await?)
    }

    async fn popular(&self, page: u32) -> Result<Vec<MovieRecord>> {
        Ok(TmdbClient::popular(self, page).await?)
    }

    async fn discover(&self, query: &DiscoverQuery) -> Result<Vec<MovieRecord>> {
        Ok(TmdbClient::discover(self, query).await?)
    }

    async fn genre_id(&self, name: &str) -> Result<Option<u32>> {
        Ok(TmdbClient::genre_id(self, name).await?)
    }
}
