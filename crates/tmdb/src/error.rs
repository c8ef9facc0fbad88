//! Errors that can occur when talking to TMDb.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TmdbError {
    #[error("TMDb API key not configured. Run 'flickpick setup' or set TMDB_API_KEY.")]
    MissingApiKey,

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("TMDb API returned status {status}: {body}")]
    Api { status: u16, body: String },
}

pub type Result<T> = std::result::Result<T, TmdbError>;
