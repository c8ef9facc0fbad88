//! # Catalog Crate
//!
//! Typed movie records and the local SQLite store that caches them
//! alongside the user's ratings.
//!
//! ## Main Components
//!
//! - **types**: `MovieRecord`, `MovieDetails`, `UserRating`, `RatedMovie`
//! - **store**: `MovieStore`, the cache/rating database
//! - **error**: Error types for validation and storage
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{MovieRecord, MovieStore, UserRating};
//!
//! let store = MovieStore::open("flickpick.db")?;
//! let movie = MovieRecord::new(603, "The Matrix").with_genres(["Action", "Science Fiction"]);
//! store.cache_movie(&movie)?;
//! store.add_rating(movie.id, Some(UserRating::try_from(9)?))?;
//!
//! for entry in store.rated_movies()? {
//!     println!("{} - {:?}", entry.movie.title, entry.rating);
//! }
//! ```

// Public modules
pub mod error;
pub mod store;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use store::MovieStore;
pub use types::{MovieDetails, MovieId, MovieRecord, NEUTRAL_RATING, RatedMovie, UserRating};
