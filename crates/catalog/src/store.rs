//! Local SQLite store for cached movie metadata and the user's ratings.
//!
//! Two tables: `movies` caches provider records keyed by TMDb id, and
//! `ratings` holds at most one entry per movie (a NULL rating means the
//! movie was marked watched without a score).
//!
//! Foreign keys are left unenforced: a rating may be recorded before its
//! movie is cached. Such entries count as watched but are hidden from the
//! joined history until the movie lands in `movies`.

use crate::error::Result;
use crate::types::{MovieId, MovieRecord, RatedMovie, UserRating};
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS movies (
    id INTEGER PRIMARY KEY,
    tmdb_id INTEGER UNIQUE NOT NULL,
    title TEXT NOT NULL,
    year INTEGER,
    genres TEXT,
    plot TEXT,
    poster_url TEXT,
    vote_average REAL,
    cached_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS ratings (
    id INTEGER PRIMARY KEY,
    tmdb_id INTEGER NOT NULL,
    rating INTEGER,
    watched_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    FOREIGN KEY (tmdb_id) REFERENCES movies(tmdb_id)
);

CREATE INDEX IF NOT EXISTS idx_movies_tmdb_id ON movies(tmdb_id);
CREATE INDEX IF NOT EXISTS idx_ratings_tmdb_id ON ratings(tmdb_id);
"#;

const MOVIE_COLUMNS: &str = "m.tmdb_id, m.title, m.year, m.genres, m.plot, m.poster_url, m.vote_average";

/// Handle to the flickpick database.
pub struct MovieStore {
    conn: Connection,
}

impl MovieStore {
    /// Open (or create) the database at `path`, creating parent directories.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        debug!("Opening movie store at {}", path.display());
        Self::init(Connection::open(path)?)
    }

    /// Open a throwaway in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", "OFF")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Insert a movie, or refresh every cached field if it is already known.
    pub fn cache_movie(&self, movie: &MovieRecord) -> Result<()> {
        let genres = if movie.genres.is_empty() {
            None
        } else {
            Some(serde_json::to_string(&movie.genres)?)
        };
        self.conn.execute(
            "INSERT INTO movies (tmdb_id, title, year, genres, plot, poster_url, vote_average)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT(tmdb_id) DO UPDATE SET
                 title = excluded.title,
                 year = excluded.year,
                 genres = excluded.genres,
                 plot = excluded.plot,
                 poster_url = excluded.poster_url,
                 vote_average = excluded.vote_average,
                 cached_at = CURRENT_TIMESTAMP",
            params![
                to_sql_id(movie.id),
                movie.title,
                movie.year,
                genres,
                movie.plot,
                movie.poster_url,
                movie.vote_average.map(f64::from),
            ],
        )?;
        Ok(())
    }

    pub fn get_movie(&self, id: MovieId) -> Result<Option<MovieRecord>> {
        let sql = format!("SELECT {MOVIE_COLUMNS} FROM movies m WHERE m.tmdb_id = ?1");
        let row = self
            .conn
            .query_row(&sql, params![to_sql_id(id)], RawMovie::from_row)
            .optional()?;
        row.map(RawMovie::into_record).transpose()
    }

    /// Record a watch, replacing whatever rating the movie had before.
    pub fn add_rating(&self, id: MovieId, rating: Option<UserRating>) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM ratings WHERE tmdb_id = ?1", params![to_sql_id(id)])?;
        tx.execute(
            "INSERT INTO ratings (tmdb_id, rating) VALUES (?1, ?2)",
            params![to_sql_id(id), rating.map(UserRating::value)],
        )?;
        tx.commit()?;
        debug!("Recorded watch for movie {} (rating: {:?})", id, rating);
        Ok(())
    }

    /// Full watch history, newest first.
    pub fn all_ratings(&self) -> Result<Vec<RatedMovie>> {
        self.query_rated("ORDER BY r.watched_at DESC, r.id DESC")
    }

    /// Only entries with an explicit rating, highest rated first.
    pub fn rated_movies(&self) -> Result<Vec<RatedMovie>> {
        self.query_rated("WHERE r.rating IS NOT NULL ORDER BY r.rating DESC, r.id ASC")
    }

    pub fn is_watched(&self, id: MovieId) -> Result<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM ratings WHERE tmdb_id = ?1",
                params![to_sql_id(id)],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// Ids of every movie in the watch history, rated or not.
    pub fn watched_ids(&self) -> Result<HashSet<MovieId>> {
        let mut stmt = self.conn.prepare("SELECT tmdb_id FROM ratings")?;
        let ids = stmt
            .query_map([], |row| row.get::<_, i64>(0))?
            .map(|id| id.map(from_sql_id))
            .collect::<rusqlite::Result<HashSet<_>>>()?;
        Ok(ids)
    }

    pub fn all_cached_movies(&self) -> Result<Vec<MovieRecord>> {
        let sql = format!("SELECT {MOVIE_COLUMNS} FROM movies m ORDER BY m.id");
        let mut stmt = self.conn.prepare(&sql)?;
        let raws = stmt
            .query_map([], RawMovie::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        raws.into_iter().map(RawMovie::into_record).collect()
    }

    fn query_rated(&self, tail: &str) -> Result<Vec<RatedMovie>> {
        let sql = format!(
            "SELECT {MOVIE_COLUMNS}, r.rating, r.watched_at
             FROM ratings r
             JOIN movies m ON r.tmdb_id = m.tmdb_id
             {tail}"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], |row| {
                let raw = RawMovie::from_row(row)?;
                let rating: Option<i64> = row.get(7)?;
                let watched_at: String = row.get(8)?;
                Ok((raw, rating, watched_at))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        rows.into_iter()
            .map(|(raw, rating, watched_at)| {
                Ok(RatedMovie {
                    movie: raw.into_record()?,
                    rating: rating.map(UserRating::try_from).transpose()?,
                    watched_at,
                })
            })
            .collect()
    }
}

/// Row as stored, before the genre JSON is decoded.
struct RawMovie {
    id: i64,
    title: String,
    year: Option<i32>,
    genres: Option<String>,
    plot: Option<String>,
    poster_url: Option<String>,
    vote_average: Option<f64>,
}

impl RawMovie {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            year: row.get(2)?,
            genres: row.get(3)?,
            plot: row.get(4)?,
            poster_url: row.get(5)?,
            vote_average: row.get(6)?,
        })
    }

    fn into_record(self) -> Result<MovieRecord> {
        let genres = match self.genres.as_deref() {
            Some(json) if !json.is_empty() => serde_json::from_str(json)?,
            _ => Vec::new(),
        };
        Ok(MovieRecord {
            id: from_sql_id(self.id),
            title: self.title,
            year: self.year,
            genres,
            plot: self.plot,
            poster_url: self.poster_url,
            vote_average: self.vote_average.map(|v| v as f32),
        })
    }
}

// SQLite integers are signed; TMDb ids comfortably fit.
fn to_sql_id(id: MovieId) -> i64 {
    id as i64
}

fn from_sql_id(id: i64) -> MovieId {
    id as MovieId
}
