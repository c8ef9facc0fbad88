//! # Recommendation Orchestrator
//!
//! Coordinates one CLI request end to end:
//! 1. Resolve titles or read the user's history from the local store
//! 2. Fetch candidates from the remote catalog
//! 3. Filter out duplicates, the request's own movies and anything watched
//! 4. Rank on a blocking thread (similarity or taste profile)
//! 5. Return the top N

use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info, instrument, warn};

use catalog::{MovieDetails, MovieRecord, MovieStore, RatedMovie, UserRating};
use llm::{OllamaClient, parse_movie_suggestions};
use recommender::filters::{AlreadyWatchedFilter, DedupFilter, ExcludedFilter, MinimumRatingFilter};
use recommender::{
    CandidateContext, FilterPipeline, ScoredMovie, TasteProfile, build_taste_profile,
    find_similar_movies, score_by_profile,
};
use tmdb::DiscoverQuery;

use crate::error::ServiceError;
use crate::source::MovieSource;

/// Rated movies needed before `suggest` will build a profile.
pub const MIN_RATINGS_FOR_SUGGEST: usize = 3;

/// Result of a "more like these" request.
#[derive(Debug, Clone)]
pub struct SimilarMovies {
    /// The titles that were found, in request order
    pub sources: Vec<MovieRecord>,
    pub movies: Vec<ScoredMovie>,
}

/// Result of a profile-based suggestion request.
#[derive(Debug, Clone)]
pub struct Suggestions {
    pub profile: TasteProfile,
    pub movies: Vec<ScoredMovie>,
}

/// Result of a mood request.
#[derive(Debug, Clone)]
pub struct MoodReply {
    /// The model's raw answer
    pub response: String,
    pub titles: Vec<String>,
    /// TMDb matches for `titles`, only filled when resolving was requested
    pub resolved: Vec<MovieRecord>,
}

/// Ties the remote catalog, the local store and the ranking engine together.
pub struct RecommendationOrchestrator<S> {
    source: S,
    store: MovieStore,
}

impl<S: MovieSource> RecommendationOrchestrator<S> {
    pub fn new(source: S, store: MovieStore) -> Self {
        Self { source, store }
    }

    pub fn store(&self) -> &MovieStore {
        &self.store
    }

    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<MovieRecord>> {
        self.source
            .search(query)
            .await
            .with_context(|| format!("Search for '{query}' failed"))
    }

    /// Best match for `title`: the first search hit, with full details.
    #[instrument(skip(self))]
    pub async fn resolve_title(&self, title: &str) -> Result<Option<MovieDetails>> {
        let results = self.search(title).await?;
        let Some(first) = results.first() else {
            debug!("No match for '{}'", title);
            return Ok(None);
        };

        let details = self
            .source
            .details(first.id)
            .await
            .with_context(|| format!("Failed to fetch details for movie {}", first.id))?;
        Ok(Some(details))
    }

    /// Resolve, cache and rate a movie. `Ok(None)` if the title wasn't found.
    pub async fn rate(&self, title: &str, rating: UserRating) -> Result<Option<MovieDetails>> {
        self.record_watch(title, Some(rating)).await
    }

    /// Resolve, cache and mark a movie watched without a rating.
    pub async fn mark_watched(&self, title: &str) -> Result<Option<MovieDetails>> {
        self.record_watch(title, None).await
    }

    async fn record_watch(
        &self,
        title: &str,
        rating: Option<UserRating>,
    ) -> Result<Option<MovieDetails>> {
        let Some(details) = self.resolve_title(title).await? else {
            return Ok(None);
        };

        self.store
            .cache_movie(&details.record)
            .context("Failed to cache movie")?;
        self.store
            .add_rating(details.record.id, rating)
            .context("Failed to save rating")?;

        info!(
            "Recorded {} ({}) as {}",
            details.record.title,
            details.record.id,
            rating.map(|r| r.to_string()).unwrap_or_else(|| "watched".to_string())
        );
        Ok(Some(details))
    }

    /// Watch history, newest first.
    pub fn history(&self) -> Result<Vec<RatedMovie>> {
        self.store.all_ratings().context("Failed to read watch history")
    }

    /// Movies similar to `titles`, drawn from the first `pages` popular pages.
    ///
    /// Titles that can't be found are skipped; if none are found the request
    /// fails with [`ServiceError::NoSourceMovies`].
    #[instrument(skip(self, titles), fields(titles = titles.len()))]
    pub async fn similar_to(
        &self,
        titles: &[String],
        limit: usize,
        pages: u32,
    ) -> Result<SimilarMovies> {
        let start_time = Instant::now();

        let (sources, candidates) = tokio::join!(self.resolve_all(titles), self.popular_pages(pages));
        let sources = sources?;
        let candidates = candidates?;

        if sources.is_empty() {
            return Err(ServiceError::NoSourceMovies.into());
        }
        info!(
            "Resolved {} of {} titles, {} candidates",
            sources.len(),
            titles.len(),
            candidates.len()
        );

        let context = CandidateContext::new()
            .with_watched(self.store.watched_ids().context("Failed to read watched movies")?)
            .with_excluded(sources.iter().map(|m| m.id));
        let pipeline = FilterPipeline::new()
            .add_filter(DedupFilter)
            .add_filter(ExcludedFilter)
            .add_filter(AlreadyWatchedFilter);
        let candidates = pipeline
            .apply(candidates, &context)
            .context("Failed to apply filters")?;

        let ranked = tokio::task::spawn_blocking({
            let sources = sources.clone();
            move || find_similar_movies(&sources, &candidates, limit)
        })
        .await
        .context("Similarity task panicked")?;

        info!(
            "Ranked {} similar movies in {:.2?}",
            ranked.len(),
            start_time.elapsed()
        );
        Ok(SimilarMovies {
            sources,
            movies: ranked,
        })
    }

    /// Popular movies ranked against the user's taste profile.
    ///
    /// Needs at least [`MIN_RATINGS_FOR_SUGGEST`] rated movies. Candidates
    /// without a TMDb average of `min_rating` are dropped when it is set.
    #[instrument(skip(self))]
    pub async fn suggest(
        &self,
        limit: usize,
        pages: u32,
        min_rating: Option<f32>,
    ) -> Result<Suggestions> {
        let rated = self.store.rated_movies().context("Failed to read ratings")?;
        if rated.len() < MIN_RATINGS_FOR_SUGGEST {
            return Err(ServiceError::NotEnoughRatings {
                rated: rated.len(),
                required: MIN_RATINGS_FOR_SUGGEST,
            }
            .into());
        }

        let profile = build_taste_profile(&rated);
        info!("Top genres: {}", profile.top_genres.join(", "));

        let candidates = self.popular_pages(pages).await?;
        let context = CandidateContext::new()
            .with_watched(self.store.watched_ids().context("Failed to read watched movies")?);
        let mut pipeline = FilterPipeline::new()
            .add_filter(DedupFilter)
            .add_filter(AlreadyWatchedFilter);
        if let Some(min_rating) = min_rating {
            pipeline = pipeline.add_filter(MinimumRatingFilter::new(min_rating));
        }
        let candidates = pipeline
            .apply(candidates, &context)
            .context("Failed to apply filters")?;

        let (profile, mut movies) = tokio::task::spawn_blocking(move || {
            let scored = score_by_profile(&candidates, &profile);
            (profile, scored)
        })
        .await
        .context("Scoring task panicked")?;
        movies.truncate(limit);

        Ok(Suggestions { profile, movies })
    }

    /// Highest-rated movies for the given genre names, year and minimum
    /// rating, in TMDb's order, with watched movies removed.
    #[instrument(skip(self))]
    pub async fn discover(
        &self,
        genres: &[String],
        year: Option<i32>,
        min_rating: Option<f32>,
        limit: usize,
    ) -> Result<Vec<MovieRecord>> {
        let mut genre_ids = Vec::with_capacity(genres.len());
        for name in genres {
            let id = self
                .source
                .genre_id(name)
                .await
                .context("Failed to load genre list")?
                .ok_or_else(|| ServiceError::UnknownGenre(name.clone()))?;
            genre_ids.push(id);
        }

        let query = DiscoverQuery {
            genre_ids,
            year,
            min_rating,
        };
        let results = self
            .source
            .discover(&query)
            .await
            .context("Discover request failed")?;

        let context = CandidateContext::new()
            .with_watched(self.store.watched_ids().context("Failed to read watched movies")?);
        let mut movies = FilterPipeline::new()
            .add_filter(DedupFilter)
            .add_filter(AlreadyWatchedFilter)
            .apply(results, &context)?;
        movies.truncate(limit);
        Ok(movies)
    }

    /// [`ask_for_mood`], then with `resolve` look each parsed title up on
    /// TMDb. Titles without a match are left out.
    #[instrument(skip(self, llm))]
    pub async fn mood(
        &self,
        llm: &OllamaClient,
        mood_query: &str,
        num_suggestions: usize,
        resolve: bool,
    ) -> Result<MoodReply> {
        let mut reply = ask_for_mood(&self.store, llm, mood_query, num_suggestions).await?;
        if resolve {
            reply.resolved = self.resolve_suggestions(&reply.titles).await?;
        }
        Ok(reply)
    }

    /// First search hit for each suggested title, in order.
    pub async fn resolve_suggestions(&self, titles: &[String]) -> Result<Vec<MovieRecord>> {
        let mut resolved = Vec::with_capacity(titles.len());
        for title in titles {
            match self.search(title).await?.into_iter().next() {
                Some(movie) => resolved.push(movie),
                None => warn!("No TMDb match for suggestion '{}'", title),
            }
        }
        Ok(resolved)
    }

    async fn resolve_all(&self, titles: &[String]) -> Result<Vec<MovieRecord>> {
        let mut found = Vec::with_capacity(titles.len());
        for title in titles {
            match self.resolve_title(title).await? {
                Some(details) => found.push(details.record),
                None => warn!("Movie not found: '{}'", title),
            }
        }
        Ok(found)
    }

    /// Popular pages `1..=pages`, concatenated in page order.
    async fn popular_pages(&self, pages: u32) -> Result<Vec<MovieRecord>> {
        let mut candidates = Vec::new();
        for page in 1..=pages.max(1) {
            let movies = self
                .source
                .popular(page)
                .await
                .with_context(|| format!("Failed to fetch popular page {page}"))?;
            debug!("Popular page {}: {} movies", page, movies.len());
            candidates.extend(movies);
        }
        Ok(candidates)
    }
}

/// Ask the local model for movies matching `mood_query`.
///
/// The prompt carries the user's profile built from whatever they have
/// rated, possibly nothing. Needs no remote catalog.
pub async fn ask_for_mood(
    store: &MovieStore,
    llm: &OllamaClient,
    mood_query: &str,
    num_suggestions: usize,
) -> Result<MoodReply> {
    let availability = llm.check_available().await;
    if !availability.is_ready() {
        return Err(ServiceError::LlmUnavailable(availability).into());
    }

    let rated = store.rated_movies().context("Failed to read ratings")?;
    let profile = build_taste_profile(&rated);

    let response = llm
        .mood_recommendations(mood_query, &profile, num_suggestions)
        .await
        .context("Ollama request failed")?;
    let titles = parse_movie_suggestions(&response);
    debug!("Parsed {} titles from model reply", titles.len());

    Ok(MoodReply {
        response,
        titles,
        resolved: Vec::new(),
    })
}
