use anyhow::{Result, bail};
use catalog::{MovieDetails, MovieId, MovieRecord, MovieStore, UserRating};
use service::{MovieSource, RecommendationOrchestrator};
use tmdb::DiscoverQuery;

/// Knows exactly one movie and has nothing popular.
struct SingleMovie(MovieRecord);

impl MovieSource for SingleMovie {
    async fn search(&self, query: &str) -> Result<Vec<MovieRecord>> {
        if self.0.title.eq_ignore_ascii_case(query) {
            Ok(vec![self.0.clone()])
        } else {
            Ok(Vec::new())
        }
    }

    async fn details(&self, id: MovieId) -> Result<MovieDetails> {
        if id != self.0.id {
            bail!("unknown movie {id}");
        }
        Ok(MovieDetails {
            record: self.0.clone(),
            runtime: Some(148),
            tagline: Some("Your mind is the scene of the crime.".to_string()),
        })
    }

    async fn popular(&self, _page: u32) -> Result<Vec<MovieRecord>> {
        Ok(Vec::new())
    }

    async fn discover(&self, _query: &DiscoverQuery) -> Result<Vec<MovieRecord>> {
        Ok(Vec::new())
    }

    async fn genre_id(&self, _name: &str) -> Result<Option<u32>> {
        Ok(None)
    }
}

fn inception() -> MovieRecord {
    MovieRecord::new(27205, "Inception")
        .with_year(2010)
        .with_genres(["Action", "Science Fiction"])
        .with_plot("A thief steals secrets through dream-sharing technology.")
}

#[tokio::test]
async fn test_rating_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("flickpick").join("flickpick.db");

    {
        let store = MovieStore::open(&db_path).unwrap();
        let orchestrator = RecommendationOrchestrator::new(SingleMovie(inception()), store);
        let rating = UserRating::try_from(9).unwrap();
        let details = orchestrator.rate("inception", rating).await.unwrap();
        assert_eq!(details.unwrap().runtime, Some(148));
    }

    let reopened = MovieStore::open(&db_path).unwrap();
    let orchestrator = RecommendationOrchestrator::new(SingleMovie(inception()), reopened);
    let history = orchestrator.history().unwrap();

    assert_eq!(history.len(), 1);
    assert_eq!(history[0].movie.title, "Inception");
    assert_eq!(history[0].movie.year, Some(2010));
    assert_eq!(history[0].rating.map(UserRating::value), Some(9));
}

#[tokio::test]
async fn test_empty_popular_list_gives_empty_suggestions() {
    let store = MovieStore::open_in_memory().unwrap();
    for (id, rating) in [(1, 8), (2, 6), (3, 9)] {
        store
            .cache_movie(&MovieRecord::new(id, format!("Rated {id}")).with_genres(["Drama"]))
            .unwrap();
        store
            .add_rating(id, Some(UserRating::try_from(rating).unwrap()))
            .unwrap();
    }

    let orchestrator = RecommendationOrchestrator::new(SingleMovie(inception()), store);
    let suggestions = orchestrator.suggest(10, 2, None).await.unwrap();
    assert_eq!(suggestions.profile.top_genres, vec!["Drama"]);
    assert!(suggestions.movies.is_empty());
}
