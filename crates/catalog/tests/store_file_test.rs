//! Integration tests for the on-disk store.
//!
//! These open a real database file, close it, and reopen it to check that
//! cached movies and ratings survive between runs.

use catalog::{MovieRecord, MovieStore, UserRating};

#[test]
fn test_store_persists_between_opens() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("nested").join("flickpick.db");

    {
        let store = MovieStore::open(&db_path).unwrap();
        let movie = MovieRecord::new(603, "The Matrix")
            .with_year(1999)
            .with_genres(["Action", "Science Fiction"])
            .with_plot("A hacker learns the truth about his reality.");
        store.cache_movie(&movie).unwrap();
        store
            .add_rating(603, Some(UserRating::try_from(10).unwrap()))
            .unwrap();
    }

    let reopened = MovieStore::open(&db_path).unwrap();
    let rated = reopened.rated_movies().unwrap();
    assert_eq!(rated.len(), 1);
    assert_eq!(rated[0].movie.title, "The Matrix");
    assert_eq!(rated[0].movie.genres, vec!["Action", "Science Fiction"]);
    assert_eq!(rated[0].effective_rating(), 10);
    assert!(!rated[0].watched_at.is_empty());
}

#[test]
fn test_rating_without_cached_movie_is_hidden_from_history() {
    let store = MovieStore::open_in_memory().unwrap();
    store.add_rating(42, None).unwrap();

    // Watched status is tracked even though the join has nothing to show
    assert!(store.is_watched(42).unwrap());
    assert!(store.all_ratings().unwrap().is_empty());
}
