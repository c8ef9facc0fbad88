//! Terminal output for movie lists.

use catalog::{MovieDetails, MovieRecord, RatedMovie};
use colored::Colorize;
use recommender::ScoredMovie;

const TITLE_WIDTH: usize = 40;
const MAX_GENRES: usize = 3;

pub fn year(year: Option<i32>) -> String {
    year.map(|y| y.to_string()).unwrap_or_else(|| "-".to_string())
}

/// First three genres, comma-separated.
pub fn genres(genres: &[String]) -> String {
    if genres.is_empty() {
        return "-".to_string();
    }
    genres
        .iter()
        .take(MAX_GENRES)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn vote(vote_average: Option<f32>) -> String {
    match vote_average {
        Some(v) if v > 0.0 => format!("{v:.1}"),
        _ => "-".to_string(),
    }
}

/// Similarity as a whole percentage.
pub fn match_percent(similarity: Option<f64>) -> String {
    format!("{:.0}%", similarity.unwrap_or(0.0) * 100.0)
}

/// Cut long titles so columns stay aligned.
fn fit(title: &str) -> String {
    if title.chars().count() <= TITLE_WIDTH {
        return title.to_string();
    }
    let cut: String = title.chars().take(TITLE_WIDTH - 1).collect();
    format!("{cut}…")
}

fn header(columns: &str) {
    println!("{}", columns.dimmed());
}

/// Numbered table with a trailing score column.
fn print_rows<'a>(
    heading: &str,
    last_column: &str,
    rows: impl Iterator<Item = (&'a MovieRecord, String)>,
) {
    println!("{}", heading.bold().blue());
    header(&format!(
        "{:>3}  {:<width$}  {:<6}  {:<30}  {}",
        "#",
        "Title",
        "Year",
        "Genres",
        last_column,
        width = TITLE_WIDTH
    ));
    for (i, (movie, last)) in rows.enumerate() {
        println!(
            "{:>3}  {}  {:<6}  {:<30}  {}",
            (i + 1).to_string().green(),
            format!("{:<width$}", fit(&movie.title), width = TITLE_WIDTH).bold(),
            year(movie.year),
            genres(&movie.genres),
            last
        );
    }
}

/// Listing with TMDb's average rating.
pub fn print_movies(heading: &str, movies: &[MovieRecord]) {
    print_rows(
        heading,
        "TMDb",
        movies.iter().map(|m| (m, vote(m.vote_average))),
    );
}

pub fn print_similar(heading: &str, movies: &[ScoredMovie]) {
    print_rows(
        heading,
        "Match",
        movies
            .iter()
            .map(|s| (&s.movie, match_percent(s.similarity()))),
    );
}

pub fn print_suggestions(heading: &str, movies: &[ScoredMovie]) {
    print_rows(
        heading,
        "TMDb",
        movies.iter().map(|s| (&s.movie, vote(s.movie.vote_average))),
    );
}

pub fn print_history(entries: &[RatedMovie]) {
    println!("{}", "Your Watch History".bold().blue());
    header(&format!(
        "{:<width$}  {:<6}  {:<8}  {}",
        "Title",
        "Year",
        "Rating",
        "Genres",
        width = TITLE_WIDTH
    ));
    for entry in entries {
        let rating = match entry.rating {
            Some(r) => format!("{:<8}", r.to_string()).yellow(),
            None => format!("{:<8}", "watched").dimmed(),
        };
        println!(
            "{}  {:<6}  {}  {}",
            format!("{:<width$}", fit(&entry.movie.title), width = TITLE_WIDTH).bold(),
            year(entry.movie.year),
            rating,
            genres(&entry.movie.genres)
        );
    }
}

pub fn print_details(details: &MovieDetails) {
    let movie = &details.record;
    println!(
        "{} ({})",
        movie.title.bold(),
        movie.year.map(|y| y.to_string()).unwrap_or_else(|| "N/A".to_string())
    );
    if let Some(tagline) = &details.tagline {
        println!("{}", tagline.dimmed());
    }
    println!();
    println!("{} {}", "Genres:".bold(), genres(&movie.genres));
    println!(
        "{} {}",
        "Runtime:".bold(),
        details
            .runtime
            .map(|r| format!("{r} min"))
            .unwrap_or_else(|| "N/A".to_string())
    );
    println!("{} {}/10", "Rating:".bold(), vote(movie.vote_average));
    println!();
    println!("{}", "Plot:".bold());
    println!(
        "{}",
        movie.plot.as_deref().unwrap_or("No plot available.")
    );
}
