mod config;
mod display;

use anyhow::{bail, Context, Result};
use catalog::{MovieStore, UserRating};
use clap::{Parser, Subcommand};
use colored::Colorize;
use config::{Config, Paths, API_KEY_ENV};
use llm::{OllamaClient, DEFAULT_SUGGESTIONS};
use service::{ask_for_mood, RecommendationOrchestrator, ServiceError};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;
use tmdb::{TmdbClient, TmdbError};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// flickpick - track what you watch and find what to watch next
#[derive(Parser)]
#[command(name = "flickpick", version)]
#[command(about = "Movie recommendations from your ratings, TMDb and a local LLM", long_about = None)]
struct Cli {
    /// Directory holding config.json
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    /// Directory holding the ratings database
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version
    Version,

    /// Save a TMDb API key and check for Ollama
    Setup {
        /// API key; prompted for when omitted
        #[arg(long)]
        api_key: Option<String>,
    },

    /// Search for movies on TMDb
    Search {
        /// Movie title to search for
        query: String,
    },

    /// Show detailed movie information
    Info {
        /// Movie title
        title: String,
    },

    /// Rate a movie (1-10)
    Rate {
        /// Movie title
        title: String,

        /// Rating from 1 to 10
        #[arg(allow_negative_numbers = true)]
        rating: i64,
    },

    /// Mark a movie as watched without rating it
    Watched {
        /// Movie title
        title: String,
    },

    /// Show your watch history
    History,

    /// Find movies similar to the ones you name
    Like {
        /// Movie title(s)
        #[arg(required = true)]
        titles: Vec<String>,

        /// Number of recommendations
        #[arg(short = 'n', long, default_value = "10")]
        limit: usize,

        /// Popular-movie pages to draw candidates from
        #[arg(long, default_value = "1")]
        pages: u32,
    },

    /// Personalized recommendations from your ratings
    Suggest {
        /// Number of recommendations
        #[arg(short = 'n', long, default_value = "10")]
        limit: usize,

        /// Popular-movie pages to draw candidates from
        #[arg(long, default_value = "1")]
        pages: u32,

        /// Drop candidates with a lower TMDb average
        #[arg(long)]
        min_rating: Option<f32>,
    },

    /// Top-rated movies by genre, year and rating
    Discover {
        /// Genre name; repeat for several
        #[arg(long = "genre")]
        genres: Vec<String>,

        #[arg(long)]
        year: Option<i32>,

        #[arg(long)]
        min_rating: Option<f32>,

        /// Number of results
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },

    /// Recommendations for a mood, from a local LLM
    Mood {
        /// What you're in the mood for
        query: String,

        /// Look the suggested titles up on TMDb
        #[arg(long)]
        resolve: bool,

        /// Number of suggestions to ask for
        #[arg(short = 'n', long, default_value_t = DEFAULT_SUGGESTIONS)]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let paths = Paths::resolve(cli.config_dir, cli.data_dir)?;
    debug!("Using {:?}", paths);
    let start = Instant::now();

    match cli.command {
        Commands::Version => println!("{} v{}", "flickpick".bold(), env!("CARGO_PKG_VERSION")),
        Commands::Setup { api_key } => handle_setup(&paths, api_key).await?,
        Commands::Search { query } => handle_search(&paths, &query).await?,
        Commands::Info { title } => handle_info(&paths, &title).await?,
        Commands::Rate { title, rating } => handle_rate(&paths, &title, rating).await?,
        Commands::Watched { title } => handle_watched(&paths, &title).await?,
        Commands::History => handle_history(&paths)?,
        Commands::Like {
            titles,
            limit,
            pages,
        } => handle_like(&paths, &titles, limit, pages).await?,
        Commands::Suggest {
            limit,
            pages,
            min_rating,
        } => handle_suggest(&paths, limit, pages, min_rating).await?,
        Commands::Discover {
            genres,
            year,
            min_rating,
            limit,
        } => handle_discover(&paths, &genres, year, min_rating, limit).await?,
        Commands::Mood {
            query,
            resolve,
            limit,
        } => handle_mood(&paths, &query, resolve, limit).await?,
    }

    debug!("Finished in {:.2?}", start.elapsed());
    Ok(())
}

/// Logs go to stderr so tables on stdout stay clean. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();
}

fn open_store(paths: &Paths) -> Result<MovieStore> {
    let path = paths.database();
    MovieStore::open(&path).with_context(|| format!("Failed to open database {}", path.display()))
}

fn tmdb_client(config: &Config) -> Result<TmdbClient> {
    let key = config
        .api_key(std::env::var(API_KEY_ENV).ok())
        .ok_or(TmdbError::MissingApiKey)?;
    Ok(TmdbClient::new(key)?)
}

fn orchestrator(paths: &Paths) -> Result<RecommendationOrchestrator<TmdbClient>> {
    let config = paths.load_config()?;
    let client = tmdb_client(&config)?;
    Ok(RecommendationOrchestrator::new(client, open_store(paths)?))
}

fn ollama(config: &Config) -> Result<OllamaClient> {
    Ok(OllamaClient::new(config.ollama_url(), config.ollama_model())?)
}

fn ok_mark() -> colored::ColoredString {
    "OK".green()
}

/// Handle the 'setup' command
async fn handle_setup(paths: &Paths, api_key: Option<String>) -> Result<()> {
    println!("{}", "Welcome to flickpick! Let's get you set up.".bold().blue());

    println!("\n{}", "1. TMDb API Key".bold());
    let api_key = match api_key {
        Some(key) => key,
        None => {
            println!("   Get one free at: https://www.themoviedb.org/settings/api");
            print!("   Paste your API key: ");
            io::stdout().flush()?;
            let mut line = String::new();
            io::stdin().lock().read_line(&mut line)?;
            line
        }
    };

    let api_key = api_key.trim();
    if api_key.is_empty() {
        println!("   {} No key entered, keeping the current one", "!".yellow());
    } else {
        paths.save_config(&Config {
            tmdb_api_key: Some(api_key.to_string()),
            ..Default::default()
        })?;
        println!("   {} API key saved to {}", ok_mark(), paths.config_file().display());
    }

    println!("\n{}", "2. Ollama (for mood-based recommendations)".bold());
    let config = paths.load_config()?;
    let availability = ollama(&config)?.check_available().await;
    if availability.is_ready() {
        println!("   {} {}", ok_mark(), availability);
    } else {
        println!("   {} {}", "!".yellow(), availability);
        println!(
            "   Install Ollama from https://ollama.com, then run: ollama pull {}",
            config.ollama_model()
        );
    }

    println!("\n{}", "Setup complete!".green());
    println!("Try: flickpick search inception");
    Ok(())
}

/// Handle the 'search' command
async fn handle_search(paths: &Paths, query: &str) -> Result<()> {
    let client = tmdb_client(&paths.load_config()?)?;
    let results = client.search(query).await?;

    if results.is_empty() {
        println!("No movies found for '{query}'");
        return Ok(());
    }

    let shown = &results[..results.len().min(10)];
    display::print_movies(&format!("Search results for '{query}'"), shown);
    Ok(())
}

/// Handle the 'info' command
async fn handle_info(paths: &Paths, title: &str) -> Result<()> {
    let orchestrator = orchestrator(paths)?;
    match orchestrator.resolve_title(title).await? {
        Some(details) => display::print_details(&details),
        None => println!("Movie not found: '{title}'"),
    }
    Ok(())
}

/// Handle the 'rate' command
async fn handle_rate(paths: &Paths, title: &str, rating: i64) -> Result<()> {
    // Validate before touching the network
    let rating = UserRating::try_from(rating)?;

    let orchestrator = orchestrator(paths)?;
    let Some(details) = orchestrator.rate(title, rating).await? else {
        bail!("Movie not found: '{title}'");
    };

    println!(
        "{} Rated {} ({}) - {}",
        ok_mark(),
        details.record.title.bold(),
        display::year(details.record.year),
        rating
    );
    Ok(())
}

/// Handle the 'watched' command
async fn handle_watched(paths: &Paths, title: &str) -> Result<()> {
    let orchestrator = orchestrator(paths)?;
    let Some(details) = orchestrator.mark_watched(title).await? else {
        bail!("Movie not found: '{title}'");
    };

    println!(
        "{} Marked {} ({}) as watched",
        ok_mark(),
        details.record.title.bold(),
        display::year(details.record.year)
    );
    Ok(())
}

/// Handle the 'history' command
fn handle_history(paths: &Paths) -> Result<()> {
    let history = open_store(paths)?.all_ratings()?;
    if history.is_empty() {
        println!("No movies in your history yet. Try: flickpick rate 'Inception' 9");
        return Ok(());
    }
    display::print_history(&history);
    Ok(())
}

/// Handle the 'like' command
async fn handle_like(paths: &Paths, titles: &[String], limit: usize, pages: u32) -> Result<()> {
    let orchestrator = orchestrator(paths)?;
    let similar = orchestrator.similar_to(titles, limit, pages).await?;

    let names: Vec<&str> = similar.sources.iter().map(|m| m.title.as_str()).collect();
    println!("\n{} {}\n", "Movies similar to:".bold(), names.join(", "));
    display::print_similar("Recommendations", &similar.movies);
    Ok(())
}

/// Handle the 'suggest' command
async fn handle_suggest(
    paths: &Paths,
    limit: usize,
    pages: u32,
    min_rating: Option<f32>,
) -> Result<()> {
    let orchestrator = orchestrator(paths)?;
    let suggestions = match orchestrator.suggest(limit, pages, min_rating).await {
        Ok(suggestions) => suggestions,
        Err(e) => match e.downcast_ref::<ServiceError>() {
            Some(reason) if matches!(reason, ServiceError::NotEnoughRatings { .. }) => {
                println!("{reason}.");
                println!("Try: flickpick rate 'Movie Name' 8");
                return Ok(());
            }
            _ => return Err(e),
        },
    };

    println!(
        "\n{} {}\n",
        "Your top genres:".bold(),
        suggestions.profile.top_genres.join(", ")
    );
    display::print_suggestions("Recommended for You", &suggestions.movies);
    Ok(())
}

/// Handle the 'discover' command
async fn handle_discover(
    paths: &Paths,
    genres: &[String],
    year: Option<i32>,
    min_rating: Option<f32>,
    limit: usize,
) -> Result<()> {
    let orchestrator = orchestrator(paths)?;
    let movies = orchestrator.discover(genres, year, min_rating, limit).await?;

    if movies.is_empty() {
        println!("Nothing new matches those filters");
        return Ok(());
    }
    display::print_movies("Discover", &movies);
    Ok(())
}

/// Handle the 'mood' command
async fn handle_mood(paths: &Paths, query: &str, resolve: bool, limit: usize) -> Result<()> {
    let config = paths.load_config()?;
    let llm = ollama(&config)?;

    println!("{}", "Thinking...".blue());
    let reply = if resolve {
        orchestrator(paths)?.mood(&llm, query, limit, true).await?
    } else {
        ask_for_mood(&open_store(paths)?, &llm, query, limit).await?
    };

    println!("\n{} {}\n", "Mood:".bold(), query);
    println!("{}", reply.response);

    if resolve {
        println!();
        if reply.resolved.is_empty() {
            println!("None of the suggestions were found on TMDb");
        } else {
            display::print_movies("On TMDb", &reply.resolved);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_like_with_limit() {
        let cli = Cli::try_parse_from(["flickpick", "like", "Alien", "Heat", "-n", "5"]).unwrap();
        match cli.command {
            Commands::Like {
                titles,
                limit,
                pages,
            } => {
                assert_eq!(titles, vec!["Alien", "Heat"]);
                assert_eq!(limit, 5);
                assert_eq!(pages, 1);
            }
            _ => panic!("expected like"),
        }
    }

    #[test]
    fn test_parse_discover_repeated_genre() {
        let cli = Cli::try_parse_from([
            "flickpick", "discover", "--genre", "Horror", "--genre", "Mystery", "--year", "1999",
        ])
        .unwrap();
        match cli.command {
            Commands::Discover { genres, year, .. } => {
                assert_eq!(genres, vec!["Horror", "Mystery"]);
                assert_eq!(year, Some(1999));
            }
            _ => panic!("expected discover"),
        }
    }

    #[test]
    fn test_global_dirs_after_subcommand() {
        let cli = Cli::try_parse_from(["flickpick", "history", "--data-dir", "/tmp/fp"]).unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/fp")));
    }

    #[test]
    fn test_like_requires_a_title() {
        assert!(Cli::try_parse_from(["flickpick", "like"]).is_err());
    }

    #[tokio::test]
    async fn test_rate_rejects_out_of_range_before_network() {
        let dir = tempfile::tempdir().unwrap();
        let paths = Paths::resolve(Some(dir.path().join("cfg")), Some(dir.path().join("data"))).unwrap();

        let err = handle_rate(&paths, "Inception", 11).await.unwrap_err();
        assert!(err.to_string().contains("between 1 and 10"));
        // Nothing was opened or written
        assert!(!paths.database().exists());
    }

    #[test]
    fn test_history_on_fresh_database() {
        let dir = tempfile::tempdir().unwrap();
        let paths = Paths::resolve(Some(dir.path().join("cfg")), Some(dir.path().join("data"))).unwrap();
        handle_history(&paths).unwrap();
        assert!(paths.database().exists());
    }
}
