//! Mood-based suggestions from a local LLM served by Ollama.
//!
//! The model is given the user's top genres and a free-text mood, and its
//! numbered-list reply is parsed back into movie titles that can be looked
//! up on TMDb.
//!
//! ## Example Usage
//!
//! ```ignore
//! use llm::{DEFAULT_MODEL, DEFAULT_OLLAMA_URL, OllamaClient, parse_movie_suggestions};
//!
//! let client = OllamaClient::new(DEFAULT_OLLAMA_URL, DEFAULT_MODEL)?;
//! if client.check_available().await.is_ready() {
//!     let reply = client.mood_recommendations("rainy sunday", &profile, 5).await?;
//!     for title in parse_movie_suggestions(&reply) {
//!         println!("{title}");
//!     }
//! }
//! ```

pub mod ollama;
pub mod parser;
pub mod prompt;

pub use ollama::{Availability, DEFAULT_OLLAMA_URL, LlmError, OllamaClient, Result};
pub use parser::parse_movie_suggestions;
pub use prompt::{DEFAULT_MODEL, DEFAULT_SUGGESTIONS, build_mood_prompt};
