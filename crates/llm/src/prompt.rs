//! Prompt construction for mood-based suggestions.

use recommender::TasteProfile;

/// Ollama model used when none is configured.
pub const DEFAULT_MODEL: &str = "llama3.2";

/// Default number of movies to ask the model for.
pub const DEFAULT_SUGGESTIONS: usize = 5;

/// Build the chat prompt for a mood request.
///
/// The user's top genres are listed as context; an empty profile reads as
/// "various genres".
pub fn build_mood_prompt(mood_query: &str, profile: &TasteProfile, num_suggestions: usize) -> String {
    let genres = if profile.top_genres.is_empty() {
        "various genres".to_string()
    } else {
        profile.top_genres.join(", ")
    };

    format!(
        "You are a movie recommendation expert. Based on the user's mood and preferences, suggest {n} movies.\n\
         \n\
         User's favorite genres: {genres}\n\
         User's mood/request: \"{mood_query}\"\n\
         \n\
         Rules:\n\
         1. Suggest exactly {n} movies\n\
         2. Each movie should match the mood described\n\
         3. Consider the user's genre preferences but don't be limited by them\n\
         4. Format: numbered list with movie title and year\n\
         5. Include a brief one-line description for each\n\
         \n\
         Respond with just the movie list, no preamble.",
        n = num_suggestions,
    )
}
