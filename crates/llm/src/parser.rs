//! Extract movie titles from free-form model output.

use regex::Regex;
use std::sync::LazyLock;

static NUMBERING: LazyLock<Regex> = LazyLock::new(|| {
    // Pattern is a compile-time constant
    Regex::new(r"^\d+[.)]\s*").unwrap()
});

static BULLET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-•*]\s*").unwrap());

const PREAMBLE_PREFIXES: [&str; 3] = ["based on", "here are", "i recommend"];

/// Parse the model's list of movies into bare titles.
///
/// Handles numbered lists (`1. Title (Year) - blurb`), bullets and quoted
/// titles. Lead-in prose is skipped. Titles keep any year suffix.
pub fn parse_movie_suggestions(response: &str) -> Vec<String> {
    response.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() || is_preamble(line) {
        return None;
    }

    let line = NUMBERING.replace(line, "");
    let line = BULLET.replace(&line, "");
    let line = line.trim_matches(|c| c == '"' || c == '\'');

    let title = match line.split_once(" - ") {
        Some((title, _)) => title,
        None => line,
    }
    .trim();

    (title.chars().count() > 1).then(|| title.to_string())
}

fn is_preamble(line: &str) -> bool {
    let lowered = line.to_lowercase();
    line.ends_with(':') || PREAMBLE_PREFIXES.iter().any(|p| lowered.starts_with(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_list_with_preamble() {
        let response = "Based on your preferences, here are some recommendations:\n\
            \n\
            1. Arrival (2016) - A linguist works with the military to communicate with aliens.\n\
            2. Ex Machina (2014) - A programmer evaluates an AI.\n\
            3) Blade Runner 2049 (2017) - A blade runner discovers a secret.\n";

        assert_eq!(
            parse_movie_suggestions(response),
            vec!["Arrival (2016)", "Ex Machina (2014)", "Blade Runner 2049 (2017)"]
        );
    }

    #[test]
    fn test_bullets() {
        let response = "\n- The Matrix\n• Inception\n* Interstellar\n";
        assert_eq!(parse_movie_suggestions(response), vec!["The Matrix", "Inception", "Interstellar"]);
    }

    #[test]
    fn test_quoted_titles_keep_inner_colon() {
        let response = "\"Blade Runner\"\n\"2001: A Space Odyssey\"\n'Alien'";
        assert_eq!(
            parse_movie_suggestions(response),
            vec!["Blade Runner", "2001: A Space Odyssey", "Alien"]
        );
    }

    #[test]
    fn test_skips_prose_and_single_characters() {
        let response = "Here are five picks\nI recommend these\nMy list:\n1. X\n2. Heat (1995)";
        assert_eq!(parse_movie_suggestions(response), vec!["Heat (1995)"]);
    }

    #[test]
    fn test_empty_response() {
        assert!(parse_movie_suggestions("").is_empty());
        assert!(parse_movie_suggestions("\n   \n").is_empty());
    }
}
