use llm::{Availability, OllamaClient, build_mood_prompt, parse_movie_suggestions};
use recommender::TasteProfile;

#[tokio::test]
async fn test_unreachable_server_reports_not_running() {
    // Port 9 (discard) is closed on test machines
    let client = OllamaClient::new("http://127.0.0.1:9", "llama3.2").unwrap();
    assert_eq!(client.check_available().await, Availability::NotRunning);
}

#[test]
fn test_prompt_reply_round_trip() {
    let profile = TasteProfile {
        top_genres: vec!["Horror".to_string()],
        ..Default::default()
    };
    let prompt = build_mood_prompt("mind-bending", &profile, 2);
    assert!(prompt.contains("Horror"));

    let reply = "Here are two mind-bending picks:\n1. Inception (2010) - Dreams within dreams.\n2. The Matrix (1999)";
    assert_eq!(parse_movie_suggestions(reply), vec!["Inception (2010)", "The Matrix (1999)"]);
}
