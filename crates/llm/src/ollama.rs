//! Minimal client for a local Ollama server.

use crate::prompt::build_mood_prompt;
use recommender::TasteProfile;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, instrument};

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

// Generation on a laptop CPU can be slow
const CHAT_TIMEOUT: Duration = Duration::from_secs(300);
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Ollama returned status {status}: {body}")]
    Api { status: u16, body: String },
}

pub type Result<T> = std::result::Result<T, LlmError>;

/// Outcome of probing the Ollama server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    Ready,
    /// Server is up but the model has not been pulled
    ModelMissing(String),
    NotRunning,
    Error(String),
}

impl Availability {
    pub fn is_ready(&self) -> bool {
        matches!(self, Availability::Ready)
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Availability::Ready => write!(f, "Ollama ready"),
            Availability::ModelMissing(model) => {
                write!(f, "Model '{model}' not found. Run: ollama pull {model}")
            }
            Availability::NotRunning => write!(f, "Ollama not running. Start with: ollama serve"),
            Availability::Error(msg) => write!(f, "Ollama error: {msg}"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct TagList {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Debug, Deserialize)]
struct ModelTag {
    name: String,
}

/// Drop the `:tag` suffix from a model name.
fn base_name(model: &str) -> &str {
    model.split(':').next().unwrap_or(model)
}

fn has_model(tags: &TagList, model: &str) -> bool {
    let wanted = base_name(model);
    tags.models.iter().any(|m| base_name(&m.name) == wanted)
}

pub struct OllamaClient {
    http: HttpClient,
    base_url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let http = HttpClient::builder().timeout(CHAT_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Check that the server answers and the configured model is pulled.
    pub async fn check_available(&self) -> Availability {
        let url = format!("{}/api/tags", self.base_url);
        let response = match self.http.get(&url).timeout(PROBE_TIMEOUT).send().await {
            Ok(response) => response,
            Err(e) if e.is_connect() || e.is_timeout() => return Availability::NotRunning,
            Err(e) => return Availability::Error(e.to_string()),
        };

        if !response.status().is_success() {
            return Availability::Error(format!("status {}", response.status()));
        }

        match response.json::<TagList>().await {
            Ok(tags) if has_model(&tags, &self.model) => Availability::Ready,
            Ok(_) => Availability::ModelMissing(self.model.clone()),
            Err(e) => Availability::Error(e.to_string()),
        }
    }

    /// Send a single-turn, non-streaming chat and return the reply text.
    #[instrument(skip(self, prompt), fields(model = %self.model))]
    pub async fn chat(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/api/chat", self.base_url);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            stream: false,
        };

        debug!("POST {}", url);
        let response = self.http.post(&url).json(&request).send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api { status, body });
        }

        let reply: ChatResponse = response.json().await?;
        info!("Received {} characters from {}", reply.message.content.len(), self.model);
        Ok(reply.message.content)
    }

    /// Ask for `num_suggestions` movies matching `mood_query`; returns the raw reply.
    pub async fn mood_recommendations(
        &self,
        mood_query: &str,
        profile: &TasteProfile,
        num_suggestions: usize,
    ) -> Result<String> {
        let prompt = build_mood_prompt(mood_query, profile, num_suggestions);
        self.chat(&prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::DEFAULT_MODEL;

    fn tags(json: &str) -> TagList {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_model_match_ignores_tag() {
        let list = tags(r#"{"models": [{"name": "llama3.2:latest"}, {"name": "mistral:7b"}]}"#);
        assert!(has_model(&list, "llama3.2"));
        assert!(has_model(&list, "mistral:latest"));
        assert!(!has_model(&list, "phi3"));
    }

    #[test]
    fn test_empty_tag_list() {
        assert!(!has_model(&tags("{}"), DEFAULT_MODEL));
    }

    #[test]
    fn test_chat_request_shape() {
        let request = ChatRequest {
            model: "llama3.2",
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: "hi".to_string(),
            }],
            stream: false,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["stream"], false);
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["model"], "llama3.2");
    }

    #[test]
    fn test_chat_response_content() {
        let reply: ChatResponse = serde_json::from_str(
            r#"{"model": "llama3.2", "message": {"role": "assistant", "content": "1. Inception (2010)"}, "done": true}"#,
        )
        .unwrap();
        assert_eq!(reply.message.content, "1. Inception (2010)");
    }

    #[test]
    fn test_availability_messages() {
        assert_eq!(
            Availability::ModelMissing("llama3.2".into()).to_string(),
            "Model 'llama3.2' not found. Run: ollama pull llama3.2"
        );
        assert!(Availability::Ready.is_ready());
        assert!(!Availability::NotRunning.is_ready());
    }

    #[test]
    fn test_base_url_normalized() {
        let client = OllamaClient::new("http://localhost:11434/", "llama3.2").unwrap();
        assert_eq!(client.base_url, "http://localhost:11434");
        assert_eq!(client.model(), "llama3.2");
    }

    #[test]
    fn test_default_local_client() {
        let client = OllamaClient::new(DEFAULT_OLLAMA_URL, DEFAULT_MODEL).unwrap();
        assert_eq!(client.base_url, DEFAULT_OLLAMA_URL);
        assert_eq!(client.model(), DEFAULT_MODEL);
    }
}
