//! Note classification through a hosted chat model.
//!
//! The model is asked for bare JSON describing a note (tags, todo, resource).
//! Chat models often wrap that JSON in prose or a code fence, so the reply is
//! cut down to the outermost `{...}` before parsing.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use url::Url;

use common::note::AiAnalysis;

/// Environment variable holding the classifier API key
pub const CLASSIFIER_API_KEY_ENV: &str = "CLASSIFIER_API_KEY";

const CLASSIFIER_TIMEOUT: Duration = Duration::from_secs(30);

const SYSTEM_PROMPT: &str = r#"You are a helper for a personal diary app. Your job is to analyze the user's input and extract structured metadata in JSON format.

Output JSON ONLY. No markdown code blocks. No introductory text.

The JSON structure must be:
{
  "tags": ["string", "string"], // 1-3 short tags (e.g., "code", "idea", "life", "work")
  "isTodo": boolean, // True if it implies a task
  "isResource": boolean, // True if it mentions a book, movie, link, or tool to check later
  "resourceType": "read" | "watch" | "listen" | "code" | null // If isResource is true, categorize it.
}"#;

#[async_trait]
pub trait Classifier: Send + Sync {
    async fn analyze(&self, content: &str) -> Result<AiAnalysis, ClassifierError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("HTTP request failed: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("invalid classifier URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("model endpoint returned HTTP {0}")]
    HttpStatus(StatusCode),
    #[error("model returned no choices")]
    EmptyResponse,
    #[error("model reply contains no JSON object")]
    NoJson,
    #[error("model reply is not a valid analysis: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassifierConfig {
    /// Base URL of an OpenAI-compatible API, e.g. `https://api.example.com/v1`
    pub base_url: Url,
    /// Model identifier passed through to the endpoint
    pub model: String,
    /// Bearer key, read from the environment rather than the config file
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl fmt::Debug for ClassifierConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassifierConfig")
            .field("base_url", &self.base_url.as_str())
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Classifier backed by a `/chat/completions` endpoint.
#[derive(Clone)]
pub struct ChatClassifier {
    client: Client,
    endpoint: Url,
    model: String,
    api_key: Option<String>,
}

impl fmt::Debug for ChatClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatClassifier")
            .field("endpoint", &self.endpoint.as_str())
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl ChatClassifier {
    pub fn new(config: &ClassifierConfig) -> Result<Self, ClassifierError> {
        let client = Client::builder().timeout(CLASSIFIER_TIMEOUT).build()?;
        Ok(Self {
            client,
            endpoint: completions_url(&config.base_url)?,
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait]
impl Classifier for ChatClassifier {
    #[tracing::instrument(skip(self, content), fields(len = content.len()))]
    async fn analyze(&self, content: &str) -> Result<AiAnalysis, ClassifierError> {
        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content,
                },
            ],
        };

        let mut request = self.client.post(self.endpoint.clone()).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(ClassifierError::HttpStatus(response.status()));
        }

        let completion: ChatResponse = response.json().await?;
        let reply = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(ClassifierError::EmptyResponse)?;

        tracing::debug!(reply_len = reply.len(), "model replied");
        parse_analysis(&reply)
    }
}

/// `base_url` with `chat/completions` appended to its path.
fn completions_url(base_url: &Url) -> Result<Url, url::ParseError> {
    let mut base = base_url.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join("chat/completions")
}

/// The span from the first `{` to the last `}`, if there is one.
pub fn extract_json(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Parse a model reply into an analysis, ignoring text around the JSON object.
pub fn parse_analysis(reply: &str) -> Result<AiAnalysis, ClassifierError> {
    let json = extract_json(reply).ok_or(ClassifierError::NoJson)?;
    Ok(serde_json::from_str(json)?)
}
