//! Anthropic Messages API client. Every model call in the service goes through
//! [`LlmClient`]; callers pass an ordered model list and the first model that
//! answers with text wins.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

pub mod prompts;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// Models tried in order for every review.
pub const MODEL_FALLBACKS: &[&str] = &["claude-sonnet-4-5", "claude-haiku-4-5"];
const MAX_TOKENS: u32 = 4096;
const MAX_ATTEMPTS: u32 = 3;
const BASE_BACKOFF: Duration = Duration::from_secs(1);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Gave up after {attempts} attempts")]
    Exhausted { attempts: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("No models configured")]
    NoModels,
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: [Message<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    pub usage: Usage,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmResponse {
    /// First text block with non-whitespace content.
    pub fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .filter(|b| b.block_type == "text")
            .filter_map(|b| b.text.as_deref())
            .find(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Result of one HTTP attempt: either worth repeating or final.
enum Attempt {
    Retry(LlmError),
    Fail(LlmError),
}

#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_key: String) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            api_key,
        })
    }

    /// Calls one model. Transport errors, 429 and 5xx are retried with
    /// exponential backoff; any other non-success status fails immediately.
    pub async fn call(
        &self,
        model: &str,
        prompt: &str,
        system: &str,
    ) -> Result<LlmResponse, LlmError> {
        let body = MessagesRequest {
            model,
            max_tokens: MAX_TOKENS,
            system,
            messages: [Message {
                role: "user",
                content: prompt,
            }],
        };

        let mut last_error = None;
        for attempt in 0..MAX_ATTEMPTS {
            if attempt > 0 {
                let delay = BASE_BACKOFF * 2u32.pow(attempt - 1);
                warn!("Retrying {model} in {}ms (attempt {})", delay.as_millis(), attempt + 1);
                tokio::time::sleep(delay).await;
            }

            match self.send_once(&body).await {
                Ok(response) => {
                    debug!(
                        "{model} answered: input_tokens={}, output_tokens={}",
                        response.usage.input_tokens, response.usage.output_tokens
                    );
                    return Ok(response);
                }
                Err(Attempt::Retry(e)) => last_error = Some(e),
                Err(Attempt::Fail(e)) => return Err(e),
            }
        }

        Err(last_error.unwrap_or(LlmError::Exhausted {
            attempts: MAX_ATTEMPTS,
        }))
    }

    async fn send_once(&self, body: &MessagesRequest<'_>) -> Result<LlmResponse, Attempt> {
        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(body)
            .send()
            .await
            .map_err(|e| Attempt::Retry(LlmError::Http(e)))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<LlmResponse>()
                .await
                .map_err(|e| Attempt::Fail(LlmError::Http(e)));
        }

        let raw = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorEnvelope>(&raw)
            .map(|e| e.error.message)
            .unwrap_or(raw);
        let error = LlmError::Api {
            status: status.as_u16(),
            message,
        };

        if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            warn!("Anthropic API returned {status}, will retry");
            Err(Attempt::Retry(error))
        } else {
            Err(Attempt::Fail(error))
        }
    }

    /// Tries each model in `models` until one returns non-empty text.
    /// Returns the text and the model that produced it.
    pub async fn call_text_with_fallback(
        &self,
        models: &[&str],
        prompt: &str,
        system: &str,
    ) -> Result<(String, String), LlmError> {
        let mut last_error = LlmError::NoModels;

        for model in models {
            info!("Requesting review from {model}");
            match self.call(model, prompt, system).await {
                Ok(response) => match response.text() {
                    Some(text) => return Ok((text.to_string(), model.to_string())),
                    None => {
                        warn!("{model} returned no text content, trying next model");
                        last_error = LlmError::EmptyContent;
                    }
                },
                Err(e) => {
                    warn!("{model} failed, trying next model: {e}");
                    last_error = e;
                }
            }
        }

        Err(last_error)
    }
}

/// Removes a surrounding markdown code fence. Any language tag right after the
/// opening backticks (`json`, `JSON`, `jsonc`, ...) goes with it.
pub(crate) fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(inner) = text.strip_prefix("```") else {
        return text;
    };
    let inner = inner.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    inner.strip_suffix("```").unwrap_or(inner).trim()
}
