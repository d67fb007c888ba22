//! Anthropic messages-API client.
//!
//! One single-turn request per review comment: fixed model, fixed system
//! instruction, capped output tokens. No streaming, no retries, no
//! conversation state. The first content block of the response must be
//! textual; anything else aborts the pipeline without posting a comment.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const MODEL: &str = "claude-3-opus-20240229";
const MAX_TOKENS: u32 = 1000;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Errors from the completion client.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// Transport-level failure (connect, timeout, body read).
    #[error("completion request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("completion API returned {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The response's first content block was not text.
    #[error("completion response did not begin with a text block")]
    UnexpectedResponse,
}

/// A client for the completion endpoint, built fresh per webhook delivery.
pub struct CompletionClient {
    client: reqwest::Client,
    api_key: String,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

impl CompletionClient {
    /// Creates a client with the given API key.
    pub fn new(api_key: String) -> Result<Self, CompletionError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self { client, api_key })
    }

    /// Sends a single-turn completion request and returns the generated text.
    ///
    /// The text of the first content block is returned trimmed. A first block
    /// of any other type fails with [`CompletionError::UnexpectedResponse`].
    pub async fn generate(&self, system: &str, prompt: &str) -> Result<String, CompletionError> {
        let response = self
            .client
            .post(MESSAGES_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&MessagesRequest {
                model: MODEL,
                max_tokens: MAX_TOKENS,
                system,
                messages: vec![Message {
                    role: "user",
                    content: prompt,
                }],
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Api { status, body });
        }

        let parsed: MessagesResponse = response.json().await?;
        first_text_block(parsed)
    }
}

impl std::fmt::Debug for CompletionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionClient").finish_non_exhaustive()
    }
}

/// Extracts the trimmed text of the response's first content block.
fn first_text_block(response: MessagesResponse) -> Result<String, CompletionError> {
    let block = response
        .content
        .into_iter()
        .next()
        .ok_or(CompletionError::UnexpectedResponse)?;

    match (block.kind.as_str(), block.text) {
        ("text", Some(text)) => Ok(text.trim().to_string()),
        _ => Err(CompletionError::UnexpectedResponse),
    }
}
