//! The review-comment pipeline.
//!
//! One strictly linear pass per `pull_request_review_comment.created` event:
//!
//! ```text
//! content fetch → snippet extraction → completion request → comment post
//! ```
//!
//! Non-fatal conditions (no fetchable content, binary file, non-text
//! completion) end the pass as [`ReviewOutcome::Skipped`]; the webhook still
//! reports success to the sender. API failures propagate as
//! [`ReviewError`] and surface as a request-level error.
//!
//! The pipeline talks to its collaborators through the [`SourceHost`] and
//! [`CompletionApi`] traits, so tests can count and fake the calls without
//! network I/O. Production impls are [`GitHubClient`] and
//! [`CompletionClient`], constructed fresh from configuration per event.

pub mod prompt;
pub mod snippet;

use std::fmt;

use thiserror::Error;
use tracing::{info, warn};

use crate::completion::{CompletionClient, CompletionError};
use crate::config::AppConfig;
use crate::github::{GitHubApiError, GitHubClient, RawFile, decode_content};
use crate::types::{PrNumber, Sha};
use crate::webhooks::events::ReviewCommentEvent;

/// Read/write operations against the source-hosting platform.
#[allow(async_fn_in_trait)]
pub trait SourceHost {
    /// Fetches a file's base64 content at a ref; `None` when the path has no
    /// usable content (directory, submodule, oversized blob).
    async fn fetch_file(
        &self,
        path: &str,
        reference: &Sha,
    ) -> Result<Option<RawFile>, GitHubApiError>;

    /// Posts a comment on the pull request's issue thread.
    async fn post_comment(&self, pr: PrNumber, body: String) -> Result<(), GitHubApiError>;
}

/// A single-turn completion endpoint.
#[allow(async_fn_in_trait)]
pub trait CompletionApi {
    /// Generates text for the prompt, or fails with a typed completion error.
    async fn generate(&self, system: &str, prompt: &str) -> Result<String, CompletionError>;
}

impl SourceHost for GitHubClient {
    async fn fetch_file(
        &self,
        path: &str,
        reference: &Sha,
    ) -> Result<Option<RawFile>, GitHubApiError> {
        GitHubClient::fetch_file(self, path, reference).await
    }

    async fn post_comment(&self, pr: PrNumber, body: String) -> Result<(), GitHubApiError> {
        GitHubClient::post_comment(self, pr, body).await
    }
}

impl CompletionApi for CompletionClient {
    async fn generate(&self, system: &str, prompt: &str) -> Result<String, CompletionError> {
        CompletionClient::generate(self, system, prompt).await
    }
}

/// Why a pipeline pass ended without posting a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The contents endpoint returned no usable `content` field.
    ContentUnavailable,
    /// The file decoded to something other than UTF-8 text.
    ContentNotText,
    /// The completion response did not begin with a text block.
    NonTextCompletion,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SkipReason::ContentUnavailable => "content unavailable",
            SkipReason::ContentNotText => "content not text",
            SkipReason::NonTextCompletion => "non-text completion",
        };
        write!(f, "{s}")
    }
}

/// Result of a completed pipeline pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewOutcome {
    /// A suggestion comment was posted.
    Posted,
    /// The pass ended early for a non-fatal reason; nothing was posted.
    Skipped(SkipReason),
}

/// Fatal pipeline failures. These surface as a request-level error.
#[derive(Debug, Error)]
pub enum ReviewError {
    /// A GitHub API call failed (auth exchange, content fetch, comment post).
    #[error(transparent)]
    GitHub(#[from] GitHubApiError),

    /// The completion API call failed at the transport or HTTP level.
    #[error(transparent)]
    Completion(#[from] CompletionError),
}

/// Runs the pipeline for a `created` review comment, constructing both API
/// clients fresh from configuration.
pub async fn handle_review_comment(
    config: &AppConfig,
    event: &ReviewCommentEvent,
) -> Result<ReviewOutcome, ReviewError> {
    let github =
        GitHubClient::for_installation(config, event.installation_id, event.repo.clone()).await?;
    let completion = CompletionClient::new(config.anthropic_api_key.clone())?;

    run_pipeline(&github, &completion, event).await
}

/// The pipeline proper, generic over its collaborators.
pub async fn run_pipeline<H, C>(
    host: &H,
    completion: &C,
    event: &ReviewCommentEvent,
) -> Result<ReviewOutcome, ReviewError>
where
    H: SourceHost,
    C: CompletionApi,
{
    let comment = &event.comment;

    let Some(raw) = host.fetch_file(&comment.path, &event.head_sha).await? else {
        warn!(
            repo = %event.repo,
            path = %comment.path,
            "unable to fetch file content, skipping"
        );
        return Ok(ReviewOutcome::Skipped(SkipReason::ContentUnavailable));
    };

    let file_content = match decode_content(&raw.content) {
        Ok(text) => text,
        Err(e) => {
            warn!(
                repo = %event.repo,
                path = %comment.path,
                error = %e,
                "file content is not text, skipping"
            );
            return Ok(ReviewOutcome::Skipped(SkipReason::ContentNotText));
        }
    };

    if comment.start_line > comment.end_line {
        warn!(
            start_line = comment.start_line,
            end_line = comment.end_line,
            "review comment has an inverted line range"
        );
    }
    let snippet = snippet::extract_snippet(&file_content, comment.start_line, comment.end_line);

    let user_prompt = prompt::build_prompt(&file_content, &snippet.text, &comment.body);
    let generated = match completion.generate(prompt::SYSTEM_PROMPT, &user_prompt).await {
        Ok(text) => text,
        Err(CompletionError::UnexpectedResponse) => {
            warn!(
                repo = %event.repo,
                pr = %event.pr_number,
                "completion response did not begin with a text block, skipping"
            );
            return Ok(ReviewOutcome::Skipped(SkipReason::NonTextCompletion));
        }
        Err(e) => return Err(e.into()),
    };

    let body = prompt::format_suggestion_comment(&generated, &snippet, &comment.path);
    host.post_comment(event.pr_number, body).await?;

    info!(
        repo = %event.repo,
        pr = %event.pr_number,
        path = %comment.path,
        "posted suggested snippet"
    );

    Ok(ReviewOutcome::Posted)
}
