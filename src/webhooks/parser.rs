//! GitHub webhook payload parser.
//!
//! Parses raw webhook JSON into typed [`GitHubEvent`] values.
//!
//! # Parsing Strategy
//!
//! 1. The event type comes from the `X-GitHub-Event` header
//! 2. Recognized event types are parsed into their typed form
//! 3. Unknown event types return `Ok(None)` (ignored, not an error)
//! 4. Malformed payloads for a recognized type return `Err` with details
//!
//! Raw deserialization structs use `Option<T>` liberally and validate
//! required fields explicitly, so a missing field produces a named error
//! rather than a generic serde message.

use serde::Deserialize;
use thiserror::Error;

use crate::types::{InstallationId, PrNumber, RepoId, Sha};

use super::events::{GitHubEvent, ReviewComment, ReviewCommentAction, ReviewCommentEvent};

/// Error type for webhook parsing failures.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON deserialization failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A field has an unrecognized value.
    #[error("invalid field value for {field}: {value}")]
    InvalidField { field: &'static str, value: String },

    /// A field required for processing is absent.
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

/// Parses a webhook payload into a typed event.
///
/// # Returns
///
/// * `Ok(Some(event))` - successfully parsed a recognized event type
/// * `Ok(None)` - unrecognized event type (ignored, not an error)
/// * `Err(e)` - malformed payload for a recognized event type
pub fn parse_webhook(event_type: &str, payload: &[u8]) -> Result<Option<GitHubEvent>, ParseError> {
    match event_type {
        "pull_request_review_comment" => {
            parse_review_comment(payload).map(|e| Some(GitHubEvent::ReviewComment(e)))
        }
        // Any other event type is ignored
        _ => Ok(None),
    }
}

// ============================================================================
// Raw payload structures for deserialization
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawReviewCommentPayload {
    action: String,
    comment: RawComment,
    pull_request: RawPullRequest,
    installation: Option<RawInstallation>,
}

#[derive(Debug, Deserialize)]
struct RawComment {
    body: Option<String>,
    path: String,
    // Multi-line comments carry start_line/end_line; single-line comments
    // carry only line.
    line: Option<i64>,
    start_line: Option<i64>,
    end_line: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RawPullRequest {
    number: u64,
    head: RawHead,
    base: RawBase,
}

#[derive(Debug, Deserialize)]
struct RawHead {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct RawBase {
    repo: RawRepository,
}

#[derive(Debug, Deserialize)]
struct RawRepository {
    name: String,
    owner: RawOwner,
}

#[derive(Debug, Deserialize)]
struct RawOwner {
    login: String,
}

#[derive(Debug, Deserialize)]
struct RawInstallation {
    id: u64,
}

fn parse_review_comment(payload: &[u8]) -> Result<ReviewCommentEvent, ParseError> {
    let raw: RawReviewCommentPayload = serde_json::from_slice(payload)?;

    let action = match raw.action.as_str() {
        "created" => ReviewCommentAction::Created,
        "edited" => ReviewCommentAction::Edited,
        "deleted" => ReviewCommentAction::Deleted,
        other => {
            return Err(ParseError::InvalidField {
                field: "action",
                value: other.to_string(),
            });
        }
    };

    let installation = raw
        .installation
        .ok_or(ParseError::MissingField("installation"))?;

    let start_line = raw
        .comment
        .start_line
        .or(raw.comment.line)
        .ok_or(ParseError::MissingField("comment.start_line"))?;
    let end_line = raw
        .comment
        .end_line
        .or(raw.comment.line)
        .ok_or(ParseError::MissingField("comment.end_line"))?;

    Ok(ReviewCommentEvent {
        repo: RepoId::new(raw.pull_request.base.repo.owner.login, raw.pull_request.base.repo.name),
        action,
        pr_number: PrNumber(raw.pull_request.number),
        head_sha: Sha::new(raw.pull_request.head.sha),
        installation_id: InstallationId(installation.id),
        comment: ReviewComment {
            body: raw.comment.body.unwrap_or_default(),
            path: raw.comment.path,
            start_line,
            end_line,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn review_comment_payload() -> serde_json::Value {
        json!({
            "action": "created",
            "comment": {
                "body": "This function could be simplified.",
                "path": "src/example.ts",
                "start_line": 10,
                "end_line": 15,
            },
            "pull_request": {
                "number": 1,
                "head": { "sha": "abc123" },
                "base": { "repo": { "owner": { "login": "octocat" }, "name": "Hello-World" } },
            },
            "installation": { "id": 12345 },
        })
    }

    fn parse(payload: &serde_json::Value) -> Result<Option<GitHubEvent>, ParseError> {
        parse_webhook("pull_request_review_comment", &serde_json::to_vec(payload).unwrap())
    }

    #[test]
    fn parses_full_review_comment_payload() {
        let event = parse(&review_comment_payload()).unwrap().unwrap();
        let GitHubEvent::ReviewComment(event) = event;

        assert_eq!(event.repo, RepoId::new("octocat", "Hello-World"));
        assert_eq!(event.action, ReviewCommentAction::Created);
        assert_eq!(event.pr_number, PrNumber(1));
        assert_eq!(event.head_sha, Sha::new("abc123"));
        assert_eq!(event.installation_id, InstallationId(12345));
        assert_eq!(event.comment.body, "This function could be simplified.");
        assert_eq!(event.comment.path, "src/example.ts");
        assert_eq!(event.comment.start_line, 10);
        assert_eq!(event.comment.end_line, 15);
    }

    #[test]
    fn single_line_comment_falls_back_to_line() {
        let mut payload = review_comment_payload();
        payload["comment"] = json!({
            "body": "typo",
            "path": "README.md",
            "line": 4,
        });

        let GitHubEvent::ReviewComment(event) = parse(&payload).unwrap().unwrap();
        assert_eq!(event.comment.start_line, 4);
        assert_eq!(event.comment.end_line, 4);
    }

    #[test]
    fn unrecognized_event_type_is_ignored() {
        let payload = serde_json::to_vec(&review_comment_payload()).unwrap();

        assert!(parse_webhook("push", &payload).unwrap().is_none());
        assert!(parse_webhook("issue_comment", &payload).unwrap().is_none());
        assert!(parse_webhook("pull_request_review", &payload).unwrap().is_none());
    }

    #[test]
    fn unknown_action_is_invalid() {
        let mut payload = review_comment_payload();
        payload["action"] = json!("resolved");

        let result = parse(&payload);
        assert!(matches!(
            result,
            Err(ParseError::InvalidField { field: "action", .. })
        ));
    }

    #[test]
    fn missing_installation_is_an_error() {
        let mut payload = review_comment_payload();
        payload.as_object_mut().unwrap().remove("installation");

        let result = parse(&payload);
        assert!(matches!(result, Err(ParseError::MissingField("installation"))));
    }

    #[test]
    fn missing_line_information_is_an_error() {
        let mut payload = review_comment_payload();
        payload["comment"] = json!({
            "body": "no anchors",
            "path": "src/lib.rs",
        });

        let result = parse(&payload);
        assert!(matches!(
            result,
            Err(ParseError::MissingField("comment.start_line"))
        ));
    }

    #[test]
    fn absent_body_defaults_to_empty() {
        let mut payload = review_comment_payload();
        payload["comment"]
            .as_object_mut()
            .unwrap()
            .remove("body");

        let GitHubEvent::ReviewComment(event) = parse(&payload).unwrap().unwrap();
        assert_eq!(event.comment.body, "");
    }

    #[test]
    fn malformed_json_is_an_error() {
        let result = parse_webhook("pull_request_review_comment", b"{not json");
        assert!(matches!(result, Err(ParseError::Json(_))));
    }
}
