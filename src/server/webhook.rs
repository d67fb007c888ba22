//! Webhook endpoint handler.
//!
//! Accepts GitHub webhook deliveries, verifies the HMAC-SHA256 signature,
//! and runs the review pipeline inline for `pull_request_review_comment`
//! events with action `created`. Every other event (and every other action)
//! is acknowledged with 200 and otherwise ignored.
//!
//! # Response codes
//!
//! - `200` - processed, skipped for a non-fatal reason, or ignored
//! - `405` - non-POST method (axum method routing)
//! - `500` - missing header, bad signature, malformed payload, or a failed
//!   API call

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::AppState;
use crate::review::{self, ReviewError, ReviewOutcome};
use crate::types::DeliveryId;
use crate::webhooks::events::{GitHubEvent, ReviewCommentAction};
use crate::webhooks::{ParseError, parse_webhook, verify_signature};

/// Header name for GitHub event type.
const HEADER_EVENT: &str = "x-github-event";
/// Header name for GitHub delivery ID.
const HEADER_DELIVERY: &str = "x-github-delivery";
/// Header name for GitHub signature.
const HEADER_SIGNATURE: &str = "x-hub-signature-256";

/// Errors that can occur when processing a webhook.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Missing required header.
    #[error("missing required header: {0}")]
    MissingHeader(&'static str),

    /// Invalid or absent signature.
    #[error("invalid signature")]
    InvalidSignature,

    /// Malformed payload for a recognized event type.
    #[error("invalid payload: {0}")]
    InvalidPayload(#[from] ParseError),

    /// The review pipeline failed on an API call.
    #[error(transparent)]
    Review(#[from] ReviewError),
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        // The webhook sender only distinguishes success from failure, so
        // every failure class maps to 500.
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Error processing webhook",
        )
            .into_response()
    }
}

/// Webhook handler.
///
/// Verifies the delivery's signature before any parsing, dispatches by event
/// type, and awaits the pipeline before responding; the delivery is not
/// acknowledged until processing has finished or been skipped.
pub async fn webhook_handler(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, &'static str), WebhookError> {
    let event_type = get_header(&headers, HEADER_EVENT)?;
    let delivery_id = DeliveryId::new(get_header(&headers, HEADER_DELIVERY)?);
    let signature_header = get_header(&headers, HEADER_SIGNATURE)?;

    debug!(
        delivery_id = %delivery_id,
        event_type = %event_type,
        "received webhook"
    );

    // Verify the signature before parsing; nothing runs on an
    // unauthenticated payload.
    if !verify_signature(&body, &signature_header, app_state.config().webhook_secret.as_bytes()) {
        warn!(delivery_id = %delivery_id, "invalid webhook signature");
        return Err(WebhookError::InvalidSignature);
    }

    let Some(event) = parse_webhook(&event_type, &body)? else {
        debug!(
            delivery_id = %delivery_id,
            event_type = %event_type,
            "ignoring unrecognized event type"
        );
        return Ok((StatusCode::OK, "Ignored"));
    };

    let GitHubEvent::ReviewComment(review_comment) = event;

    if review_comment.action != ReviewCommentAction::Created {
        debug!(
            delivery_id = %delivery_id,
            action = ?review_comment.action,
            "ignoring review comment action"
        );
        return Ok((StatusCode::OK, "Ignored"));
    }

    match review::handle_review_comment(app_state.config(), &review_comment).await {
        Ok(ReviewOutcome::Posted) => {
            info!(
                delivery_id = %delivery_id,
                pr = %review_comment.pr_number,
                "webhook processed"
            );
        }
        Ok(ReviewOutcome::Skipped(reason)) => {
            info!(
                delivery_id = %delivery_id,
                pr = %review_comment.pr_number,
                %reason,
                "webhook processing skipped"
            );
        }
        Err(e) => {
            error!(
                delivery_id = %delivery_id,
                pr = %review_comment.pr_number,
                error = %e,
                "review pipeline failed"
            );
            return Err(e.into());
        }
    }

    Ok((StatusCode::OK, "Webhook processed successfully"))
}

/// Extracts a required header value as a string.
fn get_header(headers: &HeaderMap, name: &'static str) -> Result<String, WebhookError> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .ok_or(WebhookError::MissingHeader(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_header_present() {
        let mut headers = HeaderMap::new();
        headers.insert("x-github-event", "pull_request_review_comment".parse().unwrap());

        let result = get_header(&headers, "x-github-event").unwrap();
        assert_eq!(result, "pull_request_review_comment");
    }

    #[test]
    fn get_header_missing() {
        let headers = HeaderMap::new();

        let result = get_header(&headers, "x-github-event");
        assert!(matches!(result, Err(WebhookError::MissingHeader(_))));
    }

    #[test]
    fn all_error_variants_respond_500() {
        let errors: Vec<WebhookError> = vec![
            WebhookError::MissingHeader("x-github-event"),
            WebhookError::InvalidSignature,
            WebhookError::InvalidPayload(ParseError::MissingField("installation")),
        ];

        for err in errors {
            let response = err.into_response();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}
