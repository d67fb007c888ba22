//! Webhook handling for GitHub events.
//!
//! This module provides:
//! - Signature verification for webhook payloads (HMAC-SHA256)
//! - Typed event representations and payload parsing

pub mod events;
pub mod parser;
pub mod signature;

pub use events::{GitHubEvent, ReviewComment, ReviewCommentAction, ReviewCommentEvent};
pub use parser::{ParseError, parse_webhook};
pub use signature::{compute_signature, format_signature_header, verify_signature};
