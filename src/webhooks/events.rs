//! Typed GitHub webhook events.
//!
//! The payload arrives as untyped JSON; the parser turns it into the tagged
//! union below. Only `pull_request_review_comment` is represented; every
//! other event type is ignored upstream by returning `None` from the parser.

use serde::{Deserialize, Serialize};

use crate::types::{InstallationId, PrNumber, RepoId, Sha};

/// A parsed GitHub webhook event.
///
/// Unknown or irrelevant event types never reach this enum; the parser maps
/// them to `None` and the HTTP handler reports success without further work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GitHubEvent {
    /// A review comment on a line range of a pull request's diff.
    ReviewComment(ReviewCommentEvent),
}

/// Action performed on a review comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewCommentAction {
    /// Comment was created. The only action that triggers processing.
    Created,
    /// Comment was edited.
    Edited,
    /// Comment was deleted.
    Deleted,
}

/// The comment itself: what was said, and where in the diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewComment {
    /// The comment body text.
    pub body: String,

    /// Path of the commented file, relative to the repository root.
    pub path: String,

    /// First line of the commented range (1-based, inclusive).
    pub start_line: i64,

    /// Last line of the commented range (1-based, inclusive).
    pub end_line: i64,
}

/// A `pull_request_review_comment` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewCommentEvent {
    /// The base repository of the pull request.
    pub repo: RepoId,

    /// The action that triggered this event.
    pub action: ReviewCommentAction,

    /// The pull request number.
    pub pr_number: PrNumber,

    /// The current head SHA of the PR branch; file content is fetched at
    /// this revision.
    pub head_sha: Sha,

    /// The app installation delivering this event.
    pub installation_id: InstallationId,

    /// The review comment.
    pub comment: ReviewComment,
}
