//! GitHub API access.
//!
//! - `client` - installation-scoped octocrab wrapper (content fetch, comment post)
//! - `content` - base64/UTF-8 decoding of fetched file bodies
//! - `error` - the API error type

pub mod client;
pub mod content;
pub mod error;

pub use client::{GitHubClient, RawFile};
pub use content::{ContentError, decode_content};
pub use error::GitHubApiError;
