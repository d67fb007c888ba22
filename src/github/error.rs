//! GitHub API error type.
//!
//! The pipeline performs no retries, so errors carry no retriability
//! classification, just the HTTP status (when the API reported one), a
//! human-readable message, and the underlying octocrab error for context.

use std::fmt;

use thiserror::Error;

/// A failed GitHub API call.
#[derive(Debug, Error)]
pub struct GitHubApiError {
    /// The HTTP status code, if the API returned one.
    pub status_code: Option<u16>,

    /// A human-readable description of the failure.
    pub message: String,

    /// The underlying octocrab error, if available.
    #[source]
    pub source: Option<octocrab::Error>,
}

impl fmt::Display for GitHubApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status_code {
            Some(code) => write!(f, "GitHub API error (HTTP {}): {}", code, self.message),
            None => write!(f, "GitHub API error: {}", self.message),
        }
    }
}

impl GitHubApiError {
    /// Creates an error without an underlying octocrab source.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status_code: None,
            message: message.into(),
            source: None,
        }
    }

    /// Wraps an octocrab error, extracting the HTTP status when present.
    pub fn from_octocrab(err: octocrab::Error) -> Self {
        let status_code = match &err {
            octocrab::Error::GitHub { source, .. } => Some(source.status_code.as_u16()),
            _ => None,
        };

        Self {
            status_code,
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<octocrab::Error> for GitHubApiError {
    fn from(err: octocrab::Error) -> Self {
        Self::from_octocrab(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_status_when_present() {
        let err = GitHubApiError {
            status_code: Some(404),
            message: "Not Found".to_string(),
            source: None,
        };
        assert_eq!(err.to_string(), "GitHub API error (HTTP 404): Not Found");
    }

    #[test]
    fn display_without_status() {
        let err = GitHubApiError::new("connection refused");
        assert_eq!(err.to_string(), "GitHub API error: connection refused");
    }
}
