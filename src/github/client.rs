//! Octocrab client wrapper scoped to a specific repository.
//!
//! A `GitHubClient` is built fresh for every webhook delivery: the app
//! identity (app id + RSA private key) is exchanged for an
//! installation-scoped token using the installation id carried by the event,
//! and every operation targets the event's base repository.

use jsonwebtoken::EncodingKey;
use octocrab::Octocrab;
use octocrab::models::AppId;

use crate::config::AppConfig;
use crate::types::{InstallationId, PrNumber, RepoId, Sha};

use super::error::GitHubApiError;

/// A file fetched from the contents endpoint, still base64-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFile {
    /// Base64 file body, possibly wrapped with embedded newlines.
    pub content: String,
}

/// A GitHub API client scoped to a single repository and installation.
pub struct GitHubClient {
    client: Octocrab,
    repo: RepoId,
}

impl GitHubClient {
    /// Builds a client authenticated as the given installation.
    ///
    /// The app JWT is minted from configuration and exchanged for an
    /// installation token; no credentials are shared across requests.
    pub async fn for_installation(
        config: &AppConfig,
        installation_id: InstallationId,
        repo: RepoId,
    ) -> Result<Self, GitHubApiError> {
        let key = EncodingKey::from_rsa_pem(config.private_key.as_bytes())
            .map_err(|e| GitHubApiError::new(format!("invalid app private key: {e}")))?;

        let app_client = Octocrab::builder()
            .app(AppId(config.app_id), key)
            .build()?;

        let (client, _token) = app_client
            .installation_and_token(octocrab::models::InstallationId(installation_id.0))
            .await?;

        Ok(Self { client, repo })
    }

    /// Creates a client from a pre-configured Octocrab instance.
    ///
    /// Used by tests that don't want to go through the app-identity exchange.
    pub fn from_octocrab(client: Octocrab, repo: RepoId) -> Self {
        Self { client, repo }
    }

    /// Returns the repository owner.
    pub fn owner(&self) -> &str {
        &self.repo.owner
    }

    /// Returns the repository name.
    pub fn repo_name(&self) -> &str {
        &self.repo.repo
    }

    /// Fetches a file's base64 content at the given ref.
    ///
    /// Returns `Ok(None)` when the path exists but carries no usable content:
    /// the contents endpoint answers with an array for directories, omits the
    /// `content` field for submodules, and empties it for oversized blobs.
    pub async fn fetch_file(
        &self,
        path: &str,
        reference: &Sha,
    ) -> Result<Option<RawFile>, GitHubApiError> {
        let url = format!(
            "/repos/{}/{}/contents/{}?ref={}",
            self.owner(),
            self.repo_name(),
            path,
            reference
        );

        let body: serde_json::Value = self.client.get(&url, None::<&()>).await?;

        Ok(extract_content(&body).map(|content| RawFile { content }))
    }

    /// Creates a comment on the pull request's issue thread.
    pub async fn post_comment(&self, pr: PrNumber, body: String) -> Result<(), GitHubApiError> {
        self.client
            .issues(self.owner(), self.repo_name())
            .create_comment(pr.0, body)
            .await?;

        Ok(())
    }
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("repo", &self.repo)
            .finish_non_exhaustive()
    }
}

/// Extracts the base64 `content` field from a contents-API response body.
///
/// `None` for directories (array responses), submodules (no `content`),
/// oversized blobs (empty `content`), and non-base64 encodings.
fn extract_content(body: &serde_json::Value) -> Option<String> {
    let content = body.get("content")?.as_str()?;
    if content.is_empty() {
        return None;
    }

    if let Some(encoding) = body.get("encoding").and_then(|e| e.as_str()) {
        if encoding != "base64" {
            return None;
        }
    }

    Some(content.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extract_content_from_file_response() {
        let body = json!({
            "type": "file",
            "path": "src/example.ts",
            "encoding": "base64",
            "content": "ZnVuY3Rpb24gZigpe30K",
        });

        assert_eq!(extract_content(&body), Some("ZnVuY3Rpb24gZigpe30K".to_string()));
    }

    #[test]
    fn extract_content_none_for_directory_listing() {
        let body = json!([
            { "type": "file", "path": "src/a.rs" },
            { "type": "file", "path": "src/b.rs" },
        ]);

        assert_eq!(extract_content(&body), None);
    }

    #[test]
    fn extract_content_none_for_submodule() {
        let body = json!({
            "type": "submodule",
            "path": "vendor/dep",
            "submodule_git_url": "https://example.com/dep.git",
        });

        assert_eq!(extract_content(&body), None);
    }

    #[test]
    fn extract_content_none_for_oversized_blob() {
        let body = json!({
            "type": "file",
            "path": "big.bin",
            "encoding": "none",
            "content": "",
        });

        assert_eq!(extract_content(&body), None);
    }

    #[test]
    fn extract_content_none_for_non_base64_encoding() {
        let body = json!({
            "type": "file",
            "path": "weird",
            "encoding": "none",
            "content": "something",
        });

        assert_eq!(extract_content(&body), None);
    }
}
