//! Health check endpoint for liveness probes.

use axum::http::StatusCode;

/// Health check handler.
///
/// Returns 200 OK with the text "OK" whenever the server is accepting
/// connections; there is no deeper readiness state to report.
pub async fn health_handler() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn health_returns_200_ok() {
        let (status, body) = health_handler().await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");
    }
}
