//! HTTP server for the suggestion bot.
//!
//! # Endpoints
//!
//! - `POST /webhook` - accepts GitHub webhook deliveries and processes them
//!   inline before responding
//! - `GET /health` - returns 200 if the server is running

use std::sync::Arc;

pub mod health;
pub mod webhook;

pub use health::health_handler;
pub use webhook::webhook_handler;

use crate::config::AppConfig;

/// Shared application state, passed to handlers via Axum's `State` extractor.
///
/// Holds only immutable configuration. API clients are not shared here; the
/// webhook handler constructs them fresh per delivery.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppConfig>,
}

impl AppState {
    /// Creates a new `AppState` wrapping the given configuration.
    pub fn new(config: AppConfig) -> Self {
        AppState {
            inner: Arc::new(config),
        }
    }

    /// Returns the application configuration.
    pub fn config(&self) -> &AppConfig {
        &self.inner
    }
}

/// Builds the axum Router with all endpoints.
pub fn build_router(app_state: AppState) -> axum::Router {
    use axum::routing::{get, post};

    axum::Router::new()
        .route("/webhook", post(webhook_handler))
        .route("/health", get(health_handler))
        .with_state(app_state)
}
