// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Router assembly and background maintenance.

use crate::config::CorsConfig;
use crate::gate::require_admin;
use crate::handlers::{
    admin_login, admin_logout, admin_session, health, list_messages, message_stats,
    submit_contact, AppState,
};
use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

/// Build the full application router.
pub fn build_router(state: Arc<AppState>) -> Router {
    let admin = Router::new()
        .route("/admin/session", get(admin_session))
        .route("/contact/messages", get(list_messages))
        .route("/contact/stats", get(message_stats))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health))
        .route("/contact", post(submit_contact))
        .route("/admin/login", post(admin_login))
        .route("/admin/logout", post(admin_logout))
        .merge(admin)
        .layer(cors_layer(&state.config.cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Credentialed CORS for the configured site origins.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

/// Periodically sweep expired sessions and stale throttle entries.
///
/// Missing a tick is harmless; session lookups expire entries lazily.
pub fn spawn_sweeper(state: Arc<AppState>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every.max(Duration::from_secs(1)));
        loop {
            interval.tick().await;
            let sessions = state.sessions.sweep().await;
            let addresses = state.throttle.sweep().await;
            debug!(sessions, addresses, "Swept expired state");
        }
    })
}
