// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! HTTP handlers for the contact inbox and admin session.

use crate::client_addr::client_address;
use crate::clock::SharedClock;
use crate::config::Config;
use crate::contact::ContactSubmission;
use crate::cookies::{build_clear_cookie, build_session_cookie, session_token};
use crate::error::{ApiError, AuthError};
use crate::session::SessionRegistry;
use crate::store::{ContactMessage, MessageStats, MessageStore};
use crate::throttle::LoginThrottle;
use axum::{
    extract::{rejection::JsonRejection, ConnectInfo, State},
    http::{header, HeaderMap},
    response::IntoResponse,
    Json,
};
use constant_time_eq::constant_time_eq;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Sha3_256};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub sessions: SessionRegistry,
    pub throttle: LoginThrottle,
    pub store: MessageStore,
}

impl AppState {
    /// Build state from configuration. Constructed once at startup.
    pub fn new(config: Config, clock: SharedClock) -> Self {
        let sessions = SessionRegistry::new(config.admin.session_ttl(), clock.clone());
        let throttle = LoginThrottle::new(config.login_throttle.clone(), clock);
        let store = MessageStore::new(config.store.messages_path.clone());

        Self {
            config,
            sessions,
            throttle,
            store,
        }
    }

    pub fn admin_configured(&self) -> bool {
        self.config.admin.password().is_some()
    }

    fn password_matches(&self, candidate: &str) -> bool {
        self.config
            .admin
            .password()
            .is_some_and(|expected| digests_match(expected, candidate))
    }
}

/// Compare fixed-length digests so timing does not leak the length or a
/// common prefix.
fn digests_match(expected: &str, candidate: &str) -> bool {
    let a = Sha3_256::digest(expected.as_bytes());
    let b = Sha3_256::digest(candidate.as_bytes());
    constant_time_eq(a.as_slice(), b.as_slice())
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl SuccessResponse {
    fn ok() -> Self {
        Self {
            success: true,
            id: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessagesResponse {
    pub messages: Vec<ContactMessage>,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub authenticated: bool,
}

/// Admin login body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub password: String,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "portfolio-backend",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Accept a contact form submission.
pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ContactSubmission>, JsonRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let Json(submission) = body.map_err(|rejection| {
        debug!(error = %rejection, "Contact body rejected");
        rejection
    })?;

    let new = submission.validate().map_err(|err| {
        debug!(error = %err, "Contact submission rejected");
        err
    })?;

    let stored = state.store.append(new).await?;

    Ok(Json(SuccessResponse {
        success: true,
        id: Some(stored.id),
    }))
}

/// List stored messages, newest first. Admin only.
pub async fn list_messages(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MessagesResponse>, ApiError> {
    let messages = state.store.list().await?;
    Ok(Json(MessagesResponse { messages }))
}

/// Message count and latest timestamp. Admin only.
pub async fn message_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MessageStats>, ApiError> {
    Ok(Json(state.store.stats().await?))
}

/// Exchange the admin password for a session cookie.
pub async fn admin_login(
    State(state): State<Arc<AppState>>,
    peer: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    // Answered before the body is looked at
    if !state.admin_configured() {
        return Err(AuthError::NotConfigured.into());
    }
    let Json(req) = body?;

    let address = client_address(&headers, peer.map(|ConnectInfo(addr)| addr));
    let password_correct = state.password_matches(&req.password);
    let decision = state
        .throttle
        .check_and_record(&address, password_correct)
        .await;

    if decision.blocked {
        warn!(%address, "Login attempt while blocked");
        return Err(AuthError::RateLimited {
            retry_after: decision.retry_after.unwrap_or_default(),
        }
        .into());
    }
    if !decision.allowed {
        info!(%address, "Admin login failed");
        return Err(AuthError::Unauthorized.into());
    }

    let token = state.sessions.create().await;
    info!(%address, "Admin login succeeded");

    let cookie = build_session_cookie(
        &token,
        state.sessions.ttl(),
        state.config.admin.cookie_secure,
    );
    Ok(([(header::SET_COOKIE, cookie)], Json(SuccessResponse::ok())))
}

/// Drop the caller's session, if any, and clear the cookie.
pub async fn admin_logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if let Some(token) = session_token(&headers) {
        state.sessions.invalidate(&token).await;
    }

    let cookie = build_clear_cookie(state.config.admin.cookie_secure);
    ([(header::SET_COOKIE, cookie)], Json(SuccessResponse::ok()))
}

/// Reached only through the admin gate, so the session is live.
pub async fn admin_session() -> Json<SessionResponse> {
    Json(SessionResponse {
        authenticated: true,
    })
}
