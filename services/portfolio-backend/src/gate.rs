// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Admin access gate.
//!
//! [`AdminGate::authorize`] is the decision; [`require_admin`] applies it as
//! axum middleware to the admin routes.

use crate::cookies::session_token;
use crate::error::{ApiError, AuthError};
use crate::handlers::AppState;
use crate::session::SessionRegistry;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

/// Decides whether a request carrying a session token may reach an admin
/// route.
pub struct AdminGate<'a> {
    configured: bool,
    sessions: &'a SessionRegistry,
}

impl<'a> AdminGate<'a> {
    pub fn new(configured: bool, sessions: &'a SessionRegistry) -> Self {
        Self {
            configured,
            sessions,
        }
    }

    /// `NotConfigured` wins over everything so callers can tell "nobody can
    /// log in" apart from "you are not logged in".
    pub async fn authorize(&self, token: Option<&str>) -> Result<(), AuthError> {
        if !self.configured {
            return Err(AuthError::NotConfigured);
        }

        match token {
            Some(token) if self.sessions.is_valid(token).await => Ok(()),
            _ => Err(AuthError::Unauthorized),
        }
    }
}

/// Middleware guarding admin routes with the session cookie.
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = session_token(request.headers());

    let gate = AdminGate::new(state.admin_configured(), &state.sessions);
    if let Err(err) = gate.authorize(token.as_deref()).await {
        debug!(path = %request.uri().path(), error = %err, "Admin request refused");
        return Err(err.into());
    }

    Ok(next.run(request).await)
}
