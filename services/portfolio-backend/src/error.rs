// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Error types and their HTTP mapping.

use axum::{
    extract::rejection::JsonRejection,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::error;

/// Reasons an admin request or login is refused.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No admin password is configured, so nobody can ever log in.
    #[error("Admin access is not configured")]
    NotConfigured,

    /// Missing, unknown or expired session, or a wrong password.
    #[error("Unauthorized")]
    Unauthorized,

    /// The client address is inside its block window.
    #[error("Too many login attempts")]
    RateLimited { retry_after: Duration },
}

/// Contact submission validation errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContactError {
    #[error("Missing fields")]
    MissingFields,

    #[error("Field {field} exceeds {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("Invalid email address")]
    InvalidEmail,
}

/// Message store failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on message store: {0}")]
    Io(#[from] std::io::Error),

    #[error("Message store is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Any error a handler can return.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Contact(#[from] ContactError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// The request body is not the JSON object the route expects.
    #[error("Invalid request body: {}", .0.body_text())]
    Body(#[from] JsonRejection),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after_secs: Option<u64>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Auth(AuthError::NotConfigured) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Auth(AuthError::Unauthorized) => StatusCode::UNAUTHORIZED,
            Self::Auth(AuthError::RateLimited { .. }) => StatusCode::TOO_MANY_REQUESTS,
            Self::Contact(_) | Self::Body(_) => StatusCode::BAD_REQUEST,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Auth(AuthError::NotConfigured) => "NOT_CONFIGURED",
            Self::Auth(AuthError::Unauthorized) => "UNAUTHORIZED",
            Self::Auth(AuthError::RateLimited { .. }) => "RATE_LIMITED",
            Self::Contact(_) => "INVALID_CONTACT",
            Self::Store(_) => "STORE_ERROR",
            Self::Body(_) => "INVALID_BODY",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        match self {
            Self::Auth(AuthError::RateLimited { retry_after }) => {
                // Round up so clients never retry a moment too early
                let retry_secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
                (
                    status,
                    [(header::RETRY_AFTER, retry_secs.to_string())],
                    Json(ErrorResponse {
                        error: AuthError::RateLimited { retry_after }.to_string(),
                        code,
                        retry_after_secs: Some(retry_secs),
                    }),
                )
                    .into_response()
            }
            Self::Store(err) => {
                error!(error = %err, "Message store failure");
                (
                    status,
                    Json(ErrorResponse {
                        error: "Internal server error".to_string(),
                        code,
                        retry_after_secs: None,
                    }),
                )
                    .into_response()
            }
            other => (
                status,
                Json(ErrorResponse {
                    error: other.to_string(),
                    code,
                    retry_after_secs: None,
                }),
            )
                .into_response(),
        }
    }
}
