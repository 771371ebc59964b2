// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Portfolio Backend Service
//!
//! Receives contact form submissions from the static portfolio site and
//! serves them to a password-protected admin dashboard.
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables (and `.env`):
//!
//! - `BIND_ADDR`: Server bind address (default: 0.0.0.0:3000)
//! - `ADMIN_PASSWORD`: Admin password; admin routes answer 503 without it
//! - `SESSION_TTL_SECS`: Admin session lifetime (default: 28800)
//! - `SWEEP_INTERVAL_SECS`: Expired state sweep interval (default: 600)
//! - `LOGIN_MAX_FAILS`: Failed logins before blocking (default: 5)
//! - `LOGIN_BLOCK_SECS`: Block duration (default: 900)
//! - `COOKIE_SECURE`: Mark the session cookie `Secure` (default: false)
//! - `MESSAGES_PATH`: Message document (default: data/messages.json)
//! - `ALLOWED_ORIGINS`: Comma-separated CORS origins

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use portfolio_backend::{
    app::{build_router, spawn_sweeper},
    clock::SystemClock,
    config::Config,
    handlers::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().json())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let config = Config::from_env()?;
    info!(
        bind_addr = %config.bind_addr,
        admin_configured = config.admin.password().is_some(),
        session_ttl_secs = config.admin.session_ttl_secs,
        max_fails = config.login_throttle.max_fails,
        block_secs = config.login_throttle.block_secs,
        messages_path = %config.store.messages_path.display(),
        "Starting portfolio backend"
    );
    if config.admin.password().is_none() {
        warn!("ADMIN_PASSWORD is not set, admin routes will answer 503");
    }

    let sweep_interval = config.admin.sweep_interval();
    let addr: SocketAddr = config.bind_addr.parse()?;

    let state = Arc::new(AppState::new(config, Arc::new(SystemClock)));
    spawn_sweeper(state.clone(), sweep_interval);

    let app = build_router(state);

    let listener = TcpListener::bind(addr).await?;
    info!(addr = %addr, "Server listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
