// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! In-memory admin session registry.
//!
//! Maps opaque tokens to their expiry instant. Expired tokens are dropped
//! lazily when looked up by [`SessionRegistry::is_valid`] and in bulk by
//! [`SessionRegistry::sweep`]; the two are independent so either can run
//! without the other.

use crate::clock::{expiry_after, SharedClock};
use chrono::{DateTime, Utc};
use rand::rngs::OsRng;
use rand::RngCore;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::debug;

/// Random bytes per token (256 bits).
pub const TOKEN_BYTES: usize = 32;

/// Thread-safe session registry.
pub struct SessionRegistry {
    ttl: Duration,
    clock: SharedClock,
    sessions: Mutex<HashMap<String, DateTime<Utc>>>,
}

impl SessionRegistry {
    pub fn new(ttl: Duration, clock: SharedClock) -> Self {
        Self {
            ttl,
            clock,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Session lifetime, also used as the cookie `Max-Age`.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a new token valid for one TTL.
    pub async fn create(&self) -> String {
        let token = generate_token();
        let expires_at = expiry_after(self.clock.now(), self.ttl);

        self.sessions.lock().await.insert(token.clone(), expires_at);
        debug!(%expires_at, "Session created");

        token
    }

    /// Whether `token` names a live session. An expired entry is removed.
    pub async fn is_valid(&self, token: &str) -> bool {
        let now = self.clock.now();
        let mut sessions = self.sessions.lock().await;

        let expired = match sessions.get(token) {
            None => return false,
            Some(expires_at) => now > *expires_at,
        };

        if expired {
            sessions.remove(token);
            debug!("Expired session rejected");
        }
        !expired
    }

    /// Forget `token`. Unknown tokens are ignored.
    pub async fn invalidate(&self, token: &str) {
        if self.sessions.lock().await.remove(token).is_some() {
            debug!("Session invalidated");
        }
    }

    /// Remove every expired session, returning how many were dropped.
    pub async fn sweep(&self) -> usize {
        let now = self.clock.now();
        let mut sessions = self.sessions.lock().await;
        let before = sessions.len();

        sessions.retain(|_, expires_at| now <= *expires_at);

        before - sessions.len()
    }

    /// Number of live sessions. Expired entries awaiting a sweep are not
    /// counted.
    pub async fn len(&self) -> usize {
        let now = self.clock.now();
        let sessions = self.sessions.lock().await;
        sessions
            .values()
            .filter(|expires_at| now <= **expires_at)
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// 256 bits from the OS CSPRNG, hex encoded.
fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
