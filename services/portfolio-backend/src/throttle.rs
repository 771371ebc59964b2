// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Failed-login throttle keyed by client address.
//!
//! Each address accumulates failures until it reaches the configured
//! maximum, after which every attempt is refused for the block window,
//! correct password or not. A successful login clears the counter.
//!
//! Addresses come from `X-Forwarded-For` when present, so rotating that
//! header defeats the throttle unless a trusted proxy overwrites it.

use crate::clock::{expiry_after, SharedClock};
use crate::config::LoginThrottleConfig;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Outcome of a login attempt as seen by the throttle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrottleDecision {
    /// The attempt may proceed to session creation
    pub allowed: bool,
    /// The address is inside its block window
    pub blocked: bool,
    /// Time left in the block window, when blocked
    pub retry_after: Option<std::time::Duration>,
}

impl ThrottleDecision {
    fn allowed() -> Self {
        Self {
            allowed: true,
            blocked: false,
            retry_after: None,
        }
    }

    fn rejected() -> Self {
        Self {
            allowed: false,
            blocked: false,
            retry_after: None,
        }
    }

    fn blocked(retry_after: Duration) -> Self {
        Self {
            allowed: false,
            blocked: true,
            retry_after: Some(retry_after.to_std().unwrap_or_default()),
        }
    }
}

/// Per-address failure state.
#[derive(Debug, Default)]
struct AttemptState {
    failures: u32,
    blocked_until: Option<DateTime<Utc>>,
    last_failure: Option<DateTime<Utc>>,
}

/// Thread-safe login throttle.
pub struct LoginThrottle {
    config: LoginThrottleConfig,
    clock: SharedClock,
    attempts: Mutex<HashMap<String, AttemptState>>,
}

impl LoginThrottle {
    pub fn new(config: LoginThrottleConfig, clock: SharedClock) -> Self {
        Self {
            config,
            clock,
            attempts: Mutex::new(HashMap::new()),
        }
    }

    /// Record a login attempt from `address` and decide whether it may
    /// proceed.
    ///
    /// The whole read-check-write runs under one lock so concurrent failures
    /// from the same address are never undercounted.
    pub async fn check_and_record(
        &self,
        address: &str,
        password_correct: bool,
    ) -> ThrottleDecision {
        let address = normalize_address(address);
        let now = self.clock.now();
        let mut attempts = self.attempts.lock().await;

        if let Some(until) = attempts.get(&address).and_then(|state| state.blocked_until) {
            if until > now {
                let retry_after = until - now;
                debug!(%address, retry_after_secs = retry_after.num_seconds(), "Address blocked");
                return ThrottleDecision::blocked(retry_after);
            }
            debug!(%address, "Block window elapsed, resetting failures");
            attempts.remove(&address);
        }

        if password_correct {
            attempts.remove(&address);
            return ThrottleDecision::allowed();
        }

        let state = attempts.entry(address.clone()).or_default();
        state.failures += 1;
        state.last_failure = Some(now);
        if state.failures >= self.config.max_fails {
            state.blocked_until = Some(expiry_after(now, self.config.block_duration()));
            warn!(
                %address,
                failures = state.failures,
                block_secs = self.config.block_secs,
                "Too many failed logins, blocking address"
            );
        }

        ThrottleDecision::rejected()
    }

    /// Current failure count for `address` (0 when unknown).
    pub async fn failures(&self, address: &str) -> u32 {
        let attempts = self.attempts.lock().await;
        attempts
            .get(&normalize_address(address))
            .map_or(0, |state| state.failures)
    }

    /// Drop entries whose block has ended, and unblocked entries whose last
    /// failure is older than one block window.
    ///
    /// Returns the number of entries removed.
    pub async fn sweep(&self) -> usize {
        let now = self.clock.now();
        let window = self.config.block_duration();
        let mut attempts = self.attempts.lock().await;
        let before = attempts.len();

        attempts.retain(|_, state| match state.blocked_until {
            Some(until) => until > now,
            None => state
                .last_failure
                .is_some_and(|last| expiry_after(last, window) > now),
        });

        before - attempts.len()
    }
}

/// Blank addresses share a single "unknown" bucket.
fn normalize_address(address: &str) -> String {
    let trimmed = address.trim();
    if trimmed.is_empty() {
        "unknown".to_string()
    } else {
        trimmed.to_string()
    }
}
