// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Login attack patterns.

use std::time::Duration;

/// Attack pattern configuration.
#[derive(Debug, Clone)]
pub struct AttackConfig {
    /// Total login attempts
    pub total_attempts: usize,
    /// Distinct client addresses, used round-robin
    pub unique_addresses: usize,
    /// Every n-th attempt uses the correct password
    pub correct_every: Option<usize>,
    /// Simulated time between attempts
    pub step: Duration,
}

impl Default for AttackConfig {
    fn default() -> Self {
        Self {
            total_attempts: 100,
            unique_addresses: 1,
            correct_every: None,
            step: Duration::from_millis(100),
        }
    }
}

/// Predefined attack patterns.
impl AttackConfig {
    /// Rapid password guessing from one address.
    pub fn single_address_guessing() -> Self {
        Self::default()
    }

    /// Guessing spread over a small pool of addresses.
    pub fn distributed_guessing() -> Self {
        Self {
            total_attempts: 200,
            unique_addresses: 20,
            ..Default::default()
        }
    }

    /// A fresh forwarded address on every attempt.
    pub fn address_rotation() -> Self {
        Self {
            total_attempts: 100,
            unique_addresses: 100,
            ..Default::default()
        }
    }

    /// One guess every five minutes, hoping the block never triggers.
    pub fn slow_drip() -> Self {
        Self {
            total_attempts: 30,
            step: Duration::from_secs(300),
            ..Default::default()
        }
    }

    /// Guessing that eventually hits the right password.
    pub fn lucky_guess(after: usize) -> Self {
        Self {
            total_attempts: after,
            correct_every: Some(after),
            ..Default::default()
        }
    }

    /// Whether attempt `index` (0-based) carries the correct password.
    pub fn is_correct(&self, index: usize) -> bool {
        self.correct_every.is_some_and(|n| n > 0 && (index + 1) % n == 0)
    }
}
