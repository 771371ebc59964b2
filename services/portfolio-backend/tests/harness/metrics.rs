// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Outcome collection for login attack simulation.

use std::collections::HashMap;

/// Collects outcomes during an attack simulation.
#[derive(Debug, Default)]
pub struct AttackMetrics {
    outcomes: HashMap<Outcome, usize>,
    attempts_per_address: HashMap<String, usize>,
    wrong_per_address: HashMap<String, usize>,
    tokens: Vec<String>,
}

/// Possible outcomes for a login attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Correct password, session issued
    Accepted,
    /// Evaluated and refused
    WrongPassword,
    /// Refused without evaluation, address in block window
    Blocked,
}

impl AttackMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an attempt outcome.
    pub fn record(&mut self, outcome: Outcome, address: &str) {
        *self.outcomes.entry(outcome).or_insert(0) += 1;
        *self
            .attempts_per_address
            .entry(address.to_string())
            .or_insert(0) += 1;
        if outcome == Outcome::WrongPassword {
            *self.wrong_per_address.entry(address.to_string()).or_insert(0) += 1;
        }
    }

    /// Keep a session token issued during the attack.
    pub fn record_token(&mut self, token: String) {
        self.tokens.push(token);
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn total(&self) -> usize {
        self.outcomes.values().sum()
    }

    pub fn count(&self, outcome: Outcome) -> usize {
        self.outcomes.get(&outcome).copied().unwrap_or(0)
    }

    pub fn unique_addresses(&self) -> usize {
        self.attempts_per_address.len()
    }

    /// Most wrong passwords any single address got evaluated.
    pub fn max_wrong_per_address(&self) -> usize {
        self.wrong_per_address.values().copied().max().unwrap_or(0)
    }

    pub fn report(&self) -> MetricsReport {
        MetricsReport {
            total: self.total(),
            accepted: self.count(Outcome::Accepted),
            wrong_password: self.count(Outcome::WrongPassword),
            blocked: self.count(Outcome::Blocked),
            unique_addresses: self.unique_addresses(),
            max_wrong_per_address: self.max_wrong_per_address(),
        }
    }
}

/// Summary report of attack metrics.
#[derive(Debug, Clone)]
pub struct MetricsReport {
    pub total: usize,
    pub accepted: usize,
    pub wrong_password: usize,
    pub blocked: usize,
    pub unique_addresses: usize,
    pub max_wrong_per_address: usize,
}

impl std::fmt::Display for MetricsReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Login Attack Report ===")?;
        writeln!(f, "Attempts:          {}", self.total)?;
        writeln!(f, "Accepted:          {}", self.accepted)?;
        writeln!(f, "Wrong password:    {}", self.wrong_password)?;
        writeln!(f, "Blocked:           {}", self.blocked)?;
        writeln!(f, "Unique addresses:  {}", self.unique_addresses)?;
        writeln!(f, "Max wrong/address: {}", self.max_wrong_per_address)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_collection() {
        let mut metrics = AttackMetrics::new();

        metrics.record(Outcome::WrongPassword, "10.0.0.1");
        metrics.record(Outcome::WrongPassword, "10.0.0.1");
        metrics.record(Outcome::Blocked, "10.0.0.1");
        metrics.record(Outcome::WrongPassword, "10.0.0.2");

        assert_eq!(metrics.total(), 4);
        assert_eq!(metrics.count(Outcome::WrongPassword), 3);
        assert_eq!(metrics.count(Outcome::Accepted), 0);
        assert_eq!(metrics.unique_addresses(), 2);
        assert_eq!(metrics.max_wrong_per_address(), 2);
    }
}
