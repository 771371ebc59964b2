// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Test data generators for login attack simulation.

use std::net::{IpAddr, Ipv4Addr};

/// Generate a pool of client addresses in 10.0.0.0/8.
pub fn generate_addresses(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            let a = ((i >> 16) & 0xFF) as u8;
            let b = ((i >> 8) & 0xFF) as u8;
            let c = (i & 0xFF) as u8;
            IpAddr::V4(Ipv4Addr::new(10, a, b, c)).to_string()
        })
        .collect()
}

/// Generate wrong passwords, none equal to `correct`.
pub fn generate_wrong_passwords(count: usize, correct: &str) -> Vec<String> {
    (0..count)
        .map(|i| format!("guess-{i}"))
        .filter(|p| p != correct)
        .collect()
}

/// `X-Forwarded-For` values an attacker might send to dodge the throttle.
pub fn generate_forwarded_headers() -> Vec<(&'static str, &'static str)> {
    vec![
        // (header value, address the throttle should key on)
        ("203.0.113.7", "203.0.113.7"),
        ("203.0.113.7, 10.0.0.1", "203.0.113.7"),
        ("  203.0.113.7  ,10.0.0.1", "203.0.113.7"),
        ("2001:db8::1", "2001:db8::1"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_addresses() {
        let addresses = generate_addresses(300);
        assert_eq!(addresses.len(), 300);
        let unique: std::collections::HashSet<_> = addresses.iter().collect();
        assert_eq!(unique.len(), 300);
        assert_eq!(addresses[0], "10.0.0.0");
    }

    #[test]
    fn test_wrong_passwords_exclude_correct() {
        let guesses = generate_wrong_passwords(10, "guess-3");
        assert_eq!(guesses.len(), 9);
        assert!(!guesses.iter().any(|g| g == "guess-3"));
    }
}
