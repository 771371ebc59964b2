// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Client address used as the login throttle key.
//!
//! The first `X-Forwarded-For` entry is trusted as-is. Without a proxy that
//! overwrites the header, clients can pick their own key.

use axum::http::HeaderMap;
use std::net::SocketAddr;

pub const FORWARDED_FOR: &str = "x-forwarded-for";

/// First forwarded entry, else the peer IP, else `"unknown"`.
pub fn client_address(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    headers
        .get(FORWARDED_FOR)
        .and_then(|v| v.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .map(str::to_string)
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| "unknown".to_string())
}
