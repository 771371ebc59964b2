// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Portfolio Backend
//!
//! Contact inbox for the portfolio site with a password-protected admin
//! view:
//!
//! - Contact submissions appended to a JSON document
//! - Admin login issuing an 8 hour HttpOnly session cookie
//! - Per-address login throttling (5 failures, 15 minute block)
//! - Session gate on the message list and stats

pub mod app;
pub mod client_addr;
pub mod clock;
pub mod config;
pub mod contact;
pub mod cookies;
pub mod error;
pub mod gate;
pub mod handlers;
pub mod session;
pub mod store;
pub mod throttle;

pub use config::Config;
pub use error::{ApiError, AuthError};
pub use gate::AdminGate;
pub use handlers::AppState;
pub use session::SessionRegistry;
pub use store::MessageStore;
pub use throttle::{LoginThrottle, ThrottleDecision};
