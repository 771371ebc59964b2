// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Configuration for the portfolio backend.
//!
//! Defaults give an 8 hour admin session, a 15 minute block after 5 failed
//! logins, and a 10 minute sweep of expired state.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

/// Configuration for the portfolio backend service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address (default: 0.0.0.0:3000)
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Admin login and session settings
    #[serde(default)]
    pub admin: AdminConfig,

    /// Failed-login throttling
    #[serde(default)]
    pub login_throttle: LoginThrottleConfig,

    /// Contact message storage
    #[serde(default)]
    pub store: StoreConfig,

    /// Cross-origin settings for the static site
    #[serde(default)]
    pub cors: CorsConfig,
}

/// Admin authentication configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Shared admin password. `None` disables every admin route.
    #[serde(default, skip_serializing)]
    pub password: Option<String>,

    /// Session lifetime in seconds (default: 28800)
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,

    /// Interval between sweeps of expired sessions and throttle entries
    /// in seconds (default: 600)
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,

    /// Mark the session cookie `Secure` (default: false)
    #[serde(default)]
    pub cookie_secure: bool,
}

// Keeps the password out of logs.
impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("session_ttl_secs", &self.session_ttl_secs)
            .field("sweep_interval_secs", &self.sweep_interval_secs)
            .field("cookie_secure", &self.cookie_secure)
            .finish()
    }
}

/// Failed-login throttling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginThrottleConfig {
    /// Failures that trigger a block (default: 5)
    #[serde(default = "default_max_fails")]
    pub max_fails: u32,

    /// Length of the block in seconds (default: 900)
    #[serde(default = "default_block_secs")]
    pub block_secs: u64,
}

/// Message store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// JSON document holding contact messages (default: data/messages.json)
    #[serde(default = "default_messages_path")]
    pub messages_path: PathBuf,
}

/// CORS configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Origins allowed to call the API with credentials
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

fn default_bind_addr() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_session_ttl_secs() -> u64 {
    8 * 60 * 60
}

fn default_sweep_interval_secs() -> u64 {
    10 * 60
}

fn default_max_fails() -> u32 {
    5
}

fn default_block_secs() -> u64 {
    15 * 60
}

fn default_messages_path() -> PathBuf {
    PathBuf::from("data/messages.json")
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:5500".to_string(),
        "http://127.0.0.1:5500".to_string(),
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            admin: AdminConfig::default(),
            login_throttle: LoginThrottleConfig::default(),
            store: StoreConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            password: None,
            session_ttl_secs: default_session_ttl_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
            cookie_secure: false,
        }
    }
}

impl Default for LoginThrottleConfig {
    fn default() -> Self {
        Self {
            max_fails: default_max_fails(),
            block_secs: default_block_secs(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            messages_path: default_messages_path(),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl AdminConfig {
    /// The configured password, if any. Blank counts as unset.
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref().filter(|p| !p.is_empty())
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

impl LoginThrottleConfig {
    pub fn block_duration(&self) -> Duration {
        Duration::from_secs(self.block_secs)
    }
}

impl Config {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Unset variables fall back to defaults; set but unparseable ones are
    /// an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            admin: AdminConfig {
                password: lookup("ADMIN_PASSWORD").filter(|p| !p.is_empty()),
                session_ttl_secs: parse_var(&lookup, "SESSION_TTL_SECS")?
                    .unwrap_or(defaults.admin.session_ttl_secs),
                sweep_interval_secs: parse_var(&lookup, "SWEEP_INTERVAL_SECS")?
                    .unwrap_or(defaults.admin.sweep_interval_secs),
                cookie_secure: parse_var(&lookup, "COOKIE_SECURE")?
                    .unwrap_or(defaults.admin.cookie_secure),
            },
            login_throttle: LoginThrottleConfig {
                max_fails: parse_var(&lookup, "LOGIN_MAX_FAILS")?
                    .unwrap_or(defaults.login_throttle.max_fails),
                block_secs: parse_var(&lookup, "LOGIN_BLOCK_SECS")?
                    .unwrap_or(defaults.login_throttle.block_secs),
            },
            store: StoreConfig {
                messages_path: lookup("MESSAGES_PATH")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.store.messages_path),
            },
            cors: CorsConfig {
                allowed_origins: lookup("ALLOWED_ORIGINS")
                    .map(|raw| {
                        raw.split(',')
                            .map(str::trim)
                            .filter(|o| !o.is_empty())
                            .map(str::to_string)
                            .collect()
                    })
                    .unwrap_or(defaults.cors.allowed_origins),
            },
        })
    }
}

fn parse_var<F, T>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { name, value }),
    }
}
