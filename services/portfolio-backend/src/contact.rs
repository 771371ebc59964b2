// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Contact form submission validation.
//!
//! - name, email and message are required and non-blank
//! - length caps on every field
//! - email must look like `local@domain`

use crate::error::ContactError;
use serde::Deserialize;
use tracing::debug;

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_EMAIL_LEN: usize = 254;
pub const MAX_MESSAGE_LEN: usize = 5000;

/// Raw contact form body. Every field is optional so a missing one is
/// reported as `Missing fields` rather than a deserialization failure.
#[derive(Debug, Default, Deserialize)]
pub struct ContactSubmission {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// A submission that passed validation, with fields trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactSubmission {
    pub fn validate(self) -> Result<NewMessage, ContactError> {
        let name = required(self.name)?;
        let email = required(self.email)?;
        let message = required(self.message)?;

        check_len("name", &name, MAX_NAME_LEN)?;
        check_len("email", &email, MAX_EMAIL_LEN)?;
        check_len("message", &message, MAX_MESSAGE_LEN)?;

        if !looks_like_email(&email) {
            debug!(%email, "Rejected malformed email");
            return Err(ContactError::InvalidEmail);
        }

        Ok(NewMessage {
            name,
            email,
            message,
        })
    }
}

fn required(field: Option<String>) -> Result<String, ContactError> {
    match field.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(ContactError::MissingFields),
    }
}

fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), ContactError> {
    if value.chars().count() > max {
        return Err(ContactError::TooLong { field, max });
    }
    Ok(())
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}
