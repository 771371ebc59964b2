// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Contact message storage in a single JSON document.
//!
//! The document is a JSON array, oldest message first. Every append is a
//! full read-modify-write, serialized by a mutex and committed with a
//! rename so a crash never leaves a half-written file behind.

use crate::contact::NewMessage;
use crate::error::StoreError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

/// A stored contact message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: String,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Summary shown on the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageStats {
    pub count: usize,
    pub last_message_at: Option<DateTime<Utc>>,
}

/// JSON-file backed message store.
pub struct MessageStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl MessageStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist a validated message and return the stored record.
    pub async fn append(&self, new: NewMessage) -> Result<ContactMessage, StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut messages = self.read_all().await?;
        let record = ContactMessage {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            email: new.email,
            message: new.message,
            created_at: Utc::now(),
        };
        messages.push(record.clone());
        self.write_all(&messages).await?;

        info!(id = %record.id, total = messages.len(), "Contact message stored");
        Ok(record)
    }

    /// All messages, newest first.
    pub async fn list(&self) -> Result<Vec<ContactMessage>, StoreError> {
        let mut messages = self.read_all().await?;
        messages.reverse();
        Ok(messages)
    }

    pub async fn stats(&self) -> Result<MessageStats, StoreError> {
        let messages = self.read_all().await?;
        Ok(MessageStats {
            count: messages.len(),
            last_message_at: messages.iter().map(|m| m.created_at).max(),
        })
    }

    async fn read_all(&self) -> Result<Vec<ContactMessage>, StoreError> {
        let raw = match fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Message store missing, treating as empty");
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };

        if raw.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_slice(&raw)?)
    }

    async fn write_all(&self, messages: &[ContactMessage]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let body = serde_json::to_vec_pretty(messages)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, body).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_message(name: &str) -> NewMessage {
        NewMessage {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            message: "Hello".to_string(),
        }
    }

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = MessageStore::new(dir.path().join("messages.json"));

        assert!(store.list().await.unwrap().is_empty());
        assert_eq!(
            store.stats().await.unwrap(),
            MessageStats {
                count: 0,
                last_message_at: None
            }
        );
    }

    #[tokio::test]
    async fn test_append_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("messages.json");

        let store = MessageStore::new(&path);
        let stored = tokio_test::assert_ok!(store.append(new_message("Ana")).await);
        let reopened = MessageStore::new(&path).list().await.unwrap();

        assert_eq!(reopened, vec![stored]);
    }

    #[tokio::test]
    async fn test_list_newest_first_and_stats() {
        let dir = tempfile::tempdir().unwrap();
        let store = MessageStore::new(dir.path().join("messages.json"));

        store.append(new_message("First")).await.unwrap();
        let last = store.append(new_message("Second")).await.unwrap();

        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].name, "Second");

        let stats = store.stats().await.unwrap();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.last_message_at, Some(last.created_at));
    }

    #[tokio::test]
    async fn test_camel_case_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = MessageStore::new(dir.path().join("messages.json"));
        store.append(new_message("Ana")).await.unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"createdAt\""));
        assert!(!raw.contains("created_at"));
    }

    #[tokio::test]
    async fn test_corrupt_document_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("messages.json");
        std::fs::write(&path, "{not json").unwrap();
        let store = MessageStore::new(&path);

        assert!(matches!(store.list().await, Err(StoreError::Corrupt(_))));
        assert!(matches!(
            store.append(new_message("Ana")).await,
            Err(StoreError::Corrupt(_))
        ));
        // Original content left alone
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{not json");
    }
}
