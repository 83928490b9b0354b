//! Transcript — append-only conversation log.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::TranscriptError;

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Bot,
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::User => "user",
            Self::Bot => "bot",
        };
        write!(f, "{s}")
    }
}

/// A single transcript entry. Immutable once created; identity is `id`.
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    fn new(text: impl Into<String>, sender: Sender) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            sender,
            timestamp: Utc::now(),
        }
    }

    /// Create a user message with a fresh id and the current time.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text, Sender::User)
    }

    /// Create a bot message with a fresh id and the current time.
    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(text, Sender::Bot)
    }
}

/// Append-only ordered log of messages.
///
/// Insertion order is chronological and authoritative. Entries are
/// write-once: there is no update, delete, or reorder operation.
#[derive(Debug, Default)]
pub struct Transcript {
    entries: Vec<Message>,
    seen_ids: HashSet<String>,
}

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transcript seeded with an initial entry (the greeting).
    ///
    /// A single-entry log trivially satisfies both invariants, so this
    /// cannot fail.
    pub fn seeded(first: Message) -> Self {
        let mut seen_ids = HashSet::new();
        seen_ids.insert(first.id.clone());
        Self {
            entries: vec![first],
            seen_ids,
        }
    }

    /// Append a message, enforcing id uniqueness and timestamp monotonicity.
    pub fn append(&mut self, message: Message) -> Result<(), TranscriptError> {
        if self.seen_ids.contains(&message.id) {
            return Err(TranscriptError::DuplicateId {
                id: message.id.clone(),
            });
        }
        if let Some(last) = self.entries.last() {
            if message.timestamp < last.timestamp {
                return Err(TranscriptError::TimestampRegression {
                    id: message.id.clone(),
                });
            }
        }
        self.seen_ids.insert(message.id.clone());
        self.entries.push(message);
        Ok(())
    }

    /// Defensive copy of the log for rendering.
    pub fn snapshot(&self) -> Vec<Message> {
        self.entries.clone()
    }

    /// The most recent entry, if any.
    pub fn last(&self) -> Option<&Message> {
        self.entries.last()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
