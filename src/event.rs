//! Structured transcript records.
//!
//! This module provides [`ChatEvent`], one timestamped record recognized in a
//! transcript. A record is either an authored message or a system notice
//! (membership changes, subject changes, the encryption banner). Notices carry
//! an empty author and `is_event == true`.
//!
//! # Examples
//!
//! ```
//! use chatturns::ChatEvent;
//! use chrono::{TimeZone, Utc};
//!
//! let ts = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
//!
//! let msg = ChatEvent::message(0, ts, "Alice", "Hello!");
//! assert_eq!(msg.author(), Some("Alice"));
//! assert!(!msg.is_event());
//!
//! let notice = ChatEvent::notice(1, ts, "Alice added Bob");
//! assert_eq!(notice.author(), None);
//! assert!(notice.is_event());
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ChatturnsError;

/// One structurally recognized record of a transcript.
///
/// Events are immutable once built: the parser creates them in source order
/// and everything downstream reads them. Derived attributes such as time gaps
/// or turn ids live in the [`RelationshipEngine`](crate::core::RelationshipEngine)
/// side table, never on the event itself.
///
/// # Fields
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `timestamp` | `DateTime<Utc>` | Always set; the 1900-01-01 sentinel when unparsable |
/// | `author` | `String` | Empty exactly when `is_event` |
/// | `is_event` | `bool` | System notice with no author |
/// | `content` | `String` | Normalized text, prefix stripped |
/// | `ordinal` | `usize` | 0-based position in source order |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawChatEvent")]
pub struct ChatEvent {
    timestamp: DateTime<Utc>,
    author: String,
    is_event: bool,
    content: String,
    ordinal: usize,
}

/// Wire form of [`ChatEvent`], checked before it becomes one.
#[derive(Deserialize)]
struct RawChatEvent {
    timestamp: DateTime<Utc>,
    author: String,
    is_event: bool,
    content: String,
    ordinal: usize,
}

impl TryFrom<RawChatEvent> for ChatEvent {
    type Error = ChatturnsError;

    fn try_from(raw: RawChatEvent) -> Result<Self, Self::Error> {
        if !raw.is_event {
            return Ok(ChatEvent::message(raw.ordinal, raw.timestamp, raw.author, raw.content));
        }
        if !raw.author.is_empty() {
            return Err(ChatturnsError::NoticeWithAuthor {
                ordinal: raw.ordinal,
                author: raw.author,
            });
        }
        Ok(ChatEvent::notice(raw.ordinal, raw.timestamp, raw.content))
    }
}

impl ChatEvent {
    /// Creates an authored message.
    pub fn message(
        ordinal: usize,
        timestamp: DateTime<Utc>,
        author: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            author: author.into(),
            is_event: false,
            content: content.into(),
            ordinal,
        }
    }

    /// Creates a system notice. Notices never have an author.
    pub fn notice(ordinal: usize, timestamp: DateTime<Utc>, content: impl Into<String>) -> Self {
        Self {
            timestamp,
            author: String::new(),
            is_event: true,
            content: content.into(),
            ordinal,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns the author, or `None` for system notices.
    pub fn author(&self) -> Option<&str> {
        if self.is_event {
            None
        } else {
            Some(&self.author)
        }
    }

    /// Returns the author column as exported: empty for system notices.
    pub fn author_str(&self) -> &str {
        &self.author
    }

    pub fn is_event(&self) -> bool {
        self.is_event
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// Returns `true` if the content is empty or whitespace-only.
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}
