//! Row types produced from analysed transcripts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An event together with all of its derived features.
///
/// Gaps are whole seconds so the row serializes flat into CSV and JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedEvent {
    pub ordinal: usize,
    pub timestamp: DateTime<Utc>,
    /// Empty for system notices
    pub author: String,
    pub is_event: bool,
    pub content: String,
    pub time_since_previous_secs: Option<i64>,
    pub time_to_next_secs: Option<i64>,
    pub previous_author: Option<String>,
    pub next_author: Option<String>,
    pub group_id: usize,
}

/// One conversational turn: consecutive events sharing a group id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatGroup {
    pub group_id: usize,
    /// Timestamp of the first event in the turn
    pub timestamp: DateTime<Utc>,
    pub author: String,
    pub is_event: bool,
    /// Contents of all events, concatenated in order
    pub content: String,
    /// Number of events merged into this turn
    pub event_count: usize,
}
