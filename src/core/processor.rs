//! Turn merging and transcript statistics.

use crate::ChatEvent;
use crate::core::models::ChatGroup;

/// Collapses events sharing a group id into single [`ChatGroup`] entries.
///
/// Each group takes its first event's timestamp, author and notice flag.
/// Contents are concatenated as-is: normalized fields already end in `. `
/// where the export had a line break.
///
/// # Example
/// Input:  `[(Alice, "Hi. ", 0), (Alice, "How are you?. ", 0), (Bob, "Fine", 1)]`
/// Output: `[(Alice, "Hi. How are you?. "), (Bob, "Fine")]`
///
/// # Panics
/// If `group_ids` is not exactly one id per event.
pub fn merge_groups(events: &[ChatEvent], group_ids: &[usize]) -> Vec<ChatGroup> {
    assert_eq!(
        events.len(),
        group_ids.len(),
        "group ids must cover every event"
    );

    let mut merged: Vec<ChatGroup> = Vec::new();

    for (event, &group_id) in events.iter().zip(group_ids) {
        match merged.last_mut() {
            Some(last) if last.group_id == group_id => {
                last.content.push_str(event.content());
                last.event_count += 1;
            }
            _ => merged.push(ChatGroup {
                group_id,
                timestamp: event.timestamp(),
                author: event.author_str().to_string(),
                is_event: event.is_event(),
                content: event.content().to_string(),
                event_count: 1,
            }),
        }
    }

    merged
}

/// Counts for one analysed transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TranscriptStats {
    /// System notices
    pub event_count: usize,
    /// Authored messages
    pub message_count: usize,
    /// Distinct turns
    pub group_count: usize,
}

impl TranscriptStats {
    /// Computes counts from events and their group ids.
    pub fn new(events: &[ChatEvent], group_ids: &[usize]) -> Self {
        let event_count = events.iter().filter(|e| e.is_event()).count();
        let mut group_count = 0;
        let mut last = None;
        for &id in group_ids {
            if last != Some(id) {
                group_count += 1;
                last = Some(id);
            }
        }

        Self {
            event_count,
            message_count: events.len() - event_count,
            group_count,
        }
    }

    /// Total number of records.
    pub fn total(&self) -> usize {
        self.event_count + self.message_count
    }

    /// Percentage of records saved by merging turns.
    pub fn compression_ratio(&self) -> f64 {
        if self.total() == 0 {
            return 0.0;
        }
        (1.0 - (self.group_count as f64 / self.total() as f64)) * 100.0
    }
}
