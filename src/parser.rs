//! Transcript parser: raw export text to ordered [`ChatEvent`]s.
//!
//! # Example
//!
//! ```rust
//! use chatturns::parser::TranscriptParser;
//!
//! let chat = "\
//! 15/01/2024, 10:30 - Messages and calls are end-to-end encrypted
//! 15/01/2024, 10:30 - Alice: Hello
//! 15/01/2024, 10:31 - Bob: <Media omitted>
//! ";
//!
//! let events = TranscriptParser::new().parse_str(chat);
//!
//! assert_eq!(events.len(), 3);
//! assert!(events[0].is_event());
//! assert_eq!(events[1].author(), Some("Alice"));
//! assert_eq!(events[2].content(), "__Media_Omitted__. ");
//! ```
//!
//! Reading the export from disk is up to the caller; the parser only works on
//! text already in memory.

use std::borrow::Cow;

use crate::ChatEvent;
use crate::config::TranscriptConfig;
use crate::parsing::{
    Classified, FieldKind, TextNormalizer, classify_body, parse_timestamp, segment_transcript,
    translate_emoji,
};

/// Parser for exported chat transcripts.
///
/// Parsing is infallible: malformed timestamps fall back to the sentinel and
/// ambiguous bodies become notices. An empty transcript yields no events.
#[derive(Debug, Clone)]
pub struct TranscriptParser {
    config: TranscriptConfig,
    normalizer: TextNormalizer,
}

impl TranscriptParser {
    /// Creates a new parser with default configuration.
    pub fn new() -> Self {
        Self::with_config(TranscriptConfig::default())
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: TranscriptConfig) -> Self {
        let normalizer = TextNormalizer::new(&config.contacts);
        Self { config, normalizer }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &TranscriptConfig {
        &self.config
    }

    /// Builds one event from a segment's parts.
    fn build_event(&self, ordinal: usize, timestamp: &str, body: &str) -> ChatEvent {
        let timestamp = parse_timestamp(timestamp);

        match classify_body(body) {
            Classified::Message { author, content } => ChatEvent::message(
                ordinal,
                timestamp,
                self.normalizer.normalize_field(author, FieldKind::Author),
                self.normalizer.normalize_field(content, FieldKind::Message),
            ),
            Classified::Event { content } => ChatEvent::notice(
                ordinal,
                timestamp,
                self.normalizer.normalize_field(content, FieldKind::Event),
            ),
        }
    }

    /// Parses a whole transcript into events in source order.
    pub fn parse_str(&self, content: &str) -> Vec<ChatEvent> {
        // Exports written on Windows use CRLF; text-mode readers hand us LF.
        let text: Cow<'_, str> = if content.contains('\r') {
            Cow::Owned(content.replace("\r\n", "\n"))
        } else {
            Cow::Borrowed(content)
        };

        // Emoji may sit right against digit runs, so translate before cutting.
        let text = if self.config.translate_emoji {
            Cow::Owned(translate_emoji(&text))
        } else {
            text
        };

        let events: Vec<ChatEvent> = segment_transcript(&text)
            .into_iter()
            .enumerate()
            .map(|(ordinal, segment)| self.build_event(ordinal, segment.timestamp, segment.body))
            .collect();

        let notices = events.iter().filter(|e| e.is_event()).count();
        tracing::debug!(
            events = events.len(),
            messages = events.len() - notices,
            notices,
            "parsed transcript"
        );

        events
    }
}

impl Default for TranscriptParser {
    fn default() -> Self {
        Self::new()
    }
}
