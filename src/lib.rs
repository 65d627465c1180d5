//! # Chatturns
//!
//! A Rust library that turns an exported WhatsApp transcript into an ordered
//! sequence of chat events and derives the relationships between them.
//!
//! ## Overview
//!
//! An export is one text blob with records like:
//!
//! ```text
//! 15/01/2024, 10:30 - Alice: message text
//! 15/01/2024, 10:31 - Alice added Bob
//! ```
//!
//! The pipeline:
//!
//! 1. emoji glyphs become ` :name: ` tokens across the whole text
//! 2. the text is cut on `D/M/Y, H:M` timestamp tokens
//! 3. each body is classified as an authored message or a system notice
//! 4. authors and contents are normalized (prefix strip, media marker,
//!    newlines, `@<number>` mentions)
//! 5. timestamp tokens are parsed, with a 1900-01-01 fallback
//!
//! The resulting [`ChatEvent`]s feed a [`RelationshipEngine`](core::RelationshipEngine),
//! which computes time gaps, neighbouring authors and conversational turns.
//!
//! ## Quick Start
//!
//! ```rust
//! use chatturns::prelude::*;
//!
//! # fn main() -> chatturns::Result<()> {
//! let contacts = ContactBook::new().with_contact("Bob", "447700900123")?;
//! let parser = TranscriptParser::with_config(TranscriptConfig::new().with_contacts(contacts));
//!
//! let chat = "\
//! 15/01/2024, 10:30 - Alice: @447700900123 you around?
//! 15/01/2024, 10:30 - Alice: need a hand
//! 15/01/2024, 10:34 - Bob: sure
//! ";
//! let events = parser.parse_str(chat);
//! assert_eq!(events[0].content(), "Bob you around?. ");
//!
//! let mut engine = RelationshipEngine::new(&events);
//! assert_eq!(engine.group_ids(), &[0, 0, 1]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - [`TranscriptParser`](parser::TranscriptParser), the full pipeline
//! - [`parsing`] - the individual stages as pure functions
//! - [`core`] - relationship engine, turn merging, stats, output writers
//! - [`config`] - [`TranscriptConfig`](config::TranscriptConfig), [`ContactBook`](config::ContactBook)
//! - [`event`] - [`ChatEvent`]
//! - [`error`] - [`ChatturnsError`], [`Result`]
//! - [`prelude`] - convenient re-exports

pub mod config;
pub mod core;
pub mod error;
pub mod event;
pub mod parser;
pub mod parsing;

// Re-export the main types at the crate root for convenience
pub use error::{ChatturnsError, Result};
pub use event::ChatEvent;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatturns::prelude::*;
/// ```
pub mod prelude {
    pub use crate::ChatEvent;

    // Error types
    pub use crate::error::{ChatturnsError, Result};

    // Parsing
    pub use crate::config::{ContactBook, TranscriptConfig};
    pub use crate::parser::TranscriptParser;

    // Analysis
    pub use crate::core::{
        ChatGroup, EnrichedEvent, Feature, RelationshipEngine, TranscriptStats, merge_groups,
    };

    // Output (writers and string converters)
    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, to_jsonl, write_json, write_jsonl};
}
