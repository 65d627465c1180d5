//! Analysis over parsed events.
//!
//! This module contains:
//! - [`relationships`] - [`RelationshipEngine`]: time gaps, adjacent authors, turn ids
//! - [`processor`] - turn merging and statistics
//! - [`models`] - row types for enriched events and merged turns
//! - [`output`] - format writers (CSV, JSON, JSONL)
//!
//! # Quick Start
//!
//! ```rust
//! use chatturns::core::{RelationshipEngine, TranscriptStats};
//! use chatturns::parser::TranscriptParser;
//!
//! let chat = "\
//! 15/01/2024, 10:30 - Alice: Hi
//! 15/01/2024, 10:30 - Alice: anyone?
//! 15/01/2024, 10:31 - Bob added Carol
//! ";
//! let events = TranscriptParser::new().parse_str(chat);
//! let mut engine = RelationshipEngine::new(&events);
//!
//! let stats = TranscriptStats::new(&events, engine.group_ids());
//! assert_eq!(stats.message_count, 2);
//! assert_eq!(stats.event_count, 1);
//! assert_eq!(stats.group_count, 2);
//!
//! let turns = engine.merged_groups();
//! assert_eq!(turns[0].content, "Hi. anyone?. ");
//! ```

pub mod models;
pub mod output;
pub mod processor;
pub mod relationships;

pub use models::{ChatGroup, EnrichedEvent};
pub use processor::{TranscriptStats, merge_groups};
pub use relationships::{Feature, FeatureColumn, RelationshipEngine};

// Conditionally re-export output writers
#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl, write_json, write_jsonl};
