//! Output format writers.
//!
//! This module serializes analysed rows ([`ChatEvent`](crate::ChatEvent),
//! [`EnrichedEvent`](crate::core::models::EnrichedEvent),
//! [`ChatGroup`](crate::core::models::ChatGroup), or any other `Serialize`
//! row) into:
//! - [`write_csv`] / [`to_csv`] - CSV with semicolon delimiter - requires `csv-output` feature
//! - [`write_json`] / [`to_json`] - pretty JSON array - requires `json-output` feature
//! - [`write_jsonl`] / [`to_jsonl`] - JSON Lines, one object per line - requires `json-output` feature
//!
//! Writers take any [`std::io::Write`]; opening files is up to the caller.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatturns::Result<()> {
//! use chatturns::core::RelationshipEngine;
//! use chatturns::core::output::{to_csv, to_jsonl};
//! use chatturns::parser::TranscriptParser;
//!
//! let events = TranscriptParser::new().parse_str("15/01/2024, 10:30 - Alice: Hi");
//! let rows = RelationshipEngine::new(&events).enriched();
//!
//! let csv = to_csv(&rows)?;
//! assert!(csv.starts_with("ordinal;timestamp;author"));
//!
//! let jsonl = to_jsonl(&rows)?;
//! assert_eq!(jsonl.lines().count(), 1);
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};
