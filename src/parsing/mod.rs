//! Building blocks of the transcript pipeline.
//!
//! Each stage is a pure function over its input, usable on its own:
//!
//! - [`segment`] - cut a transcript into `(timestamp, body)` pairs
//! - [`classify`] - split a body into author and content, or mark it a notice
//! - [`normalize`] - emoji, media marker, newline and mention rewriting
//! - [`timestamp`] - token parsing with the 1900-01-01 fallback
//!
//! [`TranscriptParser`](crate::parser::TranscriptParser) chains them.

pub mod classify;
pub mod normalize;
pub mod segment;
pub mod timestamp;

// Re-export commonly used items
pub use classify::{Classified, classify_body};
pub use normalize::{
    FieldKind, MEDIA_OMITTED, MEDIA_OMITTED_TOKEN, TextNormalizer, replace_media_omitted,
    replace_newlines, strip_fixed_prefix, translate_emoji,
};
pub use segment::{Segment, TIMESTAMP_PATTERN, segment_transcript};
pub use timestamp::{is_sentinel, parse_timestamp, sentinel_timestamp, try_parse_timestamp};
