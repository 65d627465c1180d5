//! Timestamp segmentation of a whole transcript.
//!
//! Exports put one record per line, but message bodies may span several
//! lines, so the transcript is cut on timestamp tokens rather than on line
//! breaks. Every match of [`TIMESTAMP_PATTERN`] opens a record; the text up to
//! the next match is its body.

use std::sync::LazyLock;

use regex::Regex;

/// Locale-flexible `D/M/Y, H:M` token. Digit runs are unbounded so that
/// 1-2 digit day/month/hour/minute and 2-4 digit years all match.
pub const TIMESTAMP_PATTERN: &str = r"\d+/\d+/\d+,\s\d+:\d+";

static TIMESTAMP_RE: LazyLock<Regex> = LazyLock::new(|| {
    // The pattern is a compile-time constant.
    Regex::new(TIMESTAMP_PATTERN).expect("timestamp pattern is valid")
});

/// One `(timestamp token, body)` pair cut out of a transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub timestamp: &'a str,
    pub body: &'a str,
}

/// Splits a transcript into timestamp/body pairs in source order.
///
/// Text before the first timestamp is discarded. A timestamp at the very end
/// of the input gets an empty body, so the number of timestamps always equals
/// the number of bodies.
///
/// Digit runs shaped like `#/#/#, #:#` inside message text are treated as
/// record boundaries too; exports give no way to tell them apart.
///
/// # Example
///
/// ```rust
/// use chatturns::parsing::segment_transcript;
///
/// let chat = "15/01/2024, 10:30 - Alice: Hi\n15/01/2024, 10:31 - Bob: Hey\n";
/// let segments = segment_transcript(chat);
///
/// assert_eq!(segments.len(), 2);
/// assert_eq!(segments[0].timestamp, "15/01/2024, 10:30");
/// assert_eq!(segments[0].body, " - Alice: Hi\n");
/// ```
pub fn segment_transcript(text: &str) -> Vec<Segment<'_>> {
    let matches: Vec<_> = TIMESTAMP_RE.find_iter(text).collect();
    let mut segments = Vec::with_capacity(matches.len());

    for (i, m) in matches.iter().enumerate() {
        let body_end = matches.get(i + 1).map_or(text.len(), |next| next.start());
        segments.push(Segment {
            timestamp: m.as_str(),
            body: &text[m.end()..body_end],
        });
    }

    tracing::debug!(segments = segments.len(), bytes = text.len(), "segmented transcript");
    segments
}
