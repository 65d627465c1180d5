//! Author/notice classification of record bodies.
//!
//! A body reads ` - Alice: text` for messages and ` - Alice added Bob` for
//! system notices. The first colon of the first line separates the author
//! from the text. Notices such as subject changes quote user text that can
//! itself contain a colon, so a candidate author containing `"` is treated as
//! a notice.

/// Result of classifying one record body.
///
/// Slices borrow from the body and still carry their export-format prefixes;
/// see [`strip_fixed_prefix`](crate::parsing::strip_fixed_prefix).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classified<'a> {
    /// Authored message. `author` is everything before the first colon and
    /// `content` starts at that colon.
    Message { author: &'a str, content: &'a str },
    /// System notice. `content` is the whole body.
    Event { content: &'a str },
}

impl Classified<'_> {
    pub fn is_event(&self) -> bool {
        matches!(self, Classified::Event { .. })
    }
}

/// Finds the author candidate: the prefix up to the first colon, provided no
/// line break comes before it.
fn author_prefix(body: &str) -> Option<&str> {
    let first_line = body.split('\n').next().unwrap_or(body);
    first_line.find(':').map(|idx| &body[..idx])
}

/// Classifies a record body as a message or a system notice.
///
/// # Example
///
/// ```rust
/// use chatturns::parsing::{Classified, classify_body};
///
/// assert_eq!(
///     classify_body(" - Ezmay: Self esteem"),
///     Classified::Message { author: " - Ezmay", content: ": Self esteem" },
/// );
/// assert!(classify_body(" - Messages and calls are end-to-end encrypted").is_event());
/// ```
pub fn classify_body(body: &str) -> Classified<'_> {
    match author_prefix(body) {
        Some(author) if !author.contains('"') => Classified::Message {
            author,
            content: &body[author.len()..],
        },
        _ => Classified::Event { content: body },
    }
}
