//! Text normalization for transcripts and record fields.
//!
//! Two stages:
//!
//! 1. [`translate_emoji`] runs over the whole transcript before segmentation.
//! 2. [`TextNormalizer::normalize_field`] runs over each author, notice and
//!    message string after classification: fixed-width prefix strip, media
//!    marker, newlines, then `@<number>` mentions. Newlines are rewritten only
//!    after the author split because the split looks for the first colon on
//!    the first line.

use std::collections::HashMap;
use std::sync::LazyLock;

use deunicode::deunicode_char;
use regex::{Captures, Regex};

use crate::config::ContactBook;

/// Placeholder WhatsApp writes for attachments left out of the export.
///
/// Matching is case-sensitive: `<media omitted>` is left alone.
pub const MEDIA_OMITTED: &str = "<Media omitted>";

/// Token that replaces [`MEDIA_OMITTED`].
pub const MEDIA_OMITTED_TOKEN: &str = "__Media_Omitted__";

/// Replacement for every line break inside a field.
pub const NEWLINE_REPLACEMENT: &str = ". ";

// A pictograph with its variation selectors, skin tones and ZWJ-joined parts.
static EMOJI_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\p{Extended_Pictographic}(?:[\x{FE0F}\p{Emoji_Modifier}]|\x{200D}\p{Extended_Pictographic})*")
        .expect("emoji pattern is valid")
});

static MENTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@(\d+)").expect("mention pattern is valid"));

/// Which field a string came from; decides how many leading characters the
/// export format puts in front of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Author name, exported as ` - Name`
    Author,
    /// Whole notice body, exported as ` - text`
    Event,
    /// Message text, exported as `: text`
    Message,
}

impl FieldKind {
    /// Number of leading characters the export format adds.
    pub fn prefix_len(self) -> usize {
        match self {
            FieldKind::Author | FieldKind::Event => 3,
            FieldKind::Message => 2,
        }
    }
}

/// Removes exactly `count` leading characters.
///
/// This is not a trim: the export format always writes ` - ` or `: `, so the
/// characters are dropped whatever they are. Strings shorter than `count`
/// become empty.
pub fn strip_fixed_prefix(s: &str, count: usize) -> &str {
    match s.char_indices().nth(count) {
        Some((idx, _)) => &s[idx..],
        None => "",
    }
}

fn emoji_name(c: char) -> String {
    let raw = deunicode_char(c).unwrap_or_default().to_lowercase();

    let mut name = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            name.push(ch);
        } else if !name.is_empty() && !name.ends_with('_') {
            name.push('_');
        }
    }
    let name = name.trim_end_matches('_');

    if name.is_empty() {
        format!("u{:04x}", c as u32)
    } else {
        name.to_string()
    }
}

fn is_emoji_joiner(c: char) -> bool {
    matches!(c, '\u{FE0F}' | '\u{200D}' | '\u{1F3FB}'..='\u{1F3FF}')
}

/// Replaces each emoji with a whitespace-isolated ` :name: ` token.
///
/// Names come from the Unicode transliteration tables; glyphs joined by ZWJ
/// become one token with their names joined by `_`.
///
/// # Example
///
/// ```rust
/// use chatturns::parsing::translate_emoji;
///
/// assert_eq!(translate_emoji("no emoji here"), "no emoji here");
/// assert!(translate_emoji("hi 🦄").starts_with("hi  :"));
/// ```
pub fn translate_emoji(text: &str) -> String {
    EMOJI_RE
        .replace_all(text, |caps: &Captures<'_>| {
            let name = caps[0]
                .chars()
                .filter(|&c| !is_emoji_joiner(c))
                .map(emoji_name)
                .collect::<Vec<_>>()
                .join("_");
            format!(" :{name}: ")
        })
        .into_owned()
}

/// Replaces the exact-case `<Media omitted>` marker.
pub fn replace_media_omitted(text: &str) -> String {
    text.replace(MEDIA_OMITTED, MEDIA_OMITTED_TOKEN)
}

/// Turns every `\n` into `. ` so multi-line messages stay one field.
pub fn replace_newlines(text: &str) -> String {
    text.replace('\n', NEWLINE_REPLACEMENT)
}

/// Field normalizer bound to one contact book.
///
/// Holds the number → name index so mention lookups are constant time.
#[derive(Debug, Clone, Default)]
pub struct TextNormalizer {
    names_by_number: HashMap<String, String>,
}

impl TextNormalizer {
    /// Builds the mention index. When several names share a number the
    /// alphabetically first wins.
    pub fn new(contacts: &ContactBook) -> Self {
        let mut names_by_number = HashMap::with_capacity(contacts.len());
        for (name, number) in contacts.iter() {
            names_by_number
                .entry(number.to_string())
                .or_insert_with(|| name.to_string());
        }
        Self { names_by_number }
    }

    /// Replaces `@<number>` mentions with contact names.
    ///
    /// The whole digit run after `@` must equal a configured number. Bare
    /// digits without `@` are left alone, as are unknown numbers.
    ///
    /// ```rust
    /// use chatturns::config::ContactBook;
    /// use chatturns::parsing::TextNormalizer;
    ///
    /// # fn main() -> chatturns::Result<()> {
    /// let contacts = ContactBook::new().with_contact("tom", "1234")?;
    /// let normalizer = TextNormalizer::new(&contacts);
    ///
    /// assert_eq!(normalizer.replace_mentions("@1234 hi"), "tom hi");
    /// assert_eq!(normalizer.replace_mentions("1234 hi"), "1234 hi");
    /// # Ok(())
    /// # }
    /// ```
    pub fn replace_mentions(&self, text: &str) -> String {
        if self.names_by_number.is_empty() {
            return text.to_string();
        }

        MENTION_RE
            .replace_all(text, |caps: &Captures<'_>| {
                match self.names_by_number.get(&caps[1]) {
                    Some(name) => name.clone(),
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }

    /// Applies every per-field rule in order: prefix strip, media marker,
    /// newlines, mentions.
    pub fn normalize_field(&self, raw: &str, kind: FieldKind) -> String {
        let stripped = strip_fixed_prefix(raw, kind.prefix_len());
        let text = replace_media_omitted(stripped);
        let text = replace_newlines(&text);
        self.replace_mentions(&text)
    }
}
