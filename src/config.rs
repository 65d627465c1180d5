//! Configuration types for transcript parsing.
//!
//! Configuration is plain data: it is built with `with_*` methods, passed by
//! value into [`TranscriptParser`](crate::parser::TranscriptParser) and never
//! shared between parser instances. Loading it from disk is left to the
//! caller; everything here implements `Serialize`/`Deserialize`.
//!
//! # Example
//!
//! ```rust
//! use chatturns::config::{ContactBook, TranscriptConfig};
//!
//! # fn main() -> chatturns::Result<()> {
//! let contacts = ContactBook::new()
//!     .with_contact("tom", "1234")?
//!     .with_contact("caroline", 5678_u64)?;
//!
//! let config = TranscriptConfig::new()
//!     .with_contacts(contacts)
//!     .with_group_threshold_secs(120)?;
//!
//! assert_eq!(config.contacts.len(), 2);
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;
use std::fmt;

use chrono::Duration;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ChatturnsError, Result};

/// Default time window for joining same-author messages into one turn.
pub const DEFAULT_GROUP_THRESHOLD_SECS: i64 = 60;

/// Converts a threshold in seconds, rejecting negative values and values
/// chrono cannot represent.
fn threshold_from_secs(seconds: i64) -> Result<Duration> {
    if seconds < 0 {
        return Err(ChatturnsError::invalid_threshold(seconds));
    }
    Duration::try_seconds(seconds).ok_or_else(|| ChatturnsError::invalid_threshold(seconds))
}

fn deserialize_threshold_secs<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let seconds = i64::deserialize(deserializer)?;
    threshold_from_secs(seconds).map_err(serde::de::Error::custom)?;
    Ok(seconds)
}

/// A phone number as it may appear in a contact file.
///
/// Contact lists come from hand-written JSON or spreadsheets, so numbers show
/// up both as strings and as integers. Either form compares by its decimal
/// string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContactNumber {
    Integer(u64),
    Text(String),
}

impl ContactNumber {
    /// Returns the decimal string form used for mention matching.
    pub fn to_decimal(&self) -> String {
        match self {
            ContactNumber::Integer(n) => n.to_string(),
            ContactNumber::Text(s) => s.clone(),
        }
    }
}

impl fmt::Display for ContactNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_decimal())
    }
}

impl From<&str> for ContactNumber {
    fn from(s: &str) -> Self {
        ContactNumber::Text(s.to_string())
    }
}

impl From<String> for ContactNumber {
    fn from(s: String) -> Self {
        ContactNumber::Text(s)
    }
}

impl From<u64> for ContactNumber {
    fn from(n: u64) -> Self {
        ContactNumber::Integer(n)
    }
}

impl From<u32> for ContactNumber {
    fn from(n: u32) -> Self {
        ContactNumber::Integer(u64::from(n))
    }
}

/// Mapping from display name to phone number, used to rewrite `@<number>`
/// mentions. Numbers are stored in decimal string form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, ContactNumber>", into = "BTreeMap<String, String>")]
pub struct ContactBook {
    by_name: BTreeMap<String, String>,
}

impl ContactBook {
    /// Creates an empty contact book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a contact, validating that the number is made of digits only.
    pub fn insert(&mut self, name: impl Into<String>, number: impl Into<ContactNumber>) -> Result<()> {
        let name = name.into();
        let number = number.into().to_decimal();

        if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ChatturnsError::invalid_contact(name, number));
        }

        self.by_name.insert(name, number);
        Ok(())
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_contact(
        mut self,
        name: impl Into<String>,
        number: impl Into<ContactNumber>,
    ) -> Result<Self> {
        self.insert(name, number)?;
        Ok(self)
    }

    /// Returns the number configured for a name.
    pub fn number(&self, name: &str) -> Option<&str> {
        self.by_name.get(name).map(String::as_str)
    }

    /// Iterates over `(name, number)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.by_name.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

impl TryFrom<BTreeMap<String, ContactNumber>> for ContactBook {
    type Error = ChatturnsError;

    fn try_from(raw: BTreeMap<String, ContactNumber>) -> Result<Self> {
        let mut book = ContactBook::new();
        for (name, number) in raw {
            book.insert(name, number)?;
        }
        Ok(book)
    }
}

impl From<ContactBook> for BTreeMap<String, String> {
    fn from(book: ContactBook) -> Self {
        book.by_name
    }
}

/// Configuration for transcript parsing and turn grouping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptConfig {
    /// Contacts used for `@<number>` mention substitution (default: empty)
    pub contacts: ContactBook,

    /// Replace emoji glyphs with ` :name: ` tokens (default: true)
    pub translate_emoji: bool,

    /// Maximum gap between same-author messages of one turn (default: 60s)
    #[serde(deserialize_with = "deserialize_threshold_secs")]
    pub group_threshold_secs: i64,
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            contacts: ContactBook::default(),
            translate_emoji: true,
            group_threshold_secs: DEFAULT_GROUP_THRESHOLD_SECS,
        }
    }
}

impl TranscriptConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the contact book for mention substitution.
    #[must_use]
    pub fn with_contacts(mut self, contacts: ContactBook) -> Self {
        self.contacts = contacts;
        self
    }

    /// Enables or disables emoji translation.
    #[must_use]
    pub fn with_translate_emoji(mut self, enabled: bool) -> Self {
        self.translate_emoji = enabled;
        self
    }

    /// Sets the grouping threshold in seconds.
    pub fn with_group_threshold_secs(mut self, seconds: i64) -> Result<Self> {
        threshold_from_secs(seconds)?;
        self.group_threshold_secs = seconds;
        Ok(self)
    }

    /// Returns the grouping threshold as a duration.
    ///
    /// Fails with [`ChatturnsError::InvalidThreshold`] if the field was set
    /// directly to a negative or unrepresentable value.
    pub fn group_threshold(&self) -> Result<Duration> {
        threshold_from_secs(self.group_threshold_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_config_default() {
        let config = TranscriptConfig::default();
        assert!(config.contacts.is_empty());
        assert!(config.translate_emoji);
        assert_eq!(config.group_threshold().unwrap(), Duration::minutes(1));
    }

    #[test]
    fn test_transcript_config_builder() {
        let config = TranscriptConfig::new()
            .with_translate_emoji(false)
            .with_group_threshold_secs(300)
            .unwrap();

        assert!(!config.translate_emoji);
        assert_eq!(config.group_threshold().unwrap(), Duration::minutes(5));
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let err = TranscriptConfig::new()
            .with_group_threshold_secs(-1)
            .unwrap_err();
        assert!(matches!(err, ChatturnsError::InvalidThreshold { seconds: -1 }));
    }

    #[test]
    fn test_unrepresentable_threshold_rejected() {
        let err = TranscriptConfig::new()
            .with_group_threshold_secs(i64::MAX)
            .unwrap_err();
        assert!(matches!(
            err,
            ChatturnsError::InvalidThreshold { seconds: i64::MAX }
        ));
    }

    #[test]
    fn test_threshold_deserialize_rejects_out_of_range() {
        let json = r#"{"group_threshold_secs": 9223372036854775807}"#;
        assert!(serde_json::from_str::<TranscriptConfig>(json).is_err());

        let json = r#"{"group_threshold_secs": -5}"#;
        assert!(serde_json::from_str::<TranscriptConfig>(json).is_err());
    }

    #[test]
    fn test_threshold_set_directly_is_checked() {
        let mut config = TranscriptConfig::new();
        config.group_threshold_secs = i64::MAX;
        assert!(config.group_threshold().unwrap_err().is_config());
    }

    #[test]
    fn test_contact_book_accepts_strings_and_integers() {
        let book = ContactBook::new()
            .with_contact("tom", "1234")
            .unwrap()
            .with_contact("caroline", 5678_u64)
            .unwrap();

        assert_eq!(book.number("tom"), Some("1234"));
        assert_eq!(book.number("caroline"), Some("5678"));
        assert_eq!(book.number("nobody"), None);
        assert_eq!(book.iter().count(), 2);
    }

    #[test]
    fn test_contact_book_rejects_non_digits() {
        assert!(ContactBook::new().with_contact("tom", "12-34").is_err());
        assert!(ContactBook::new().with_contact("tom", "").is_err());
        assert!(ContactBook::new().with_contact("tom", "+4412").is_err());
    }

    #[test]
    fn test_contact_book_deserializes_mixed_numbers() {
        let json = r#"{"tom": "1234", "caroline": 5678}"#;
        let book: ContactBook = serde_json::from_str(json).unwrap();
        assert_eq!(book.number("tom"), Some("1234"));
        assert_eq!(book.number("caroline"), Some("5678"));
    }

    #[test]
    fn test_contact_book_deserialize_rejects_bad_number() {
        let json = r#"{"tom": "not a number"}"#;
        assert!(serde_json::from_str::<ContactBook>(json).is_err());
    }

    #[test]
    fn test_transcript_config_deserializes_partial() {
        let json = r#"{"contacts": {"tom": 1234}}"#;
        let config: TranscriptConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.contacts.number("tom"), Some("1234"));
        assert!(config.translate_emoji);
        assert_eq!(config.group_threshold_secs, DEFAULT_GROUP_THRESHOLD_SECS);
    }
}
