//! Unified error types for chatturns.
//!
//! Parsing a transcript never fails: malformed timestamps fall back to a
//! sentinel, ambiguous author boundaries are resolved by policy, and an empty
//! transcript yields no events. The variants here cover the surfaces that can
//! genuinely fail, namely configuration and serialized output.

use std::io;

use thiserror::Error;

/// A specialized [`Result`] type for chatturns operations.
///
/// # Example
///
/// ```rust
/// use chatturns::error::Result;
/// use chatturns::ChatEvent;
///
/// fn my_function() -> Result<Vec<ChatEvent>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatturnsError>;

/// The error type for all chatturns operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatturnsError {
    /// An I/O error occurred while writing output.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A contact number is not a plain decimal digit string.
    ///
    /// Mentions in exports look like `@447700900123`, so only ASCII digits
    /// can ever match.
    #[error("Invalid contact number '{number}' for '{name}'. Expected decimal digits only")]
    InvalidContact {
        /// Display name the number was configured for
        name: String,
        /// The rejected number
        number: String,
    },

    /// The grouping threshold is negative.
    #[error("Invalid grouping threshold: {seconds}s (must not be negative)")]
    InvalidThreshold {
        /// The rejected threshold in seconds
        seconds: i64,
    },

    /// A deserialized system notice carries an author.
    #[error("Event {ordinal} is a system notice but has author '{author}'")]
    NoticeWithAuthor {
        /// Ordinal of the rejected event
        ordinal: usize,
        /// The author that should have been empty
        author: String,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl From<std::string::FromUtf8Error> for ChatturnsError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ChatturnsError::Utf8 {
            context: "output conversion".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatturnsError {
    /// Creates an invalid contact error.
    pub fn invalid_contact(name: impl Into<String>, number: impl Into<String>) -> Self {
        ChatturnsError::InvalidContact {
            name: name.into(),
            number: number.into(),
        }
    }

    /// Creates an invalid threshold error.
    pub fn invalid_threshold(seconds: i64) -> Self {
        ChatturnsError::InvalidThreshold { seconds }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatturnsError::Io(_))
    }

    /// Returns `true` if this is a configuration error.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            ChatturnsError::InvalidContact { .. } | ChatturnsError::InvalidThreshold { .. }
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_contact_display() {
        let err = ChatturnsError::invalid_contact("tom", "12a4");
        let msg = err.to_string();
        assert!(msg.contains("12a4"));
        assert!(msg.contains("tom"));
        assert!(err.is_config());
        assert!(!err.is_io());
    }

    #[test]
    fn test_invalid_threshold_display() {
        let err = ChatturnsError::invalid_threshold(-5);
        assert_eq!(
            err.to_string(),
            "Invalid grouping threshold: -5s (must not be negative)"
        );
        assert!(err.is_config());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed");
        let err: ChatturnsError = io_err.into();
        assert!(err.is_io());
        assert!(err.to_string().contains("pipe closed"));
    }

    #[test]
    fn test_utf8_error_conversion() {
        let bad = String::from_utf8(vec![0xff, 0xfe]).unwrap_err();
        let err: ChatturnsError = bad.into();
        assert!(matches!(err, ChatturnsError::Utf8 { .. }));
        assert!(err.to_string().contains("output conversion"));
    }
}
