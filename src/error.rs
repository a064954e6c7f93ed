//! Unified error types for chatsift.
//!
//! This module provides a single [`ChatsiftError`] enum that covers every
//! error a caller can see. Malformed transcript data never shows up here:
//! bad lines are skipped, bad timestamps fall back to a raw split, and
//! placeholder bodies are filtered. What remains is I/O, encoding,
//! configuration, and the two "nothing to do" conditions.
//!
//! # Error Handling Philosophy
//!
//! - **Library users** get typed errors they can match on
//! - **Application users** get clear, actionable error messages
//! - **Parsing degrades gracefully**: a single bad line never aborts a parse

use std::io;
use std::time::Duration;

use thiserror::Error;

/// A specialized [`Result`] type for chatsift operations.
///
/// # Example
///
/// ```rust
/// use chatsift::error::Result;
/// use chatsift::Message;
///
/// fn my_function() -> Result<Vec<Message>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatsiftError>;

/// The error type for all chatsift operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatsiftError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The transcript file doesn't exist
    /// - Permission denied
    /// - An output target cannot be written
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The transcript is not valid UTF-8.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// The transcript is empty or contains only whitespace.
    #[error("Transcript is empty")]
    EmptyInput,

    /// Parsing finished but no header line matched.
    ///
    /// Distinct from [`EmptyInput`](ChatsiftError::EmptyInput): the file had
    /// content, it just did not look like a chat export.
    #[error(
        "No messages recognized ({count} header lines matched, {unmatched_lines} lines unmatched). \
         Expected lines like 'DD/MM/YY, H:MM am - Sender: Message'"
    )]
    NoMessagesRecognized {
        /// Number of header lines matched (always 0)
        count: usize,
        /// Number of non-blank lines that could not be attached to a message
        unmatched_lines: usize,
    },

    /// A header timestamp could not be parsed and the strict timestamp policy is active.
    #[error("Malformed timestamp '{raw}' on line {line}")]
    MalformedTimestamp {
        /// 1-based line number of the header
        line: usize,
        /// The raw date/time text as captured from the header
        raw: String,
    },

    /// A configuration value is unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// An output format name or extension was not recognized.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The kind of format that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration file is not valid TOML for [`Config`](crate::config::Config).
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Failure of a single enrichment call.
///
/// Enrichment errors are isolated per message. The parser logs them and
/// emits the message without annotations; they are never returned from a
/// parse.
#[derive(Debug, Error)]
pub enum EnrichError {
    /// The enricher reported a failure.
    #[error("enrichment failed: {0}")]
    Failed(String),

    /// The enricher did not answer within the allotted time.
    #[error("enrichment timed out after {0:?}")]
    TimedOut(Duration),
}

impl EnrichError {
    /// Creates a generic enrichment failure.
    pub fn failed(message: impl Into<String>) -> Self {
        EnrichError::Failed(message.into())
    }
}

impl From<std::string::FromUtf8Error> for ChatsiftError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ChatsiftError::Utf8 {
            context: "transcript".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatsiftError {
    /// Creates a "no messages recognized" error.
    pub fn no_messages(unmatched_lines: usize) -> Self {
        ChatsiftError::NoMessagesRecognized {
            count: 0,
            unmatched_lines,
        }
    }

    /// Creates a malformed timestamp error.
    pub fn malformed_timestamp(line: usize, raw: impl Into<String>) -> Self {
        ChatsiftError::MalformedTimestamp {
            line,
            raw: raw.into(),
        }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        ChatsiftError::InvalidConfig(message.into())
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ChatsiftError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatsiftError::Io(_))
    }

    /// Returns `true` if the transcript was empty.
    pub fn is_empty_input(&self) -> bool {
        matches!(self, ChatsiftError::EmptyInput)
    }

    /// Returns `true` if no header line was recognized.
    pub fn is_no_messages(&self) -> bool {
        matches!(self, ChatsiftError::NoMessagesRecognized { .. })
    }

    /// Returns `true` if this is a configuration error.
    pub fn is_invalid_config(&self) -> bool {
        matches!(self, ChatsiftError::InvalidConfig(_))
    }

    /// Returns `true` for the conditions that mean "nothing to output"
    /// rather than something going wrong.
    pub fn is_nothing_to_do(&self) -> bool {
        self.is_empty_input() || self.is_no_messages()
    }
}

// ============================================================================
// Tests
// ============================================================================
