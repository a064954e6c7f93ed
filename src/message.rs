//! Message record produced by the transcript parser.
//!
//! This module provides [`Message`], one recognized chat message, and
//! [`Timestamp`], the header time as printed in the export.
//!
//! # Overview
//!
//! A message consists of:
//! - **Always**: `timestamp`, `sender` and `body`
//! - **Optional**: `annotations`, present only when an enricher ran successfully
//!
//! # Examples
//!
//! ```
//! use chatsift::{Message, Timestamp};
//! use chrono::NaiveDate;
//!
//! let at = NaiveDate::from_ymd_opt(2025, 1, 22)
//!     .unwrap()
//!     .and_hms_opt(11, 59, 0)
//!     .unwrap();
//! let msg = Message::new(Timestamp::Calendar(at), "Alice", "Hello, world!");
//!
//! assert_eq!(msg.date(), "2025-01-22");
//! assert_eq!(msg.time(), "11:59:00");
//! assert_eq!(msg.to_transcript_line(), "22/01/25, 11:59 am - Alice: Hello, world!");
//! ```
//!
//! ## Serialization
//!
//! The timestamp is flattened into `date` and `time` keys, so the JSON key
//! order is `date, time, sender, body, annotations`:
//!
//! ```
//! use chatsift::{Message, Timestamp};
//!
//! let msg = Message::new(Timestamp::raw("31/02/25", "10:00 am"), "Bob", "Hi");
//! let json = serde_json::to_string(&msg)?;
//! assert_eq!(
//!     json,
//!     r#"{"date":"31/02/25","time":"10:00 am","sender":"Bob","body":"Hi"}"#
//! );
//!
//! let parsed: Message = serde_json::from_str(&json)?;
//! assert_eq!(parsed, msg);
//! # Ok::<(), serde_json::Error>(())
//! ```

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Canonical date format used in output.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Canonical time format used in output.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Header format used when rendering a message back into export form.
const TRANSCRIPT_HEADER_FORMAT: &str = "%d/%m/%y, %-I:%M %P";

/// Header time of a message.
///
/// Exports print local wall-clock time with no zone, so this is a
/// [`NaiveDateTime`] rather than an instant. When none of the configured
/// formats can parse the header, the raw date and time text is kept as-is
/// in [`Timestamp::Raw`]; use [`is_calendar`](Timestamp::is_calendar) to
/// tell the two apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Timestamp {
    /// A valid calendar date and time (seconds are always `00`).
    Calendar(NaiveDateTime),
    /// Best-effort split of an unparseable header on its first comma.
    Raw {
        /// Text before the first comma, verbatim
        date: String,
        /// Text after the first comma, trimmed
        time: String,
    },
}

impl Timestamp {
    /// Creates a raw (fallback) timestamp.
    pub fn raw(date: impl Into<String>, time: impl Into<String>) -> Self {
        Timestamp::Raw {
            date: date.into(),
            time: time.into(),
        }
    }

    /// Returns `true` if this is a real calendar value.
    pub fn is_calendar(&self) -> bool {
        matches!(self, Timestamp::Calendar(_))
    }

    /// Returns the calendar value, if any.
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Timestamp::Calendar(dt) => Some(*dt),
            Timestamp::Raw { .. } => None,
        }
    }

    /// Date as `YYYY-MM-DD`, or the raw date text for fallback values.
    pub fn date(&self) -> String {
        match self {
            Timestamp::Calendar(dt) => dt.format(DATE_FORMAT).to_string(),
            Timestamp::Raw { date, .. } => date.clone(),
        }
    }

    /// Time as `HH:MM:SS`, or the raw time text for fallback values.
    pub fn time(&self) -> String {
        match self {
            Timestamp::Calendar(dt) => dt.format(TIME_FORMAT).to_string(),
            Timestamp::Raw { time, .. } => time.clone(),
        }
    }

    /// Rebuilds a timestamp from serialized `date` and `time` fields.
    ///
    /// Canonical values become [`Timestamp::Calendar`]; anything else is
    /// kept raw.
    pub fn from_parts(date: &str, time: &str) -> Self {
        match (
            NaiveDate::parse_from_str(date, DATE_FORMAT),
            NaiveTime::parse_from_str(time, TIME_FORMAT),
        ) {
            (Ok(d), Ok(t)) => Timestamp::Calendar(d.and_time(t)),
            _ => Timestamp::raw(date, time),
        }
    }
}

impl fmt::Display for Timestamp {
    /// Combined form: `YYYY-MM-DD HH:MM:SS`, or `date time` for raw values.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timestamp::Calendar(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            Timestamp::Raw { date, time } => write!(f, "{date} {time}"),
        }
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(dt: NaiveDateTime) -> Self {
        Timestamp::Calendar(dt)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Timestamp", 2)?;
        state.serialize_field("date", &self.date())?;
        state.serialize_field("time", &self.time())?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Parts {
            date: String,
            time: String,
        }

        let parts = Parts::deserialize(deserializer)?;
        Ok(Timestamp::from_parts(&parts.date, &parts.time))
    }
}

/// One recognized chat message.
///
/// Every `Message` corresponds to exactly one header line of the transcript.
/// `body` is trimmed and multi-line bodies are joined with single spaces.
///
/// # Fields
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `timestamp` | [`Timestamp`] | Header date and time, serialized as `date` + `time` |
/// | `sender` | `String` | Display name or phone number before the first colon |
/// | `body` | `String` | Message text |
/// | `annotations` | `Option<Vec<String>>` | Enricher output, absent without an enricher |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// When the message was sent, as printed in the export.
    #[serde(flatten)]
    pub timestamp: Timestamp,

    /// Display name or phone number of the author.
    pub sender: String,

    /// Message text.
    pub body: String,

    /// Annotations derived from the body by an [`Enricher`](crate::enrich::Enricher).
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub annotations: Option<Vec<String>>,
}

impl Message {
    /// Creates a message without annotations.
    pub fn new(timestamp: Timestamp, sender: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            timestamp,
            sender: sender.into(),
            body: body.into(),
            annotations: None,
        }
    }

    /// Builder method to attach annotations.
    #[must_use]
    pub fn with_annotations(mut self, annotations: Vec<String>) -> Self {
        self.annotations = Some(annotations);
        self
    }

    /// Returns the sender.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Returns the body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the annotations, if an enricher produced any.
    pub fn annotations(&self) -> Option<&[String]> {
        self.annotations.as_deref()
    }

    /// Date as `YYYY-MM-DD` (raw text for fallback timestamps).
    pub fn date(&self) -> String {
        self.timestamp.date()
    }

    /// Time as `HH:MM:SS` (raw text for fallback timestamps).
    pub fn time(&self) -> String {
        self.timestamp.time()
    }

    /// Renders this message as a single export line.
    ///
    /// Calendar timestamps print as `DD/MM/YY, H:MM am`; raw timestamps
    /// print their original text. Annotations are not part of the export
    /// format and are left out.
    pub fn to_transcript_line(&self) -> String {
        let header = match &self.timestamp {
            Timestamp::Calendar(dt) => dt.format(TRANSCRIPT_HEADER_FORMAT).to_string(),
            Timestamp::Raw { date, time } => format!("{date}, {time}"),
        };
        format!("{header} - {}: {}", self.sender, self.body)
    }
}
