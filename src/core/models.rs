//! Output configuration models.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Message;
use crate::error::{ChatsiftError, Result};

/// Separator used when annotations are flattened into one CSV cell.
pub const ANNOTATION_SEPARATOR: &str = ", ";

/// A CSV column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    /// `YYYY-MM-DD`
    Date,
    /// `HH:MM:SS`
    Time,
    /// `YYYY-MM-DD HH:MM:SS`
    Timestamp,
    /// Sender name or number
    Sender,
    /// Message text
    #[serde(alias = "message")]
    Body,
    /// Enricher output joined with `", "`
    #[serde(alias = "keywords")]
    Annotations,
}

impl Column {
    /// Header cell text.
    pub fn header(self) -> &'static str {
        match self {
            Column::Date => "Date",
            Column::Time => "Time",
            Column::Timestamp => "Timestamp",
            Column::Sender => "Sender",
            Column::Body => "Body",
            Column::Annotations => "Annotations",
        }
    }

    /// Cell value for `msg`.
    pub fn value<'a>(self, msg: &'a Message) -> Cow<'a, str> {
        match self {
            Column::Date => Cow::Owned(msg.date()),
            Column::Time => Cow::Owned(msg.time()),
            Column::Timestamp => Cow::Owned(msg.timestamp.to_string()),
            Column::Sender => Cow::Borrowed(&msg.sender),
            Column::Body => Cow::Borrowed(&msg.body),
            Column::Annotations => msg
                .annotations()
                .map(|a| Cow::Owned(a.join(ANNOTATION_SEPARATOR)))
                .unwrap_or(Cow::Borrowed("")),
        }
    }

    /// Returns all column names accepted by [`FromStr`], including aliases.
    pub fn all_names() -> &'static [&'static str] {
        &[
            "date",
            "time",
            "timestamp",
            "sender",
            "body",
            "message",
            "annotations",
            "keywords",
        ]
    }

    /// Default CSV columns: date, time, sender, body.
    pub fn defaults() -> Vec<Column> {
        vec![Column::Date, Column::Time, Column::Sender, Column::Body]
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

impl FromStr for Column {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "date" => Ok(Column::Date),
            "time" => Ok(Column::Time),
            "timestamp" => Ok(Column::Timestamp),
            "sender" => Ok(Column::Sender),
            "body" | "message" => Ok(Column::Body),
            "annotations" | "keywords" => Ok(Column::Annotations),
            _ => Err(format!(
                "Unknown column: '{}'. Expected one of: {}",
                s,
                Column::all_names().join(", ")
            )),
        }
    }
}

/// Configuration for output writers.
///
/// # Example
///
/// ```rust
/// use chatsift::core::models::{Column, OutputConfig};
///
/// let config = OutputConfig::new()
///     .with_columns([Column::Timestamp, Column::Sender, Column::Body])
///     .with_delimiter(';');
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// CSV columns, in order (default: date, time, sender, body)
    pub csv_columns: Vec<Column>,

    /// CSV field delimiter, must be ASCII (default: `,`)
    pub csv_delimiter: char,

    /// Indent JSON output (default: true)
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_columns: Column::defaults(),
            csv_delimiter: ',',
            pretty_json: true,
        }
    }
}

impl OutputConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the CSV column list.
    #[must_use]
    pub fn with_columns(mut self, columns: impl IntoIterator<Item = Column>) -> Self {
        self.csv_columns = columns.into_iter().collect();
        self
    }

    /// Appends the annotations column if it is not already present.
    #[must_use]
    pub fn with_annotations(mut self) -> Self {
        if !self.csv_columns.contains(&Column::Annotations) {
            self.csv_columns.push(Column::Annotations);
        }
        self
    }

    /// Sets the CSV delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.csv_delimiter = delimiter;
        self
    }

    /// Enables or disables pretty JSON.
    #[must_use]
    pub fn with_pretty_json(mut self, pretty: bool) -> Self {
        self.pretty_json = pretty;
        self
    }

    /// The delimiter as a byte, as the CSV writer needs it.
    pub fn delimiter_byte(&self) -> Result<u8> {
        match u8::try_from(self.csv_delimiter) {
            Ok(byte) if byte.is_ascii() && !matches!(byte, b'"' | b'\n' | b'\r') => Ok(byte),
            _ => Err(ChatsiftError::invalid_config(format!(
                "CSV delimiter {:?} must be a single ASCII character other than a quote or newline",
                self.csv_delimiter
            ))),
        }
    }

    /// Checks that the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        if self.csv_columns.is_empty() {
            return Err(ChatsiftError::invalid_config(
                "csv_columns must contain at least one column",
            ));
        }
        self.delimiter_byte()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Timestamp;

    #[test]
    fn test_column_from_str() {
        assert_eq!("date".parse::<Column>().unwrap(), Column::Date);
        assert_eq!("Message".parse::<Column>().unwrap(), Column::Body);
        assert_eq!(" keywords ".parse::<Column>().unwrap(), Column::Annotations);
        assert!("reply_to".parse::<Column>().is_err());
    }

    #[test]
    fn test_column_values() {
        let msg = Message::new(Timestamp::from_parts("2025-01-22", "11:59:00"), "Alice", "Hi")
            .with_annotations(vec!["greeting".into(), "positive".into()]);

        assert_eq!(Column::Date.value(&msg), "2025-01-22");
        assert_eq!(Column::Time.value(&msg), "11:59:00");
        assert_eq!(Column::Timestamp.value(&msg), "2025-01-22 11:59:00");
        assert_eq!(Column::Sender.value(&msg), "Alice");
        assert_eq!(Column::Body.value(&msg), "Hi");
        assert_eq!(Column::Annotations.value(&msg), "greeting, positive");
    }

    #[test]
    fn test_annotations_column_empty_without_enricher() {
        let msg = Message::new(Timestamp::raw("31/02/25", "10:00 am"), "Bob", "Hi");
        assert_eq!(Column::Annotations.value(&msg), "");
    }

    #[test]
    fn test_output_config_defaults() {
        let config = OutputConfig::default();
        assert_eq!(config.csv_columns, Column::defaults());
        assert_eq!(config.delimiter_byte().unwrap(), b',');
        assert!(config.pretty_json);
    }

    #[test]
    fn test_with_annotations_is_idempotent() {
        let config = OutputConfig::new().with_annotations().with_annotations();
        assert_eq!(config.csv_columns.len(), 5);
        assert_eq!(config.csv_columns.last(), Some(&Column::Annotations));
    }

    #[test]
    fn test_invalid_delimiters() {
        assert!(OutputConfig::new().with_delimiter('→').validate().is_err());
        assert!(OutputConfig::new().with_delimiter('"').validate().is_err());
        assert!(OutputConfig::new().with_delimiter('\t').validate().is_ok());
    }

    #[test]
    fn test_empty_columns_invalid() {
        let config = OutputConfig::new().with_columns([]);
        assert!(config.validate().unwrap_err().is_invalid_config());
    }
}
