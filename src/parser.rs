//! Transcript parser.
//!
//! [`TranscriptParser`] turns a WhatsApp TXT export into an ordered list of
//! [`Message`]s. It drives the [`RecordScanner`], normalizes each header
//! timestamp, applies the placeholder policy and, when configured, calls an
//! [`Enricher`] once per surviving message.
//!
//! Malformed data never fails a parse. Unmatched lines are reported in the
//! [`ParseReport`], unparseable timestamps follow the configured
//! [`TimestampPolicy`], and enrichment failures leave annotations absent.
//!
//! # Example
//!
//! ```rust
//! use chatsift::parser::{ParseStatus, TranscriptParser};
//!
//! let text = "22/01/25, 11:59 am - Alice: Meeting at 10:00: confirmed\n\
//!             22/01/25, 12:00 pm - Bob: <Media omitted>\n\
//!             22/01/25, 12:01 pm - Bob: see you";
//!
//! let outcome = TranscriptParser::new().parse_str(text)?;
//!
//! assert_eq!(outcome.status(), ParseStatus::Parsed { count: 2 });
//! assert_eq!(outcome.report.placeholders_dropped, 1);
//! assert_eq!(outcome.messages[0].body(), "Meeting at 10:00: confirmed");
//! # Ok::<(), chatsift::ChatsiftError>(())
//! ```

use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use crate::Message;
use crate::config::{ParserConfig, PlaceholderPolicy, TimestampPolicy};
use crate::enrich::Enricher;
use crate::error::{ChatsiftError, EnrichError, Result};
use crate::message::Timestamp;
use crate::parsing::scanner::{RawRecord, RecordScanner, UnmatchedLine};
use crate::parsing::timestamp::{TimestampNormalizer, fallback_split};

/// Overall result of a parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ParseStatus {
    /// At least one header matched. `count` is the number of emitted messages,
    /// which may be zero if every record was filtered out.
    Parsed {
        /// Emitted messages
        count: usize,
    },
    /// The input was empty or whitespace-only.
    EmptyInput,
    /// The input had content but no header line matched.
    NoMessagesRecognized,
}

/// Counters and diagnostics collected during a parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseReport {
    /// Header lines recognized, before any filtering.
    pub headers_matched: usize,
    /// Records dropped because the body was a placeholder.
    pub placeholders_dropped: usize,
    /// Messages whose timestamp fell back to the raw split.
    pub fallback_timestamps: usize,
    /// Records dropped because the timestamp did not parse under [`TimestampPolicy::Skip`].
    pub skipped_timestamps: usize,
    /// Messages whose enrichment failed, timed out or panicked.
    pub enrichment_failures: usize,
    /// Non-blank lines not attached to any message, in input order.
    pub unmatched: Vec<UnmatchedLine>,
}

/// Messages plus the report of how they were obtained.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseOutcome {
    /// Messages in input order.
    pub messages: Vec<Message>,
    /// Statistics and diagnostics.
    pub report: ParseReport,
    #[serde(skip)]
    empty_input: bool,
}

impl ParseOutcome {
    fn empty() -> Self {
        Self {
            messages: Vec::new(),
            report: ParseReport::default(),
            empty_input: true,
        }
    }

    /// Classifies the outcome.
    pub fn status(&self) -> ParseStatus {
        if self.empty_input {
            ParseStatus::EmptyInput
        } else if self.report.headers_matched == 0 {
            ParseStatus::NoMessagesRecognized
        } else {
            ParseStatus::Parsed {
                count: self.messages.len(),
            }
        }
    }

    /// Returns the messages, turning the "nothing to do" statuses into errors.
    ///
    /// # Errors
    ///
    /// [`ChatsiftError::EmptyInput`] or [`ChatsiftError::NoMessagesRecognized`].
    pub fn into_messages(self) -> Result<Vec<Message>> {
        match self.status() {
            ParseStatus::EmptyInput => Err(ChatsiftError::EmptyInput),
            ParseStatus::NoMessagesRecognized => {
                Err(ChatsiftError::no_messages(self.report.unmatched.len()))
            }
            ParseStatus::Parsed { .. } => Ok(self.messages),
        }
    }
}

/// Parser for WhatsApp TXT exports.
///
/// A parser holds only configuration and is reusable: every call to
/// [`parse`](Self::parse) or [`parse_str`](Self::parse_str) is independent.
#[derive(Clone, Default)]
pub struct TranscriptParser {
    config: ParserConfig,
    enricher: Option<Arc<dyn Enricher>>,
}

impl std::fmt::Debug for TranscriptParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranscriptParser")
            .field("config", &self.config)
            .field("enricher", &self.enricher.as_ref().map(|e| e.name().to_string()))
            .finish()
    }
}

impl TranscriptParser {
    /// Creates a parser with default configuration and no enricher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            config,
            enricher: None,
        }
    }

    /// Attaches an enricher, called once per emitted message.
    #[must_use]
    pub fn with_enricher(mut self, enricher: Arc<dyn Enricher>) -> Self {
        self.enricher = Some(enricher);
        self
    }

    /// Returns the parser configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Reads and parses a transcript file.
    ///
    /// # Errors
    ///
    /// I/O errors, non-UTF-8 content, and everything [`parse_str`](Self::parse_str) returns.
    pub fn parse(&self, path: &Path) -> Result<ParseOutcome> {
        let bytes = fs::read(path)?;
        let text = String::from_utf8(bytes).map_err(|source| ChatsiftError::Utf8 {
            context: path.display().to_string(),
            source,
        })?;
        self.parse_str(&text)
    }

    /// Parses transcript text held in memory.
    ///
    /// # Errors
    ///
    /// [`ChatsiftError::InvalidConfig`] for an unusable configuration and
    /// [`ChatsiftError::MalformedTimestamp`] under [`TimestampPolicy::Reject`].
    pub fn parse_str(&self, text: &str) -> Result<ParseOutcome> {
        self.config.validate()?;
        let normalizer = TimestampNormalizer::new(self.config.date_formats.iter().cloned())?;

        let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
        if text.trim().is_empty() {
            tracing::debug!("Transcript is empty");
            return Ok(ParseOutcome::empty());
        }

        let mut report = ParseReport::default();
        let mut messages = Vec::new();
        let mut scanner = RecordScanner::new(text);

        for record in scanner.by_ref() {
            report.headers_matched += 1;

            let Some(timestamp) = self.resolve_timestamp(&normalizer, &record, &mut report)? else {
                continue;
            };

            if self.config.is_placeholder(&record.body)
                && self.config.placeholder_policy == PlaceholderPolicy::Drop
            {
                report.placeholders_dropped += 1;
                continue;
            }

            let mut message = Message::new(timestamp, record.sender, record.body);
            if let Some(enricher) = &self.enricher {
                match run_enricher(enricher.as_ref(), message.body()) {
                    Ok(annotations) => message = message.with_annotations(annotations),
                    Err(e) => {
                        report.enrichment_failures += 1;
                        tracing::warn!(
                            line = record.line_number,
                            enricher = enricher.name(),
                            "Enrichment skipped: {e}"
                        );
                    }
                }
            }
            messages.push(message);
        }

        report.unmatched = scanner.into_unmatched();
        tracing::debug!(
            headers = report.headers_matched,
            emitted = messages.len(),
            unmatched = report.unmatched.len(),
            "Parse finished"
        );

        Ok(ParseOutcome {
            messages,
            report,
            empty_input: false,
        })
    }

    /// Applies the timestamp policy. `Ok(None)` means the record is skipped.
    fn resolve_timestamp(
        &self,
        normalizer: &TimestampNormalizer,
        record: &RawRecord<'_>,
        report: &mut ParseReport,
    ) -> Result<Option<Timestamp>> {
        if let Some(datetime) = normalizer.try_normalize(record.timestamp) {
            return Ok(Some(Timestamp::Calendar(datetime)));
        }

        match self.config.timestamp_policy {
            TimestampPolicy::Fallback => {
                report.fallback_timestamps += 1;
                tracing::warn!(
                    line = record.line_number,
                    "Unparseable timestamp '{}', keeping raw value",
                    record.timestamp
                );
                Ok(Some(fallback_split(record.timestamp)))
            }
            TimestampPolicy::Skip => {
                report.skipped_timestamps += 1;
                tracing::warn!(
                    line = record.line_number,
                    "Unparseable timestamp '{}', skipping message",
                    record.timestamp
                );
                Ok(None)
            }
            TimestampPolicy::Reject => Err(ChatsiftError::malformed_timestamp(
                record.line_number,
                record.timestamp,
            )),
        }
    }
}

/// Calls the enricher, turning a panic into an ordinary failure.
fn run_enricher(enricher: &dyn Enricher, body: &str) -> std::result::Result<Vec<String>, EnrichError> {
    panic::catch_unwind(AssertUnwindSafe(|| enricher.enrich(body)))
        .unwrap_or_else(|_| Err(EnrichError::failed("enricher panicked")))
}
