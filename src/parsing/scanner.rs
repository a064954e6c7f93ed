//! Line scanner for WhatsApp TXT exports.
//!
//! Classifies each physical line of a transcript:
//!
//! - **Header**: `DD/MM/YY, H:MM am - Sender: body` starts a new record.
//! - **System notice**: a header prefix with no `Sender:` part, such as
//!   `22/01/25, 11:59 am - You created group "Trip"`. It closes the open
//!   record and is reported, but never becomes a record.
//! - **Continuation**: anything else is appended to the open record's body.
//! - **Orphan**: a continuation with no open record. Reported, then dropped.
//!
//! [`RecordScanner`] is a lazy iterator; unmatched lines are collected on
//! the side and can be read with [`RecordScanner::unmatched`] or taken with
//! [`RecordScanner::into_unmatched`] once iteration finishes.

use std::iter::Enumerate;
use std::str::Lines;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Date, time and meridiem, with any kind of spacing before `am`/`pm`.
const HEADER_PREFIX: &str = r"(?P<timestamp>\d{2}/\d{2}/\d{2},\s*\d{1,2}:\d{2}\s*(?i:[ap]m))\s*-\s";

/// Header line: the sender ends at the first colon, the body may contain more.
static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^{HEADER_PREFIX}(?P<sender>[^:]*):(?P<body>.*)$"))
        .expect("header pattern is valid")
});

/// Header prefix without a sender colon.
static NOTICE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^{HEADER_PREFIX}[^:]*$")).expect("notice pattern is valid")
});

/// One header line plus everything attached to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord<'a> {
    /// 1-based line number of the header.
    pub line_number: usize,
    /// Raw date/time text, e.g. `22/01/25, 11:59 am`.
    pub timestamp: &'a str,
    /// Trimmed sender field. May be empty.
    pub sender: &'a str,
    /// Trimmed body with continuation lines joined by single spaces. May be empty.
    pub body: String,
}

impl RawRecord<'_> {
    fn push_fragment(&mut self, fragment: &str) {
        if !self.body.is_empty() {
            self.body.push(' ');
        }
        self.body.push_str(fragment);
    }
}

/// Why a line was not attached to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    /// Continuation text with no open record.
    Orphan,
    /// Dated line with no sender (group events, encryption notice).
    SystemNotice,
}

/// A non-blank line that did not become part of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnmatchedLine {
    /// 1-based line number.
    pub line_number: usize,
    /// The line text, trimmed.
    pub text: String,
    /// Classification.
    pub kind: LineKind,
}

/// Lazy iterator of [`RawRecord`]s over a transcript.
///
/// # Example
///
/// ```rust
/// use chatsift::parsing::RecordScanner;
///
/// let text = "note before\n\
///             22/01/25, 11:59 am - Alice: Meeting at 10:00: confirmed\n\
///             see you\n\
///             22/01/25, 12:00 pm - Bob: ok";
///
/// let mut scanner = RecordScanner::new(text);
/// let records: Vec<_> = scanner.by_ref().collect();
///
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[0].sender, "Alice");
/// assert_eq!(records[0].body, "Meeting at 10:00: confirmed see you");
/// assert_eq!(scanner.unmatched().len(), 1);
/// ```
pub struct RecordScanner<'a> {
    lines: Enumerate<Lines<'a>>,
    pending: Option<RawRecord<'a>>,
    unmatched: Vec<UnmatchedLine>,
}

impl<'a> RecordScanner<'a> {
    /// Creates a scanner over `text`. A leading byte-order mark is skipped.
    pub fn new(text: &'a str) -> Self {
        let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
        Self {
            lines: text.lines().enumerate(),
            pending: None,
            unmatched: Vec::new(),
        }
    }

    /// Lines seen so far that were not attached to any record.
    pub fn unmatched(&self) -> &[UnmatchedLine] {
        &self.unmatched
    }

    /// Consumes the scanner and returns the unmatched lines.
    pub fn into_unmatched(self) -> Vec<UnmatchedLine> {
        self.unmatched
    }

    fn report(&mut self, line_number: usize, line: &str, kind: LineKind) {
        tracing::debug!(line = line_number, ?kind, "Unmatched line: {}", line.trim());
        self.unmatched.push(UnmatchedLine {
            line_number,
            text: line.trim().to_string(),
            kind,
        });
    }
}

impl<'a> Iterator for RecordScanner<'a> {
    type Item = RawRecord<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((index, line)) = self.lines.next() {
            let line_number = index + 1;

            if let Some(caps) = HEADER_RE.captures(line) {
                let record = RawRecord {
                    line_number,
                    timestamp: caps.name("timestamp").map_or("", |m| m.as_str()),
                    sender: caps.name("sender").map_or("", |m| m.as_str().trim()),
                    body: caps
                        .name("body")
                        .map_or("", |m| m.as_str().trim())
                        .to_string(),
                };
                if let Some(done) = self.pending.replace(record) {
                    return Some(done);
                }
                continue;
            }

            if NOTICE_RE.is_match(line) {
                self.report(line_number, line, LineKind::SystemNotice);
                if let Some(done) = self.pending.take() {
                    return Some(done);
                }
                continue;
            }

            let fragment = line.trim();
            if fragment.is_empty() {
                continue;
            }

            match self.pending.as_mut() {
                Some(record) => record.push_fragment(fragment),
                None => self.report(line_number, line, LineKind::Orphan),
            }
        }

        self.pending.take()
    }
}

/// Scans a whole transcript eagerly.
///
/// Returns the records in input order and the unmatched lines.
pub fn scan(text: &str) -> (Vec<RawRecord<'_>>, Vec<UnmatchedLine>) {
    let mut scanner = RecordScanner::new(text);
    let records: Vec<_> = scanner.by_ref().collect();
    (records, scanner.into_unmatched())
}
