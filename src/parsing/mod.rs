//! Low-level parsing stages.
//!
//! - [`scanner`] splits a transcript into raw header records and unmatched lines
//! - [`timestamp`] turns captured header text into a [`Timestamp`](crate::Timestamp)
//!
//! [`TranscriptParser`](crate::parser::TranscriptParser) drives both stages;
//! they are public for callers that want the raw records.

pub mod scanner;
pub mod timestamp;

pub use scanner::{LineKind, RawRecord, RecordScanner, UnmatchedLine, scan};
pub use timestamp::{DEFAULT_DATE_FORMATS, TimestampNormalizer, fallback_split};
