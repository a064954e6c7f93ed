//! Output format writers.
//!
//! This module provides writers for different output formats:
//! - [`write_json`] / [`to_json`] - JSON array of messages - requires `json-output` feature
//! - [`write_csv`] / [`to_csv`] - CSV with configurable columns - requires `csv-output` feature
//! - [`write_jsonl`] / [`to_jsonl`] - JSON Lines - requires `json-output` feature
//! - [`to_transcript`] - back to the export text format
//!
//! All writers take the same in-memory `&[Message]`, so any number of
//! formats can be produced from one parse.
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatsift::Result<()> {
//! use chatsift::core::output::{write_csv, write_json, to_csv};
//! use chatsift::core::models::OutputConfig;
//! use chatsift::parser::TranscriptParser;
//!
//! let messages = TranscriptParser::new().parse("chat.txt".as_ref())?.into_messages()?;
//! let config = OutputConfig::new();
//!
//! write_json(&messages, "chat_output.json", &config)?;
//! write_csv(&messages, "chat_output.csv", &config)?;
//!
//! // Or get as strings
//! let csv_string = to_csv(&messages, &config)?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;
mod transcript_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv, write_csv_to};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};
pub use transcript_writer::to_transcript;
