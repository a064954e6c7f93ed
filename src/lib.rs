//! # Chatsift
//!
//! A Rust library for turning WhatsApp "export chat" transcripts into
//! structured records, serialized as JSON, CSV or JSON Lines.
//!
//! ## Overview
//!
//! An export is a flat text file where each message starts with a header
//! such as `22/01/25, 11:59 am - Alice: Hello` and may continue over
//! several lines. Chatsift recovers the messages, normalizes their
//! timestamps, filters placeholder bodies like `<Media omitted>` and can
//! annotate each message through a pluggable [`Enricher`](enrich::Enricher).
//!
//! ## Quick Start
//!
//! ```rust
//! use chatsift::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let text = "22/01/25, 11:59 am - Alice: Meeting at 10:00: confirmed\n\
//!                 22/01/25, 12:00 pm - Bob: <Media omitted>\n\
//!                 22/01/25, 12:01\u{202F}pm - Bob: great,\n\
//!                 see you there";
//!
//!     let messages = TranscriptParser::new().parse_str(text)?.into_messages()?;
//!
//!     assert_eq!(messages.len(), 2);
//!     assert_eq!(messages[1].body(), "great, see you there");
//!     assert_eq!(messages[1].time(), "12:01:00");
//!
//!     let config = OutputConfig::new();
//!     let json = to_json(&messages, &config)?;
//!     let csv = to_csv(&messages, &config)?;
//!     assert!(csv.contains("\"great, see you there\""));
//!     # let _ = json;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - [`TranscriptParser`](parser::TranscriptParser), [`ParseOutcome`](parser::ParseOutcome), [`ParseReport`](parser::ParseReport)
//! - [`parsing`] - line scanner and timestamp normalizer
//! - [`message`] - [`Message`] and [`Timestamp`]
//! - [`enrich`] - [`Enricher`](enrich::Enricher) trait, keyword and timeout enrichers
//! - [`config`] - parser settings and TOML [`Config`](config::Config)
//! - [`core`] - output configuration and writers
//! - [`format`] - [`OutputFormat`](format::OutputFormat) dispatch
//! - [`error`] - [`ChatsiftError`] and [`Result`]
//! - `cli` - command-line arguments (feature `cli`)
//!
//! ## Feature Flags
//!
//! | Feature | Description | Default |
//! |---------|-------------|---------|
//! | `json-output` | JSON and JSONL writers (`serde_json`) | yes |
//! | `csv-output` | CSV writer (`csv`) | yes |
//! | `cli` | `chatsift` binary (`clap`, `tracing-subscriber`) | yes |
//! | `full` | All of the above | yes |

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod enrich;
pub mod error;
pub mod format;
pub mod message;
pub mod parser;
pub mod parsing;

// Re-export the main types at the crate root for convenience
pub use error::{ChatsiftError, Result};
pub use message::{Message, Timestamp};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatsift::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{Message, Timestamp};

    pub use crate::error::{ChatsiftError, EnrichError, Result};

    pub use crate::parser::{ParseOutcome, ParseReport, ParseStatus, TranscriptParser};

    pub use crate::config::{Config, ParserConfig, PlaceholderPolicy, TimestampPolicy};

    pub use crate::enrich::{Enricher, KeywordEnricher, TimeoutEnricher};

    pub use crate::core::models::{Column, OutputConfig};

    pub use crate::format::{OutputFormat, to_format_string, write_to_format};

    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};

    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, to_jsonl, write_json, write_jsonl};

    pub use crate::core::output::to_transcript;
}
