//! Output side of chatsift.
//!
//! This module contains:
//! - [`models`] - Output configuration and CSV columns
//! - [`output`] - Format writers (JSON, CSV, JSONL, transcript)
//!
//! # Quick Start
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() {
//! use chatsift::core::{Column, OutputConfig, to_csv, to_json, write_csv, write_json};
//! # }
//! ```

pub mod models;
pub mod output;

// Re-export main types for convenience
pub use models::{Column, OutputConfig};

// Conditionally re-export output writers
#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl, write_json, write_jsonl};

pub use output::to_transcript;
