//! Command-line interface definition using clap.
//!
//! [`Args`] is the parsed command line. Flags override values loaded from
//! `--config`, which in turn override the built-in defaults; see
//! [`Args::apply_to`].

use std::path::PathBuf;

use clap::Parser;

use crate::config::{Config, TimestampPolicy};
use crate::core::models::Column;
use crate::format::OutputFormat;

/// Default output file stem, extended with each format's extension.
pub const DEFAULT_OUTPUT_STEM: &str = "chat_output";

/// Convert a WhatsApp chat export into structured JSON and CSV.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatsift")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatsift chat.txt
    chatsift chat.txt -o out/team -f json,csv,jsonl
    chatsift chat.txt --columns timestamp,sender,body --delimiter ';'
    chatsift chat.txt --keywords --max-keywords 5
    chatsift chat.txt --timestamp-policy reject --keep-placeholders")]
pub struct Args {
    /// Path to the exported chat (.txt)
    pub input: PathBuf,

    /// Output path without extension; one file per format is written
    #[arg(short, long, default_value = DEFAULT_OUTPUT_STEM, value_name = "STEM")]
    pub output: String,

    /// Output formats, comma separated
    #[arg(short, long, value_enum, value_delimiter = ',', default_values = ["json", "csv"])]
    pub format: Vec<OutputFormat>,

    /// CSV columns, comma separated (date, time, timestamp, sender, body, annotations)
    #[arg(long, value_delimiter = ',', value_name = "COLUMNS")]
    pub columns: Option<Vec<Column>>,

    /// CSV field delimiter
    #[arg(long, value_name = "CHAR")]
    pub delimiter: Option<char>,

    /// Write JSON on a single line
    #[arg(long)]
    pub compact_json: bool,

    /// Keep "<Media omitted>" and deleted-message placeholders
    #[arg(long)]
    pub keep_placeholders: bool,

    /// What to do with headers whose timestamp cannot be parsed
    #[arg(long, value_enum, value_name = "POLICY")]
    pub timestamp_policy: Option<TimestampPolicy>,

    /// Annotate every message with extracted keywords
    #[arg(short, long)]
    pub keywords: bool,

    /// Maximum keywords per message
    #[arg(long, value_name = "N")]
    pub max_keywords: Option<usize>,

    /// Abandon enrichment of a message after this many milliseconds
    #[arg(long, value_name = "MS")]
    pub enrich_timeout_ms: Option<u64>,

    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log debug details (unmatched lines, fallbacks) to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Overlays command-line flags on a loaded configuration.
    ///
    /// Boolean flags only ever switch a feature on; a `false` flag leaves
    /// the file's value alone.
    pub fn apply_to(&self, config: &mut Config) {
        if self.keep_placeholders {
            config.parser = config.parser.clone().with_keep_placeholders(true);
        }
        if let Some(policy) = self.timestamp_policy {
            config.parser.timestamp_policy = policy;
        }

        if let Some(columns) = &self.columns {
            config.output.csv_columns.clone_from(columns);
        }
        if let Some(delimiter) = self.delimiter {
            config.output.csv_delimiter = delimiter;
        }
        if self.compact_json {
            config.output.pretty_json = false;
        }

        if self.keywords {
            config.enrich.keywords = true;
        }
        if let Some(max) = self.max_keywords {
            config.enrich.max_keywords = max;
        }
        if self.enrich_timeout_ms.is_some() {
            config.enrich.timeout_ms = self.enrich_timeout_ms;
        }
        // Keywords are only visible in CSV with their own column.
        if config.enrich.keywords && self.columns.is_none() {
            config.output = config.output.clone().with_annotations();
        }
    }

    /// Output formats with duplicates removed, in the order given.
    pub fn formats(&self) -> Vec<OutputFormat> {
        let mut formats = Vec::with_capacity(self.format.len());
        for format in &self.format {
            if !formats.contains(format) {
                formats.push(*format);
            }
        }
        formats
    }

    /// Output file path for `format`.
    pub fn output_path(&self, format: OutputFormat) -> String {
        format!("{}.{}", self.output, format.extension())
    }
}
