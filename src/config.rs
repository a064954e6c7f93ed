//! Configuration types for parsing, enrichment and output.
//!
//! This module provides plain configuration structs for library usage,
//! without any CLI framework dependencies:
//!
//! - [`ParserConfig`] - placeholder filtering, accepted date formats, timestamp strictness
//! - [`EnrichSettings`] - settings for the built-in keyword enricher
//! - [`Config`] - all sections together, loadable from a TOML file
//!
//! Output settings live in [`OutputConfig`](crate::core::models::OutputConfig).
//!
//! # Example
//!
//! ```rust
//! use chatsift::config::{ParserConfig, PlaceholderPolicy, TimestampPolicy};
//! use chatsift::parser::TranscriptParser;
//!
//! let config = ParserConfig::new()
//!     .with_placeholder_policy(PlaceholderPolicy::Keep)
//!     .with_timestamp_policy(TimestampPolicy::Skip);
//!
//! let parser = TranscriptParser::with_config(config);
//! ```

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::models::OutputConfig;
use crate::enrich::{Enricher, KeywordEnricher, TimeoutEnricher};
use crate::error::{ChatsiftError, Result};
use crate::parsing::timestamp::{DEFAULT_DATE_FORMATS, validate_formats};

/// Body text WhatsApp writes in place of an attachment.
pub const MEDIA_OMITTED: &str = "<Media omitted>";

/// Body text WhatsApp writes in place of a deleted message.
pub const MESSAGE_DELETED: &str = "This message was deleted";

/// What to do with messages whose body is a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceholderPolicy {
    /// Leave placeholder messages out of the output (default).
    #[default]
    Drop,
    /// Keep placeholder messages unmodified.
    Keep,
}

/// What to do when a header timestamp matches none of the date formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum TimestampPolicy {
    /// Keep the message with a raw date/time split (default).
    #[default]
    Fallback,
    /// Drop the message.
    Skip,
    /// Fail the parse with [`ChatsiftError::MalformedTimestamp`].
    Reject,
}

/// Configuration for transcript parsing.
///
/// # Example
///
/// ```rust
/// use chatsift::config::ParserConfig;
///
/// let config = ParserConfig::new()
///     .with_date_formats(["%d/%m/%y, %I:%M %p"])
///     .with_placeholder("<attached: image>");
///
/// assert!(config.is_placeholder("<attached: image>"));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Drop or keep placeholder messages (default: drop)
    pub placeholder_policy: PlaceholderPolicy,

    /// Bodies treated as placeholders, matched exactly after trimming
    /// (default: `<Media omitted>`, `This message was deleted`)
    pub placeholders: Vec<String>,

    /// Chrono formats tried in order on the header date/time text
    pub date_formats: Vec<String>,

    /// Handling of headers whose timestamp parses with no format (default: fallback)
    pub timestamp_policy: TimestampPolicy,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            placeholder_policy: PlaceholderPolicy::Drop,
            placeholders: vec![MEDIA_OMITTED.to_string(), MESSAGE_DELETED.to_string()],
            date_formats: DEFAULT_DATE_FORMATS.iter().map(|f| (*f).to_string()).collect(),
            timestamp_policy: TimestampPolicy::Fallback,
        }
    }
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the placeholder policy.
    #[must_use]
    pub fn with_placeholder_policy(mut self, policy: PlaceholderPolicy) -> Self {
        self.placeholder_policy = policy;
        self
    }

    /// Shorthand for keeping (`true`) or dropping (`false`) placeholders.
    #[must_use]
    pub fn with_keep_placeholders(self, keep: bool) -> Self {
        self.with_placeholder_policy(if keep {
            PlaceholderPolicy::Keep
        } else {
            PlaceholderPolicy::Drop
        })
    }

    /// Adds a placeholder body.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholders.push(placeholder.into());
        self
    }

    /// Replaces the ordered list of accepted date formats.
    #[must_use]
    pub fn with_date_formats<I, S>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.date_formats = formats.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the timestamp policy.
    #[must_use]
    pub fn with_timestamp_policy(mut self, policy: TimestampPolicy) -> Self {
        self.timestamp_policy = policy;
        self
    }

    /// Returns `true` if `body` (trimmed) is one of the placeholder strings.
    pub fn is_placeholder(&self, body: &str) -> bool {
        let body = body.trim();
        self.placeholders.iter().any(|p| p == body)
    }

    /// Checks that the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        validate_formats(&self.date_formats)
    }
}

/// Settings for the built-in [`KeywordEnricher`](crate::enrich::KeywordEnricher).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichSettings {
    /// Annotate messages with keywords (default: false)
    pub keywords: bool,

    /// Maximum keywords per message (default: 15)
    pub max_keywords: usize,

    /// Per-message time limit in milliseconds (default: none)
    pub timeout_ms: Option<u64>,
}

impl Default for EnrichSettings {
    fn default() -> Self {
        Self {
            keywords: false,
            max_keywords: 15,
            timeout_ms: None,
        }
    }
}

impl EnrichSettings {
    /// Builds the configured enricher, or `None` when enrichment is off.
    pub fn build(&self) -> Option<Arc<dyn Enricher>> {
        if !self.keywords {
            return None;
        }
        let keywords: Arc<dyn Enricher> = Arc::new(KeywordEnricher::new(self.max_keywords));
        Some(match self.timeout_ms {
            Some(ms) => Arc::new(TimeoutEnricher::new(keywords, Duration::from_millis(ms))),
            None => keywords,
        })
    }
}

/// Complete configuration, as read from a TOML file.
///
/// Every section and every field is optional.
///
/// ```toml
/// [parser]
/// placeholder_policy = "keep"
/// timestamp_policy = "skip"
///
/// [output]
/// csv_columns = ["date", "time", "sender", "body", "annotations"]
/// csv_delimiter = ";"
///
/// [enrich]
/// keywords = true
/// max_keywords = 5
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Parsing options
    pub parser: ParserConfig,

    /// Output options
    pub output: OutputConfig,

    /// Enrichment options
    pub enrich: EnrichSettings,
}

impl Config {
    /// Parses a configuration from TOML text and validates it.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ChatsiftError::invalid_config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Validates every section.
    pub fn validate(&self) -> Result<()> {
        self.parser.validate()?;
        self.output.validate()?;
        if self.enrich.keywords && self.enrich.max_keywords == 0 {
            return Err(ChatsiftError::invalid_config(
                "enrich.max_keywords must be at least 1",
            ));
        }
        Ok(())
    }
}
