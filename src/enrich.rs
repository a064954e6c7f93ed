//! Pluggable message enrichment.
//!
//! An [`Enricher`] derives annotation strings (keywords, a sentiment label,
//! topic tags) from a finished message body. The parser calls it at most
//! once per message, in input order, and attaches the result verbatim.
//!
//! Enrichment never fails a parse. An `Err`, a panic, or a timeout inside
//! the enricher leaves that message's `annotations` as `None` and is
//! counted in [`ParseReport::enrichment_failures`](crate::parser::ParseReport).
//!
//! Closures work as enrichers:
//!
//! ```rust
//! use std::sync::Arc;
//! use chatsift::enrich::Enricher;
//! use chatsift::error::EnrichError;
//! use chatsift::parser::TranscriptParser;
//!
//! let shouting: Arc<dyn Enricher> = Arc::new(|body: &str| -> Result<Vec<String>, EnrichError> {
//!     Ok(if body.chars().any(char::is_lowercase) { vec![] } else { vec!["shouting".into()] })
//! });
//!
//! let parser = TranscriptParser::new().with_enricher(shouting);
//! let messages = parser.parse_str("22/01/25, 11:59 am - Bob: WHERE ARE YOU")?.messages;
//! assert_eq!(messages[0].annotations(), Some(&["shouting".to_string()][..]));
//! # Ok::<(), chatsift::ChatsiftError>(())
//! ```

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use crate::error::EnrichError;

/// Derives annotations from a message body.
///
/// Implementations must not rely on being called for every message (the
/// parser skips dropped placeholders) and must be safe to share between
/// threads.
pub trait Enricher: Send + Sync {
    /// Short name used in log output.
    fn name(&self) -> &str {
        "enricher"
    }

    /// Returns annotations for `body`.
    fn enrich(&self, body: &str) -> Result<Vec<String>, EnrichError>;
}

impl<F> Enricher for F
where
    F: Fn(&str) -> Result<Vec<String>, EnrichError> + Send + Sync,
{
    fn enrich(&self, body: &str) -> Result<Vec<String>, EnrichError> {
        self(body)
    }
}

/// Bounds each call of an inner enricher by a timeout.
///
/// Every call runs on its own worker thread. When the deadline passes the
/// call is abandoned and [`EnrichError::TimedOut`] is returned; the worker
/// finishes in the background and its result is discarded.
pub struct TimeoutEnricher {
    inner: Arc<dyn Enricher>,
    timeout: Duration,
}

impl TimeoutEnricher {
    /// Wraps `inner` with a per-call `timeout`.
    pub fn new(inner: Arc<dyn Enricher>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    /// Returns the per-call timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Enricher for TimeoutEnricher {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn enrich(&self, body: &str) -> Result<Vec<String>, EnrichError> {
        let (tx, rx) = mpsc::channel();
        let inner = Arc::clone(&self.inner);
        let body = body.to_owned();

        thread::Builder::new()
            .name("chatsift-enrich".into())
            .spawn(move || {
                // The receiver is gone if the call already timed out.
                let _ = tx.send(inner.enrich(&body));
            })
            .map_err(|e| EnrichError::failed(format!("could not start enrichment thread: {e}")))?;

        match rx.recv_timeout(self.timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => Err(EnrichError::TimedOut(self.timeout)),
            Err(RecvTimeoutError::Disconnected) => {
                Err(EnrichError::failed("enrichment thread stopped without a result"))
            }
        }
    }
}

/// Words too common to be useful keywords.
const STOPWORDS: &[&str] = &[
    "a", "about", "after", "all", "also", "am", "an", "and", "any", "are", "as", "at", "be",
    "been", "before", "but", "by", "can", "could", "did", "do", "does", "for", "from", "had",
    "has", "have", "he", "her", "him", "his", "how", "i", "if", "in", "into", "is", "it", "its",
    "just", "me", "my", "no", "not", "of", "ok", "on", "or", "our", "she", "so", "that", "the",
    "their", "them", "then", "there", "they", "this", "to", "too", "up", "us", "was", "we",
    "were", "what", "when", "where", "which", "who", "will", "with", "would", "you", "your",
];

/// Frequency-based keyword extraction.
///
/// The body is lowercased and stripped of punctuation; stop-words and
/// tokens shorter than `min_len` characters are ignored. Keywords are
/// ranked by frequency, ties broken by first occurrence.
///
/// ```rust
/// use chatsift::enrich::{Enricher, KeywordEnricher};
///
/// let keywords = KeywordEnricher::new(3)
///     .enrich("Unable to edit the report. The report is locked!")
///     .unwrap();
/// assert_eq!(keywords, vec!["report", "unable", "edit"]);
/// ```
#[derive(Debug, Clone)]
pub struct KeywordEnricher {
    max_keywords: usize,
    min_len: usize,
}

impl Default for KeywordEnricher {
    fn default() -> Self {
        Self::new(15)
    }
}

impl KeywordEnricher {
    /// Creates an extractor returning at most `max_keywords` keywords.
    pub fn new(max_keywords: usize) -> Self {
        Self {
            max_keywords,
            min_len: 3,
        }
    }

    /// Sets the minimum keyword length in characters (default: 3).
    #[must_use]
    pub fn with_min_len(mut self, min_len: usize) -> Self {
        self.min_len = min_len;
        self
    }

    fn keywords(&self, body: &str) -> Vec<String> {
        let cleaned: String = body
            .to_lowercase()
            .chars()
            .map(|c| if c.is_alphanumeric() || c.is_whitespace() { c } else { ' ' })
            .collect();

        // word -> (count, first position)
        let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
        for (position, word) in cleaned.split_whitespace().enumerate() {
            if word.chars().count() < self.min_len || STOPWORDS.contains(&word) {
                continue;
            }
            counts.entry(word).or_insert((0, position)).0 += 1;
        }

        let mut ranked: Vec<(&str, (usize, usize))> = counts.into_iter().collect();
        ranked.sort_by(|(_, (ca, pa)), (_, (cb, pb))| cb.cmp(ca).then(pa.cmp(pb)));

        ranked
            .into_iter()
            .take(self.max_keywords)
            .map(|(word, _)| word.to_string())
            .collect()
    }
}

impl Enricher for KeywordEnricher {
    fn name(&self) -> &str {
        "keywords"
    }

    fn enrich(&self, body: &str) -> Result<Vec<String>, EnrichError> {
        Ok(self.keywords(body))
    }
}
