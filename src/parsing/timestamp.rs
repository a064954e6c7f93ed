//! Header timestamp normalization.
//!
//! Exports print times like `22/01/25, 11:59 am`, but the space before the
//! meridiem may be an ordinary space, a no-break space (U+00A0), a narrow
//! no-break space (U+202F), or missing entirely. The normalizer folds all
//! whitespace runs to one ASCII space and then tries each configured chrono
//! format in order; the first one that parses wins.
//!
//! When nothing parses, [`TimestampNormalizer::normalize`] still returns a
//! value: the raw text split on its first comma. This keeps a parse total.
//! Callers that need real dates check [`Timestamp::is_calendar`].

use chrono::NaiveDateTime;
use chrono::format::{Item, StrftimeItems};

use crate::error::{ChatsiftError, Result};
use crate::message::Timestamp;

/// Formats tried when none are configured, in order.
///
/// `DD/MM/YY, H:MM am` first, then the variant with no space before the
/// meridiem.
pub const DEFAULT_DATE_FORMATS: &[&str] = &["%d/%m/%y, %I:%M %p", "%d/%m/%y, %I:%M%p"];

/// Converts captured header text into a [`Timestamp`].
///
/// # Example
///
/// ```rust
/// use chatsift::parsing::TimestampNormalizer;
///
/// let normalizer = TimestampNormalizer::default();
///
/// let ts = normalizer.normalize("22/01/25, 11:59\u{202F}am");
/// assert_eq!(ts.date(), "2025-01-22");
/// assert_eq!(ts.time(), "11:59:00");
///
/// // Not a real date: falls back to a raw split
/// let ts = normalizer.normalize("31/02/25, 10:00 am");
/// assert!(!ts.is_calendar());
/// assert_eq!(ts.date(), "31/02/25");
/// assert_eq!(ts.time(), "10:00 am");
/// ```
#[derive(Debug, Clone)]
pub struct TimestampNormalizer {
    formats: Vec<String>,
}

impl Default for TimestampNormalizer {
    fn default() -> Self {
        Self {
            formats: DEFAULT_DATE_FORMATS.iter().map(|f| (*f).to_string()).collect(),
        }
    }
}

impl TimestampNormalizer {
    /// Creates a normalizer from an ordered list of chrono format strings.
    ///
    /// Returns an error if the list is empty or any entry is not a valid
    /// chrono format.
    pub fn new<I, S>(formats: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let formats: Vec<String> = formats.into_iter().map(Into::into).collect();
        validate_formats(&formats)?;
        Ok(Self { formats })
    }

    /// Returns the configured formats in the order they are tried.
    pub fn formats(&self) -> &[String] {
        &self.formats
    }

    /// Tries every format in order and returns the first successful parse.
    pub fn try_normalize(&self, raw: &str) -> Option<NaiveDateTime> {
        let canonical = canonical_spacing(raw);
        self.formats
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(&canonical, format).ok())
    }

    /// Parses `raw`, falling back to [`fallback_split`] when no format matches.
    pub fn normalize(&self, raw: &str) -> Timestamp {
        match self.try_normalize(raw) {
            Some(dt) => Timestamp::Calendar(dt),
            None => fallback_split(raw),
        }
    }
}

/// Splits raw header text on its first comma.
///
/// The part before the comma is the date, verbatim; the part after it,
/// trimmed, is the time. Without a comma the whole text is the date and
/// the time is empty.
pub fn fallback_split(raw: &str) -> Timestamp {
    match raw.split_once(',') {
        Some((date, time)) => Timestamp::raw(date, time.trim()),
        None => Timestamp::raw(raw, ""),
    }
}

/// Checks that a list of chrono formats is usable.
pub(crate) fn validate_formats(formats: &[String]) -> Result<()> {
    if formats.is_empty() {
        return Err(ChatsiftError::invalid_config(
            "date_formats must contain at least one format",
        ));
    }

    for format in formats {
        if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
            return Err(ChatsiftError::invalid_config(format!(
                "'{format}' is not a valid date format"
            )));
        }
    }

    Ok(())
}

/// Folds every run of whitespace (including no-break variants) into one ASCII space.
fn canonical_spacing(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinary_space() {
        let ts = TimestampNormalizer::default().normalize("22/01/25, 11:59 am");
        assert_eq!(ts.date(), "2025-01-22");
        assert_eq!(ts.time(), "11:59:00");
    }

    #[test]
    fn test_narrow_no_break_space() {
        let normalizer = TimestampNormalizer::default();
        assert_eq!(
            normalizer.normalize("22/01/25, 11:59\u{202F}am"),
            normalizer.normalize("22/01/25, 11:59 am")
        );
    }

    #[test]
    fn test_no_break_space_and_no_space() {
        let normalizer = TimestampNormalizer::default();
        let expected = normalizer.normalize("22/01/25, 3:07 pm");
        assert_eq!(normalizer.normalize("22/01/25, 3:07\u{00A0}pm"), expected);
        assert_eq!(normalizer.normalize("22/01/25, 3:07pm"), expected);
        assert_eq!(expected.time(), "15:07:00");
    }

    #[test]
    fn test_meridiem_case_insensitive() {
        let normalizer = TimestampNormalizer::default();
        assert_eq!(normalizer.normalize("22/01/25, 11:59 PM").time(), "23:59:00");
        assert_eq!(normalizer.normalize("22/01/25, 12:01 AM").time(), "00:01:00");
    }

    #[test]
    fn test_single_digit_hour() {
        let ts = TimestampNormalizer::default().normalize("05/03/24, 9:04 am");
        assert_eq!(ts.date(), "2024-03-05");
        assert_eq!(ts.time(), "09:04:00");
    }

    #[test]
    fn test_invalid_calendar_date_falls_back() {
        let ts = TimestampNormalizer::default().normalize("31/02/25, 10:00 am");
        assert_eq!(ts, Timestamp::raw("31/02/25", "10:00 am"));
    }

    #[test]
    fn test_fallback_keeps_time_text_verbatim() {
        let ts = fallback_split("99/99/99, 11:59\u{202F}am");
        assert_eq!(ts, Timestamp::raw("99/99/99", "11:59\u{202F}am"));
    }

    #[test]
    fn test_fallback_without_comma() {
        assert_eq!(fallback_split("yesterday"), Timestamp::raw("yesterday", ""));
    }

    #[test]
    fn test_format_order_matters() {
        // A 24-hour format listed first wins over the default meridiem formats.
        let normalizer =
            TimestampNormalizer::new(["%d/%m/%y, %H:%M", "%d/%m/%y, %I:%M %p"]).unwrap();
        assert_eq!(normalizer.normalize("22/01/25, 18:30").time(), "18:30:00");
        assert_eq!(normalizer.normalize("22/01/25, 6:30 pm").time(), "18:30:00");
    }

    #[test]
    fn test_custom_formats_rejects_empty() {
        let err = TimestampNormalizer::new(Vec::<String>::new()).unwrap_err();
        assert!(err.is_invalid_config());
    }

    #[test]
    fn test_custom_formats_rejects_invalid() {
        let err = TimestampNormalizer::new(["%d/%m/%y, %Q"]).unwrap_err();
        assert!(err.to_string().contains("%Q"));
    }
}
