//! JSON output writer.

use std::fs::File;
use std::io::Write;

use crate::Message;
use crate::core::models::OutputConfig;
use crate::error::Result;

/// Converts messages to a JSON array.
///
/// # Format
/// ```json
/// [
///   {"date": "2025-01-22", "time": "11:59:00", "sender": "Alice", "body": "Hello"},
///   {"date": "2025-01-22", "time": "12:00:00", "sender": "Bob", "body": "Hi", "annotations": ["hi"]}
/// ]
/// ```
///
/// Keys always appear in this order. Non-ASCII text is written as-is,
/// not as `\u` escapes.
pub fn to_json(messages: &[Message], config: &OutputConfig) -> Result<String> {
    let json = if config.pretty_json {
        serde_json::to_string_pretty(messages)?
    } else {
        serde_json::to_string(messages)?
    };
    Ok(json)
}

/// Writes messages to a JSON file as an array.
pub fn write_json(messages: &[Message], output_path: &str, config: &OutputConfig) -> Result<()> {
    let json = to_json(messages, config)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    file.write_all(b"\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Timestamp;
    use tempfile::NamedTempFile;

    #[test]
    fn test_to_json_basic() {
        let messages = vec![
            Message::new(Timestamp::from_parts("2025-01-22", "11:59:00"), "Alice", "Hello"),
            Message::new(Timestamp::raw("31/02/25", "10:00 am"), "Bob", "Hi"),
        ];
        let json = to_json(&messages, &OutputConfig::new().with_pretty_json(false)).unwrap();

        assert_eq!(
            json,
            r#"[{"date":"2025-01-22","time":"11:59:00","sender":"Alice","body":"Hello"},{"date":"31/02/25","time":"10:00 am","sender":"Bob","body":"Hi"}]"#
        );
    }

    #[test]
    fn test_to_json_keeps_unicode_literal() {
        let messages = vec![Message::new(
            Timestamp::from_parts("2025-01-22", "11:59:00"),
            "Иван",
            "こんにちは 🎉",
        )];
        let json = to_json(&messages, &OutputConfig::new()).unwrap();

        assert!(json.contains("\"sender\": \"Иван\""));
        assert!(json.contains("こんにちは 🎉"));
        assert!(!json.contains("\\u"));
    }

    #[test]
    fn test_to_json_empty() {
        assert_eq!(to_json(&[], &OutputConfig::new()).unwrap(), "[]");
    }

    #[test]
    fn test_write_json_file() {
        let messages = vec![
            Message::new(Timestamp::from_parts("2025-01-22", "11:59:00"), "Alice", "Hello")
                .with_annotations(vec!["hello".into()]),
        ];
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();

        write_json(&messages, path, &OutputConfig::new()).unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        let parsed: Vec<Message> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, messages);
    }
}
