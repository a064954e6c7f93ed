//! JSON Lines (JSONL) output writer.
//!
//! One message object per line, same keys as the JSON writer. Handy for
//! line-oriented tools and for appending several chats into one file.

use std::fs::File;
use std::io::{BufWriter, Write};

use crate::Message;
use crate::error::Result;

/// Converts messages to JSONL.
pub fn to_jsonl(messages: &[Message]) -> Result<String> {
    let mut out = String::new();
    for msg in messages {
        out.push_str(&serde_json::to_string(msg)?);
        out.push('\n');
    }
    Ok(out)
}

/// Writes messages to a JSONL file.
pub fn write_jsonl(messages: &[Message], output_path: &str) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);

    for msg in messages {
        serde_json::to_writer(&mut writer, msg)?;
        writer.write_all(b"\n")?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Timestamp;
    use std::io::{BufRead, BufReader};
    use tempfile::NamedTempFile;

    fn sample() -> Vec<Message> {
        vec![
            Message::new(Timestamp::from_parts("2025-01-22", "11:59:00"), "Alice", "Hello"),
            Message::new(Timestamp::from_parts("2025-01-22", "12:00:00"), "Bob", "Hi"),
        ]
    }

    #[test]
    fn test_to_jsonl_one_object_per_line() {
        let jsonl = to_jsonl(&sample()).unwrap();
        let lines: Vec<&str> = jsonl.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(!jsonl.contains('['));

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["sender"], "Alice");
        assert_eq!(first["time"], "11:59:00");
    }

    #[test]
    fn test_write_jsonl_file() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();

        write_jsonl(&sample(), path).unwrap();

        let file = std::fs::File::open(path).unwrap();
        let parsed: Vec<Message> = BufReader::new(file)
            .lines()
            .map(|l| serde_json::from_str(&l.unwrap()).unwrap())
            .collect();
        assert_eq!(parsed, sample());
    }
}
