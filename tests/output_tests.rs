//! Output writer tests: JSON, CSV and JSONL rendered from one parse.

use std::fs;

use chatsift::prelude::*;
use tempfile::tempdir;

const TRANSCRIPT: &str = "\
22/01/25, 11:59 am - Иван Петров: Привет, как дела?
22/01/25, 12:00 pm - Alice: Apples, pears; and \"quoted\" fruit
22/01/25, 12:01 pm - Bob: Meeting at 10:00: confirmed";

fn messages() -> Vec<Message> {
    TranscriptParser::new()
        .parse_str(TRANSCRIPT)
        .unwrap()
        .into_messages()
        .unwrap()
}

fn read_csv(content: &str, delimiter: u8) -> Vec<Vec<String>> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .from_reader(content.as_bytes())
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect()
}

// =========================================================================
// CSV
// =========================================================================

#[test]
fn test_csv_comma_body_round_trips() {
    let messages = messages();
    let csv = to_csv(&messages, &OutputConfig::new()).unwrap();

    assert!(csv.contains("\"Apples, pears; and \"\"quoted\"\" fruit\""));

    let rows = read_csv(&csv, b',');
    assert_eq!(rows[0], vec!["Date", "Time", "Sender", "Body"]);
    assert_eq!(rows.len(), messages.len() + 1);
    for (row, msg) in rows[1..].iter().zip(&messages) {
        assert_eq!(row[2], msg.sender());
        assert_eq!(row[3], msg.body());
    }
}

#[test]
fn test_csv_configured_columns_and_delimiter() {
    let config = OutputConfig::new()
        .with_columns([Column::Timestamp, Column::Body])
        .with_delimiter(';');
    let csv = to_csv(&messages(), &config).unwrap();

    let rows = read_csv(&csv, b';');
    assert_eq!(rows[0], vec!["Timestamp", "Body"]);
    assert_eq!(rows[1][0], "2025-01-22 11:59:00");
    assert_eq!(rows[2][1], "Apples, pears; and \"quoted\" fruit");
}

#[test]
fn test_csv_annotations_column() {
    let messages = TranscriptParser::new()
        .with_enricher(std::sync::Arc::new(KeywordEnricher::new(2)))
        .parse_str(TRANSCRIPT)
        .unwrap()
        .messages;
    let config = OutputConfig::new().with_annotations();
    let rows = read_csv(&to_csv(&messages, &config).unwrap(), b',');

    assert_eq!(rows[0].last().unwrap(), "Annotations");
    assert_eq!(rows[3][4], "meeting, confirmed");
}

#[test]
fn test_csv_rejects_non_ascii_delimiter() {
    let config = OutputConfig::new().with_delimiter('→');
    assert!(to_csv(&messages(), &config).unwrap_err().is_invalid_config());
}

// =========================================================================
// JSON
// =========================================================================

#[test]
fn test_json_keeps_unicode_literal() {
    let json = to_json(&messages(), &OutputConfig::new()).unwrap();
    assert!(json.contains("Иван Петров"));
    assert!(json.contains("Привет, как дела?"));
    assert!(!json.contains("\\u"));
}

#[test]
fn test_json_key_order_and_absent_annotations() {
    let json = to_json(&messages()[..1], &OutputConfig::new().with_pretty_json(false)).unwrap();
    assert_eq!(
        json,
        r#"[{"date":"2025-01-22","time":"11:59:00","sender":"Иван Петров","body":"Привет, как дела?"}]"#
    );
}

#[test]
fn test_json_round_trips_to_messages() {
    let messages = messages();
    let json = to_json(&messages, &OutputConfig::new()).unwrap();
    let parsed: Vec<Message> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, messages);
}

// =========================================================================
// Files
// =========================================================================

#[test]
fn test_every_format_written_from_one_parse() {
    let dir = tempdir().unwrap();
    let messages = messages();
    let config = OutputConfig::new();

    for format in OutputFormat::all() {
        let path = dir.path().join(format!("chat_output.{}", format.extension()));
        write_to_format(&messages, path.to_str().unwrap(), *format, &config).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        let rendered = to_format_string(&messages, *format, &config).unwrap();
        assert_eq!(written.trim_end(), rendered.trim_end());
    }
}

#[test]
fn test_failed_target_does_not_block_others() {
    let dir = tempdir().unwrap();
    let messages = messages();
    let config = OutputConfig::new();

    let bad = dir.path().join("missing/dir/chat_output.json");
    let good = dir.path().join("chat_output.csv");

    let err = write_to_format(&messages, bad.to_str().unwrap(), OutputFormat::Json, &config)
        .unwrap_err();
    assert!(err.is_io());

    write_to_format(&messages, good.to_str().unwrap(), OutputFormat::Csv, &config).unwrap();
    assert!(fs::read_to_string(&good).unwrap().starts_with("Date,Time,Sender,Body"));
}

#[test]
fn test_transcript_renderer_reparses() {
    let messages = messages();
    let text = to_transcript(&messages);
    let reparsed = TranscriptParser::new().parse_str(&text).unwrap().messages;
    assert_eq!(reparsed, messages);
}
