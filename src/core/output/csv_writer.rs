//! CSV output writer.

use std::fs::File;
use std::io::{BufWriter, Write};

use crate::Message;
use crate::core::models::OutputConfig;
use crate::error::{ChatsiftError, Result};

/// Writes messages as CSV to any writer.
///
/// # Format
/// - Delimiter: `OutputConfig::csv_delimiter` (default `,`)
/// - Columns: `OutputConfig::csv_columns`, header row first
/// - Quoting: only fields containing the delimiter, a quote, or a newline
/// - Encoding: UTF-8
pub fn write_csv_to<W: Write>(messages: &[Message], out: W, config: &OutputConfig) -> Result<()> {
    config.validate()?;

    let mut writer = csv::WriterBuilder::new()
        .delimiter(config.delimiter_byte()?)
        .from_writer(out);

    writer.write_record(config.csv_columns.iter().map(|c| c.header()))?;

    for msg in messages {
        let record = config.csv_columns.iter().map(|c| c.value(msg));
        writer.write_record(record.map(|cell| cell.into_owned()))?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes messages to a CSV file.
pub fn write_csv(messages: &[Message], output_path: &str, config: &OutputConfig) -> Result<()> {
    let file = File::create(output_path)?;
    let mut out = BufWriter::new(file);
    write_csv_to(messages, &mut out, config)?;
    out.flush()?;
    Ok(())
}

/// Converts messages to a CSV string.
///
/// Same format as [`write_csv`], returned in memory.
pub fn to_csv(messages: &[Message], config: &OutputConfig) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv_to(messages, &mut buffer, config)?;
    String::from_utf8(buffer).map_err(|source| ChatsiftError::Utf8 {
        context: "CSV output".to_string(),
        source,
    })
}
