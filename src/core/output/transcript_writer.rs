//! Export-format (TXT) renderer.
//!
//! Writes messages back in the `DD/MM/YY, H:MM am - Sender: body` shape
//! the parser reads. Annotations are dropped.

use crate::Message;

/// Renders messages as transcript lines joined by newlines.
///
/// ```rust
/// use chatsift::core::output::to_transcript;
/// use chatsift::parser::TranscriptParser;
///
/// let text = "22/01/25, 11:59 am - Alice: Hi\n22/01/25, 12:00 pm - Bob: Hello";
/// let messages = TranscriptParser::new().parse_str(text)?.messages;
///
/// assert_eq!(to_transcript(&messages), text);
/// # Ok::<(), chatsift::ChatsiftError>(())
/// ```
pub fn to_transcript(messages: &[Message]) -> String {
    messages
        .iter()
        .map(Message::to_transcript_line)
        .collect::<Vec<_>>()
        .join("\n")
}
