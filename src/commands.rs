//! Inbound message classification.
//!
//! Every text message maps to exactly one [`Command`] in a single step:
//!
//! - the quiz trigger word (default `quiz`) starts a quiz
//! - `lyrics <title>`, `harmony <title>`, `bass <title>`, `basstab <title>`
//!   and `info <title>` look up that field
//! - anything else looks up the official video

use crate::catalog::SongField;

/// Parsed inbound text message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start a lyrics quiz.
    Quiz,
    /// Resolve `query` to a song and answer with `field`.
    Lookup { field: SongField, query: String },
}

/// Classify a text message. `trigger` is matched case-insensitively against
/// the whole trimmed message.
pub fn classify(text: &str, trigger: &str) -> Command {
    let trimmed = text.trim();

    if trimmed.eq_ignore_ascii_case(trigger.trim()) {
        return Command::Quiz;
    }

    if let Some((head, rest)) = trimmed.split_once(char::is_whitespace) {
        let rest = rest.trim();
        if let Some(field) = SongField::from_keyword(head) {
            if !rest.is_empty() {
                return Command::Lookup {
                    field,
                    query: rest.to_string(),
                };
            }
        }
    }

    Command::Lookup {
        field: SongField::Video,
        query: trimmed.to_string(),
    }
}
