//! Transport-neutral replies.
//!
//! A [`Reply`] is what the bot answers with. Chat transports map it onto
//! their own message types; [`Reply::to_text`] renders the plain-text form
//! used by the terminal front end.

use crate::catalog::{Song, SongField};
use crate::quiz::{QuizQuestion, QuizStep, QuizTurn};

/// Text shown when a query matches nothing.
pub const NOT_FOUND_TEXT: &str = "NOT FOUND:\nPlease try again with different words.";
/// Text shown when the matched song has no value for the field.
pub const NO_DATA_TEXT: &str = "NO DATA";
/// Heading above a candidate list.
pub const CANDIDATES_TEXT: &str = "candidate songs:";

const YOUTUBE_WATCH_URL: &str = "https://www.youtube.com/watch?v=";
const EXTERNAL_BROWSER_QUERY: &str = "?openExternalBrowser=1";
const ELLIPSIS: char = '…';

/// One tappable choice: `label` is shown, `text` is sent back as a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickOption {
    pub label: String,
    pub text: String,
}

/// Something the player can pick from the last reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    /// Re-submit this text as a new message.
    Text(String),
    /// Post a quiz session token, echoing the picked title.
    Selection { token: String, title: String },
}

/// Bot answer to one inbound event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    NotFound,
    Link {
        title: String,
        url: String,
    },
    Lyrics {
        title: String,
        album: Option<String>,
        year: Option<u16>,
        paragraphs: Vec<Vec<String>>,
    },
    NoData {
        title: String,
    },
    Candidates(Vec<QuickOption>),
    Quiz {
        turn: QuizTurn,
        /// Set when the posted token was unusable and a new session began.
        restarted: bool,
    },
}

impl Reply {
    /// Answer for `field` of a single resolved song.
    pub fn for_song(song: &Song, field: SongField) -> Reply {
        if field == SongField::Lyrics {
            if song.lyrics.trim().is_empty() {
                return Reply::NoData {
                    title: song.title.clone(),
                };
            }
            return Reply::Lyrics {
                title: song.title.clone(),
                album: song.album.clone(),
                year: song.year,
                paragraphs: song
                    .paragraphs()
                    .into_iter()
                    .map(|p| p.into_iter().map(str::to_string).collect())
                    .collect(),
            };
        }

        match song.link(field) {
            Some(raw) => Reply::Link {
                title: song.title.clone(),
                url: link_url(field, raw),
            },
            None => Reply::NoData {
                title: song.title.clone(),
            },
        }
    }

    /// Candidate list for an ambiguous query. Picking one re-submits the
    /// title with the same field keyword.
    pub fn candidates(titles: &[String], field: SongField, label_max_chars: usize) -> Reply {
        let prefix = field.prefix();
        Reply::Candidates(
            titles
                .iter()
                .map(|title| QuickOption {
                    label: label(title, label_max_chars),
                    text: format!("{}{}", prefix, title),
                })
                .collect(),
        )
    }

    /// Choices offered by this reply, in display order.
    pub fn choices(&self) -> Vec<Choice> {
        match self {
            Reply::Candidates(options) => options
                .iter()
                .map(|o| Choice::Text(o.text.clone()))
                .collect(),
            Reply::Quiz {
                turn:
                    QuizTurn {
                        step: QuizStep::Question(question),
                        ..
                    },
                ..
            } => question
                .options
                .iter()
                .map(|o| Choice::Selection {
                    token: o.token.clone(),
                    title: o.title.clone(),
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Plain-text rendering. Numbered lines match [`Reply::choices`].
    pub fn to_text(&self, label_max_chars: usize) -> String {
        match self {
            Reply::NotFound => NOT_FOUND_TEXT.to_string(),
            Reply::Link { url, .. } => url.clone(),
            Reply::NoData { .. } => NO_DATA_TEXT.to_string(),
            Reply::Lyrics {
                title,
                album,
                year,
                paragraphs,
            } => {
                let mut out = title.clone();
                match (album, year) {
                    (Some(album), Some(year)) => out.push_str(&format!("\n{} ({})", album, year)),
                    (Some(album), None) => out.push_str(&format!("\n{}", album)),
                    _ => {}
                }
                for paragraph in paragraphs {
                    out.push_str("\n\n");
                    out.push_str(&paragraph.join("\n"));
                }
                out
            }
            Reply::Candidates(options) => {
                let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
                format!("{}\n{}", CANDIDATES_TEXT, numbered(&labels))
            }
            Reply::Quiz { turn, .. } => quiz_text(turn, label_max_chars),
        }
    }
}

/// Shorten `title` to at most `max_chars` characters, marking the cut with `…`.
pub fn label(title: &str, max_chars: usize) -> String {
    if max_chars == 0 || title.chars().count() <= max_chars {
        return title.to_string();
    }
    let mut out: String = title.chars().take(max_chars - 1).collect();
    out.push(ELLIPSIS);
    out
}

/// Full URL for a stored link value.
pub fn link_url(field: SongField, raw: &str) -> String {
    match field {
        SongField::Video | SongField::Harmony | SongField::Bass => {
            format!("{}{}", YOUTUBE_WATCH_URL, raw)
        }
        SongField::BassTab => format!("{}{}", raw, EXTERNAL_BROWSER_QUERY),
        SongField::Info | SongField::Lyrics => raw.to_string(),
    }
}

fn quiz_text(turn: &QuizTurn, label_max_chars: usize) -> String {
    let mut sections = Vec::new();
    if let Some(reveal) = &turn.reveal {
        sections.push(format!("Answer : {}", reveal.answer));
    }
    match &turn.step {
        QuizStep::Question(question) => {
            sections.push(question_text(question, label_max_chars));
        }
        QuizStep::Finished(summary) => {
            sections.push(format!("SCORE : {} / {}", summary.score, summary.total));
            if summary.is_perfect() {
                sections.push("PERFECT!!".to_string());
            }
        }
    }
    sections.join("\n\n")
}

fn question_text(question: &QuizQuestion, label_max_chars: usize) -> String {
    let labels: Vec<String> = question
        .options
        .iter()
        .map(|o| label(&o.title, label_max_chars))
        .collect();
    let labels: Vec<&str> = labels.iter().map(String::as_str).collect();
    format!(
        "QUESTION {} :\n{}\n{}",
        question.number,
        question.clue,
        numbered(&labels)
    )
}

fn numbered(labels: &[&str]) -> String {
    labels
        .iter()
        .enumerate()
        .map(|(i, l)| format!("  {}. {}", i + 1, l))
        .collect::<Vec<_>>()
        .join("\n")
}
