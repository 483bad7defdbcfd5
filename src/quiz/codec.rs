//! Quiz session token codec.
//!
//! The whole quiz state travels with the client inside each answer option:
//!
//! ```text
//! question=2&score=1&answer=Get Back
//! ```
//!
//! With a configured secret the payload is followed by `|` and the first 16
//! hex digits of `SHA-256(payload || secret)`, so forged or edited tokens are
//! rejected. Values are not escaped; catalog loading refuses titles containing
//! `&` or `=`.

use sha2::{Digest, Sha256};

use crate::error::{Result, SongbotError};

/// Sentinel stored in `answer` before the first question.
pub const NO_ANSWER: &str = "NONE";

const FIELD_SEPARATOR: char = '&';
const VALUE_SEPARATOR: char = '=';
const MAC_SEPARATOR: char = '|';
const MAC_HEX_LEN: usize = 16;

const FIELD_QUESTION: &str = "question";
const FIELD_SCORE: &str = "score";
const FIELD_ANSWER: &str = "answer";

/// Progress of one quiz session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizState {
    /// Questions asked so far.
    pub question: u32,
    /// Correct answers so far.
    pub score: u32,
    /// Correct title of the question just asked, `None` before the first one.
    pub answer: Option<String>,
}

/// Where a session stands relative to the configured question count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    NotStarted,
    InProgress(u32),
    Finished,
}

impl QuizState {
    /// Phase of this state in a quiz of `total` questions.
    pub fn phase(&self, total: u32) -> QuizPhase {
        match self.question {
            0 => QuizPhase::NotStarted,
            n if n <= total => QuizPhase::InProgress(n),
            _ => QuizPhase::Finished,
        }
    }
}

/// Encode the bare `question=..&score=..&answer=..` payload.
pub fn encode_state(state: &QuizState) -> String {
    format!(
        "{}={}{sep}{}={}{sep}{}={}",
        FIELD_QUESTION,
        state.question,
        FIELD_SCORE,
        state.score,
        FIELD_ANSWER,
        state.answer.as_deref().unwrap_or(NO_ANSWER),
        sep = FIELD_SEPARATOR
    )
}

/// Decode a bare payload. Every field must appear exactly once.
pub fn decode_state(payload: &str) -> Result<QuizState> {
    let mut question = None;
    let mut score = None;
    let mut answer = None;

    for pair in payload.split(FIELD_SEPARATOR) {
        let (key, value) = pair
            .split_once(VALUE_SEPARATOR)
            .ok_or_else(|| malformed(format!("field '{}' has no value", pair)))?;
        match key {
            FIELD_QUESTION => set_once(&mut question, key, parse_count(key, value)?)?,
            FIELD_SCORE => set_once(&mut score, key, parse_count(key, value)?)?,
            FIELD_ANSWER => set_once(&mut answer, key, value.to_string())?,
            other => return Err(malformed(format!("unknown field '{}'", other))),
        }
    }

    let question = question.ok_or_else(|| missing(FIELD_QUESTION))?;
    let score = score.ok_or_else(|| missing(FIELD_SCORE))?;
    let answer = answer.ok_or_else(|| missing(FIELD_ANSWER))?;

    Ok(QuizState {
        question,
        score,
        answer: if answer == NO_ANSWER { None } else { Some(answer) },
    })
}

/// Encodes and decodes session tokens, signing them when a secret is set.
#[derive(Debug, Clone, Default)]
pub struct SessionCodec {
    secret: Option<String>,
}

impl SessionCodec {
    pub fn new(secret: Option<String>) -> Self {
        Self {
            secret: secret.filter(|s| !s.is_empty()),
        }
    }

    /// Codec without checksums.
    pub fn unsigned() -> Self {
        Self::default()
    }

    pub fn is_signed(&self) -> bool {
        self.secret.is_some()
    }

    pub fn encode(&self, state: &QuizState) -> String {
        let payload = encode_state(state);
        match &self.secret {
            Some(secret) => {
                let mac = checksum(&payload, secret);
                format!("{}{}{}", payload, MAC_SEPARATOR, mac)
            }
            None => payload,
        }
    }

    pub fn decode(&self, token: &str) -> Result<QuizState> {
        let Some(secret) = &self.secret else {
            return decode_state(token);
        };

        let (payload, mac) = token
            .rsplit_once(MAC_SEPARATOR)
            .ok_or_else(|| malformed("missing checksum".to_string()))?;
        if mac != checksum(payload, secret) {
            return Err(malformed("checksum mismatch".to_string()));
        }
        decode_state(payload)
    }
}

fn checksum(payload: &str, secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(payload.as_bytes());
    hasher.update(secret.as_bytes());
    let mut digest = hex::encode(hasher.finalize());
    digest.truncate(MAC_HEX_LEN);
    digest
}

fn parse_count(key: &str, value: &str) -> Result<u32> {
    value
        .parse::<u32>()
        .map_err(|_| malformed(format!("field '{}' is not a count: '{}'", key, value)))
}

fn set_once<T>(slot: &mut Option<T>, key: &str, value: T) -> Result<()> {
    if slot.replace(value).is_some() {
        return Err(malformed(format!("field '{}' repeated", key)));
    }
    Ok(())
}

fn missing(key: &str) -> SongbotError {
    malformed(format!("missing field '{}'", key))
}

fn malformed(detail: String) -> SongbotError {
    SongbotError::MalformedSessionState(detail)
}
