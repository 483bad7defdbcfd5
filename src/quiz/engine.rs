//! Lyrics quiz state machine.
//!
//! ```text
//! NOT_STARTED --trigger--> IN_PROGRESS(1) --answer--> ... IN_PROGRESS(N) --answer--> FINISHED
//! ```
//!
//! No session is kept server-side. Every answer option carries the encoded
//! state for the next transition; the option holding the correct title
//! carries the score already incremented, so picking it is what scores.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use crate::catalog::{Catalog, Song};
use crate::config::QuizConfig;
use crate::error::{Result, SongbotError};

use super::codec::{QuizState, SessionCodec};

/// A freshly sampled question, before it is bound to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizRound {
    /// Run of lyric words shown to the player (lowercase).
    pub clue: String,
    /// Title the clue was taken from.
    pub answer: String,
    /// Other sampled titles.
    pub distractors: Vec<String>,
}

/// One selectable answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOption {
    /// Title shown on the option.
    pub title: String,
    /// Session token posted back when this option is picked.
    pub token: String,
}

/// A question presented to the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestion {
    /// 1-based question number.
    pub number: u32,
    /// Questions in the session.
    pub total: u32,
    pub clue: String,
    /// Options in display order (shuffled).
    pub options: Vec<QuizOption>,
}

/// Final result of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSummary {
    pub score: u32,
    pub total: u32,
}

impl QuizSummary {
    pub fn is_perfect(&self) -> bool {
        self.score == self.total
    }
}

/// The answer to the previous question, shown before the next step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerReveal {
    /// Correct title.
    pub answer: String,
    /// Title the player picked, when the transport reports it.
    pub chosen: Option<String>,
}

impl AnswerReveal {
    /// Whether the pick was right, if the pick is known.
    pub fn is_correct(&self) -> Option<bool> {
        self.chosen.as_ref().map(|chosen| *chosen == self.answer)
    }
}

/// What comes after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizStep {
    Question(QuizQuestion),
    Finished(QuizSummary),
}

/// Result of one transition: the reveal of the last answer plus the next step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizTurn {
    pub reveal: Option<AnswerReveal>,
    pub step: QuizStep,
}

impl QuizTurn {
    pub fn is_finished(&self) -> bool {
        matches!(self.step, QuizStep::Finished(_))
    }
}

/// Drives quiz sessions against a catalog.
#[derive(Debug, Clone)]
pub struct QuizEngine {
    config: QuizConfig,
    codec: SessionCodec,
}

impl QuizEngine {
    pub fn new(config: QuizConfig, codec: SessionCodec) -> Self {
        Self { config, codec }
    }

    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    pub fn codec(&self) -> &SessionCodec {
        &self.codec
    }

    /// Start a new session: `NOT_STARTED -> IN_PROGRESS(1)`.
    pub fn start(&self, catalog: &Catalog) -> Result<QuizTurn> {
        self.start_with(catalog, &mut rand::thread_rng())
    }

    pub fn start_with<R: Rng + ?Sized>(&self, catalog: &Catalog, rng: &mut R) -> Result<QuizTurn> {
        self.transition(catalog, QuizState::default(), None, rng)
    }

    /// Advance a session from the token of the option the player picked.
    ///
    /// `chosen` is the picked title when the transport echoes it back; it
    /// only affects the reveal, never the score.
    pub fn advance(&self, catalog: &Catalog, token: &str, chosen: Option<&str>) -> Result<QuizTurn> {
        self.advance_with(catalog, token, chosen, &mut rand::thread_rng())
    }

    pub fn advance_with<R: Rng + ?Sized>(
        &self,
        catalog: &Catalog,
        token: &str,
        chosen: Option<&str>,
        rng: &mut R,
    ) -> Result<QuizTurn> {
        let state = self.codec.decode(token)?;
        if state.score > state.question {
            return Err(SongbotError::MalformedSessionState(format!(
                "score {} exceeds question {}",
                state.score, state.question
            )));
        }
        self.transition(catalog, state, chosen, rng)
    }

    fn transition<R: Rng + ?Sized>(
        &self,
        catalog: &Catalog,
        mut state: QuizState,
        chosen: Option<&str>,
        rng: &mut R,
    ) -> Result<QuizTurn> {
        let reveal = state.answer.take().map(|answer| AnswerReveal {
            answer,
            chosen: chosen.map(str::to_string),
        });

        state.question = state.question.checked_add(1).ok_or_else(|| {
            SongbotError::MalformedSessionState("question counter overflow".to_string())
        })?;
        let total = self.config.question_count;

        if state.question > total {
            info!(score = state.score, total, "Quiz finished");
            return Ok(QuizTurn {
                reveal,
                step: QuizStep::Finished(QuizSummary {
                    score: state.score,
                    total,
                }),
            });
        }

        let round = self.generate_round(catalog, rng)?;
        state.answer = Some(round.answer.clone());

        let wrong_token = self.codec.encode(&state);
        let right_token = self.codec.encode(&QuizState {
            score: state.score + 1,
            ..state.clone()
        });

        let mut options: Vec<QuizOption> = round
            .distractors
            .into_iter()
            .map(|title| QuizOption {
                title,
                token: wrong_token.clone(),
            })
            .collect();
        options.push(QuizOption {
            title: round.answer,
            token: right_token,
        });
        options.shuffle(rng);

        debug!(
            question = state.question,
            score = state.score,
            options = options.len(),
            "Quiz question generated"
        );

        Ok(QuizTurn {
            reveal,
            step: QuizStep::Question(QuizQuestion {
                number: state.question,
                total,
                clue: round.clue,
                options,
            }),
        })
    }

    /// Sample a question: distinct eligible songs, the first one answers.
    pub fn generate_round<R: Rng + ?Sized>(&self, catalog: &Catalog, rng: &mut R) -> Result<QuizRound> {
        let eligible: Vec<&Song> = catalog
            .songs()
            .iter()
            .filter(|song| self.is_eligible(song))
            .collect();

        let wanted = self.config.option_count;
        if eligible.len() < wanted {
            return Err(SongbotError::Quiz(format!(
                "need {} songs with lyrics for a question, catalog has {}",
                wanted,
                eligible.len()
            )));
        }

        let picked: Vec<&Song> = eligible.choose_multiple(rng, wanted).copied().collect();
        let (answer, distractors) = picked
            .split_first()
            .ok_or_else(|| SongbotError::Quiz("no songs sampled".to_string()))?;

        Ok(QuizRound {
            clue: self.clue(answer, rng),
            answer: answer.title.clone(),
            distractors: distractors.iter().map(|s| s.title.clone()).collect(),
        })
    }

    fn is_eligible(&self, song: &Song) -> bool {
        !self.config.excluded_titles.iter().any(|t| *t == song.title)
            && !song.lyrics.trim().is_empty()
    }

    /// Contiguous run of lyric words at a random offset.
    ///
    /// An inverted word range is read as the single length `clue_min_words`.
    fn clue<R: Rng + ?Sized>(&self, song: &Song, rng: &mut R) -> String {
        let words = song.lyric_words();
        let min = self.config.clue_min_words;
        let max = self.config.clue_max_words.max(min);
        let len = rng.gen_range(min..=max);
        let clue = if words.len() <= len {
            words.join(" ")
        } else {
            let start = rng.gen_range(0..=words.len() - len);
            words[start..start + len].join(" ")
        };
        clue.to_lowercase()
    }
}
