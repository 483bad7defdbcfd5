//! Lyrics quiz: client-held session tokens and the round state machine.

pub mod codec;
pub mod engine;

pub use codec::{decode_state, encode_state, QuizPhase, QuizState, SessionCodec, NO_ANSWER};
pub use engine::{
    AnswerReveal, QuizEngine, QuizOption, QuizQuestion, QuizRound, QuizStep, QuizSummary, QuizTurn,
};
