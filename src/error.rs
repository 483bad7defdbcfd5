//! Error types for Songbot
//!
//! This module defines all error types used throughout the crate.
//! Uses `thiserror` for ergonomic error handling with automatic `Display` and
//! `Error` trait implementations.

use thiserror::Error;

/// The primary error type for Songbot operations.
#[derive(Error, Debug)]
pub enum SongbotError {
    /// Configuration-related errors (invalid values, unreadable config file, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog errors (duplicate titles, reserved characters, empty catalog, etc.)
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// A quiz session token that does not decode to a valid state.
    ///
    /// The transport should answer this by restarting the quiz.
    #[error("Malformed session state: {0}")]
    MalformedSessionState(String),

    /// Quiz round generation errors (not enough eligible songs, etc.)
    #[error("Quiz error: {0}")]
    Quiz(String),

    /// Standard I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized `Result` type for Songbot operations.
pub type Result<T> = std::result::Result<T, SongbotError>;
