//! Configuration for Songbot
//!
//! Config is read from `~/.songbot/config.json` (or an explicit path). A
//! missing file means defaults. Environment variables, optionally loaded from
//! a `.env` file, override the file:
//!
//! - `SONGBOT_CATALOG_PATH`: catalog JSON file
//! - `SONGBOT_SESSION_SECRET`: key for quiz session token checksums
//! - `SONGBOT_QUIZ_QUESTIONS`: number of questions per quiz

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Result, SongbotError};

pub const ENV_CATALOG_PATH: &str = "SONGBOT_CATALOG_PATH";
pub const ENV_SESSION_SECRET: &str = "SONGBOT_SESSION_SECRET";
pub const ENV_QUIZ_QUESTIONS: &str = "SONGBOT_QUIZ_QUESTIONS";

/// Root directory for Songbot files (`~/.songbot`).
pub fn songbot_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".songbot")
}

// ============================================================================
// Sections
// ============================================================================

/// Resolver tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Shortest query (in characters) allowed to count as a partial match.
    pub min_partial_len: usize,
    /// Edit distance / query length must stay strictly below this.
    pub distance_threshold: f64,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            min_partial_len: 4,
            distance_threshold: 0.5,
        }
    }
}

/// Lyrics quiz settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    /// Questions per session.
    pub question_count: u32,
    /// Options shown per question (one correct, the rest distractors).
    pub option_count: usize,
    /// Fewest lyric words in a clue.
    pub clue_min_words: usize,
    /// Most lyric words in a clue.
    pub clue_max_words: usize,
    /// Titles never used in the quiz (instrumentals, sound collages).
    pub excluded_titles: Vec<String>,
    /// Message that starts a quiz (case-insensitive).
    pub trigger: String,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            question_count: 5,
            option_count: 4,
            clue_min_words: 5,
            clue_max_words: 9,
            excluded_titles: vec!["Flying".to_string(), "Revolution 9".to_string()],
            trigger: "quiz".to_string(),
        }
    }
}

/// Quiz session token settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// When set, tokens carry a keyed checksum and unsigned tokens are rejected.
    pub secret: Option<String>,
}

/// Reply shaping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplyConfig {
    /// Longest option label before it is cut and suffixed with `…`.
    pub label_max_chars: usize,
}

impl Default for ReplyConfig {
    fn default() -> Self {
        Self {
            label_max_chars: 20,
        }
    }
}

// ============================================================================
// Config
// ============================================================================

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog JSON file.
    pub catalog_path: PathBuf,
    pub matcher: MatcherConfig,
    pub quiz: QuizConfig,
    pub session: SessionConfig,
    pub reply: ReplyConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: songbot_dir().join("catalog.json"),
            matcher: MatcherConfig::default(),
            quiz: QuizConfig::default(),
            session: SessionConfig::default(),
            reply: ReplyConfig::default(),
        }
    }
}

impl Config {
    /// Default config file location.
    pub fn default_path() -> PathBuf {
        songbot_dir().join("config.json")
    }

    /// Load from the default path, apply `.env` and environment overrides, validate.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path())
    }

    /// Load from `path` (defaults if the file is missing), apply environment
    /// overrides and validate.
    pub fn load_from(path: &Path) -> Result<Self> {
        if let Ok(env_file) = dotenvy::dotenv() {
            debug!(path = %env_file.display(), "Loaded .env file");
        }

        let mut config = Self::from_file(path)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a config file, or return defaults when it does not exist.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&raw).map_err(|e| {
            SongbotError::Config(format!("Invalid config file {}: {}", path.display(), e))
        })?;
        info!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Apply `SONGBOT_*` environment variables on top of the current values.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_CATALOG_PATH).filter(|v| !v.trim().is_empty()) {
            self.catalog_path = PathBuf::from(path);
        }
        if let Some(secret) = lookup(ENV_SESSION_SECRET) {
            self.session.secret = if secret.is_empty() { None } else { Some(secret) };
        }
        if let Some(raw) = lookup(ENV_QUIZ_QUESTIONS) {
            self.quiz.question_count = raw.trim().parse().map_err(|_| {
                SongbotError::Config(format!(
                    "{} must be a positive integer, got '{}'",
                    ENV_QUIZ_QUESTIONS, raw
                ))
            })?;
        }
        Ok(())
    }

    /// Reject settings the matcher or quiz cannot work with.
    pub fn validate(&self) -> Result<()> {
        let threshold = self.matcher.distance_threshold;
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(SongbotError::Config(format!(
                "matcher.distance_threshold must be in (0, 1], got {}",
                threshold
            )));
        }
        if self.quiz.question_count == 0 {
            return Err(SongbotError::Config(
                "quiz.question_count must be at least 1".to_string(),
            ));
        }
        if self.quiz.option_count < 2 {
            return Err(SongbotError::Config(
                "quiz.option_count must be at least 2".to_string(),
            ));
        }
        if self.quiz.clue_min_words == 0 || self.quiz.clue_min_words > self.quiz.clue_max_words {
            return Err(SongbotError::Config(format!(
                "quiz clue length range {}..={} is invalid",
                self.quiz.clue_min_words, self.quiz.clue_max_words
            )));
        }
        if self.quiz.trigger.trim().is_empty() {
            return Err(SongbotError::Config("quiz.trigger cannot be empty".to_string()));
        }
        if self.reply.label_max_chars < 2 {
            return Err(SongbotError::Config(
                "reply.label_max_chars must be at least 2".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.matcher.min_partial_len, 4);
        assert_eq!(config.matcher.distance_threshold, 0.5);
        assert_eq!(config.quiz.question_count, 5);
        assert_eq!(config.quiz.option_count, 4);
        assert_eq!(config.quiz.excluded_titles, vec!["Flying", "Revolution 9"]);
        assert!(config.session.secret.is_none());
        assert_eq!(config.reply.label_max_chars, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = Config::from_file(&tmp.path().join("nope.json")).unwrap();
        assert_eq!(config.quiz, QuizConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"catalog_path": "/srv/beatles.json", "quiz": {"question_count": 3}}"#,
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.catalog_path, PathBuf::from("/srv/beatles.json"));
        assert_eq!(config.quiz.question_count, 3);
        assert_eq!(config.quiz.option_count, 4);
        assert_eq!(config.matcher, MatcherConfig::default());
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = Config::from_file(&path).unwrap_err();
        assert!(matches!(err, SongbotError::Config(_)));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_CATALOG_PATH, "/tmp/songs.json"),
            (ENV_SESSION_SECRET, "s3cret"),
            (ENV_QUIZ_QUESTIONS, "7"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.catalog_path, PathBuf::from("/tmp/songs.json"));
        assert_eq!(config.session.secret.as_deref(), Some("s3cret"));
        assert_eq!(config.quiz.question_count, 7);
    }

    #[test]
    fn test_env_override_bad_question_count() {
        let mut config = Config::default();
        let result = config.apply_overrides(|key| {
            (key == ENV_QUIZ_QUESTIONS).then(|| "five".to_string())
        });
        assert!(matches!(result, Err(SongbotError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.matcher.distance_threshold = 0.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.quiz.clue_min_words = 10;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.quiz.option_count = 1;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.quiz.question_count = 0;
        assert!(config.validate().is_err());
    }
}
