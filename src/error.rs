//! Error types surfaced to the presentation layer

use thiserror::Error;

use crate::settings::Difficulty;

/// Invalid game configuration; prevents a game from starting
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown difficulty tier `{0}`")]
    UnknownDifficulty(String),
    #[error("difficulty tier `{0}` is not in the word pool")]
    MissingTier(Difficulty),
    #[error("word pool for `{0}` is empty")]
    EmptyTier(Difficulty),
    #[error("timer duration must be at least one second")]
    ZeroTimer,
    #[error("unknown timer mode `{0}`")]
    UnknownTimerMode(String),
    #[error("invalid word `{0}`: only letters A-Z are allowed")]
    InvalidWord(String),
    #[error("malformed word pool: {0}")]
    MalformedPool(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::MalformedPool(err.to_string())
    }
}

/// Rejected guess; transient, never changes game state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GuessError {
    #[error("please enter a word")]
    EmptyInput,
}
