//! Game state and round types
//!
//! Everything the presentation layer renders lives here.

use serde::{Deserialize, Serialize};

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Phase {
    /// No game started yet (settings step)
    #[default]
    Idle,
    /// Word prepared, waiting for begin; countdown not running
    Ready,
    /// Accepting guesses
    Active,
    /// Answer accepted, next word pending
    RoundResolved,
    /// Run ended
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Ready => "ready",
            Phase::Active => "active",
            Phase::RoundResolved => "round-resolved",
            Phase::GameOver => "game-over",
        }
    }

    /// Phases from which a new game may be started
    pub fn can_start(&self) -> bool {
        matches!(self, Phase::Idle | Phase::GameOver)
    }
}

/// One target word and its scrambled presentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    target_word: String,
    scrambled_word: String,
}

impl Round {
    pub fn new(target_word: String, scrambled_word: String) -> Self {
        Self {
            target_word,
            scrambled_word,
        }
    }

    pub fn target_word(&self) -> &str {
        &self.target_word
    }

    pub fn scrambled_word(&self) -> &str {
        &self.scrambled_word
    }

    /// Compare an already-normalized guess
    pub fn is_answer(&self, guess: &str) -> bool {
        self.target_word == guess
    }
}

/// Category of the last feedback message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedbackKind {
    Correct,
    Incorrect,
    Empty,
    TimeUp,
}

impl FeedbackKind {
    /// CSS class applied to the message element
    pub fn css_class(&self) -> &'static str {
        match self {
            FeedbackKind::Correct => "correct",
            FeedbackKind::Incorrect | FeedbackKind::TimeUp => "incorrect",
            FeedbackKind::Empty => "empty",
        }
    }
}

/// Transient message shown under the word
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub message: String,
}

impl Feedback {
    pub fn correct() -> Self {
        Self {
            kind: FeedbackKind::Correct,
            message: "🎉 Correct! Well done! 🎉".to_string(),
        }
    }

    pub fn try_again() -> Self {
        Self {
            kind: FeedbackKind::Incorrect,
            message: "❌ Try again!".to_string(),
        }
    }

    pub fn empty() -> Self {
        Self {
            kind: FeedbackKind::Empty,
            message: "Please enter a word!".to_string(),
        }
    }

    pub fn game_over(word: &str) -> Self {
        Self {
            kind: FeedbackKind::Incorrect,
            message: format!("Game over! The word was {}", word),
        }
    }

    pub fn time_up(word: &str) -> Self {
        Self {
            kind: FeedbackKind::TimeUp,
            message: format!("⏰ Time's up! The word was {}", word),
        }
    }
}

/// Notifications for the presentation layer, drained after each command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged(Phase),
    RoundPrepared { scrambled: String },
    ScoreChanged { score: u32, delta: u32 },
    TimeChanged { time_left: Option<u32> },
    Feedback(Feedback),
    GameOver { final_score: u32, word: String },
}

/// Result of a submitted guess
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Not accepting guesses in this phase
    Ignored,
    Correct { points: u32 },
    Incorrect { game_over: bool },
}

/// Complete game state (owned by the engine, serializable for the UI)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameState {
    pub score: u32,
    /// Seconds remaining, `None` when the timer is off
    pub time_left: Option<u32>,
    pub phase: Phase,
    pub round: Option<Round>,
    pub feedback: Option<Feedback>,
    /// Target word shown once the game is over
    pub revealed_word: Option<String>,
    /// Wrong guesses on the current word
    pub misses: u32,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }
}
