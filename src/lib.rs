//! Word Scramble - a scrambled-word guessing game
//!
//! Core modules:
//! - `sim`: Deterministic round engine (scrambling, scoring, countdown, scheduling)
//! - `words`: Word pools grouped by difficulty tier
//! - `settings`: Configuration surface and the stock rule presets
//! - `error`: Configuration and guess errors

pub mod error;
pub mod settings;
pub mod sim;
pub mod words;

pub use error::{ConfigError, GuessError};
pub use settings::{
    Difficulty, IncorrectPolicy, Preset, Scoring, Settings, TimerMode, TimerReset,
};
pub use sim::{GameEvent, GuessOutcome, Phase, RoundEngine};
pub use words::WordPool;

/// Game configuration constants
pub mod consts {
    /// Delay between a correct answer and the next word
    pub const ADVANCE_DELAY_MS: u64 = 1500;
    /// Countdown cadence
    pub const TICK_INTERVAL_MS: u64 = 1000;
    /// Upper bound on whole-word reshuffles before giving up on a distinct scramble
    pub const MAX_SCRAMBLE_ATTEMPTS: u32 = 100;
    /// Speed bonus awards one point per this many seconds left
    pub const SPEED_BONUS_DIVISOR: u32 = 3;
    /// Timer used by the timed presets
    pub const DEFAULT_TIMER_SECONDS: u32 = 30;
}

/// Normalize a raw guess: trim surrounding whitespace and upper-case
#[inline]
pub fn normalize_guess(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Points for a correct answer under the speed bonus rule
#[inline]
pub fn speed_bonus_points(time_left: Option<u32>) -> u32 {
    match time_left {
        Some(secs) => (secs / consts::SPEED_BONUS_DIVISOR).max(1),
        None => 1,
    }
}
