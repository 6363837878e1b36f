//! Game settings and rule presets
//!
//! One engine covers every historical revision of the game; the revisions
//! differ only in the values chosen here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_TIMER_SECONDS;
use crate::error::ConfigError;

/// Difficulty tier selecting which word pool to draw from
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    /// Implicit tier of an untiered pool
    #[default]
    Default,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Default,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Default => "default",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" | "med" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "default" => Ok(Difficulty::Default),
            _ => Err(ConfigError::UnknownDifficulty(s.to_string())),
        }
    }
}

/// Countdown configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TimerMode {
    #[default]
    Off,
    Seconds(u32),
}

impl TimerMode {
    /// Durations offered by the settings modal
    pub const CHOICES: [TimerMode; 5] = [
        TimerMode::Off,
        TimerMode::Seconds(15),
        TimerMode::Seconds(30),
        TimerMode::Seconds(60),
        TimerMode::Seconds(90),
    ];

    /// Configured duration, `None` when the timer is off
    pub fn duration(&self) -> Option<u32> {
        match self {
            TimerMode::Off => None,
            TimerMode::Seconds(secs) => Some(*secs),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            TimerMode::Seconds(0) => Err(ConfigError::ZeroTimer),
            _ => Ok(()),
        }
    }

    /// Key used by the settings modal (`none` or the number of seconds)
    pub fn key(&self) -> String {
        match self {
            TimerMode::Off => "none".to_string(),
            TimerMode::Seconds(secs) => secs.to_string(),
        }
    }
}

impl FromStr for TimerMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        match key.as_str() {
            "none" | "off" => Ok(TimerMode::Off),
            _ => match key.parse::<u32>() {
                Ok(0) => Err(ConfigError::ZeroTimer),
                Ok(secs) => Ok(TimerMode::Seconds(secs)),
                Err(_) => Err(ConfigError::UnknownTimerMode(s.to_string())),
            },
        }
    }
}

/// What a wrong guess does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum IncorrectPolicy {
    /// Clear the input and retry the same word indefinitely
    #[default]
    Lenient,
    /// End the game on the first wrong guess
    Strict,
    /// One retry per word, the second wrong guess ends the game
    SecondChance,
}

impl IncorrectPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            IncorrectPolicy::Lenient => "lenient",
            IncorrectPolicy::Strict => "strict",
            IncorrectPolicy::SecondChance => "second-chance",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "lenient" => Some(IncorrectPolicy::Lenient),
            "strict" => Some(IncorrectPolicy::Strict),
            "second-chance" | "secondchance" => Some(IncorrectPolicy::SecondChance),
            _ => None,
        }
    }

    /// Wrong guesses allowed on one word before the game ends
    pub fn allowed_misses(&self) -> Option<u32> {
        match self {
            IncorrectPolicy::Lenient => None,
            IncorrectPolicy::Strict => Some(0),
            IncorrectPolicy::SecondChance => Some(1),
        }
    }
}

/// Whether the countdown restarts with each word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TimerReset {
    #[default]
    PerWord,
    WholeGame,
}

impl TimerReset {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerReset::PerWord => "per-word",
            TimerReset::WholeGame => "whole-game",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "per-word" | "perword" => Some(TimerReset::PerWord),
            "whole-game" | "wholegame" => Some(TimerReset::WholeGame),
            _ => None,
        }
    }
}

/// Points awarded for a correct answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Scoring {
    /// Always +1
    #[default]
    Flat,
    /// `max(1, time_left / 3)`
    SpeedBonus,
}

impl Scoring {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scoring::Flat => "flat",
            Scoring::SpeedBonus => "speed-bonus",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "flat" => Some(Scoring::Flat),
            "speed-bonus" | "speedbonus" | "bonus" => Some(Scoring::SpeedBonus),
            _ => None,
        }
    }

    pub fn points(&self, time_left: Option<u32>) -> u32 {
        match self {
            Scoring::Flat => 1,
            Scoring::SpeedBonus => crate::speed_bonus_points(time_left),
        }
    }
}

/// Rule presets, one per historical revision of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Preset {
    /// No timer, retry forever
    #[default]
    Classic,
    /// Per-word countdown behind a start button
    Timed,
    /// Timed, faster answers score more
    SpeedBonus,
    /// Speed bonus with difficulty tiers
    Tiered,
    /// Settings modal: one countdown for the whole session
    Full,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Classic => "Classic",
            Preset::Timed => "Timed",
            Preset::SpeedBonus => "Speed Bonus",
            Preset::Tiered => "Tiered",
            Preset::Full => "Full",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(Preset::Classic),
            "timed" => Some(Preset::Timed),
            "speed bonus" | "speed-bonus" | "speedbonus" => Some(Preset::SpeedBonus),
            "tiered" => Some(Preset::Tiered),
            "full" => Some(Preset::Full),
            _ => None,
        }
    }
}

/// Complete configuration surface of the round engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Settings {
    pub difficulty: Difficulty,
    pub timer_mode: TimerMode,
    pub incorrect_policy: IncorrectPolicy,
    pub timer_reset: TimerReset,
    pub scoring: Scoring,
    /// Wait in `Ready` for an explicit begin before the countdown starts
    pub start_gate: bool,
}

impl Settings {
    /// Create settings from a preset
    pub fn from_preset(preset: Preset) -> Self {
        let timed = TimerMode::Seconds(DEFAULT_TIMER_SECONDS);
        match preset {
            Preset::Classic => Self::default(),
            Preset::Timed => Self {
                timer_mode: timed,
                incorrect_policy: IncorrectPolicy::Strict,
                start_gate: true,
                ..Self::default()
            },
            Preset::SpeedBonus => Self {
                timer_mode: timed,
                incorrect_policy: IncorrectPolicy::Strict,
                scoring: Scoring::SpeedBonus,
                start_gate: true,
                ..Self::default()
            },
            Preset::Tiered => Self {
                difficulty: Difficulty::Medium,
                timer_mode: timed,
                incorrect_policy: IncorrectPolicy::Strict,
                scoring: Scoring::SpeedBonus,
                start_gate: true,
                ..Self::default()
            },
            Preset::Full => Self {
                difficulty: Difficulty::Medium,
                timer_mode: TimerMode::Seconds(60),
                incorrect_policy: IncorrectPolicy::SecondChance,
                timer_reset: TimerReset::WholeGame,
                scoring: Scoring::SpeedBonus,
                start_gate: false,
            },
        }
    }

    /// Whether a countdown runs at all
    pub fn timed(&self) -> bool {
        self.timer_mode.duration().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_keys() {
        for difficulty in Difficulty::ALL {
            assert_eq!(difficulty.as_str().parse::<Difficulty>(), Ok(difficulty));
        }
        assert_eq!(" Hard ".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!(
            "nonexistent-tier".parse::<Difficulty>(),
            Err(ConfigError::UnknownDifficulty("nonexistent-tier".to_string()))
        );
    }

    #[test]
    fn test_timer_mode_parse() {
        assert_eq!("none".parse::<TimerMode>(), Ok(TimerMode::Off));
        assert_eq!("30".parse::<TimerMode>(), Ok(TimerMode::Seconds(30)));
        assert_eq!("0".parse::<TimerMode>(), Err(ConfigError::ZeroTimer));
        assert!(matches!(
            "soon".parse::<TimerMode>(),
            Err(ConfigError::UnknownTimerMode(_))
        ));
        for choice in TimerMode::CHOICES {
            assert_eq!(choice.key().parse::<TimerMode>(), Ok(choice));
        }
    }

    #[test]
    fn test_policy_keys() {
        for policy in [
            IncorrectPolicy::Lenient,
            IncorrectPolicy::Strict,
            IncorrectPolicy::SecondChance,
        ] {
            assert_eq!(IncorrectPolicy::from_str(policy.as_str()), Some(policy));
        }
        for reset in [TimerReset::PerWord, TimerReset::WholeGame] {
            assert_eq!(TimerReset::from_str(reset.as_str()), Some(reset));
        }
        for scoring in [Scoring::Flat, Scoring::SpeedBonus] {
            assert_eq!(Scoring::from_str(scoring.as_str()), Some(scoring));
        }
        assert_eq!(IncorrectPolicy::from_str("forgiving"), None);
        assert_eq!(IncorrectPolicy::Strict.allowed_misses(), Some(0));
        assert_eq!(IncorrectPolicy::Lenient.allowed_misses(), None);
    }

    #[test]
    fn test_speed_bonus_points() {
        assert_eq!(Scoring::SpeedBonus.points(Some(9)), 3);
        assert_eq!(Scoring::SpeedBonus.points(Some(1)), 1);
        assert_eq!(Scoring::SpeedBonus.points(Some(0)), 1);
        assert_eq!(Scoring::SpeedBonus.points(None), 1);
        assert_eq!(Scoring::Flat.points(Some(30)), 1);
    }

    #[test]
    fn test_presets() {
        assert_eq!(Settings::from_preset(Preset::Classic), Settings::default());
        assert!(!Settings::default().timed());

        let full = Settings::from_preset(Preset::Full);
        assert_eq!(full.timer_reset, TimerReset::WholeGame);
        assert_eq!(full.incorrect_policy, IncorrectPolicy::SecondChance);
        assert!(full.timed());

        for preset in [
            Preset::Classic,
            Preset::Timed,
            Preset::SpeedBonus,
            Preset::Tiered,
            Preset::Full,
        ] {
            assert_eq!(Preset::from_str(preset.as_str()), Some(preset));
            assert!(Settings::from_preset(preset).timer_mode.validate().is_ok());
        }
    }

    #[test]
    fn test_settings_json() {
        let settings = Settings::from_preset(Preset::Tiered);
        let json = serde_json::to_string(&settings).unwrap();
        assert!(json.contains("\"medium\""));
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }
}
