//! Word pools grouped by difficulty tier
//!
//! Pools are validated once at load and immutable afterwards.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::settings::Difficulty;

/// Stock word list
pub const BUILTIN_WORDS: &[&str] = &[
    "APPLE", "BANANA", "ORANGE", "GRAPE", "LEMON", //
    "HOUSE", "CHAIR", "TABLE", "WINDOW", "DOOR", //
    "HAPPY", "SMILE", "LAUGH", "DANCE", "SING", //
    "OCEAN", "BEACH", "WAVES", "SHELL", "SAND", //
    "FLOWER", "GARDEN", "PLANT", "GRASS", "TREE", //
    "RAINBOW", "CLOUD", "SUNNY", "STORM", "WIND", //
    "BUTTERFLY", "BIRD", "FISH", "CAT", "DOG", //
    "BOOK", "PENCIL", "PAPER", "SCHOOL", "LEARN", //
    "FRIEND", "FAMILY", "LOVE", "KIND", "HELP", //
    "PIZZA", "CAKE", "COOKIE", "BREAD", "MILK", //
    "STAR", "MOON", "PLANET", "SPACE", "ROCKET", //
    "MAGIC", "DREAM", "WISH", "HOPE", "JOY", //
    "MUSIC", "PIANO", "GUITAR", "DRUM", "SONG", //
    "CASTLE", "PRINCE", "QUEEN", "CROWN", "GOLD", //
    "ADVENTURE", "EXPLORE", "DISCOVER", "JOURNEY", "PATH",
];

/// Mapping from difficulty tier to its ordered word list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordPool {
    tiers: BTreeMap<Difficulty, Vec<String>>,
}

impl WordPool {
    /// Build a pool, normalizing every word to uppercase
    pub fn new<I, W>(tiers: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (Difficulty, Vec<W>)>,
        W: AsRef<str>,
    {
        let mut map = BTreeMap::new();
        for (difficulty, words) in tiers {
            let words = words
                .iter()
                .map(|w| normalize_word(w.as_ref()))
                .collect::<Result<Vec<_>, _>>()?;
            map.insert(difficulty, words);
        }
        Ok(Self { tiers: map })
    }

    /// Untiered pool: everything goes in the implicit default tier
    pub fn single<W: AsRef<str>>(words: Vec<W>) -> Result<Self, ConfigError> {
        Self::new([(Difficulty::Default, words)])
    }

    /// Load a pool from JSON shaped like `{"easy": ["cat", ...], ...}`
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: BTreeMap<Difficulty, Vec<String>> = serde_json::from_str(json)?;
        let pool = Self::new(raw)?;
        log::debug!("Loaded word pool with {} tiers", pool.tiers.len());
        Ok(pool)
    }

    /// Stock pool; easy/medium/hard are split by word length
    pub fn builtin() -> Self {
        let mut tiers: BTreeMap<Difficulty, Vec<String>> = BTreeMap::new();
        for word in BUILTIN_WORDS {
            let tier = match word.len() {
                0..=4 => Difficulty::Easy,
                5 => Difficulty::Medium,
                _ => Difficulty::Hard,
            };
            tiers.entry(tier).or_default().push(word.to_string());
            tiers
                .entry(Difficulty::Default)
                .or_default()
                .push(word.to_string());
        }
        Self { tiers }
    }

    /// Words for a tier; missing or empty tiers cannot be played
    pub fn words(&self, difficulty: Difficulty) -> Result<&[String], ConfigError> {
        match self.tiers.get(&difficulty) {
            None => Err(ConfigError::MissingTier(difficulty)),
            Some(words) if words.is_empty() => Err(ConfigError::EmptyTier(difficulty)),
            Some(words) => Ok(words),
        }
    }

    /// Tiers present in the pool, in display order
    pub fn difficulties(&self) -> impl Iterator<Item = Difficulty> + '_ {
        self.tiers.keys().copied()
    }

    pub fn contains(&self, difficulty: Difficulty) -> bool {
        self.tiers.contains_key(&difficulty)
    }
}

impl Default for WordPool {
    fn default() -> Self {
        Self::builtin()
    }
}

fn normalize_word(word: &str) -> Result<String, ConfigError> {
    let word = word.trim().to_uppercase();
    if word.is_empty() || !word.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(ConfigError::InvalidWord(word));
    }
    Ok(word)
}
