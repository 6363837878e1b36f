//! Deterministic round engine
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Virtual clock only (the host feeds elapsed time)
//! - Seeded RNG only
//! - No DOM or platform dependencies

pub mod engine;
pub mod schedule;
pub mod scramble;
pub mod state;

pub use engine::RoundEngine;
pub use schedule::{Scheduler, Task, TaskHandle};
pub use scramble::{can_scramble, scramble, shuffle_letters};
pub use state::{Feedback, FeedbackKind, GameEvent, GameState, GuessOutcome, Phase, Round};
