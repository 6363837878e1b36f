//! Round engine
//!
//! Owns the word pool, the current round, the score and the countdown.
//! Every command is synchronous; deferred work (countdown ticks and the
//! post-answer advance) goes through the engine's own [`Scheduler`] and only
//! runs when the host calls [`RoundEngine::update`].

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::schedule::{Scheduler, Task, TaskHandle};
use super::scramble::scramble;
use super::state::{Feedback, GameEvent, GameState, GuessOutcome, Phase, Round};
use crate::consts::{ADVANCE_DELAY_MS, TICK_INTERVAL_MS};
use crate::error::{ConfigError, GuessError};
use crate::normalize_guess;
use crate::settings::{Difficulty, Settings, TimerMode, TimerReset};
use crate::words::WordPool;

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EndReason {
    WrongGuess,
    TimeUp,
}

pub struct RoundEngine {
    pool: WordPool,
    settings: Settings,
    /// Last rejected configuration; blocks starting until fixed
    rejected: Option<ConfigError>,
    state: GameState,
    rng: Pcg32,
    scheduler: Scheduler,
    tick_task: Option<TaskHandle>,
    /// Time left on an interrupted whole-game tick, resumed on the next word
    tick_carry_ms: Option<u64>,
    advance_task: Option<TaskHandle>,
    events: Vec<GameEvent>,
}

impl RoundEngine {
    pub fn new(pool: WordPool, settings: Settings, seed: u64) -> Self {
        Self {
            pool,
            settings,
            rejected: None,
            state: GameState::new(),
            rng: Pcg32::seed_from_u64(seed),
            scheduler: Scheduler::new(),
            tick_task: None,
            tick_carry_ms: None,
            advance_task: None,
            events: Vec::new(),
        }
    }

    pub fn with_builtin_words(settings: Settings, seed: u64) -> Self {
        Self::new(WordPool::builtin(), settings, seed)
    }

    // === Accessors ===

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn pool(&self) -> &WordPool {
        &self.pool
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    /// Seconds remaining, `None` when there is no timer
    pub fn time_left(&self) -> Option<u32> {
        self.state.time_left
    }

    pub fn round(&self) -> Option<&Round> {
        self.state.round.as_ref()
    }

    pub fn scrambled_word(&self) -> Option<&str> {
        self.state.round.as_ref().map(Round::scrambled_word)
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.state.feedback.as_ref()
    }

    pub fn revealed_word(&self) -> Option<&str> {
        self.state.revealed_word.as_deref()
    }

    /// Final score, only once the game is over
    pub fn final_score(&self) -> Option<u32> {
        (self.state.phase == Phase::GameOver).then_some(self.state.score)
    }

    /// Drain queued notifications
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // === Configuration ===

    fn validate(&self, settings: &Settings) -> Result<(), ConfigError> {
        settings.timer_mode.validate()?;
        self.pool.words(settings.difficulty)?;
        Ok(())
    }

    /// Select a difficulty tier by key and a timer mode.
    ///
    /// A rejected selection is remembered so the next start fails with the
    /// same error. Ignored outside `Idle`/`GameOver`.
    pub fn configure(&mut self, difficulty: &str, timer_mode: TimerMode) -> Result<(), ConfigError> {
        if !self.state.phase.can_start() {
            log::debug!("Ignoring configure in phase {:?}", self.state.phase);
            return Ok(());
        }

        let mut candidate = self.settings;
        candidate.timer_mode = timer_mode;
        let checked = difficulty.parse::<Difficulty>().and_then(|difficulty| {
            candidate.difficulty = difficulty;
            self.validate(&candidate)
        });
        self.accept_settings(candidate, checked)
    }

    /// Replace the whole configuration surface
    pub fn apply_settings(&mut self, settings: Settings) -> Result<(), ConfigError> {
        if !self.state.phase.can_start() {
            log::debug!("Ignoring settings change in phase {:?}", self.state.phase);
            return Ok(());
        }
        let checked = self.validate(&settings);
        self.accept_settings(settings, checked)
    }

    fn accept_settings(
        &mut self,
        settings: Settings,
        checked: Result<(), ConfigError>,
    ) -> Result<(), ConfigError> {
        match checked {
            Ok(()) => {
                log::info!(
                    "Configured difficulty={} timer={}",
                    settings.difficulty,
                    settings.timer_mode.key()
                );
                self.settings = settings;
                self.rejected = None;
                Ok(())
            }
            Err(err) => {
                log::warn!("Rejected configuration: {}", err);
                self.rejected = Some(err.clone());
                Err(err)
            }
        }
    }

    // === Game lifecycle ===

    /// Start a game from `Idle` or `GameOver`; a no-op in other phases
    pub fn start_game(&mut self) -> Result<(), ConfigError> {
        if !self.state.phase.can_start() {
            log::debug!("Ignoring start in phase {:?}", self.state.phase);
            return Ok(());
        }
        self.restart()
    }

    /// Throw away the current game and start a fresh one
    pub fn restart(&mut self) -> Result<(), ConfigError> {
        if let Some(err) = &self.rejected {
            return Err(err.clone());
        }
        self.validate(&self.settings)?;

        self.cancel_all_tasks();
        self.state.score = 0;
        self.state.revealed_word = None;
        self.state.time_left = self.settings.timer_mode.duration();
        self.events.push(GameEvent::ScoreChanged { score: 0, delta: 0 });
        self.events.push(GameEvent::TimeChanged {
            time_left: self.state.time_left,
        });
        self.prepare_round()?;
        self.cancel_countdown();

        if self.settings.start_gate {
            self.set_phase(Phase::Ready);
        } else {
            self.set_phase(Phase::Active);
            self.start_countdown();
        }
        log::info!(
            "Game started (difficulty={}, timer={})",
            self.settings.difficulty,
            self.settings.timer_mode.key()
        );
        Ok(())
    }

    /// Leave `Ready` and start the countdown
    pub fn begin(&mut self) {
        if self.state.phase != Phase::Ready {
            log::debug!("Ignoring begin in phase {:?}", self.state.phase);
            return;
        }
        self.set_phase(Phase::Active);
        self.start_countdown();
    }

    /// Back to the settings step
    pub fn quit(&mut self) {
        self.cancel_all_tasks();
        self.state = GameState {
            phase: self.state.phase,
            ..GameState::new()
        };
        self.set_phase(Phase::Idle);
    }

    /// Pick and scramble a new target word
    pub fn prepare_round(&mut self) -> Result<(), ConfigError> {
        let words = self.pool.words(self.settings.difficulty)?;
        let target = words[self.rng.random_range(0..words.len())].clone();
        let scrambled = scramble(&target, &mut self.rng);

        self.cancel_advance();
        self.state.feedback = None;
        self.state.misses = 0;
        if self.settings.timer_reset == TimerReset::PerWord {
            if let Some(duration) = self.settings.timer_mode.duration() {
                self.state.time_left = Some(duration);
                self.events.push(GameEvent::TimeChanged {
                    time_left: Some(duration),
                });
            }
        }

        log::debug!("Prepared round: {}", scrambled);
        self.events.push(GameEvent::RoundPrepared {
            scrambled: scrambled.clone(),
        });
        self.state.round = Some(Round::new(target, scrambled));

        // Keep the tick cadence aligned with the fresh word
        if self.state.phase == Phase::Active {
            self.start_countdown();
        }
        Ok(())
    }

    /// Check a guess against the current word
    pub fn submit_guess(&mut self, raw: &str) -> Result<GuessOutcome, GuessError> {
        if self.state.phase != Phase::Active {
            log::debug!("Ignoring guess in phase {:?}", self.state.phase);
            return Ok(GuessOutcome::Ignored);
        }

        let guess = normalize_guess(raw);
        if guess.is_empty() {
            self.set_feedback(Feedback::empty());
            return Err(GuessError::EmptyInput);
        }

        let correct = match &self.state.round {
            Some(round) => round.is_answer(&guess),
            None => return Ok(GuessOutcome::Ignored),
        };
        if correct {
            Ok(self.accept_answer())
        } else {
            Ok(self.reject_answer())
        }
    }

    fn accept_answer(&mut self) -> GuessOutcome {
        let points = self.settings.scoring.points(self.state.time_left);
        self.state.score = self.state.score.saturating_add(points);
        self.events.push(GameEvent::ScoreChanged {
            score: self.state.score,
            delta: points,
        });
        self.set_feedback(Feedback::correct());

        if self.settings.timer_reset == TimerReset::WholeGame {
            self.tick_carry_ms = self.tick_task.and_then(|h| self.scheduler.due_in(h));
        }
        self.cancel_countdown();
        self.set_phase(Phase::RoundResolved);
        self.cancel_advance();
        self.advance_task = Some(
            self.scheduler
                .schedule_once(Task::AdvanceRound, ADVANCE_DELAY_MS),
        );
        GuessOutcome::Correct { points }
    }

    fn reject_answer(&mut self) -> GuessOutcome {
        self.state.misses += 1;
        let exhausted = self
            .settings
            .incorrect_policy
            .allowed_misses()
            .is_some_and(|allowed| self.state.misses > allowed);

        if exhausted {
            self.end_game(EndReason::WrongGuess);
        } else {
            self.set_feedback(Feedback::try_again());
        }
        GuessOutcome::Incorrect {
            game_over: exhausted,
        }
    }

    /// One second of countdown; ignored unless a timed game is `Active`
    pub fn on_tick(&mut self) {
        if self.state.phase != Phase::Active {
            return;
        }
        let Some(left) = self.state.time_left else {
            return;
        };

        let left = left.saturating_sub(1);
        self.state.time_left = Some(left);
        self.events.push(GameEvent::TimeChanged {
            time_left: Some(left),
        });
        if left == 0 {
            self.end_game(EndReason::TimeUp);
        }
    }

    /// Feed elapsed wall time; runs every task that falls due, in order
    pub fn update(&mut self, elapsed_ms: u64) {
        let until = self.scheduler.now_ms().saturating_add(elapsed_ms);
        while let Some(task) = self.scheduler.pop_due(until) {
            match task {
                Task::CountdownTick => self.on_tick(),
                Task::AdvanceRound => self.advance_round(),
            }
        }
        self.scheduler.advance_to(until);
    }

    fn advance_round(&mut self) {
        self.advance_task = None;
        if self.state.phase != Phase::RoundResolved {
            return;
        }
        // Phase first so prepare_round re-arms the countdown
        self.set_phase(Phase::Active);
        if let Err(err) = self.prepare_round() {
            log::error!("Could not prepare next round: {}", err);
            self.cancel_all_tasks();
            self.set_phase(Phase::GameOver);
        }
    }

    fn end_game(&mut self, reason: EndReason) {
        self.cancel_all_tasks();
        let word = self
            .state
            .round
            .as_ref()
            .map(|r| r.target_word().to_string())
            .unwrap_or_default();

        self.set_feedback(match reason {
            EndReason::WrongGuess => Feedback::game_over(&word),
            EndReason::TimeUp => Feedback::time_up(&word),
        });
        self.state.revealed_word = Some(word.clone());
        self.set_phase(Phase::GameOver);
        self.events.push(GameEvent::GameOver {
            final_score: self.state.score,
            word,
        });
        log::info!("Game over ({:?}), final score {}", reason, self.state.score);
    }

    // === Helpers ===

    fn set_phase(&mut self, phase: Phase) {
        if self.state.phase != phase {
            log::info!("Phase {:?} -> {:?}", self.state.phase, phase);
            self.state.phase = phase;
            self.events.push(GameEvent::PhaseChanged(phase));
        }
    }

    fn set_feedback(&mut self, feedback: Feedback) {
        self.events.push(GameEvent::Feedback(feedback.clone()));
        self.state.feedback = Some(feedback);
    }

    fn start_countdown(&mut self) {
        self.cancel_countdown();
        let first_ms = self.tick_carry_ms.take().unwrap_or(TICK_INTERVAL_MS);
        if self.state.time_left.is_some() {
            self.tick_task = Some(self.scheduler.schedule_repeating_after(
                Task::CountdownTick,
                first_ms,
                TICK_INTERVAL_MS,
            ));
        }
    }

    fn cancel_countdown(&mut self) {
        if let Some(handle) = self.tick_task.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn cancel_advance(&mut self) {
        if let Some(handle) = self.advance_task.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn cancel_all_tasks(&mut self) {
        self.tick_task = None;
        self.tick_carry_ms = None;
        self.advance_task = None;
        self.scheduler.cancel_all();
    }
}
