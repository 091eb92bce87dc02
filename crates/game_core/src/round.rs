use std::time::Duration;

use rand::{rngs::StdRng, SeedableRng};
use shared::{
    domain::{BuzzSignal, RoundPhase},
    error::GameError,
};
use thiserror::Error;
use tracing::{debug, info, warn};
use word_source::WordSourceError;

use crate::{queue::WordQueue, signal::OneShot};

pub const DEFAULT_ROUND_DURATION: Duration = Duration::from_secs(60);
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);
/// Remaining seconds at or below which every tick asks for a panic buzz.
pub const DEFAULT_PANIC_SECONDS: u64 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("tick interval must be greater than zero")]
    ZeroTickInterval,
    #[error("round duration must be at least one tick interval")]
    DurationShorterThanTick,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSettings {
    duration: Duration,
    tick_interval: Duration,
    panic_seconds: u64,
    shuffle_seed: Option<u64>,
}

impl Default for RoundSettings {
    fn default() -> Self {
        Self {
            duration: DEFAULT_ROUND_DURATION,
            tick_interval: DEFAULT_TICK_INTERVAL,
            panic_seconds: DEFAULT_PANIC_SECONDS,
            shuffle_seed: None,
        }
    }
}

impl RoundSettings {
    pub fn new(
        duration: Duration,
        tick_interval: Duration,
        panic_seconds: u64,
    ) -> Result<Self, SettingsError> {
        if tick_interval.is_zero() {
            return Err(SettingsError::ZeroTickInterval);
        }
        if duration < tick_interval {
            return Err(SettingsError::DurationShorterThanTick);
        }
        Ok(Self {
            duration,
            tick_interval,
            panic_seconds,
            shuffle_seed: None,
        })
    }

    /// Fixes the shuffle order, for reproducible rounds.
    pub fn with_shuffle_seed(mut self, seed: u64) -> Self {
        self.shuffle_seed = Some(seed);
        self
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn panic_seconds(&self) -> u64 {
        self.panic_seconds
    }

    fn rng(&self) -> StdRng {
        match self.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Whole seconds left, rounding a partial second up so the last tick before
/// the deadline never reads as zero.
pub fn whole_seconds(remaining: Duration) -> u64 {
    remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0)
}

#[derive(Debug, Clone)]
pub struct RoundState {
    remaining_seconds: u64,
    score: i32,
    current_word: String,
    queue: WordQueue,
}

impl RoundState {
    fn new(words: Vec<String>, remaining_seconds: u64, rng: StdRng) -> Option<Self> {
        let mut queue = WordQueue::new(words, rng)?;
        let current_word = queue.next_word();
        Some(Self {
            remaining_seconds,
            score: 0,
            current_word,
            queue,
        })
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn current_word(&self) -> &str {
        &self.current_word
    }

    pub fn queue(&self) -> &WordQueue {
        &self.queue
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Started,
    /// The response belonged to an earlier load, or the round moved on.
    Stale,
}

/// Read-only view handed to the presentation layer after every transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundSnapshot {
    pub phase: RoundPhase,
    pub category: Option<String>,
    pub remaining_seconds: u64,
    pub score: i32,
    pub current_word: Option<String>,
    pub buzz: BuzzSignal,
    /// Bumped on every raised buzz; pass it back to acknowledge that buzz.
    pub buzz_seq: u64,
    pub finished: bool,
    pub error: Option<GameError>,
}

impl RoundSnapshot {
    pub fn error_message(&self) -> Option<&'static str> {
        self.error.as_ref().map(GameError::user_message)
    }
}

/// State machine for a single round: `Idle -> Loading -> Playing -> Finished`.
///
/// A failed load drops back to `Idle` so the player can retry. `Finished` is
/// terminal.
#[derive(Debug)]
pub struct Round {
    settings: RoundSettings,
    phase: RoundPhase,
    generation: u64,
    category: Option<String>,
    state: Option<RoundState>,
    buzz: BuzzSignal,
    buzz_seq: u64,
    finished: OneShot<()>,
    error: OneShot<GameError>,
}

impl Round {
    pub fn new(settings: RoundSettings) -> Self {
        Self {
            settings,
            phase: RoundPhase::Idle,
            generation: 0,
            category: None,
            state: None,
            buzz: BuzzSignal::None,
            buzz_seq: 0,
            finished: OneShot::new(),
            error: OneShot::new(),
        }
    }

    pub fn settings(&self) -> &RoundSettings {
        &self.settings
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn state(&self) -> Option<&RoundState> {
        self.state.as_ref()
    }

    pub fn buzz(&self) -> BuzzSignal {
        self.buzz
    }

    pub fn buzz_seq(&self) -> u64 {
        self.buzz_seq
    }

    pub fn is_finished(&self) -> bool {
        self.finished.is_pending()
    }

    pub fn error(&self) -> Option<&GameError> {
        self.error.pending()
    }

    /// Enters `Loading` and returns the generation the word list response
    /// must carry to be accepted.
    pub fn begin_loading(&mut self, category: &str) -> Result<u64, GameError> {
        if self.phase != RoundPhase::Idle {
            return Err(GameError::InvalidPhase {
                action: "start",
                phase: self.phase,
            });
        }
        self.generation += 1;
        self.phase = RoundPhase::Loading;
        self.category = Some(category.to_string());
        self.error.acknowledge();
        debug!(category, generation = self.generation, "round: loading words");
        Ok(self.generation)
    }

    pub fn finish_loading(
        &mut self,
        generation: u64,
        result: Result<Vec<String>, WordSourceError>,
    ) -> Result<LoadOutcome, GameError> {
        if self.phase != RoundPhase::Loading || generation != self.generation {
            debug!(
                generation,
                current = self.generation,
                phase = %self.phase,
                "round: ignoring stale word list"
            );
            return Ok(LoadOutcome::Stale);
        }
        let category = self.category.clone().unwrap_or_default();

        let words = match result {
            Ok(words) => words,
            Err(err) => {
                warn!(category = %category, "round: failed to load words: {err}");
                return Err(self.fail_loading(GameError::Transport {
                    category,
                    reason: err.to_string(),
                }));
            }
        };

        let remaining = whole_seconds(self.settings.duration);
        let Some(state) = RoundState::new(words, remaining, self.settings.rng()) else {
            warn!(category = %category, "round: word service returned an empty list");
            return Err(self.fail_loading(GameError::EmptyWordList { category }));
        };

        info!(
            category = %category,
            words = state.queue.source().len(),
            remaining_seconds = remaining,
            "round: started"
        );
        self.state = Some(state);
        self.phase = RoundPhase::Playing;
        Ok(LoadOutcome::Started)
    }

    pub fn mark_correct(&mut self) -> Result<(), GameError> {
        self.ensure_playing("mark correct")?;
        self.adjust_score(1);
        self.raise_buzz(BuzzSignal::Correct);
        self.advance_word();
        Ok(())
    }

    pub fn mark_skip(&mut self) -> Result<(), GameError> {
        self.ensure_playing("skip")?;
        self.adjust_score(-1);
        self.advance_word();
        Ok(())
    }

    pub fn on_tick(&mut self, remaining_seconds: u64) {
        if self.phase != RoundPhase::Playing {
            return;
        }
        let Some(state) = self.state.as_mut() else {
            return;
        };
        debug_assert!(
            remaining_seconds <= state.remaining_seconds,
            "countdown went backwards: {} -> {remaining_seconds}",
            state.remaining_seconds
        );
        state.remaining_seconds = remaining_seconds;
        if remaining_seconds > 0 && remaining_seconds <= self.settings.panic_seconds {
            self.raise_buzz(BuzzSignal::CountdownPanic);
        }
    }

    pub fn on_timeout(&mut self) {
        if self.phase != RoundPhase::Playing {
            return;
        }
        let score = match self.state.as_mut() {
            Some(state) => {
                state.remaining_seconds = 0;
                state.score
            }
            None => 0,
        };
        self.phase = RoundPhase::Finished;
        self.raise_buzz(BuzzSignal::RoundOver);
        self.finished.raise(());
        info!(score, "round: finished");
    }

    pub fn acknowledge_finish(&mut self) {
        self.finished.acknowledge();
    }

    /// Clears the pending buzz only if `seq` is the one that raised it; an
    /// acknowledgement for an older buzz leaves a newer one pending.
    pub fn acknowledge_buzz(&mut self, seq: u64) {
        if seq != self.buzz_seq {
            debug!(seq, current = self.buzz_seq, "round: ignoring stale buzz acknowledgement");
            return;
        }
        self.buzz = BuzzSignal::None;
    }

    pub fn acknowledge_error(&mut self) {
        self.error.acknowledge();
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            phase: self.phase,
            category: self.category.clone(),
            remaining_seconds: self.state.as_ref().map_or(0, |s| s.remaining_seconds),
            score: self.state.as_ref().map_or(0, |s| s.score),
            current_word: self.state.as_ref().map(|s| s.current_word.clone()),
            buzz: self.buzz,
            buzz_seq: self.buzz_seq,
            finished: self.finished.is_pending(),
            error: self.error.pending().cloned(),
        }
    }

    fn raise_buzz(&mut self, signal: BuzzSignal) {
        self.buzz_seq += 1;
        self.buzz = signal;
    }

    fn fail_loading(&mut self, err: GameError) -> GameError {
        self.phase = RoundPhase::Idle;
        self.error.raise(err.clone());
        err
    }

    fn ensure_playing(&self, action: &'static str) -> Result<(), GameError> {
        if self.phase == RoundPhase::Playing {
            Ok(())
        } else {
            Err(GameError::InvalidPhase {
                action,
                phase: self.phase,
            })
        }
    }

    fn adjust_score(&mut self, delta: i32) {
        if let Some(state) = self.state.as_mut() {
            state.score += delta;
        }
    }

    fn advance_word(&mut self) {
        debug_assert_eq!(
            self.phase,
            RoundPhase::Playing,
            "words only advance while playing"
        );
        if let Some(state) = self.state.as_mut() {
            state.current_word = state.queue.next_word();
        }
    }
}

#[cfg(test)]
#[path = "tests/round_tests.rs"]
mod tests;
