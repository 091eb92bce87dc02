//! Round engine for a timed word-guessing game: category menu, countdown
//! round with a shuffled word queue, and the final score screen.

pub mod controller;
pub mod menu;
pub mod queue;
pub mod round;
pub mod score;
pub mod signal;
pub mod timer;

pub use controller::RoundController;
pub use menu::CategoryMenu;
pub use queue::WordQueue;
pub use round::{
    LoadOutcome, Round, RoundSettings, RoundSnapshot, RoundState, SettingsError,
    DEFAULT_PANIC_SECONDS, DEFAULT_ROUND_DURATION, DEFAULT_TICK_INTERVAL,
};
pub use score::ScoreController;
pub use signal::OneShot;
pub use timer::{format_remaining, CountdownTimer};
