use std::fmt;

use serde::{Deserialize, Serialize};

/// A selectable word category: the label shown to the player and the key sent
/// to the word service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    pub label: String,
    pub key: String,
}

impl Category {
    pub fn new(label: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            key: key.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundPhase {
    #[default]
    Idle,
    Loading,
    Playing,
    Finished,
}

impl fmt::Display for RoundPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RoundPhase::Idle => "idle",
            RoundPhase::Loading => "loading",
            RoundPhase::Playing => "playing",
            RoundPhase::Finished => "finished",
        };
        f.write_str(name)
    }
}

/// Haptic feedback requested by the round. `None` means nothing is pending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuzzSignal {
    #[default]
    None,
    Correct,
    RoundOver,
    CountdownPanic,
}

impl BuzzSignal {
    pub fn is_pending(self) -> bool {
        self != BuzzSignal::None
    }
}
