use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::RoundPhase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Transport,
    EmptyWordList,
    InvalidCategoryIndex,
    InvalidPhase,
    ControllerClosed,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("failed to load words for category '{category}': {reason}")]
    Transport { category: String, reason: String },
    #[error("word service returned no words for category '{category}'")]
    EmptyWordList { category: String },
    #[error("category index {index} is out of range for {len} categories")]
    InvalidCategoryIndex { index: usize, len: usize },
    #[error("cannot {action} while the round is {phase}")]
    InvalidPhase {
        action: &'static str,
        phase: RoundPhase,
    },
    #[error("round controller is no longer running")]
    ControllerClosed,
}

impl GameError {
    pub fn code(&self) -> ErrorCode {
        match self {
            GameError::Transport { .. } => ErrorCode::Transport,
            GameError::EmptyWordList { .. } => ErrorCode::EmptyWordList,
            GameError::InvalidCategoryIndex { .. } => ErrorCode::InvalidCategoryIndex,
            GameError::InvalidPhase { .. } => ErrorCode::InvalidPhase,
            GameError::ControllerClosed => ErrorCode::ControllerClosed,
        }
    }

    /// Text suitable for a transient on-screen message.
    pub fn user_message(&self) -> &'static str {
        match self.code() {
            ErrorCode::Transport => {
                "Could not load the words. Check your connection and pick a category to try again."
            }
            ErrorCode::EmptyWordList => "There are no words in this category yet.",
            ErrorCode::InvalidCategoryIndex => "Please pick one of the listed categories.",
            ErrorCode::InvalidPhase => "That action is not available right now.",
            ErrorCode::ControllerClosed => "The round has already ended.",
        }
    }
}
