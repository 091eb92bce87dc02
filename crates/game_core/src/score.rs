use crate::signal::OneShot;

/// Final score screen: shows the score of the round that just ended and asks
/// whether to play again.
#[derive(Debug, Clone, Default)]
pub struct ScoreController {
    score: i32,
    play_again: OneShot<()>,
}

impl ScoreController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn initialize(&mut self, final_score: i32) {
        self.score = final_score;
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn request_play_again(&mut self) {
        self.play_again.raise(());
    }

    pub fn play_again_requested(&self) -> bool {
        self.play_again.is_pending()
    }

    pub fn acknowledge_play_again(&mut self) {
        self.play_again.acknowledge();
    }
}
