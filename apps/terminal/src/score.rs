use anyhow::{Context, Result};
use game_core::ScoreController;

use crate::{prompt, Input};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterScore {
    PlayAgain,
    Menu,
    Quit,
}

pub async fn show_score(
    scores: &mut ScoreController,
    final_score: i32,
    input: &mut Input,
) -> Result<AfterScore> {
    scores.initialize(final_score);
    println!();
    println!("Final score: {}", scores.score());

    while !scores.play_again_requested() {
        prompt("[p]lay again, [m]enu, [q]uit");
        let Some(line) = input.next_line().await.context("failed to read from stdin")? else {
            return Ok(AfterScore::Quit);
        };
        match line.trim() {
            "" | "p" => scores.request_play_again(),
            "m" => return Ok(AfterScore::Menu),
            "q" => return Ok(AfterScore::Quit),
            other => println!("unknown choice '{other}'"),
        }
    }

    scores.acknowledge_play_again();
    Ok(AfterScore::PlayAgain)
}
