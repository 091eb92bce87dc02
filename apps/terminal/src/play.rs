use anyhow::{Context, Result};
use game_core::{format_remaining, RoundController, RoundSnapshot};
use shared::domain::RoundPhase;

use crate::{buzzer::Buzzer, Input};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    Finished(i32),
    LoadFailed,
    Abandoned,
}

#[derive(Default)]
struct Rendered {
    word: Option<String>,
    seconds: Option<u64>,
    phase: RoundPhase,
    buzz_seq: u64,
}

/// Drives one round from the terminal until time runs out, loading fails, or
/// the player gives up.
pub async fn play_round(
    controller: &RoundController,
    category: &str,
    locale: &str,
    input: &mut Input,
    buzzer: &Buzzer,
) -> Result<RoundOutcome> {
    let mut updates = controller.subscribe();
    controller.start(category, locale)?;
    println!();
    println!("Loading '{category}' words ({locale})...");

    let mut rendered = Rendered::default();
    loop {
        tokio::select! {
            changed = updates.changed() => {
                changed.context("round stopped unexpectedly")?;
                let snapshot = updates.borrow_and_update().clone();

                if snapshot.buzz.is_pending() && snapshot.buzz_seq != rendered.buzz_seq {
                    rendered.buzz_seq = snapshot.buzz_seq;
                    buzzer.buzz(snapshot.buzz);
                    controller.acknowledge_buzz(snapshot.buzz_seq)?;
                }
                if let Some(message) = snapshot.error_message() {
                    println!("{message}");
                    controller.acknowledge_error()?;
                    return Ok(RoundOutcome::LoadFailed);
                }
                if snapshot.finished {
                    controller.acknowledge_finish()?;
                    println!("Time's up!");
                    return Ok(RoundOutcome::Finished(snapshot.score));
                }
                render(&snapshot, &mut rendered);
            }
            line = input.next_line() => {
                let Some(line) = line.context("failed to read from stdin")? else {
                    return Ok(RoundOutcome::Abandoned);
                };
                match line.trim() {
                    "" | "c" => controller.mark_correct()?,
                    "s" => controller.mark_skip()?,
                    "q" => return Ok(RoundOutcome::Abandoned),
                    other => println!("unknown command '{other}' (Enter = correct, s = skip, q = quit)"),
                }
            }
        }
    }
}

fn render(snapshot: &RoundSnapshot, rendered: &mut Rendered) {
    if snapshot.phase == RoundPhase::Playing && rendered.phase != RoundPhase::Playing {
        println!("Go! Enter = correct, s = skip, q = give up");
    }
    rendered.phase = snapshot.phase;

    let Some(word) = snapshot.current_word.as_ref() else {
        return;
    };
    let clock = format_remaining(snapshot.remaining_seconds);

    if rendered.word.as_ref() != Some(word) {
        println!("[{clock}] score {:>3} | {word}", snapshot.score);
        rendered.word = Some(word.clone());
        rendered.seconds = Some(snapshot.remaining_seconds);
        return;
    }

    let seconds = snapshot.remaining_seconds;
    if rendered.seconds != Some(seconds) {
        rendered.seconds = Some(seconds);
        if seconds <= 10 || seconds % 15 == 0 {
            println!("[{clock}]");
        }
    }
}
