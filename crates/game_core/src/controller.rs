//! Async handle around [`Round`]: one actor task owns the round and applies
//! player commands, countdown ticks and fetch results in arrival order.

use std::{sync::Arc, time::Duration};

use shared::error::GameError;
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
};
use tracing::{debug, warn};
use word_source::{WordSource, WordSourceError};

use crate::{
    round::{whole_seconds, LoadOutcome, Round, RoundSettings, RoundSnapshot},
    timer::CountdownTimer,
};

enum RoundCommand {
    Start {
        category: String,
        locale: String,
    },
    WordsLoaded {
        generation: u64,
        result: Result<Vec<String>, WordSourceError>,
    },
    Tick {
        remaining: Duration,
    },
    Timeout,
    MarkCorrect,
    MarkSkip,
    AcknowledgeBuzz {
        seq: u64,
    },
    AcknowledgeFinish,
    AcknowledgeError,
}

impl RoundCommand {
    fn name(&self) -> &'static str {
        match self {
            RoundCommand::Start { .. } => "start",
            RoundCommand::WordsLoaded { .. } => "words_loaded",
            RoundCommand::Tick { .. } => "tick",
            RoundCommand::Timeout => "timeout",
            RoundCommand::MarkCorrect => "mark_correct",
            RoundCommand::MarkSkip => "mark_skip",
            RoundCommand::AcknowledgeBuzz { .. } => "acknowledge_buzz",
            RoundCommand::AcknowledgeFinish => "acknowledge_finish",
            RoundCommand::AcknowledgeError => "acknowledge_error",
        }
    }
}

/// Runs one timed round. Create a new controller for every round.
///
/// Commands are queued and applied asynchronously; observe their effect via
/// [`RoundController::subscribe`]. Commands that do not fit the current phase
/// are logged and dropped. Dropping the controller stops the round: the
/// countdown is cancelled and a word list still in flight is discarded.
pub struct RoundController {
    commands: mpsc::UnboundedSender<RoundCommand>,
    snapshots: watch::Receiver<RoundSnapshot>,
    task: JoinHandle<()>,
}

impl RoundController {
    /// Must be called from within a tokio runtime.
    pub fn spawn(source: Arc<dyn WordSource>, settings: RoundSettings) -> Self {
        let round = Round::new(settings);
        let (commands, inbox) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshots) = watch::channel(round.snapshot());
        let task = tokio::spawn(run_round(
            round,
            source,
            inbox,
            commands.clone(),
            snapshot_tx,
        ));
        Self {
            commands,
            snapshots,
            task,
        }
    }

    pub fn start(
        &self,
        category: impl Into<String>,
        locale: impl Into<String>,
    ) -> Result<(), GameError> {
        self.send(RoundCommand::Start {
            category: category.into(),
            locale: locale.into(),
        })
    }

    pub fn mark_correct(&self) -> Result<(), GameError> {
        self.send(RoundCommand::MarkCorrect)
    }

    pub fn mark_skip(&self) -> Result<(), GameError> {
        self.send(RoundCommand::MarkSkip)
    }

    /// `seq` is the [`RoundSnapshot::buzz_seq`] the caller reacted to.
    pub fn acknowledge_buzz(&self, seq: u64) -> Result<(), GameError> {
        self.send(RoundCommand::AcknowledgeBuzz { seq })
    }

    pub fn acknowledge_finish(&self) -> Result<(), GameError> {
        self.send(RoundCommand::AcknowledgeFinish)
    }

    pub fn acknowledge_error(&self) -> Result<(), GameError> {
        self.send(RoundCommand::AcknowledgeError)
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<RoundSnapshot> {
        self.snapshots.clone()
    }

    pub fn shutdown(self) {
        drop(self);
    }

    fn send(&self, command: RoundCommand) -> Result<(), GameError> {
        let name = command.name();
        self.commands
            .send(command)
            .map_err(|_| GameError::ControllerClosed)?;
        debug!(command = name, "round: queued command");
        Ok(())
    }
}

impl Drop for RoundController {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run_round(
    mut round: Round,
    source: Arc<dyn WordSource>,
    mut inbox: mpsc::UnboundedReceiver<RoundCommand>,
    outbox: mpsc::UnboundedSender<RoundCommand>,
    snapshots: watch::Sender<RoundSnapshot>,
) {
    let mut timer: Option<CountdownTimer> = None;

    while let Some(command) = inbox.recv().await {
        let name = command.name();
        match command {
            RoundCommand::Start { category, locale } => match round.begin_loading(&category) {
                Ok(generation) => {
                    spawn_fetch(
                        Arc::clone(&source),
                        outbox.clone(),
                        generation,
                        category,
                        locale,
                    );
                }
                Err(err) => warn!("round: start ignored: {err}"),
            },
            RoundCommand::WordsLoaded { generation, result } => {
                match round.finish_loading(generation, result) {
                    Ok(LoadOutcome::Started) => timer = Some(arm_timer(round.settings(), &outbox)),
                    Ok(LoadOutcome::Stale) => {}
                    Err(err) => debug!(code = ?err.code(), "round: load failed"),
                }
            }
            RoundCommand::Tick { remaining } => round.on_tick(whole_seconds(remaining)),
            RoundCommand::Timeout => {
                round.on_timeout();
                timer = None;
            }
            RoundCommand::MarkCorrect => {
                if let Err(err) = round.mark_correct() {
                    warn!(command = name, "round: {err}");
                }
            }
            RoundCommand::MarkSkip => {
                if let Err(err) = round.mark_skip() {
                    warn!(command = name, "round: {err}");
                }
            }
            RoundCommand::AcknowledgeBuzz { seq } => round.acknowledge_buzz(seq),
            RoundCommand::AcknowledgeFinish => round.acknowledge_finish(),
            RoundCommand::AcknowledgeError => round.acknowledge_error(),
        }

        snapshots.send_replace(round.snapshot());
    }

    drop(timer);
}

fn spawn_fetch(
    source: Arc<dyn WordSource>,
    outbox: mpsc::UnboundedSender<RoundCommand>,
    generation: u64,
    category: String,
    locale: String,
) {
    tokio::spawn(async move {
        let result = source.fetch_words(&category, &locale).await;
        if outbox
            .send(RoundCommand::WordsLoaded { generation, result })
            .is_err()
        {
            debug!(category = %category, generation, "round: discarded word list after teardown");
        }
    });
}

fn arm_timer(
    settings: &RoundSettings,
    outbox: &mpsc::UnboundedSender<RoundCommand>,
) -> CountdownTimer {
    let ticks = outbox.clone();
    let finish = outbox.clone();
    CountdownTimer::start(
        settings.duration(),
        settings.tick_interval(),
        move |remaining| {
            let _ = ticks.send(RoundCommand::Tick { remaining });
        },
        move || {
            let _ = finish.send(RoundCommand::Timeout);
        },
    )
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
