mod buzzer;
mod config;
mod play;
mod score;
mod title;

use std::{
    io::Write,
    path::PathBuf,
    sync::Arc,
    time::Duration,
};

use anyhow::{Context, Result};
use clap::Parser;
use game_core::{CategoryMenu, RoundController, RoundSettings, ScoreController};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use word_source::{HttpWordSource, StaticWordSource, WordSource};

use crate::{
    buzzer::Buzzer,
    config::{load_settings, Settings},
    play::RoundOutcome,
    score::AfterScore,
};

pub(crate) type Input = Lines<BufReader<Stdin>>;

#[derive(Parser, Debug)]
#[command(name = "mimic", about = "Charades word game in the terminal")]
struct Args {
    /// TOML config file; missing files fall back to defaults.
    #[arg(long, default_value = "mimic.toml")]
    config: PathBuf,
    /// Word server base URL.
    #[arg(long)]
    server_url: Option<String>,
    /// Play offline from a TOML word list instead of the server.
    #[arg(long)]
    words_file: Option<PathBuf>,
    /// Locale sent with word requests (defaults to the system locale).
    #[arg(long)]
    locale: Option<String>,
    #[arg(long)]
    round_seconds: Option<u64>,
    /// Fixed shuffle seed for reproducible word order.
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value = "info")]
    log_level: String,
    /// Don't ring the terminal bell on buzz.
    #[arg(long)]
    no_bell: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let mut settings = load_settings(&args.config);
    apply_args(&mut settings, &args);
    let round_settings = build_round_settings(&settings, args.seed)?;
    let source = build_source(&settings)?;
    let locale = args
        .locale
        .as_deref()
        .and_then(word_source::normalize_locale)
        .unwrap_or_else(word_source::default_locale);

    info!(
        server_url = %settings.server_url,
        locale = %locale,
        round_secs = settings.round_duration.as_secs(),
        offline = settings.words_file.is_some(),
        "mimic: starting"
    );

    let buzzer = Buzzer::new(!args.no_bell);
    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let mut menu = CategoryMenu::new(settings.categories.clone());
    let mut scores = ScoreController::new();

    println!("MIMIC! Act out the word, your team guesses.");
    'menu: while let Some(category) = title::choose_category(&mut menu, &mut input).await? {
        loop {
            let controller = RoundController::spawn(source.clone(), round_settings.clone());
            let outcome =
                play::play_round(&controller, &category, &locale, &mut input, &buzzer).await?;
            controller.shutdown();

            match outcome {
                RoundOutcome::Finished(final_score) => {
                    match score::show_score(&mut scores, final_score, &mut input).await? {
                        AfterScore::PlayAgain => continue,
                        AfterScore::Menu => continue 'menu,
                        AfterScore::Quit => break 'menu,
                    }
                }
                RoundOutcome::LoadFailed => continue 'menu,
                RoundOutcome::Abandoned => {
                    info!(category = %category, "mimic: round abandoned");
                    continue 'menu;
                }
            }
        }
    }

    println!("Bye!");
    Ok(())
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn apply_args(settings: &mut Settings, args: &Args) {
    if let Some(url) = &args.server_url {
        settings.server_url = url.clone();
    }
    if let Some(path) = &args.words_file {
        settings.words_file = Some(path.clone());
    }
    match args.round_seconds {
        Some(0) => warn!("mimic: ignoring --round-seconds 0"),
        Some(secs) => settings.round_duration = Duration::from_secs(secs),
        None => {}
    }
}

fn build_round_settings(settings: &Settings, seed: Option<u64>) -> Result<RoundSettings> {
    let round_settings = settings
        .round_settings()
        .context("invalid round timing settings")?;
    Ok(match seed {
        Some(seed) => round_settings.with_shuffle_seed(seed),
        None => round_settings,
    })
}

fn build_source(settings: &Settings) -> Result<Arc<dyn WordSource>> {
    if let Some(path) = &settings.words_file {
        let source = StaticWordSource::from_file(path)
            .with_context(|| format!("failed to load word list {}", path.display()))?;
        let known: Vec<&str> = source.categories().collect();
        info!(path = %path.display(), categories = ?known, "mimic: using offline word list");
        return Ok(Arc::new(source));
    }

    let source = HttpWordSource::new(&settings.server_url, settings.request_timeout)
        .with_context(|| format!("invalid server url {}", settings.server_url))?;
    Ok(Arc::new(source))
}

pub(crate) fn prompt(label: &str) {
    let mut out = std::io::stdout().lock();
    let _ = write!(out, "{label}> ");
    let _ = out.flush();
}
