use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use game_core::{RoundSettings, SettingsError};
use serde::Deserialize;
use shared::domain::Category;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    pub request_timeout: Duration,
    pub round_duration: Duration,
    pub tick_interval: Duration,
    pub panic_seconds: u64,
    pub categories: Vec<Category>,
    pub words_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8080".into(),
            request_timeout: word_source::DEFAULT_REQUEST_TIMEOUT,
            round_duration: game_core::DEFAULT_ROUND_DURATION,
            tick_interval: game_core::DEFAULT_TICK_INTERVAL,
            panic_seconds: game_core::DEFAULT_PANIC_SECONDS,
            categories: default_categories(),
            words_file: None,
        }
    }
}

impl Settings {
    pub fn round_settings(&self) -> Result<RoundSettings, SettingsError> {
        RoundSettings::new(self.round_duration, self.tick_interval, self.panic_seconds)
    }
}

pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new("Animais", "animals"),
        Category::new("Emoções", "emotions"),
        Category::new("Objetos", "objects"),
    ]
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    server_url: Option<String>,
    request_timeout_secs: Option<u64>,
    round_seconds: Option<u64>,
    tick_millis: Option<u64>,
    panic_seconds: Option<u64>,
    words_file: Option<PathBuf>,
    #[serde(default)]
    categories: Vec<Category>,
}

pub fn load_settings(path: &Path) -> Settings {
    load_settings_with(path, |name| std::env::var(name).ok())
}

/// Defaults, then the TOML file at `path` if it exists, then environment
/// variables looked up through `env`.
pub(crate) fn load_settings_with(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<FileConfig>(&raw) {
            Ok(file_cfg) => apply_file_config(&mut settings, file_cfg),
            Err(err) => warn!(path = %path.display(), "config: ignoring unreadable file: {err}"),
        }
    }

    if let Some(v) = env("MIMIC_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = env("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(secs) = env("APP__REQUEST_TIMEOUT_SECS").and_then(|v| parse_positive(&v)) {
        settings.request_timeout = Duration::from_secs(secs);
    }
    if let Some(secs) = env("APP__ROUND_SECONDS").and_then(|v| parse_positive(&v)) {
        settings.round_duration = Duration::from_secs(secs);
    }
    if let Some(secs) = env("APP__PANIC_SECONDS").and_then(|v| v.trim().parse::<u64>().ok()) {
        settings.panic_seconds = secs;
    }

    if let Some(v) = env("APP__WORDS_FILE") {
        settings.words_file = Some(PathBuf::from(v));
    }

    settings
}

fn apply_file_config(settings: &mut Settings, file_cfg: FileConfig) {
    if let Some(v) = file_cfg.server_url {
        settings.server_url = v;
    }
    if let Some(secs) = file_cfg.request_timeout_secs.filter(|s| *s > 0) {
        settings.request_timeout = Duration::from_secs(secs);
    }
    if let Some(secs) = file_cfg.round_seconds.filter(|s| *s > 0) {
        settings.round_duration = Duration::from_secs(secs);
    }
    if let Some(millis) = file_cfg.tick_millis.filter(|m| *m > 0) {
        settings.tick_interval = Duration::from_millis(millis);
    }
    if let Some(secs) = file_cfg.panic_seconds {
        settings.panic_seconds = secs;
    }
    if file_cfg.words_file.is_some() {
        settings.words_file = file_cfg.words_file;
    }
    if !file_cfg.categories.is_empty() {
        settings.categories = file_cfg.categories;
    }
}

fn parse_positive(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok().filter(|v| *v > 0)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
