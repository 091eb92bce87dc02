//! Word list providers for a guessing round.

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

mod http;
mod locale;
mod static_source;

pub use http::{HttpWordSource, DEFAULT_REQUEST_TIMEOUT};
pub use locale::{default_locale, normalize_locale, FALLBACK_LOCALE};
pub use static_source::StaticWordSource;

#[derive(Debug, Error)]
pub enum WordSourceError {
    #[error("invalid word service url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("word service request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unknown category '{0}'")]
    UnknownCategory(String),
    #[error("failed to read words file '{}': {source}", path.display())]
    ReadWordsFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse words file '{}': {source}", path.display())]
    ParseWordsFile {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Supplies the guessable words for one round.
///
/// Implementations are called once per round start. An empty list is a valid
/// response here; deciding what an empty round means is up to the caller.
#[async_trait]
pub trait WordSource: Send + Sync {
    async fn fetch_words(
        &self,
        category: &str,
        locale: &str,
    ) -> Result<Vec<String>, WordSourceError>;
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
