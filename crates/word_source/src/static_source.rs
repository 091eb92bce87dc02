use std::{collections::HashMap, fs, path::Path};

use async_trait::async_trait;
use tracing::debug;

use crate::{WordSource, WordSourceError};

/// In-memory word lists keyed by category, ignoring locale.
///
/// The TOML form maps each category key to its words:
///
/// ```toml
/// animals = ["cat", "dog", "fish"]
/// objects = ["chair", "lamp"]
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticWordSource {
    words: HashMap<String, Vec<String>>,
}

impl StaticWordSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category<I, S>(mut self, key: impl Into<String>, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.words
            .insert(key.into(), words.into_iter().map(Into::into).collect());
        self
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, toml::de::Error> {
        let words = toml::from_str::<HashMap<String, Vec<String>>>(raw)?;
        Ok(Self { words })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, WordSourceError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| WordSourceError::ReadWordsFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw).map_err(|source| WordSourceError::ParseWordsFile {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.words.keys().map(String::as_str)
    }
}

#[async_trait]
impl WordSource for StaticWordSource {
    async fn fetch_words(
        &self,
        category: &str,
        locale: &str,
    ) -> Result<Vec<String>, WordSourceError> {
        debug!(category, locale, "words: serving static word list");
        self.words
            .get(category)
            .cloned()
            .ok_or_else(|| WordSourceError::UnknownCategory(category.to_string()))
    }
}
