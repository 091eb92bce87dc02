use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use shared::protocol::{GuessWordsQuery, GuessWordsResponse};
use tracing::{debug, info, warn};
use url::Url;

use crate::{WordSource, WordSourceError};

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches words from `GET {base_url}/guess/{category}?locale={locale}`.
#[derive(Debug, Clone)]
pub struct HttpWordSource {
    http: Client,
    base_url: Url,
}

impl HttpWordSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, WordSourceError> {
        let parsed = Url::parse(base_url.trim()).map_err(|err| WordSourceError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: err.to_string(),
        })?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(WordSourceError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "base url must be an http:// or https:// url".to_string(),
            });
        }

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(WordSourceError::Client)?;

        Ok(Self {
            http,
            base_url: parsed,
        })
    }

    pub(crate) fn guess_url(&self, category: &str) -> Result<Url, WordSourceError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| WordSourceError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: "base url cannot carry a path".to_string(),
            })?
            .pop_if_empty()
            .push("guess")
            .push(category);
        Ok(url)
    }
}

#[async_trait]
impl WordSource for HttpWordSource {
    async fn fetch_words(
        &self,
        category: &str,
        locale: &str,
    ) -> Result<Vec<String>, WordSourceError> {
        let url = self.guess_url(category)?;
        debug!(%url, locale, "words: requesting word list");

        let response = self
            .http
            .get(url)
            .query(&GuessWordsQuery {
                locale: locale.to_string(),
            })
            .send()
            .await
            .inspect_err(|err| warn!(category, locale, "words: request failed: {err}"))?
            .error_for_status()?;
        let body: GuessWordsResponse = response.json().await?;

        info!(
            category,
            locale,
            count = body.words.len(),
            "words: word list loaded"
        );
        Ok(body.words)
    }
}
