use serde::{Deserialize, Serialize};

/// Body of `GET /guess/{category}?locale=...`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessWordsResponse {
    #[serde(default)]
    pub words: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuessWordsQuery {
    pub locale: String,
}
