use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One entry of a provider result.
///
/// Only the fields the gateway cares about are typed; anything else the
/// provider sends is carried through untouched in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    pub translated_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detected_source_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Translation {
    pub fn new(translated_text: impl Into<String>, detected_source_language: Option<&str>) -> Self {
        Self {
            translated_text: translated_text.into(),
            detected_source_language: detected_source_language.map(|l| l.to_string()),
            model: None,
            extra: serde_json::Map::new(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed provider response: {0}")]
    Malformed(String),
}

/// Translation capability backed by an external service.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Translate `text` into `target_language`.
    ///
    /// Returns the provider's entries in order; a single input string
    /// normally yields exactly one entry.
    async fn translate(
        &self,
        text: &str,
        target_language: &str,
    ) -> Result<Vec<Translation>, ProviderError>;

    fn name(&self) -> &str;
}
