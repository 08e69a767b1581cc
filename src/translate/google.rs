use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::interface::{ProviderError, Translation, TranslationProvider};
use crate::config::GoogleConfig;

#[derive(Debug, Serialize)]
struct TranslateBody<'a> {
    q: [&'a str; 1],
    target: &'a str,
    format: &'static str,
}

#[derive(Debug, Deserialize)]
struct TranslateEnvelope {
    data: TranslateData,
}

#[derive(Debug, Deserialize)]
struct TranslateData {
    #[serde(default)]
    translations: Vec<Translation>,
}

/// Client for the Google Cloud Translation v2 REST API, authenticated with
/// an API key.
#[derive(Debug, Clone)]
pub struct GoogleTranslateClient {
    client: Client,
    base_url: String,
    api_key: String,
    project_id: String,
}

impl GoogleTranslateClient {
    pub fn new(config: &GoogleConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        info!("Creating translation client for project {}", config.project_id);

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            project_id: config.project_id.clone(),
        })
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }
}

#[async_trait]
impl TranslationProvider for GoogleTranslateClient {
    async fn translate(
        &self,
        text: &str,
        target_language: &str,
    ) -> Result<Vec<Translation>, ProviderError> {
        let body = TranslateBody {
            q: [text],
            target: target_language,
            format: "text",
        };

        debug!("Sending translate request: target={}, chars={}", target_language, text.chars().count());

        let response = self
            .client
            .post(&self.base_url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let envelope: TranslateEnvelope = serde_json::from_slice(&bytes)
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;

        debug!("Received {} translation(s)", envelope.data.translations.len());
        Ok(envelope.data.translations)
    }

    fn name(&self) -> &str {
        "google-translate-v2"
    }
}
