use std::sync::Arc;

use anyhow::{Context, Result};

use crate::allow_list::AllowList;
use crate::config::Config;
use crate::gateway::TranslationGateway;
use crate::telemetry;
use crate::translate::{GoogleTranslateClient, TranslationProvider};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub gateway: Arc<TranslationGateway>,
}

impl AppState {
    /// Wire the production collaborators from configuration.
    pub fn new(config: Config) -> Result<Self> {
        let provider = GoogleTranslateClient::new(&config.google)
            .context("Failed to create translation client")?;
        Ok(Self::with_provider(config, Arc::new(provider)))
    }

    /// Build state around an already constructed provider.
    pub fn with_provider(config: Config, provider: Arc<dyn TranslationProvider>) -> Self {
        let allow_list = AllowList::new(config.allowed_keys.iter().cloned());
        let telemetry = telemetry::from_config(&config.sentry);
        let gateway = TranslationGateway::new(provider, allow_list, telemetry);

        Self {
            config: Arc::new(config),
            gateway: Arc::new(gateway),
        }
    }
}
