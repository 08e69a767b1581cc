use std::sync::Arc;

use axum::http::StatusCode;
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::allow_list::{mask_key, AllowList};
use crate::error::GatewayError;
use crate::request::{validate_query, OutputMode, TranslationRequest};
use crate::telemetry::{SpanGuard, TelemetrySink};
use crate::translate::{Translation, TranslationProvider};

const SPAN_OP: &str = "GET /api/v1/translate";

/// Successful response body: the whole provider result, or its first entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TranslationOutput {
    Full(Vec<Translation>),
    Single(Translation),
}

/// Authorizes callers, dispatches to the provider and reshapes its result.
///
/// Holds only read-only state, so one instance is shared by every request.
pub struct TranslationGateway {
    provider: Arc<dyn TranslationProvider>,
    allow_list: AllowList,
    telemetry: Arc<dyn TelemetrySink>,
}

impl TranslationGateway {
    pub fn new(
        provider: Arc<dyn TranslationProvider>,
        allow_list: AllowList,
        telemetry: Arc<dyn TelemetrySink>,
    ) -> Self {
        Self {
            provider,
            allow_list,
            telemetry,
        }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Full per-request pipeline: validate, authorize, translate, reshape.
    ///
    /// A telemetry span covers the whole call and is closed with the
    /// response status on every path.
    pub async fn handle(
        &self,
        query: &[(String, String)],
    ) -> Result<TranslationOutput, GatewayError> {
        let span = SpanGuard::start(self.telemetry.as_ref(), SPAN_OP);

        let result = match validate_query(query) {
            Ok(request) => self.authorize_and_translate(&request).await,
            Err(err) => {
                warn!("Rejected request: {}", err);
                Err(GatewayError::Validation(err))
            }
        };

        let status = match &result {
            Ok(_) => StatusCode::OK,
            Err(err) => err.status_code(),
        };
        span.finish(status.as_u16());
        result
    }

    /// Authorization, dispatch and reshaping for an already validated request.
    pub async fn authorize_and_translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationOutput, GatewayError> {
        if !self.allow_list.contains(&request.api_key) {
            warn!("Unauthorized request with key {}", mask_key(&request.api_key));
            return Err(GatewayError::Unauthorized);
        }

        debug!(
            "Dispatching translation: provider={}, target={}",
            self.provider.name(),
            request.target_language
        );

        let translations = self
            .provider
            .translate(&request.text, &request.target_language)
            .await
            .map_err(|e| {
                error!("Translation provider failed: {}", e);
                GatewayError::Provider(e)
            })?;

        match &request.output_mode {
            OutputMode::Json => Ok(TranslationOutput::Full(translations)),
            OutputMode::Simple => translations
                .into_iter()
                .next()
                .map(TranslationOutput::Single)
                .ok_or_else(|| {
                    error!("Provider returned no translations for a simple-mode request");
                    GatewayError::EmptyResult
                }),
            OutputMode::Other(mode) => {
                warn!("Unrecognised result mode: {}", mode);
                Err(GatewayError::UnrecognisedMode)
            }
        }
    }
}
