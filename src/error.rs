use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::request::ValidationError;
use crate::translate::ProviderError;

pub const UNAUTHORIZED_MESSAGE: &str = "Invalid API Key";
pub const UNRECOGNISED_MODE_MESSAGE: &str =
    "Unrecognised result mode, allowed modes are 'simple' and 'json'.";
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal server error occurred";

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("{}", UNAUTHORIZED_MESSAGE)]
    Unauthorized,

    #[error("{}", UNRECOGNISED_MODE_MESSAGE)]
    UnrecognisedMode,

    #[error("provider call failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("provider returned no translations")]
    EmptyResult,
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Validation(_) | GatewayError::UnrecognisedMode => StatusCode::BAD_REQUEST,
            GatewayError::Unauthorized => StatusCode::UNAUTHORIZED,
            GatewayError::Provider(_) | GatewayError::EmptyResult => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Caller-facing message. Server-side failures never expose their cause.
    pub fn public_message(&self) -> String {
        match self {
            GatewayError::Validation(err) => err.to_string(),
            GatewayError::Unauthorized => UNAUTHORIZED_MESSAGE.to_string(),
            GatewayError::UnrecognisedMode => UNRECOGNISED_MODE_MESSAGE.to_string(),
            GatewayError::Provider(_) | GatewayError::EmptyResult => {
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        }
    }

    pub fn envelope(&self) -> ErrorEnvelope {
        let status = self.status_code();
        ErrorEnvelope {
            status_code: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message: self.public_message(),
            validation: match self {
                GatewayError::Validation(err) => Some(ValidationDetail {
                    source: "query",
                    keys: vec![err.field.clone()],
                }),
                _ => None,
            },
        }
    }
}

/// JSON error body: `{"statusCode", "error", "message"}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    pub status_code: u16,
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationDetail>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationDetail {
    pub source: &'static str,
    pub keys: Vec<String>,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.envelope())).into_response()
    }
}
