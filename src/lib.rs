pub mod allow_list;
pub mod config;
pub mod error;
pub mod gateway;
pub mod request;
pub mod routes;
pub mod state;
pub mod telemetry;
pub mod translate;

pub use crate::config::Config;
pub use crate::error::GatewayError;
pub use crate::gateway::{TranslationGateway, TranslationOutput};
pub use crate::state::AppState;
