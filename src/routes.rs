use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::error::GatewayError;
use crate::gateway::TranslationOutput;
use crate::state::AppState;

pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/translate", get(translate))
        .route("/api/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn translate(
    State(state): State<AppState>,
    query: Option<Query<Vec<(String, String)>>>,
) -> Result<Json<TranslationOutput>, GatewayError> {
    let query = query.map(|Query(q)| q).unwrap_or_default();
    state.gateway.handle(&query).await.map(Json)
}

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "provider": state.gateway.provider_name(),
    }))
}
