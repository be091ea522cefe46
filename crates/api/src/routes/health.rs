use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::error::ApiResult;
use crate::state::AppState;

/// Health check routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/v1/ping", get(ping))
}

/// Full health check: the data file must still be reachable.
async fn health_check(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    state.store().probe().await?;

    let (users, products) = state
        .store()
        .read(|doc| (doc.users.len(), doc.products.len()))
        .await;
    Ok(Json(json!({
        "status": "ok",
        "dataFile": "reachable",
        "users": users,
        "products": products,
    })))
}

/// Lightweight ping, no storage check.
async fn ping() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
