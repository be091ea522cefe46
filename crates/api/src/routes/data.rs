use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    routing::get,
    Json, Router,
};
use menu_panel_core::{
    document::validate::require_object, mutation::document::replace_document, normalize,
};
use serde_json::{json, Value};

use crate::error::{ApiError, ApiResult};
use crate::extract::Caller;
use crate::state::AppState;

/// Whole-document read and save. Saved documents may carry inline images,
/// so the body limit is the upload limit.
pub fn routes(body_limit: usize) -> Router<AppState> {
    Router::new().route(
        "/api/data",
        get(read_document)
            .post(save_document)
            .layer(DefaultBodyLimit::max(body_limit)),
    )
}

async fn read_document(State(state): State<AppState>) -> Json<Value> {
    let document = state.store().snapshot().await;
    Json(json!({ "success": true, "data": document }))
}

/// Replace the document. The body is normalized first, so legacy or partial
/// shapes are stored in the current form. A user token must carry every
/// capability and cannot overwrite the audit log.
async fn save_document(
    State(state): State<AppState>,
    caller: Caller,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(raw) = payload?;
    require_object(&raw)?;

    let document = normalize(&raw);
    match &caller {
        Caller::SharedSecret => state.store().replace(document).await?,
        Caller::User(session) => {
            state
                .store()
                .update(|doc| replace_document(session, doc, document).map_err(ApiError::from))
                .await?
        }
    }

    tracing::info!(by = caller.username(), "document replaced");
    Ok(Json(json!({ "success": true })))
}
