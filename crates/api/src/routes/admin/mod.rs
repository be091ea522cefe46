//! Per-user admin endpoints. Every handler runs one core operation inside
//! [`DocumentStore::update`](menu_panel_core::DocumentStore::update), so the
//! permission check, the edit and its audit entry are persisted together or
//! not at all.
mod catalog;
mod settings;
mod users;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use crate::error::{ApiError, ApiResult};
use crate::extract::AdminSession;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/admin/views/{view}", get(view_access))
        .merge(users::routes())
        .merge(catalog::routes())
        .merge(settings::routes())
}

/// Whether the signed-in user may open a panel view. A denial is recorded
/// as a security alert.
async fn view_access(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
    Path(view): Path<String>,
) -> ApiResult<Json<Value>> {
    let allowed = state
        .store()
        .update(|doc| Ok::<_, ApiError>(session.check_view_access(doc, &view)))
        .await?;
    if !allowed {
        return Err(ApiError::Forbidden(format!("view {view:?} is not available")));
    }
    Ok(Json(json!({ "success": true, "view": view })))
}
