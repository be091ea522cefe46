use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use menu_panel_core::mutation::{types::NewUser, users};
use serde_json::{json, Value};

use crate::error::ApiResult;
use crate::extract::AdminSession;
use crate::routes::session::user_view;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/admin/users", get(list_users).post(add_user))
        .route("/api/admin/users/{id}", delete(delete_user))
        .route("/api/admin/logs", get(list_logs))
}

async fn list_users(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
) -> ApiResult<Json<Value>> {
    let listed = state
        .store()
        .read(|doc| {
            users::list_users(&session, doc).map(|all| all.iter().map(user_view).collect::<Vec<_>>())
        })
        .await?;
    Ok(Json(json!({ "success": true, "users": listed })))
}

async fn add_user(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
    payload: Result<Json<NewUser>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let Json(input) = payload?;
    let user = state
        .store()
        .update(|doc| users::add_user(&session, doc, input))
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "user": user_view(&user) })),
    ))
}

async fn delete_user(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let removed = state
        .store()
        .update(|doc| users::delete_user(&session, doc, &id))
        .await?;
    Ok(Json(json!({ "success": true, "user": user_view(&removed) })))
}

async fn list_logs(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
) -> ApiResult<Json<Value>> {
    let logs = state
        .store()
        .read(|doc| users::list_logs(&session, doc).map(<[_]>::to_vec))
        .await?;
    Ok(Json(json!({ "success": true, "logs": logs })))
}
