use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use menu_panel_core::{document::model::User, Role, Session};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{ApiError, ApiResult};
use crate::extract::AdminSession;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/login", post(login))
        .route("/api/logout", post(logout))
        .route("/api/me", get(me))
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    password: String,
}

/// Public view of an account: no password, plus the capabilities its role grants.
pub fn user_view(user: &User) -> Value {
    let capabilities = user
        .role
        .parse::<Role>()
        .map(Role::capabilities)
        .unwrap_or_default();
    json!({
        "id": user.id,
        "username": user.username,
        "name": user.name,
        "role": user.role,
        "capabilities": capabilities,
    })
}

/// Without a username the password is checked against the shared secret and
/// the secret itself is returned as the token. With a username the account
/// is authenticated, the login is audited and a signed session token issued.
async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(request) = payload?;

    let Some(username) = request.username else {
        if request.password == state.config().admin_password {
            return Ok(Json(json!({
                "success": true,
                "token": state.config().admin_password,
            })));
        }
        tracing::warn!("shared secret login rejected");
        return Err(ApiError::Unauthorized);
    };

    let mut session = Session::anonymous();
    let user = state
        .store()
        .update(|doc| {
            session
                .authenticate(doc, &username, &request.password)
                .map_err(ApiError::from)
        })
        .await?;
    let token = state
        .tokens()
        .issue(&user)
        .map_err(|err| ApiError::Internal(format!("failed to sign token: {err}")))?;

    tracing::info!(username = %user.username, role = %user.role, "user logged in");
    Ok(Json(json!({
        "success": true,
        "token": token,
        "user": user_view(&user),
    })))
}

/// Audit the logout. The token itself stays valid until it expires.
async fn logout(
    State(state): State<AppState>,
    AdminSession(mut session): AdminSession,
) -> ApiResult<Json<Value>> {
    state
        .store()
        .update(|doc| {
            session.logout(doc);
            Ok::<_, ApiError>(())
        })
        .await?;
    Ok(Json(json!({ "success": true })))
}

async fn me(AdminSession(session): AdminSession) -> ApiResult<Json<Value>> {
    let user = session.current_user().ok_or(ApiError::Unauthorized)?;
    Ok(Json(json!({ "success": true, "user": user_view(user) })))
}
