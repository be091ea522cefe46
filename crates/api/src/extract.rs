//! Bearer-token extractors.
//!
//! Two kinds of bearer are accepted: the shared admin secret, which only
//! authorises whole-document saves and uploads, and a signed per-user token
//! issued by `/api/login`, which resolves to a [`Session`] for the account.
use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use menu_panel_core::Session;

use crate::error::ApiError;
use crate::state::AppState;

/// Whoever presented a valid bearer token.
pub enum Caller {
    SharedSecret,
    User(Session),
}

impl Caller {
    pub fn username(&self) -> &str {
        match self {
            Caller::SharedSecret => "shared-secret",
            Caller::User(session) => session
                .current_user()
                .map_or("unknown", |user| user.username.as_str()),
        }
    }
}

/// A signed-in account. Rejects the shared secret.
pub struct AdminSession(pub Session);

async fn bearer(parts: &mut Parts, state: &AppState) -> Result<String, ApiError> {
    let TypedHeader(Authorization(bearer)) =
        TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::Unauthorized)?;
    Ok(bearer.token().to_string())
}

/// The account is re-read from the document so that deleted users and
/// changed roles take effect before the token expires.
async fn session_for(state: &AppState, token: &str) -> Result<Session, ApiError> {
    let claims = state.tokens().verify(token).map_err(|err| {
        tracing::debug!("rejected session token: {err}");
        ApiError::Unauthorized
    })?;
    let user = state
        .store()
        .read(|doc| doc.find_user(&claims.sub).cloned())
        .await
        .ok_or(ApiError::Unauthorized)?;
    Ok(Session::for_user(user))
}

impl FromRequestParts<AppState> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer(parts, state).await?;
        if token == state.config().admin_password {
            return Ok(Caller::SharedSecret);
        }
        session_for(state, &token).await.map(Caller::User)
    }
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer(parts, state).await?;
        session_for(state, &token).await.map(AdminSession)
    }
}
