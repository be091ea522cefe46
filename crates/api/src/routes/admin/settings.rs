use axum::{
    extract::{rejection::JsonRejection, State},
    routing::put,
    Json, Router,
};
use menu_panel_core::{
    document::model::{
        CompanyInfo, Document, FooterConfig, HeroConfig, SectionVisibility, Settings, ThemeConfig,
        Translations,
    },
    mutation::{settings, types::Reorder},
    AuthError, Session,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::error::{ApiError, ApiResult};
use crate::extract::AdminSession;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/admin/settings", put(update_settings))
        .route("/api/admin/theme", put(update_theme).delete(reset_theme))
        .route("/api/admin/hero", put(update_hero))
        .route("/api/admin/footer", put(update_footer))
        .route("/api/admin/footer/socials/order", put(reorder_socials))
        .route("/api/admin/company", put(update_company))
        .route("/api/admin/sections", put(update_sections))
        .route("/api/admin/translations", put(update_translations))
}

type Edit<T> = fn(&Session, &mut Document, T) -> Result<(), AuthError>;

/// Run a whole-section replacement and return the section as stored.
async fn replace_section<T: DeserializeOwned>(
    state: &AppState,
    session: &Session,
    payload: Result<Json<T>, JsonRejection>,
    edit: Edit<T>,
    section: fn(&Document) -> Value,
) -> ApiResult<Json<Value>> {
    let Json(input) = payload?;
    let stored = state
        .store()
        .update(|doc| {
            edit(session, doc, input)
                .map(|()| section(doc))
                .map_err(ApiError::from)
        })
        .await?;
    Ok(Json(json!({ "success": true, "data": stored })))
}

async fn update_settings(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
    payload: Result<Json<Settings>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    replace_section(&state, &session, payload, settings::update_settings, |d| {
        json!(d.settings)
    })
    .await
}

async fn update_theme(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
    payload: Result<Json<ThemeConfig>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    replace_section(&state, &session, payload, settings::update_theme, |d| {
        json!(d.theme)
    })
    .await
}

async fn reset_theme(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
) -> ApiResult<Json<Value>> {
    let theme = state
        .store()
        .update(|doc| settings::reset_theme(&session, doc).map_err(ApiError::from))
        .await?;
    Ok(Json(json!({ "success": true, "data": theme })))
}

async fn update_hero(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
    payload: Result<Json<HeroConfig>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    replace_section(&state, &session, payload, settings::update_hero, |d| {
        json!(d.hero)
    })
    .await
}

async fn update_footer(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
    payload: Result<Json<FooterConfig>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    replace_section(&state, &session, payload, settings::update_footer, |d| {
        json!(d.footer)
    })
    .await
}

async fn reorder_socials(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
    payload: Result<Json<Reorder>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(reorder) = payload?;
    let socials = state
        .store()
        .update(|doc| {
            settings::reorder_socials(&session, doc, &reorder)
                .map(|()| doc.footer.socials.clone())
                .map_err(ApiError::from)
        })
        .await?;
    Ok(Json(json!({ "success": true, "data": socials })))
}

async fn update_company(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
    payload: Result<Json<CompanyInfo>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    replace_section(&state, &session, payload, settings::update_company, |d| {
        json!(d.company)
    })
    .await
}

async fn update_sections(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
    payload: Result<Json<SectionVisibility>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    replace_section(&state, &session, payload, settings::update_sections, |d| {
        json!(d.sections)
    })
    .await
}

/// Merge the posted keys into the translation table.
async fn update_translations(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
    payload: Result<Json<Translations>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    replace_section(
        &state,
        &session,
        payload,
        settings::update_translations,
        |d| json!(d.translations),
    )
    .await
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::routes::test_support::{authed, get, json, TestApp};

    #[tokio::test]
    async fn admin_updates_sections() {
        let app = TestApp::new().await;
        let token = app.login("admin", "admin").await;

        let (status, body) = app
            .send(json(
                Method::PUT,
                "/api/admin/sections",
                Some(&token),
                json!({ "header": true, "hero": false, "menu": true }),
            ))
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["hero"], false);
        let doc = app.state.store().snapshot().await;
        assert!(!doc.sections.hero);
        assert_eq!(doc.logs[0].action, "update_settings");
    }

    #[tokio::test]
    async fn designer_cannot_change_settings() {
        let app = TestApp::new().await;
        let token = app.login("designer", "designer").await;

        let (status, _) = app
            .send(json(
                Method::PUT,
                "/api/admin/sections",
                Some(&token),
                json!({ "header": false, "hero": false, "menu": false }),
            ))
            .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(app.state.store().snapshot().await.sections.menu);
    }

    #[tokio::test]
    async fn general_settings_round_trip_through_data() {
        let app = TestApp::new().await;
        let token = app.login("admin", "admin").await;
        let (_, body) = app.send(get("/api/data")).await;
        let mut settings = body["data"]["settings"].clone();
        settings["currency"] = json!("EUR");

        let (status, _) = app
            .send(json(Method::PUT, "/api/admin/settings", Some(&token), settings))
            .await;

        assert_eq!(status, StatusCode::OK);
        let (_, body) = app.send(get("/api/data")).await;
        assert_eq!(body["data"]["settings"]["currency"], "EUR");
    }

    #[tokio::test]
    async fn theme_reset() {
        let app = TestApp::new().await;
        let token = app.login("admin", "admin").await;
        let original = app.state.store().snapshot().await.theme;

        let (status, body) = app
            .send(authed(Method::DELETE, "/api/admin/theme", &token))
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], serde_json::to_value(&original).unwrap());
        assert_eq!(
            app.state.store().snapshot().await.logs[0].detail,
            "Theme settings reset"
        );
    }

    #[tokio::test]
    async fn translations_merge_keys() {
        let app = TestApp::new().await;
        let token = app.login("admin", "admin").await;

        let (status, body) = app
            .send(json(
                Method::PUT,
                "/api/admin/translations",
                Some(&token),
                json!({ "btnSelect": { "tr": "Seçiniz", "en": "Choose" } }),
            ))
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["btnSelect"]["en"], "Choose");
        assert!(body["data"].get("splashText").is_some());
    }

    #[tokio::test]
    async fn socials_reorder() {
        let app = TestApp::new().await;
        let token = app.login("admin", "admin").await;

        let (status, body) = app
            .send(json(
                Method::PUT,
                "/api/admin/footer/socials/order",
                Some(&token),
                json!({ "ids": ["facebook", "instagram"] }),
            ))
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["platform"], "facebook");
    }
}
