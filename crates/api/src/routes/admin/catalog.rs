use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{post, put},
    Json, Router,
};
use menu_panel_core::mutation::{
    catalog,
    types::{CategoryInput, ProductInput, Reorder},
};
use serde_json::{json, Value};

use crate::error::{ApiError, ApiResult};
use crate::extract::AdminSession;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/admin/categories", post(create_category))
        .route("/api/admin/categories/order", put(reorder_categories))
        .route(
            "/api/admin/categories/{id}",
            put(update_category).delete(delete_category),
        )
        .route("/api/admin/products", post(create_product))
        .route("/api/admin/products/order", put(reorder_products))
        .route(
            "/api/admin/products/{id}",
            put(update_product).delete(delete_product),
        )
}

async fn create_category(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
    payload: Result<Json<CategoryInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let Json(input) = payload?;
    let category = state
        .store()
        .update(|doc| catalog::create_category(&session, doc, input))
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "category": category })),
    ))
}

async fn update_category(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
    Path(id): Path<String>,
    payload: Result<Json<CategoryInput>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(input) = payload?;
    if input.id != id {
        return Err(ApiError::BadRequest(
            "category id cannot be changed".to_string(),
        ));
    }
    let category = state
        .store()
        .update(|doc| catalog::update_category(&session, doc, &id, input))
        .await?;
    Ok(Json(json!({ "success": true, "category": category })))
}

async fn delete_category(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let category = state
        .store()
        .update(|doc| catalog::delete_category(&session, doc, &id))
        .await?;
    Ok(Json(json!({ "success": true, "category": category })))
}

async fn reorder_categories(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
    payload: Result<Json<Reorder>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(reorder) = payload?;
    state
        .store()
        .update(|doc| catalog::reorder_categories(&session, doc, &reorder))
        .await?;
    Ok(Json(json!({ "success": true })))
}

async fn create_product(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
    payload: Result<Json<ProductInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let Json(input) = payload?;
    let product = state
        .store()
        .update(|doc| catalog::create_product(&session, doc, input))
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "product": product })),
    ))
}

async fn update_product(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
    Path(id): Path<String>,
    payload: Result<Json<ProductInput>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(input) = payload?;
    let product = state
        .store()
        .update(|doc| catalog::update_product(&session, doc, &id, input))
        .await?;
    Ok(Json(json!({ "success": true, "product": product })))
}

async fn delete_product(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let product = state
        .store()
        .update(|doc| catalog::delete_product(&session, doc, &id))
        .await?;
    Ok(Json(json!({ "success": true, "product": product })))
}

async fn reorder_products(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
    payload: Result<Json<Reorder>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(reorder) = payload?;
    state
        .store()
        .update(|doc| catalog::reorder_products(&session, doc, &reorder))
        .await?;
    Ok(Json(json!({ "success": true })))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::routes::test_support::{authed, json, TestApp};

    fn soup() -> serde_json::Value {
        json!({ "id": "soup", "icon": "🍲", "name": { "tr": "Çorbalar", "en": "Soups" } })
    }

    fn lentil(category_id: &str) -> serde_json::Value {
        json!({
            "categoryId": category_id,
            "price": 90,
            "name": { "tr": "Mercimek", "en": "Lentil" },
            "tags": { "vegan": true },
        })
    }

    #[tokio::test]
    async fn category_lifecycle() {
        let app = TestApp::new().await;
        let token = app.login("designer", "designer").await;

        let (status, body) = app
            .send(json(Method::POST, "/api/admin/categories", Some(&token), soup()))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["category"]["order"], 4);

        let mut renamed = soup();
        renamed["name"]["en"] = json!("Soup of the day");
        let (status, body) = app
            .send(json(Method::PUT, "/api/admin/categories/soup", Some(&token), renamed))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["category"]["name"]["en"], "Soup of the day");

        let (status, _) = app
            .send(authed(Method::DELETE, "/api/admin/categories/soup", &token))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert!(app.state.store().snapshot().await.find_category("soup").is_none());
    }

    #[tokio::test]
    async fn category_id_in_path_must_match() {
        let app = TestApp::new().await;
        let token = app.login("designer", "designer").await;
        let (status, _) = app
            .send(json(Method::PUT, "/api/admin/categories/food", Some(&token), soup()))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn category_reorder() {
        let app = TestApp::new().await;
        let token = app.login("admin", "admin").await;

        let (status, _) = app
            .send(json(
                Method::PUT,
                "/api/admin/categories/order",
                Some(&token),
                json!({ "ids": ["drink", "dessert", "food"] }),
            ))
            .await;
        assert_eq!(status, StatusCode::OK);
        let doc = app.state.store().snapshot().await;
        assert_eq!(doc.find_category("drink").unwrap().order, 1);

        let (status, _) = app
            .send(json(
                Method::PUT,
                "/api/admin/categories/order",
                Some(&token),
                json!({ "ids": ["drink"] }),
            ))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn product_lifecycle() {
        let app = TestApp::new().await;
        let token = app.login("designer", "designer").await;

        let (status, body) = app
            .send(json(Method::POST, "/api/admin/products", Some(&token), lentil("food")))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["product"]["tags"]["vegan"], true);
        assert_eq!(body["product"]["status"], "active");
        let id = body["product"]["id"].as_str().unwrap().to_string();

        let mut edit = lentil("food");
        edit["price"] = json!(95.5);
        let (status, body) = app
            .send(json(
                Method::PUT,
                &format!("/api/admin/products/{id}"),
                Some(&token),
                edit,
            ))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["product"]["price"], 95.5);

        let (status, _) = app
            .send(authed(Method::DELETE, &format!("/api/admin/products/{id}"), &token))
            .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = app
            .send(authed(Method::DELETE, &format!("/api/admin/products/{id}"), &token))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn product_in_unknown_category_is_400() {
        let app = TestApp::new().await;
        let token = app.login("designer", "designer").await;
        let (status, body) = app
            .send(json(Method::POST, "/api/admin/products", Some(&token), lentil("pizza")))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["type"], "badRequest");
    }

    #[tokio::test]
    async fn product_reorder() {
        let app = TestApp::new().await;
        let token = app.login("designer", "designer").await;
        let ids: Vec<String> = app
            .state
            .store()
            .read(|doc| doc.products.iter().rev().map(|p| p.id.clone()).collect())
            .await;

        let (status, _) = app
            .send(json(
                Method::PUT,
                "/api/admin/products/order",
                Some(&token),
                json!({ "ids": ids }),
            ))
            .await;

        assert_eq!(status, StatusCode::OK);
        let doc = app.state.store().snapshot().await;
        assert_eq!(doc.find_product(&ids[0]).unwrap().order, 1);
        assert_eq!(doc.logs[0].action, "reorder_products");
    }

    #[tokio::test]
    async fn missing_token_is_401() {
        let app = TestApp::new().await;
        let (status, _) = app
            .send(json(Method::POST, "/api/admin/categories", None, soup()))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
