pub mod admin;
pub mod data;
pub mod health;
pub mod session;
pub mod upload;

use axum::Router;
use tower_http::services::ServeDir;

use crate::middleware::cache::no_store;
use crate::state::AppState;

/// Assemble the full router with all route groups. Anything that is not an
/// API route is served from the public directory.
pub fn build_router(state: AppState) -> Router {
    let config = state.config();
    let public = ServeDir::new(&config.public_dir);
    let body_limit = config.max_upload_bytes;

    Router::new()
        .merge(health::routes())
        .merge(session::routes())
        .merge(data::routes(body_limit))
        .merge(upload::routes(body_limit))
        .merge(admin::routes())
        .fallback_service(public)
        .layer(axum::middleware::from_fn(no_store))
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod test_support {
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
        Router,
    };
    use menu_panel_core::DocumentStore;
    use serde_json::Value;
    use tempfile::TempDir;
    use tower::ServiceExt;

    use crate::config::AppConfig;
    use crate::state::AppState;

    pub const SHARED_SECRET: &str = "test-secret";

    /// A router over a seeded document in a temporary directory.
    pub struct TestApp {
        pub state: AppState,
        pub dir: TempDir,
        router: Router,
    }

    impl TestApp {
        pub async fn new() -> Self {
            Self::with_limit(1024 * 1024).await
        }

        pub async fn with_limit(max_upload_bytes: usize) -> Self {
            let dir = TempDir::new().unwrap();
            let root = dir.path().to_path_buf();
            let mut config = AppConfig::from_lookup(|_| None).unwrap();
            config.data_file = root.join("data").join("data.json");
            config.public_dir = root.join("public");
            config.image_dir = root.join("public").join("img");
            config.admin_password = SHARED_SECRET.to_string();
            config.jwt_secret = "test-jwt".to_string();
            config.max_upload_bytes = max_upload_bytes;
            std::fs::create_dir_all(&config.public_dir).unwrap();

            let store = DocumentStore::open(&config.data_file).await.unwrap();
            let state = AppState::new(store, config);
            let router = super::build_router(state.clone());
            Self { state, dir, router }
        }

        pub async fn raw(&self, request: Request<Body>) -> axum::response::Response {
            self.router.clone().oneshot(request).await.unwrap()
        }

        /// Send a request and decode the JSON body (`Null` when empty).
        pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
            let response = self.raw(request).await;
            let status = response.status();
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            let body = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).unwrap()
            };
            (status, body)
        }

        /// Sign in and return the session token.
        pub async fn login(&self, username: &str, password: &str) -> String {
            let (status, body) = self
                .send(json(
                    Method::POST,
                    "/api/login",
                    None,
                    serde_json::json!({ "username": username, "password": password }),
                ))
                .await;
            assert_eq!(status, StatusCode::OK, "login failed: {body}");
            body["token"].as_str().unwrap().to_string()
        }
    }

    pub fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    pub fn authed(method: Method, uri: &str, token: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap()
    }

    pub fn json(method: Method, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }
}
