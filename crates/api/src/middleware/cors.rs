use axum::http::{header, Method};
use tower_http::cors::{Any, CorsLayer};

/// The panel and the public site are served from this origin; other origins
/// may read the menu and call the API with a bearer token. Only the methods
/// and request headers the API uses are allowed.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header, Method, Request},
        routing::get,
        Router,
    };
    use tower::ServiceExt;

    use super::cors_layer;

    fn header_text(response: &axum::response::Response, name: header::HeaderName) -> String {
        response
            .headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase()
    }

    #[tokio::test]
    async fn preflight_allows_api_methods_and_bearer() {
        let app = Router::new()
            .route("/api/data", get(|| async { "ok" }))
            .layer(cors_layer());
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/data")
            .header(header::ORIGIN, "https://menu.example")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "DELETE")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "authorization")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(header_text(&response, header::ACCESS_CONTROL_ALLOW_ORIGIN), "*");
        let methods = header_text(&response, header::ACCESS_CONTROL_ALLOW_METHODS);
        for method in ["get", "post", "put", "delete"] {
            assert!(methods.contains(method), "{methods}");
        }
        assert!(!methods.contains("patch"));
        let headers = header_text(&response, header::ACCESS_CONTROL_ALLOW_HEADERS);
        assert!(headers.contains("authorization"));
        assert!(headers.contains("content-type"));
    }
}
