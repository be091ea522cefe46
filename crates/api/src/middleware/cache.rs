use axum::{
    extract::Request,
    http::{header, HeaderValue},
    middleware::Next,
    response::Response,
};

/// API responses and HTML pages must always be fetched fresh, so that an
/// edit saved in the panel shows on the next page load.
pub async fn no_store(request: Request, next: Next) -> Response {
    let path = request.uri().path();
    let applies = path.starts_with("/api") || path.ends_with(".html");

    let mut response = next.run(request).await;
    if applies {
        response
            .headers_mut()
            .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    }
    response
}

#[cfg(test)]
mod tests {
    use axum::http::{header, StatusCode};

    use crate::routes::test_support::{get, TestApp};

    #[tokio::test]
    async fn html_pages_are_not_cached() {
        let app = TestApp::new().await;
        std::fs::write(app.dir.path().join("public").join("index.html"), "<h1>menu</h1>").unwrap();
        std::fs::write(app.dir.path().join("public").join("site.css"), "body {}").unwrap();

        let response = app.raw(get("/index.html")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store");

        let response = app.raw(get("/site.css")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::CACHE_CONTROL).is_none());
    }

    #[tokio::test]
    async fn unknown_static_path_is_404() {
        let app = TestApp::new().await;
        let response = app.raw(get("/missing.png")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
