use std::io::ErrorKind;
use std::path::Path;

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    routing::post,
    Json, Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use tokio::{fs, io::AsyncWriteExt};

use crate::error::{ApiError, ApiResult};
use crate::extract::Caller;
use crate::state::AppState;

pub fn routes(body_limit: usize) -> Router<AppState> {
    Router::new().route(
        "/api/upload-image",
        post(upload_image).layer(DefaultBodyLimit::max(body_limit)),
    )
}

/// Lowercase the name and replace anything but ASCII letters, digits and
/// dots with `_`.
fn sanitize_file_name(original: &str) -> String {
    original
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// Write `data` under `dir` as `<millis>_<name>`, moving to the next
/// millisecond while the name is taken. Returns the file name used.
async fn store_image(dir: &Path, safe_name: &str, data: &[u8]) -> Result<String, ApiError> {
    fs::create_dir_all(dir)
        .await
        .map_err(|err| ApiError::Internal(format!("failed to create {}: {err}", dir.display())))?;

    let mut millis = Utc::now().timestamp_millis();
    loop {
        let file_name = format!("{millis}_{safe_name}");
        let path = dir.join(&file_name);
        match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(mut file) => {
                file.write_all(data).await.map_err(|err| {
                    ApiError::Internal(format!("failed to write {}: {err}", path.display()))
                })?;
                file.sync_all().await.map_err(|err| {
                    ApiError::Internal(format!("failed to sync {}: {err}", path.display()))
                })?;
                return Ok(file_name);
            }
            Err(err) if err.kind() == ErrorKind::AlreadyExists => millis += 1,
            Err(err) => {
                return Err(ApiError::Internal(format!(
                    "failed to create {}: {err}",
                    path.display()
                )))
            }
        }
    }
}

async fn upload_image(
    State(state): State<AppState>,
    caller: Caller,
    mut multipart: Multipart,
) -> ApiResult<Json<Value>> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("image") {
            continue;
        }
        let safe_name = sanitize_file_name(field.file_name().unwrap_or("image"));
        let data = field.bytes().await?;
        if data.is_empty() {
            return Err(ApiError::BadRequest("image file is empty".to_string()));
        }

        let config = state.config();
        let file_name = store_image(&config.image_dir, &safe_name, &data).await?;
        tracing::info!(
            file = %file_name,
            size = data.len(),
            by = caller.username(),
            "image uploaded"
        );

        let prefix = config.image_url_prefix.trim_end_matches('/');
        return Ok(Json(json!({
            "success": true,
            "path": format!("{prefix}/{file_name}"),
        })));
    }

    Err(ApiError::BadRequest(
        "missing 'image' field in multipart form".to_string(),
    ))
}
