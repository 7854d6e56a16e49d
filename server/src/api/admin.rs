use axum::{
    extract::{Multipart, Path, Query, State},
    middleware,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use storage_utils::BlobKind;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::middleware::{require_admin, require_auth, CurrentUser};
use crate::models::{AdminContent, ContentKind, Mood};
use crate::services::{CatalogService, TextUpload, UploadMeta};
use crate::AppState;

pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/content", get(list_content).post(create_text_content))
        .route("/content/file", post(upload_content_file))
        .route("/content/:id", delete(delete_content))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
}

fn catalog_service(state: &AppState) -> CatalogService {
    CatalogService::new(state.db.clone(), state.storage.operations())
}

#[derive(Debug, Serialize)]
pub struct ContentListResponse {
    pub content: Vec<AdminContent>,
}

async fn list_content(State(state): State<AppState>) -> Result<Json<ContentListResponse>> {
    let content = catalog_service(&state).list().await?;

    Ok(Json(ContentListResponse { content }))
}

async fn create_text_content(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<TextUpload>,
) -> Result<Json<serde_json::Value>> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let id = catalog_service(&state)
        .upload_text(current_user.id, payload)
        .await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "id": id,
        "message": "Content uploaded successfully",
    })))
}

async fn upload_content_file(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>> {
    let mut title = None;
    let mut description = None;
    let mut content_type = None;
    let mut mood = None;
    let mut file_kind = None;
    let mut file: Option<(String, String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart payload: {}", e)))?
    {
        match field.name() {
            Some("title") => title = Some(read_text(field).await?),
            Some("description") => description = Some(read_text(field).await?),
            Some("content_type") => {
                let value = read_text(field).await?;
                content_type = Some(ContentKind::parse(&value).ok_or_else(|| {
                    AppError::BadRequest(format!("Unknown content type: {}", value))
                })?);
            }
            Some("mood") => {
                let value = read_text(field).await?;
                mood = Some(
                    Mood::parse(&value)
                        .ok_or_else(|| AppError::BadRequest(format!("Unknown mood: {}", value)))?,
                );
            }
            Some("file_type") => {
                let value = read_text(field).await?;
                file_kind = Some(BlobKind::parse(&value).ok_or_else(|| {
                    AppError::BadRequest(format!("Unknown file type: {}", value))
                })?);
            }
            Some("file") => {
                let file_name = field
                    .file_name()
                    .map(String::from)
                    .unwrap_or_else(|| "upload".to_string());
                let mime = field
                    .content_type()
                    .map(String::from)
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read file: {}", e)))?;
                file = Some((file_name, mime, bytes.to_vec()));
            }
            _ => {}
        }
    }

    let title = title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Title is required".to_string()))?;
    let content_type =
        content_type.ok_or_else(|| AppError::BadRequest("Content type is required".to_string()))?;
    let mood = mood.ok_or_else(|| AppError::BadRequest("Mood is required".to_string()))?;
    let file_kind =
        file_kind.ok_or_else(|| AppError::BadRequest("File type is required".to_string()))?;
    let (file_name, mime, bytes) =
        file.ok_or_else(|| AppError::BadRequest("File is required".to_string()))?;

    let meta = UploadMeta {
        title,
        description,
        content_type,
        mood,
    };

    let id = catalog_service(&state)
        .upload_file(current_user.id, meta, file_kind, file_name, mime, bytes)
        .await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "id": id,
        "message": "File uploaded successfully",
    })))
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart field: {}", e)))
}

#[derive(Debug, Deserialize)]
pub struct DeleteContentQuery {
    pub confirm: Option<bool>,
}

async fn delete_content(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<DeleteContentQuery>,
) -> Result<Json<serde_json::Value>> {
    // Destructive action: the caller must confirm explicitly
    if query.confirm != Some(true) {
        return Err(AppError::BadRequest(
            "Deletion requires confirm=true".to_string(),
        ));
    }

    catalog_service(&state).delete(id).await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "message": format!("Content {} has been deleted", id),
    })))
}
