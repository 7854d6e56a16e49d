use axum::{
    extract::{Path, State},
    middleware,
    routing::{delete, get},
    Extension, Json, Router,
};
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::middleware::{require_auth, CurrentUser};
use crate::models::Bookmark;
use crate::services::{BookmarkService, NewBookmark};
use crate::AppState;

pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_bookmarks).post(add_bookmark))
        .route("/:content_id", delete(remove_bookmark))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
}

#[derive(Debug, Serialize)]
pub struct BookmarkListResponse {
    pub bookmarks: Vec<Bookmark>,
}

async fn list_bookmarks(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> Result<Json<BookmarkListResponse>> {
    let service = BookmarkService::new(state.db.clone());
    let bookmarks = service.list(current_user.id).await?;

    Ok(Json(BookmarkListResponse { bookmarks }))
}

async fn add_bookmark(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<NewBookmark>,
) -> Result<Json<serde_json::Value>> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let service = BookmarkService::new(state.db.clone());
    service.add(current_user.id, payload).await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Content saved to your bookmarks",
    })))
}

async fn remove_bookmark(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(content_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>> {
    let service = BookmarkService::new(state.db.clone());
    service.remove(current_user.id, content_id).await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Content removed from your bookmarks",
    })))
}
