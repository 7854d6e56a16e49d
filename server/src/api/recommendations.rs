use axum::{
    extract::{Query, State},
    middleware,
    routing::get,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::middleware::{require_auth, CurrentUser};
use crate::models::{ContentItem, ContentKind, Mood, Selection};
use crate::services::RecommendationService;
use crate::AppState;

pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(get_recommendations))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
}

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub mood: Option<String>,
    pub category: Option<String>,
}

/// The response echoes the selection it answers, so a client can discard
/// any response whose tag no longer matches its current selection.
#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub mood: Option<Mood>,
    pub category: Option<ContentKind>,
    pub items: Vec<ContentItem>,
}

async fn get_recommendations(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Query(query): Query<RecommendationQuery>,
) -> Result<Json<RecommendationResponse>> {
    let mut selection = Selection::default();
    if let Some(mood) = query.mood.as_deref().and_then(Mood::parse) {
        selection.select_mood(mood);
    }
    if let Some(category) = query.category.as_deref().and_then(ContentKind::parse) {
        selection.toggle_category(category);
    }

    let service = RecommendationService::new(state.db.clone());
    let mut items = service.fetch(&selection).await?;
    service.mark_bookmarked(current_user.id, &mut items).await?;

    Ok(Json(RecommendationResponse {
        mood: selection.mood(),
        category: selection.category(),
        items,
    }))
}
