mod admin;
mod auth;
mod bookmarks;
mod recommendations;

use axum::Router;

use crate::AppState;

pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::routes(state))
        .nest("/recommendations", recommendations::routes(state))
        .nest("/bookmarks", bookmarks::routes(state))
        .nest("/admin", admin::routes(state))
}
