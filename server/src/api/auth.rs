use axum::{
    extract::State,
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, Result};
use crate::middleware::{require_auth, Claims, CurrentUser};
use crate::models::UserAccount;
use crate::services::AuthService;
use crate::AppState;

pub fn routes(state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/me", get(me))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh", post(refresh_token))
        .merge(protected)
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserInfo,
}

#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
}

async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<UserInfo>> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let auth_service = AuthService::new(state.db.clone(), state.config.clone());
    let user = auth_service
        .register(payload.email.trim(), &payload.password)
        .await?;

    Ok(Json(UserInfo {
        id: user.id.to_string(),
        email: user.email,
    }))
}

async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let auth_service = AuthService::new(state.db.clone(), state.config.clone());
    let (user, access_token, refresh_token) = auth_service
        .authenticate(payload.email.trim(), &payload.password)
        .await?;

    Ok(Json(LoginResponse {
        access_token,
        refresh_token,
        user: UserInfo {
            id: user.id.to_string(),
            email: user.email,
        },
    }))
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub access_token: String,
}

async fn refresh_token(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<RefreshResponse>> {
    // Decode and verify the refresh token
    let claims = decode::<Claims>(
        &payload.refresh_token,
        &DecodingKey::from_secret(state.config.jwt.secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthorized)?
    .claims;

    // Re-read the user so a deleted account cannot refresh
    let user: UserAccount = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(uuid::Uuid::parse_str(&claims.sub).map_err(|_| AppError::Unauthorized)?)
        .fetch_optional(&state.db.pg)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let auth_service = AuthService::new(state.db.clone(), state.config.clone());
    let access_token = auth_service.generate_access_token(&user)?;

    Ok(Json(RefreshResponse { access_token }))
}

/// Get current authenticated user info
async fn me(Extension(current_user): Extension<CurrentUser>) -> Result<Json<UserInfo>> {
    Ok(Json(UserInfo {
        id: current_user.id.to_string(),
        email: current_user.email,
    }))
}
