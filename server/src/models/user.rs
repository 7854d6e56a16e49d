use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserAccount {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Role assignment. Read-only from the service's perspective; rows are
/// provisioned by the seed binary.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserRole {
    pub user_id: Uuid,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Denormalized snapshot of a saved content item
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Bookmark {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content_id: Uuid,
    pub content_type: String,
    pub title: String,
    pub description: Option<String>,
    pub link: Option<String>,
    pub audio_url: Option<String>,
    pub book_content: Option<String>,
    pub created_at: DateTime<Utc>,
}
