use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::db::Database;
use crate::error::Result;
use crate::models::Bookmark;

/// Denormalized snapshot of a content item being saved
#[derive(Debug, Deserialize, Validate)]
pub struct NewBookmark {
    pub content_id: Uuid,
    pub content_type: String,
    #[validate(length(min = 1))]
    pub title: String,
    pub description: Option<String>,
    pub link: Option<String>,
    pub audio_url: Option<String>,
    pub book_content: Option<String>,
}

pub struct BookmarkService {
    db: Database,
}

impl BookmarkService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Save a content snapshot for the user. Saving the same content
    /// twice is a no-op, so toggling stays idempotent.
    pub async fn add(&self, user_id: Uuid, bookmark: NewBookmark) -> Result<()> {
        sqlx::query(
            "INSERT INTO bookmarks
                 (user_id, content_id, content_type, title, description, link, audio_url, book_content)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             ON CONFLICT (user_id, content_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(bookmark.content_id)
        .bind(&bookmark.content_type)
        .bind(&bookmark.title)
        .bind(&bookmark.description)
        .bind(&bookmark.link)
        .bind(&bookmark.audio_url)
        .bind(&bookmark.book_content)
        .execute(&self.db.pg)
        .await?;

        Ok(())
    }

    /// Remove a bookmark by content id, scoped to the caller's rows
    pub async fn remove(&self, user_id: Uuid, content_id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM bookmarks WHERE user_id = $1 AND content_id = $2")
            .bind(user_id)
            .bind(content_id)
            .execute(&self.db.pg)
            .await?;

        Ok(())
    }

    /// All bookmarks for the user, newest first
    pub async fn list(&self, user_id: Uuid) -> Result<Vec<Bookmark>> {
        let bookmarks: Vec<Bookmark> = sqlx::query_as(
            "SELECT * FROM bookmarks WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.db.pg)
        .await?;

        Ok(bookmarks)
    }
}
