use std::collections::HashSet;

use serde::Deserialize;
use storage_utils::{generate_object_key, BlobKind, StorageOperations};
use tokio::sync::OnceCell;
use uuid::Uuid;
use validator::Validate;

use crate::db::Database;
use crate::error::{AppError, Result};
use crate::models::{AdminContent, ContentKind, Mood};

/// Live column set of the catalog table, read once per process. Insert
/// payloads are filtered against it so a catalog that has not migrated
/// every column yet still accepts uploads.
static CATALOG_COLUMNS: OnceCell<HashSet<String>> = OnceCell::const_new();

/// Payload columns an insert may carry, in bind order
const PAYLOAD_COLUMNS: [&str; 8] = [
    "title",
    "description",
    "file_type",
    "content_type",
    "mood",
    "file_url",
    "file_name",
    "uploaded_by",
];

/// Build the insert statement for the columns the catalog recognizes.
/// Returns the SQL and the surviving columns in bind order.
fn insert_statement(allowed: &HashSet<String>) -> (String, Vec<&'static str>) {
    let columns: Vec<&'static str> = PAYLOAD_COLUMNS
        .iter()
        .copied()
        .filter(|c| allowed.contains(*c))
        .collect();

    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("${}", i)).collect();
    let sql = format!(
        "INSERT INTO admin_content ({}) VALUES ({}) RETURNING id",
        columns.join(", "),
        placeholders.join(", ")
    );

    (sql, columns)
}

/// Metadata common to both upload paths
#[derive(Debug, Deserialize, Validate)]
pub struct UploadMeta {
    #[validate(length(min = 1))]
    pub title: String,
    pub description: Option<String>,
    pub content_type: ContentKind,
    pub mood: Mood,
}

/// Text-path payload: quote, verse, or a book entered as raw text
#[derive(Debug, Deserialize, Validate)]
pub struct TextUpload {
    #[validate(length(min = 1))]
    pub title: String,
    pub description: Option<String>,
    pub content_type: ContentKind,
    pub mood: Mood,
    #[validate(length(min = 1))]
    pub body: String,
}

struct ContentPayload {
    title: String,
    description: Option<String>,
    file_type: BlobKind,
    content_type: ContentKind,
    mood: Mood,
    file_url: Option<String>,
    file_name: String,
    uploaded_by: Uuid,
}

pub struct CatalogService {
    db: Database,
    storage: StorageOperations,
}

impl CatalogService {
    pub fn new(db: Database, storage: StorageOperations) -> Self {
        Self { db, storage }
    }

    /// Full catalog, newest first
    pub async fn list(&self) -> Result<Vec<AdminContent>> {
        let rows: Vec<AdminContent> =
            sqlx::query_as("SELECT * FROM admin_content ORDER BY created_at DESC")
                .fetch_all(&self.db.pg)
                .await?;

        Ok(rows)
    }

    /// File path: upload the blob first, insert the catalog row last so a
    /// failed upload leaves no partial row.
    pub async fn upload_file(
        &self,
        uploaded_by: Uuid,
        meta: UploadMeta,
        file_kind: BlobKind,
        file_name: String,
        content_type: String,
        bytes: Vec<u8>,
    ) -> Result<Uuid> {
        if meta.title.trim().is_empty() {
            return Err(AppError::BadRequest("Title is required".to_string()));
        }
        if bytes.is_empty() {
            return Err(AppError::BadRequest("File is required".to_string()));
        }

        let key = generate_object_key(&file_name);
        let file_url = self
            .storage
            .upload_blob(file_kind, &key, bytes, &content_type)
            .await
            .map_err(|e| AppError::Storage(anyhow::anyhow!("{}", e)))?;

        self.insert_row(&ContentPayload {
            title: meta.title,
            description: meta.description.filter(|d| !d.trim().is_empty()),
            file_type: file_kind,
            content_type: meta.content_type,
            mood: meta.mood,
            file_url: Some(file_url),
            file_name,
            uploaded_by,
        })
        .await
    }

    /// Text path: the body is stored directly, no file reference
    pub async fn upload_text(&self, uploaded_by: Uuid, upload: TextUpload) -> Result<Uuid> {
        if upload.title.trim().is_empty() {
            return Err(AppError::BadRequest("Title is required".to_string()));
        }
        if upload.body.trim().is_empty() {
            return Err(AppError::BadRequest("Body text is required".to_string()));
        }

        let file_type = match upload.content_type {
            ContentKind::Music => BlobKind::Audio,
            _ => BlobKind::Pdf,
        };

        self.insert_row(&ContentPayload {
            title: upload.title,
            description: Some(upload.body),
            file_type,
            content_type: upload.content_type,
            mood: upload.mood,
            file_url: None,
            file_name: String::new(),
            uploaded_by,
        })
        .await
    }

    /// Delete a catalog row. Blob removal is best-effort: a missing or
    /// failing blob does not block the row deletion.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let row: AdminContent = sqlx::query_as("SELECT * FROM admin_content WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db.pg)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Content {} not found", id)))?;

        if let Some(url) = &row.file_url {
            let kind = BlobKind::parse(&row.file_type).unwrap_or(BlobKind::Pdf);
            if let Some(key) = url.rsplit('/').next().filter(|k| !k.is_empty()) {
                if let Err(e) = self.storage.delete_blob(kind, key).await {
                    tracing::warn!("Blob removal failed for content {}: {}", id, e);
                }
            }
        }

        sqlx::query("DELETE FROM admin_content WHERE id = $1")
            .bind(id)
            .execute(&self.db.pg)
            .await?;

        Ok(())
    }

    async fn catalog_columns(&self) -> Result<&'static HashSet<String>> {
        CATALOG_COLUMNS
            .get_or_try_init(|| async {
                let columns: Vec<String> = sqlx::query_scalar(
                    "SELECT column_name FROM information_schema.columns
                     WHERE table_name = 'admin_content'",
                )
                .fetch_all(&self.db.pg)
                .await?;

                Ok::<_, AppError>(columns.into_iter().collect())
            })
            .await
    }

    async fn insert_row(&self, payload: &ContentPayload) -> Result<Uuid> {
        let allowed = self.catalog_columns().await?;
        let (sql, columns) = insert_statement(allowed);

        if columns.is_empty() {
            return Err(AppError::Internal(anyhow::anyhow!(
                "admin_content recognizes none of the payload columns"
            )));
        }

        let mut query = sqlx::query_scalar::<_, Uuid>(&sql);
        for column in &columns {
            query = match *column {
                "title" => query.bind(payload.title.clone()),
                "description" => query.bind(payload.description.clone()),
                "file_type" => query.bind(payload.file_type.as_str()),
                "content_type" => query.bind(payload.content_type.as_str()),
                "mood" => query.bind(payload.mood.as_str()),
                "file_url" => query.bind(payload.file_url.clone()),
                "file_name" => query.bind(payload.file_name.clone()),
                "uploaded_by" => query.bind(payload.uploaded_by),
                _ => query,
            };
        }

        let id = query.fetch_one(&self.db.pg).await?;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(names: &[&str]) -> HashSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn full_schema_keeps_every_payload_column() {
        let allowed = columns(&[
            "id",
            "title",
            "description",
            "file_type",
            "content_type",
            "mood",
            "file_url",
            "file_name",
            "uploaded_by",
            "created_at",
        ]);

        let (sql, cols) = insert_statement(&allowed);
        assert_eq!(cols.len(), PAYLOAD_COLUMNS.len());
        assert!(sql.contains("mood"));
        assert!(sql.contains("$8"));
    }

    #[test]
    fn unknown_columns_are_stripped_exactly() {
        // Catalog that has not migrated the mood column yet
        let allowed = columns(&[
            "id",
            "title",
            "description",
            "file_type",
            "content_type",
            "file_url",
            "file_name",
            "uploaded_by",
            "created_at",
        ]);

        let (sql, cols) = insert_statement(&allowed);
        assert!(!cols.contains(&"mood"));
        assert_eq!(cols.len(), PAYLOAD_COLUMNS.len() - 1);
        assert!(!sql.contains("mood"));
        // Placeholders stay contiguous with the surviving columns
        assert!(sql.contains("$7"));
        assert!(!sql.contains("$8"));
    }

    #[test]
    fn bind_order_matches_surviving_columns() {
        let allowed = columns(&["title", "mood", "uploaded_by"]);
        let (sql, cols) = insert_statement(&allowed);
        assert_eq!(cols, vec!["title", "mood", "uploaded_by"]);
        assert_eq!(
            sql,
            "INSERT INTO admin_content (title, mood, uploaded_by) VALUES ($1, $2, $3) RETURNING id"
        );
    }
}
