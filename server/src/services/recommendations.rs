use std::collections::HashSet;

use uuid::Uuid;

use crate::db::Database;
use crate::error::Result;
use crate::models::{AdminContent, ContentItem, Selection};

pub struct RecommendationService {
    db: Database,
}

impl RecommendationService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Fetch catalog items matching the selection, newest first.
    ///
    /// An incomplete selection (no mood, or category count != 1) yields an
    /// empty list without touching the database.
    pub async fn fetch(&self, selection: &Selection) -> Result<Vec<ContentItem>> {
        let Some((mood, category)) = selection.complete() else {
            return Ok(Vec::new());
        };

        let rows: Vec<AdminContent> = sqlx::query_as(
            "SELECT * FROM admin_content
             WHERE mood = $1 AND content_type = $2
             ORDER BY created_at DESC",
        )
        .bind(mood.as_str())
        .bind(category.as_str())
        .fetch_all(&self.db.pg)
        .await?;

        let items = rows
            .into_iter()
            .filter_map(|row| {
                let id = row.id;
                let item = row.into_item();
                if item.is_none() {
                    tracing::warn!("Skipping catalog row {} with unknown category", id);
                }
                item
            })
            .collect();

        Ok(items)
    }

    /// Flag items the user has already bookmarked
    pub async fn mark_bookmarked(&self, user_id: Uuid, items: &mut [ContentItem]) -> Result<()> {
        if items.is_empty() {
            return Ok(());
        }

        let ids: Vec<Uuid> =
            sqlx::query_scalar("SELECT content_id FROM bookmarks WHERE user_id = $1")
                .bind(user_id)
                .fetch_all(&self.db.pg)
                .await?;
        let ids: HashSet<Uuid> = ids.into_iter().collect();

        for item in items.iter_mut() {
            item.bookmarked = ids.contains(&item.id);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContentKind, Mood};
    use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
    use std::time::Duration;

    fn unreachable_db() -> Database {
        let opts = PgConnectOptions::new()
            .host("127.0.0.1")
            .port(9)
            .username("nobody")
            .database("none");
        let pool = PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(200))
            .connect_lazy_with(opts);
        Database { pg: pool }
    }

    #[tokio::test]
    async fn incomplete_selection_returns_empty_without_querying() {
        let svc = RecommendationService::new(unreachable_db());

        // No mood, no category
        let items = svc.fetch(&Selection::default()).await.unwrap();
        assert!(items.is_empty());

        // Mood but no category
        let mut sel = Selection::default();
        sel.select_mood(Mood::Relax);
        let items = svc.fetch(&sel).await.unwrap();
        assert!(items.is_empty());

        // Category toggled off again
        sel.toggle_category(ContentKind::Music);
        sel.toggle_category(ContentKind::Music);
        let items = svc.fetch(&sel).await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn complete_selection_does_query() {
        let svc = RecommendationService::new(unreachable_db());

        let mut sel = Selection::default();
        sel.select_mood(Mood::Relax);
        sel.toggle_category(ContentKind::Music);

        // The database is unreachable, so actually issuing the query
        // must surface an error rather than an empty result.
        assert!(svc.fetch(&sel).await.is_err());
    }
}
