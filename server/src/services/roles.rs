use uuid::Uuid;

use crate::db::Database;
use crate::models::UserRole;

pub const ADMIN_ROLE: &str = "admin";

pub struct RoleService {
    db: Database,
}

impl RoleService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Whether the identity holds the admin role.
    ///
    /// An absent identity is never admin and issues no query. A failed
    /// lookup is logged and treated as not-admin (fails closed).
    pub async fn is_admin(&self, user_id: Option<Uuid>) -> bool {
        let Some(user_id) = user_id else {
            return false;
        };

        let lookup: Result<Option<UserRole>, sqlx::Error> =
            sqlx::query_as("SELECT * FROM user_roles WHERE user_id = $1 AND role = $2")
                .bind(user_id)
                .bind(ADMIN_ROLE)
                .fetch_optional(&self.db.pg)
                .await;

        match lookup {
            Ok(row) => row.is_some(),
            Err(e) => {
                tracing::error!("Role lookup failed for {}: {:?}", user_id, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
    use std::time::Duration;

    // A lazy pool pointed at a closed port: any query fails fast, and a
    // call that returns without erroring never touched the network.
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
    async fn anonymous_identity_is_never_admin_and_skips_the_query() {
        let svc = RoleService::new(unreachable_db());
        assert!(!svc.is_admin(None).await);
    }

    #[tokio::test]
    async fn lookup_failure_fails_closed() {
        let svc = RoleService::new(unreachable_db());
        assert!(!svc.is_admin(Some(Uuid::new_v4())).await);
    }
}
