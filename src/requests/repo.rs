use async_trait::async_trait;
use sqlx::PgPool;

use crate::requests::repo_types::UserRequest;

#[async_trait]
pub trait RequestStore: Send + Sync {
    /// Insert (`id == 0`) or update by identifier, returning the stored row.
    async fn save(&self, request: UserRequest) -> anyhow::Result<UserRequest>;
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<UserRequest>>;
    async fn find_all(&self) -> anyhow::Result<Vec<UserRequest>>;
    async fn delete_by_id(&self, id: i64) -> anyhow::Result<()>;
}

pub struct PgRequestStore {
    db: PgPool,
}

impl PgRequestStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RequestStore for PgRequestStore {
    async fn save(&self, request: UserRequest) -> anyhow::Result<UserRequest> {
        let saved = if request.id == 0 {
            sqlx::query_as::<_, UserRequest>(
                r#"
                INSERT INTO user_requests
                    (user_id, address_id, service_id, description, desired_at, photo_url, active)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING id, user_id, address_id, service_id, description,
                          desired_at, photo_url, active
                "#,
            )
            .bind(request.user_id)
            .bind(request.address_id)
            .bind(request.service_id)
            .bind(&request.description)
            .bind(request.desired_at)
            .bind(&request.photo_url)
            .bind(request.active)
            .fetch_one(&self.db)
            .await?
        } else {
            sqlx::query_as::<_, UserRequest>(
                r#"
                UPDATE user_requests
                SET user_id = $2, address_id = $3, service_id = $4, description = $5,
                    desired_at = $6, photo_url = $7, active = $8
                WHERE id = $1
                RETURNING id, user_id, address_id, service_id, description,
                          desired_at, photo_url, active
                "#,
            )
            .bind(request.id)
            .bind(request.user_id)
            .bind(request.address_id)
            .bind(request.service_id)
            .bind(&request.description)
            .bind(request.desired_at)
            .bind(&request.photo_url)
            .bind(request.active)
            .fetch_one(&self.db)
            .await?
        };
        Ok(saved)
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<UserRequest>> {
        let request = sqlx::query_as::<_, UserRequest>(
            r#"
            SELECT id, user_id, address_id, service_id, description,
                   desired_at, photo_url, active
            FROM user_requests
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(request)
    }

    async fn find_all(&self) -> anyhow::Result<Vec<UserRequest>> {
        let rows = sqlx::query_as::<_, UserRequest>(
            r#"
            SELECT id, user_id, address_id, service_id, description,
                   desired_at, photo_url, active
            FROM user_requests
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn delete_by_id(&self, id: i64) -> anyhow::Result<()> {
        sqlx::query(r#"DELETE FROM user_requests WHERE id = $1"#)
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(())
    }
}
