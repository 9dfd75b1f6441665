use async_trait::async_trait;
use sqlx::PgPool;

use crate::users::repo_types::User;

/// Persistence gateway for users. Absence is `Ok(None)`, never an error;
/// callers decide whether a missing row is fatal.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert (`id == 0`) or update by identifier, returning the stored row.
    async fn save(&self, user: User) -> anyhow::Result<User>;
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<User>>;
    async fn find_all(&self) -> anyhow::Result<Vec<User>>;
    async fn delete_by_id(&self, id: i64) -> anyhow::Result<()>;
    async fn find_by_user_name(&self, user_name: &str) -> anyhow::Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    async fn exists_by_email(&self, email: &str) -> anyhow::Result<bool>;
}

pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn save(&self, user: User) -> anyhow::Result<User> {
        let saved = if user.id == 0 {
            sqlx::query_as::<_, User>(
                r#"
                INSERT INTO users (user_name, email, password_hash, active, roles)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id, user_name, email, password_hash, active, roles, created_at
                "#,
            )
            .bind(&user.user_name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.active)
            .bind(&user.roles)
            .fetch_one(&self.db)
            .await?
        } else {
            sqlx::query_as::<_, User>(
                r#"
                UPDATE users
                SET user_name = $2, email = $3, password_hash = $4, active = $5, roles = $6
                WHERE id = $1
                RETURNING id, user_name, email, password_hash, active, roles, created_at
                "#,
            )
            .bind(user.id)
            .bind(&user.user_name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.active)
            .bind(&user.roles)
            .fetch_one(&self.db)
            .await?
        };
        Ok(saved)
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, user_name, email, password_hash, active, roles, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn find_all(&self) -> anyhow::Result<Vec<User>> {
        let rows = sqlx::query_as::<_, User>(
            r#"
            SELECT id, user_name, email, password_hash, active, roles, created_at
            FROM users
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn delete_by_id(&self, id: i64) -> anyhow::Result<()> {
        sqlx::query(r#"DELETE FROM users WHERE id = $1"#)
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(())
    }

    async fn find_by_user_name(&self, user_name: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, user_name, email, password_hash, active, roles, created_at
            FROM users
            WHERE user_name = $1
            "#,
        )
        .bind(user_name)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, user_name, email, password_hash, active, roles, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn exists_by_email(&self, email: &str) -> anyhow::Result<bool> {
        let exists: (bool,) =
            sqlx::query_as(r#"SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)"#)
                .bind(email)
                .fetch_one(&self.db)
                .await?;
        Ok(exists.0)
    }
}
