use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

/// Time-boxed activation token, one pending code per user. A new
/// registration attempt supersedes the previous code.
#[derive(Debug, Clone, FromRow)]
pub struct ConfirmationCode {
    pub id: i64,
    pub user_id: i64,
    pub code: String,
    pub expires_at: OffsetDateTime,
}

impl ConfirmationCode {
    /// Issue a fresh code for a user, valid for `ttl_minutes` from now.
    pub fn issue(user_id: i64, ttl_minutes: i64) -> Self {
        Self {
            id: 0,
            user_id,
            code: Uuid::new_v4().to_string(),
            expires_at: OffsetDateTime::now_utc() + Duration::minutes(ttl_minutes),
        }
    }

    /// A code is usable strictly before its expiry instant.
    pub fn is_valid_at(&self, now: OffsetDateTime) -> bool {
        now < self.expires_at
    }
}

#[async_trait]
pub trait CodeStore: Send + Sync {
    async fn save(&self, code: ConfirmationCode) -> anyhow::Result<ConfirmationCode>;
    async fn find_by_user(&self, user_id: i64) -> anyhow::Result<Option<ConfirmationCode>>;
    async fn find_by_code(&self, code: &str) -> anyhow::Result<Option<ConfirmationCode>>;
    async fn remove(&self, id: i64) -> anyhow::Result<()>;
}

pub struct PgCodeStore {
    db: PgPool,
}

impl PgCodeStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CodeStore for PgCodeStore {
    async fn save(&self, code: ConfirmationCode) -> anyhow::Result<ConfirmationCode> {
        let saved = sqlx::query_as::<_, ConfirmationCode>(
            r#"
            INSERT INTO confirmation_codes (user_id, code, expires_at)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, code, expires_at
            "#,
        )
        .bind(code.user_id)
        .bind(&code.code)
        .bind(code.expires_at)
        .fetch_one(&self.db)
        .await?;
        Ok(saved)
    }

    async fn find_by_user(&self, user_id: i64) -> anyhow::Result<Option<ConfirmationCode>> {
        let code = sqlx::query_as::<_, ConfirmationCode>(
            r#"
            SELECT id, user_id, code, expires_at
            FROM confirmation_codes
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;
        Ok(code)
    }

    async fn find_by_code(&self, code: &str) -> anyhow::Result<Option<ConfirmationCode>> {
        let row = sqlx::query_as::<_, ConfirmationCode>(
            r#"
            SELECT id, user_id, code, expires_at
            FROM confirmation_codes
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }

    async fn remove(&self, id: i64) -> anyhow::Result<()> {
        sqlx::query(r#"DELETE FROM confirmation_codes WHERE id = $1"#)
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_code_is_valid_before_expiry_and_not_after() {
        let code = ConfirmationCode::issue(1, 30);
        let now = OffsetDateTime::now_utc();
        assert!(code.is_valid_at(now));
        assert!(!code.is_valid_at(code.expires_at));
        assert!(!code.is_valid_at(code.expires_at + Duration::seconds(1)));
    }

    #[test]
    fn issued_codes_are_unique() {
        let a = ConfirmationCode::issue(1, 30);
        let b = ConfirmationCode::issue(1, 30);
        assert_ne!(a.code, b.code);
    }
}
