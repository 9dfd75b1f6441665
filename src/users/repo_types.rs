use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

/// User record in the database. `id == 0` means the row has not been
/// persisted yet; the store assigns the identifier on first save.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub user_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // Argon2 hash, not exposed in JSON
    pub active: bool,
    pub roles: Vec<String>,
    pub created_at: OffsetDateTime,
}
