use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Address record in the database. `id == 0` means not yet persisted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Address {
    pub id: i64,
    pub street: String,
    pub number_house: i32,
    pub city: String,
    pub postal_index: String,
    pub active: bool,
}
