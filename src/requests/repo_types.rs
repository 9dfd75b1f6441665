use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

/// Service request raised by a resident. References its owner, an address
/// and the requested proposition service by identifier only.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserRequest {
    pub id: i64,
    pub user_id: i64,
    pub address_id: i64,
    pub service_id: i64,
    pub description: String,
    pub desired_at: OffsetDateTime,
    pub photo_url: Option<String>,
    pub active: bool,
}
