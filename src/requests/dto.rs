use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::requests::repo_types::UserRequest;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserRequestDto {
    pub id: Option<i64>,
    pub user_id: i64,
    pub address_id: i64,
    pub service_id: i64,
    pub description: String,
    #[serde(with = "time::serde::rfc3339")]
    pub desired_at: OffsetDateTime,
    pub photo_url: Option<String>,
    #[serde(default)]
    pub active: bool,
}

impl UserRequestDto {
    pub fn into_entity(self) -> UserRequest {
        UserRequest {
            id: self.id.unwrap_or(0),
            user_id: self.user_id,
            address_id: self.address_id,
            service_id: self.service_id,
            description: self.description,
            desired_at: self.desired_at,
            photo_url: self.photo_url,
            active: self.active,
        }
    }

    /// Replace every mutable field of an existing row, keeping the identifier.
    pub fn apply_to(&self, request: &mut UserRequest) {
        request.user_id = self.user_id;
        request.address_id = self.address_id;
        request.service_id = self.service_id;
        self.description.clone_into(&mut request.description);
        request.desired_at = self.desired_at;
        request.photo_url.clone_from(&self.photo_url);
    }
}

impl From<&UserRequest> for UserRequestDto {
    fn from(request: &UserRequest) -> Self {
        Self {
            id: Some(request.id),
            user_id: request.user_id,
            address_id: request.address_id,
            service_id: request.service_id,
            description: request.description.clone(),
            desired_at: request.desired_at,
            photo_url: request.photo_url.clone(),
            active: request.active,
        }
    }
}
