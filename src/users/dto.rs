use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::users::repo_types::User;

/// Wire-facing user shape. Carries no password material.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserDto {
    pub id: Option<i64>,
    pub user_name: String,
    pub email: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub active: bool,
}

impl UserDto {
    /// Build a fresh entity from this DTO. Fields the DTO does not carry
    /// start empty; the caller decides the active flag and the store
    /// assigns the identifier.
    pub fn into_entity(self) -> User {
        User {
            id: self.id.unwrap_or(0),
            user_name: self.user_name,
            email: self.email,
            password_hash: String::new(),
            active: self.active,
            roles: self.roles,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    /// Merge this DTO into an existing row, preserving the identifier,
    /// password hash and creation timestamp.
    pub fn apply_to(&self, user: &mut User) {
        self.user_name.clone_into(&mut user.user_name);
        self.email.clone_into(&mut user.email);
        self.roles.clone_into(&mut user.roles);
    }
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: Some(user.id),
            user_name: user.user_name.clone(),
            email: user.email.clone(),
            roles: user.roles.clone(),
            active: user.active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored_user() -> User {
        User {
            id: 3,
            user_name: "bob".into(),
            email: "bob@x.com".into(),
            password_hash: "$argon2$secret".into(),
            active: true,
            roles: vec!["ROLE_USER".into()],
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn apply_to_preserves_id_and_password() {
        let mut user = stored_user();
        let dto = UserDto {
            id: None,
            user_name: "robert".into(),
            email: "robert@x.com".into(),
            roles: vec!["ROLE_USER".into(), "ROLE_ADMIN".into()],
            active: false,
        };

        dto.apply_to(&mut user);

        assert_eq!(user.id, 3);
        assert_eq!(user.user_name, "robert");
        assert_eq!(user.email, "robert@x.com");
        assert_eq!(user.password_hash, "$argon2$secret");
        assert_eq!(user.roles.len(), 2);
    }

    #[test]
    fn dto_serialization_skips_nothing_sensitive() {
        let dto = UserDto::from(&stored_user());
        let json = serde_json::to_string(&dto).unwrap();
        assert!(json.contains("bob@x.com"));
        assert!(!json.contains("argon2"));
    }
}
