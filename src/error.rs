use thiserror::Error;

/// Entity family a failure refers to, for precise messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    User,
    Address,
    UserRequest,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EntityKind::User => "user",
            EntityKind::Address => "address",
            EntityKind::UserRequest => "user request",
        };
        f.write_str(s)
    }
}

/// Typed failures surfaced by the services. Nothing is retried internally;
/// every variant carries enough context to render an exact message.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{kind} {key} not found")]
    NotFound { kind: EntityKind, key: String },

    #[error("{kind} {id} is not active")]
    Inactive { kind: EntityKind, id: i64 },

    #[error("email {email} is already in use")]
    EmailTaken { email: String },

    #[error("confirmation code not found")]
    CodeNotFound,

    #[error("confirmation code expired")]
    CodeExpired,

    #[error("{0}")]
    Invalid(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ServiceError {
    pub fn not_found(kind: EntityKind, id: i64) -> Self {
        ServiceError::NotFound {
            kind,
            key: id.to_string(),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_entity_and_key() {
        let err = ServiceError::not_found(EntityKind::Address, 42);
        assert_eq!(err.to_string(), "address 42 not found");

        let err = ServiceError::Inactive {
            kind: EntityKind::UserRequest,
            id: 7,
        };
        assert_eq!(err.to_string(), "user request 7 is not active");

        let err = ServiceError::EmailTaken {
            email: "a@x.com".into(),
        };
        assert!(err.to_string().contains("a@x.com"));
    }
}
