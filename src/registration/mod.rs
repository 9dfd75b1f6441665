pub mod codes;
pub mod dto;
pub mod email;
pub mod password;
pub mod roles;
pub mod services;

pub use codes::{CodeStore, ConfirmationCode, PgCodeStore};
pub use dto::RegisterRequest;
pub use email::{EmailDispatcher, LogMailer};
pub use password::{Argon2Encoder, PasswordEncoder};
pub use roles::{RoleProvider, StaticRoles};
pub use services::RegistrationService;
