pub mod dto;
pub mod repo;
pub mod repo_types;
pub mod services;

pub use dto::UserDto;
pub use repo::{PgUserStore, UserStore};
pub use repo_types::User;
pub use services::UserService;
