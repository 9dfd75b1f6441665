pub mod dto;
pub mod repo;
pub mod repo_types;
pub mod services;

pub use dto::UserRequestDto;
pub use repo::{PgRequestStore, RequestStore};
pub use repo_types::UserRequest;
pub use services::RequestService;
