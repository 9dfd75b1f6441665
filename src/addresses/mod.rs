pub mod dto;
pub mod repo;
pub mod repo_types;
pub mod services;

pub use dto::AddressDto;
pub use repo::{AddressStore, PgAddressStore};
pub use repo_types::Address;
pub use services::AddressService;
