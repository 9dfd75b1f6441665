//! Gated-community management core: user, address and service-request
//! lifecycles plus email-confirmed registration. Transport and delivery
//! layers plug in through [`state::AppState`].

pub mod addresses;
pub mod config;
pub mod error;
pub mod policy;
pub mod registration;
pub mod requests;
pub mod state;
pub mod testing;
pub mod users;

pub use config::AppConfig;
pub use error::{EntityKind, ServiceError, ServiceResult};
pub use state::AppState;

/// Install the global tracing subscriber. Honors `RUST_LOG`; set
/// `LOG_FORMAT=json` for JSON output.
pub fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "gatedcommunity=debug".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }
}
