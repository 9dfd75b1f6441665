use serde::Deserialize;

/// Registration request body. The password travels in plain text only up
/// to the encoder; it is never stored or logged.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub user_name: String,
    pub email: String,
    pub password: String,
}
