use async_trait::async_trait;
use tracing::info;

use crate::users::repo_types::User;

/// Confirmation-email delivery. A failure here aborts the registration
/// that triggered it.
#[async_trait]
pub trait EmailDispatcher: Send + Sync {
    async fn send_confirmation(&self, user: &User, code: &str) -> anyhow::Result<()>;
}

/// Dispatcher that emits the confirmation link to the structured log
/// instead of an SMTP relay. Real delivery belongs to the transport
/// deployment, which swaps in its own `EmailDispatcher`.
pub struct LogMailer {
    base_url: String,
}

impl LogMailer {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl EmailDispatcher for LogMailer {
    async fn send_confirmation(&self, user: &User, code: &str) -> anyhow::Result<()> {
        info!(
            email = %user.email,
            link = %format!("{}/{}", self.base_url, code),
            "confirmation email dispatched"
        );
        Ok(())
    }
}
