use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ConfirmationConfig {
    pub ttl_minutes: i64,
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub confirmation: ConfirmationConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let confirmation = ConfirmationConfig {
            ttl_minutes: std::env::var("CONFIRMATION_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60 * 24),
            base_url: std::env::var("CONFIRMATION_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080/confirm".into()),
        };
        Ok(Self {
            database_url,
            confirmation,
        })
    }
}
