use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend_url: String,
    pub notification_poll_secs: u64,
    pub notification_poll_max_backoff_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            backend_url: env::var("BACKEND_URL")
                .unwrap_or_else(|_| {
                    warn!("BACKEND_URL not set, using empty value");
                    String::new()
                }),
            notification_poll_secs: env::var("NOTIFICATION_POLL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            notification_poll_max_backoff_secs: env::var("NOTIFICATION_POLL_MAX_BACKOFF_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.backend_url.is_empty()
    }
}
