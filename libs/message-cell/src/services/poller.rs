// libs/message-cell/src/services/poller.rs
use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use tokio::sync::RwLock;
use tokio::time::sleep;
use tracing::{debug, warn};

use shared_backend::BackendClient;
use shared_config::AppConfig;

use crate::models::{MessageError, Notification, NotificationListResponse};

/// Gateway-side cache of backend notifications, refreshed by the poller and
/// served without an upstream round trip.
#[derive(Default)]
pub struct NotificationCache {
    inner: RwLock<Vec<Notification>>,
}

impl NotificationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn replace(&self, notifications: Vec<Notification>) {
        *self.inner.write().await = notifications;
    }

    pub async fn snapshot(&self) -> Vec<Notification> {
        self.inner.read().await.clone()
    }
}

/// Interval scheduler for notification freshness. Polling is deliberate here
/// rather than push: the backend exposes no subscription surface to the
/// gateway. Failures back the interval off exponentially up to a cap; the
/// next success resets it to the base interval.
pub struct NotificationPoller {
    backend: BackendClient,
    cache: Arc<NotificationCache>,
    base_interval: Duration,
    max_backoff: Duration,
}

impl NotificationPoller {
    pub fn new(config: &AppConfig, cache: Arc<NotificationCache>) -> Self {
        Self {
            backend: BackendClient::new(config),
            cache,
            base_interval: Duration::from_secs(config.notification_poll_secs),
            max_backoff: Duration::from_secs(config.notification_poll_max_backoff_secs),
        }
    }

    /// Fetch the current notification list once and refresh the cache.
    pub async fn poll_once(&self) -> Result<usize, MessageError> {
        let response: NotificationListResponse = self
            .backend
            .request(Method::GET, "/api/notifications", None, None)
            .await?;

        if !response.success {
            return Err(MessageError::BackendRejection(
                "Notification feed unavailable".to_string(),
            ));
        }

        let count = response.notifications.len();
        self.cache.replace(response.notifications).await;

        debug!("Notification poll refreshed {} entries", count);
        Ok(count)
    }

    /// Poll forever. Meant to be spawned as a background task.
    pub async fn run(self) {
        let mut delay = self.base_interval;

        loop {
            let result = self.poll_once().await;
            if let Err(e) = &result {
                warn!("Notification poll failed: {}", e);
            }

            delay = next_delay(delay, result.is_ok(), self.base_interval, self.max_backoff);
            sleep(delay).await;
        }
    }
}

/// Delay until the next poll: a success resets to the base interval, a
/// failure doubles the current delay up to the cap.
fn next_delay(current: Duration, succeeded: bool, base: Duration, max: Duration) -> Duration {
    if succeeded {
        base
    } else {
        (current * 2).min(max)
    }
}
