use std::sync::Arc;

use workshop_db::models::notification::{NewNotification, Notification};
use workshop_db::repositories::NotificationRepo;
use workshop_db::DbPool;
use workshop_events::{EventBus, NotificationEvent};

/// Stores notifications and hands them to the live-push pipeline.
#[derive(Clone)]
pub struct NotificationDispatcher {
    pool: DbPool,
    bus: Arc<EventBus>,
}

impl NotificationDispatcher {
    pub fn new(pool: DbPool, bus: Arc<EventBus>) -> Self {
        Self { pool, bus }
    }

    /// Persist `input`, then publish it for live delivery.
    ///
    /// Never fails the caller: the business write that triggered the
    /// notification has already committed, so errors are only logged.
    /// Returns the stored row when persistence succeeded.
    pub async fn dispatch(&self, input: NewNotification) -> Option<Notification> {
        let stored = match NotificationRepo::create(&self.pool, &input).await {
            Ok(n) => n,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    user_id = input.user_id,
                    notification_type = %input.notification_type,
                    "Failed to store notification"
                );
                return None;
            }
        };

        match serde_json::to_value(&stored) {
            Ok(payload) => {
                let subscribers = self
                    .bus
                    .publish(NotificationEvent::new(stored.user_id, payload));
                tracing::debug!(
                    notification_id = stored.id,
                    user_id = stored.user_id,
                    subscribers,
                    "Notification published"
                );
            }
            Err(e) => {
                tracing::error!(error = %e, notification_id = stored.id, "Failed to encode notification");
            }
        }

        Some(stored)
    }
}
