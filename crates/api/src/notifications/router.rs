//! Bus-to-WebSocket fan-out.

use std::sync::Arc;

use axum::extract::ws::Message;
use serde_json::json;
use tokio::sync::broadcast;
use workshop_core::notifications::WS_EVENT_NOTIFICATION;
use workshop_events::NotificationEvent;

use crate::ws::WsManager;

/// Pushes every published notification to its recipient's live connections.
pub struct NotificationRouter {
    ws_manager: Arc<WsManager>,
}

impl NotificationRouter {
    pub fn new(ws_manager: Arc<WsManager>) -> Self {
        Self { ws_manager }
    }

    /// Run the routing loop until the bus is dropped.
    ///
    /// A lagging receiver skips the missed events; they remain available
    /// through the REST listing.
    pub async fn run(self, mut receiver: broadcast::Receiver<NotificationEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    self.deliver(&event).await;
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Notification router lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, notification router shutting down");
                    break;
                }
            }
        }
    }

    /// Push one event; returns the number of connections reached.
    pub async fn deliver(&self, event: &NotificationEvent) -> usize {
        let frame = json!({
            "event": WS_EVENT_NOTIFICATION,
            "data": event.notification,
        });
        let sent = self
            .ws_manager
            .send_to_user(event.recipient_id, Message::Text(frame.to_string().into()))
            .await;
        tracing::debug!(user_id = event.recipient_id, connections = sent, "Notification pushed");
        sent
    }
}
