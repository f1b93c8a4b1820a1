//! Notification delivery.
//!
//! [`NotificationDispatcher`] persists a notification and publishes it on the
//! event bus; [`NotificationRouter`] drains the bus and pushes each record to
//! the recipient's WebSocket connections. Delivery is at-most-once: the
//! stored row is the source of truth, the push is best effort.

pub mod dispatcher;
pub mod router;

pub use dispatcher::NotificationDispatcher;
pub use router::NotificationRouter;
