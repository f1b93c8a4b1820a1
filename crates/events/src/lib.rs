//! In-process notification bus.
//!
//! - [`EventBus`]: publish/subscribe hub backed by `tokio::sync::broadcast`.
//! - [`NotificationEvent`]: envelope carrying one freshly persisted
//!   notification to whoever is listening for live delivery.

pub mod bus;

pub use bus::{EventBus, NotificationEvent};
