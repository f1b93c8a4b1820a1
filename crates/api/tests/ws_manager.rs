//! Unit tests for `WsManager`.
//!
//! These exercise the connection manager directly, without an HTTP upgrade.

use axum::extract::ws::Message;
use workshop_api::ws::WsManager;

#[tokio::test]
async fn new_manager_has_zero_connections() {
    let manager = WsManager::new();

    assert_eq!(manager.connection_count().await, 0);
}

#[tokio::test]
async fn add_and_remove_track_connection_count() {
    let manager = WsManager::new();

    let _rx = manager.add("conn-1".to_string(), None).await;
    assert_eq!(manager.connection_count().await, 1);

    manager.remove("nonexistent").await;
    assert_eq!(manager.connection_count().await, 1);

    manager.remove("conn-1").await;
    assert_eq!(manager.connection_count().await, 0);
}

#[tokio::test]
async fn send_to_user_reaches_every_joined_connection() {
    let manager = WsManager::new();

    let mut tab_a = manager.add("a".to_string(), None).await;
    let mut tab_b = manager.add("b".to_string(), None).await;
    let mut other = manager.add("c".to_string(), None).await;
    assert!(manager.join("a", 7).await);
    assert!(manager.join("b", 7).await);
    assert!(manager.join("c", 8).await);

    let sent = manager
        .send_to_user(7, Message::Text("hello".into()))
        .await;
    assert_eq!(sent, 2);

    assert!(matches!(tab_a.recv().await, Some(Message::Text(t)) if t.as_str() == "hello"));
    assert!(matches!(tab_b.recv().await, Some(Message::Text(t)) if t.as_str() == "hello"));
    assert!(other.try_recv().is_err());
}

#[tokio::test]
async fn unjoined_connections_receive_nothing() {
    let manager = WsManager::new();

    let mut rx = manager.add("anon".to_string(), None).await;
    assert_eq!(manager.send_to_user(1, Message::Text("x".into())).await, 0);
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn join_unknown_connection_is_rejected() {
    let manager = WsManager::new();

    assert!(!manager.join("ghost", 1).await);
}

#[tokio::test]
async fn send_skips_closed_receivers() {
    let manager = WsManager::new();

    let rx = manager.add("gone".to_string(), Some(3)).await;
    drop(rx);

    assert_eq!(manager.send_to_user(3, Message::Text("x".into())).await, 0);
}

#[tokio::test]
async fn shutdown_all_sends_close_and_clears() {
    let manager = WsManager::new();

    let mut rx = manager.add("conn-1".to_string(), Some(1)).await;
    manager.shutdown_all().await;

    assert_eq!(manager.connection_count().await, 0);
    assert!(matches!(rx.recv().await, Some(Message::Close(None))));
}

#[tokio::test]
async fn ping_all_pings_every_connection() {
    let manager = WsManager::new();

    let mut rx = manager.add("conn-1".to_string(), None).await;
    manager.ping_all().await;

    assert!(matches!(rx.recv().await, Some(Message::Ping(_))));
}
