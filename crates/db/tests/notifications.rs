//! Repository tests for per-user notifications.

mod common;

use sqlx::PgPool;
use workshop_core::job_card::Priority;
use workshop_core::notifications::NotificationType;
use workshop_core::roles::Role;
use workshop_core::types::DbId;
use workshop_db::models::notification::NewNotification;
use workshop_db::repositories::NotificationRepo;

fn note(user_id: DbId, title: &str) -> NewNotification {
    NewNotification {
        user_id,
        notification_type: NotificationType::StatusChange,
        title: title.to_string(),
        message: "KA01 status: DONE".to_string(),
        job_card_id: None,
        priority: Priority::Medium,
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_read_and_delete_are_scoped_to_owner(pool: PgPool) {
    let alice = common::user(&pool, "Alice", Role::Advisor).await;
    let bob = common::user(&pool, "Bob", Role::Manager).await;

    let first = NotificationRepo::create(&pool, &note(alice.id, "one")).await.unwrap();
    NotificationRepo::create(&pool, &note(alice.id, "two")).await.unwrap();
    NotificationRepo::create(&pool, &note(bob.id, "bob")).await.unwrap();

    let list = NotificationRepo::list_for_user(&pool, alice.id, false, 50).await.unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].title, "two", "newest first");
    assert_eq!(list[0].notification_type, "STATUS_CHANGE");
    assert_eq!(NotificationRepo::unread_count(&pool, alice.id).await.unwrap(), 2);

    // Bob cannot touch Alice's notification.
    assert!(NotificationRepo::mark_read(&pool, first.id, bob.id).await.unwrap().is_none());
    assert!(!NotificationRepo::delete(&pool, first.id, bob.id).await.unwrap());

    let read = NotificationRepo::mark_read(&pool, first.id, alice.id)
        .await
        .unwrap()
        .unwrap();
    assert!(read.is_read);
    let unread = NotificationRepo::list_for_user(&pool, alice.id, true, 50).await.unwrap();
    assert_eq!(unread.len(), 1);

    assert_eq!(NotificationRepo::mark_all_read(&pool, alice.id).await.unwrap(), 1);
    assert_eq!(NotificationRepo::unread_count(&pool, alice.id).await.unwrap(), 0);
    assert_eq!(NotificationRepo::unread_count(&pool, bob.id).await.unwrap(), 1);

    assert!(NotificationRepo::delete(&pool, first.id, alice.id).await.unwrap());
    assert_eq!(
        NotificationRepo::list_for_user(&pool, alice.id, false, 50).await.unwrap().len(),
        1
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_respects_limit(pool: PgPool) {
    let alice = common::user(&pool, "Alice", Role::Advisor).await;
    for i in 0..5 {
        NotificationRepo::create(&pool, &note(alice.id, &format!("n{i}"))).await.unwrap();
    }
    let list = NotificationRepo::list_for_user(&pool, alice.id, false, 3).await.unwrap();
    assert_eq!(list.len(), 3);
}
