mod common;

use std::sync::Arc;

use chrono::Utc;
use pet_care_service::core::notifier::Notifier;
use pet_care_service::core::notifier::composer::GENERATION_FALLBACK;
use pet_care_service::core::notifier::rules::ReminderThresholds;
use pet_care_service::core::store::NotificationStore;
use pet_care_service::core::store::memory::InMemoryStore;
use pet_care_service::enums::{EventCategory, NotificationType};
use pet_care_service::models::notification::Notification;

use common::*;

fn of_type(notifications: &[Notification], r#type: NotificationType) -> Vec<&Notification> {
    notifications
        .iter()
        .filter(|notification| notification.r#type == r#type)
        .collect()
}

#[tokio::test]
async fn stale_diet_log_produces_one_unread_reminder() {
    let store = Arc::new(InMemoryStore::new());
    let (user_id, dog_id) = owner_with_dog(&store, "Sam", "Rex").await;
    log_diet(&store, &user_id, &dog_id, days_ago(20)).await;

    let report = notifier(store.clone(), Arc::new(StaticTextGenerator(GENERATED_TEXT)))
        .run_daily_sweep()
        .await;

    assert!(report.success);
    assert_eq!(report.users, 1);
    assert_eq!(report.dogs, 1);

    let notifications = store.list_for_user(&user_id).await.unwrap();
    let diet = of_type(&notifications, NotificationType::Diet);
    assert_eq!(diet.len(), 1);
    assert_eq!(diet[0].dog_id, dog_id);
    assert_eq!(diet[0].title, "Diet Update Reminder");
    assert_eq!(diet[0].message, GENERATED_TEXT);
    assert!(!diet[0].read);
}

#[tokio::test]
async fn recent_diet_log_is_left_alone() {
    let store = Arc::new(InMemoryStore::new());
    let (user_id, dog_id) = owner_with_dog(&store, "Sam", "Rex").await;
    log_diet(&store, &user_id, &dog_id, days_ago(10)).await;

    notifier(store.clone(), Arc::new(StaticTextGenerator(GENERATED_TEXT)))
        .run_daily_sweep()
        .await;

    let notifications = store.list_for_user(&user_id).await.unwrap();
    assert!(of_type(&notifications, NotificationType::Diet).is_empty());
}

#[tokio::test]
async fn second_sweep_on_the_same_day_creates_nothing() {
    let store = Arc::new(InMemoryStore::new());
    let (user_id, dog_id) = owner_with_dog(&store, "Sam", "Rex").await;
    log_diet(&store, &user_id, &dog_id, days_ago(20)).await;
    let notifier = notifier(store.clone(), Arc::new(StaticTextGenerator(GENERATED_TEXT)));

    let first = notifier.run_daily_sweep().await;
    let created = store.notification_count().await;
    let second = notifier.run_daily_sweep().await;

    assert_eq!(first.created, created);
    assert_eq!(second.created, 0);
    assert_eq!(second.skipped, NotificationType::ALL.len());
    assert_eq!(store.notification_count().await, created);
}

#[tokio::test]
async fn dog_without_history_gets_every_reminder() {
    let store = Arc::new(InMemoryStore::new());
    let (user_id, _) = owner_with_dog(&store, "Sam", "Rex").await;

    let report = notifier(store.clone(), Arc::new(StaticTextGenerator(GENERATED_TEXT)))
        .run_daily_sweep()
        .await;

    assert_eq!(report.created, NotificationType::ALL.len());
    let notifications = store.list_for_user(&user_id).await.unwrap();
    for r#type in NotificationType::ALL {
        assert_eq!(of_type(&notifications, r#type).len(), 1, "{} reminder", r#type);
    }
}

#[tokio::test]
async fn exercise_logged_today_suppresses_exercise_reminder() {
    let store = Arc::new(InMemoryStore::new());
    let (user_id, dog_id) = owner_with_dog(&store, "Sam", "Rex").await;
    log_exercise(&store, &user_id, &dog_id, Utc::now()).await;

    notifier(store.clone(), Arc::new(StaticTextGenerator(GENERATED_TEXT)))
        .run_daily_sweep()
        .await;

    let notifications = store.list_for_user(&user_id).await.unwrap();
    assert!(of_type(&notifications, NotificationType::Exercise).is_empty());
    assert_eq!(of_type(&notifications, NotificationType::Diet).len(), 1);
}

#[tokio::test]
async fn generator_failure_stores_placeholder_and_continues() {
    let store = Arc::new(InMemoryStore::new());
    let (user_id, dog_id) = owner_with_dog(&store, "Sam", "Rex").await;
    log_diet(&store, &user_id, &dog_id, days_ago(20)).await;

    let report = notifier(store.clone(), Arc::new(FailingTextGenerator))
        .run_daily_sweep()
        .await;

    assert!(report.success);
    assert_eq!(report.failed, 0);
    let notifications = store.list_for_user(&user_id).await.unwrap();
    let diet = of_type(&notifications, NotificationType::Diet);
    assert_eq!(diet.len(), 1);
    assert_eq!(diet[0].message, GENERATION_FALLBACK);
}

#[tokio::test]
async fn failing_category_does_not_abort_the_sweep() {
    let store = Arc::new(InMemoryStore::new());
    let (user_id, _) = owner_with_dog(&store, "Sam", "Rex").await;
    let events = Arc::new(BrokenCategoryEvents {
        inner: store.clone(),
        broken: EventCategory::Diet,
    });

    let notifier = Notifier::new(
        events,
        store.clone(),
        store.clone(),
        Arc::new(StaticTextGenerator(GENERATED_TEXT)),
        chrono_tz::UTC,
        ReminderThresholds::default(),
    );
    let report = notifier.run_daily_sweep().await;

    assert!(report.success);
    assert_eq!(report.failed, 1);
    assert_eq!(report.created, 3);

    let notifications = store.list_for_user(&user_id).await.unwrap();
    assert!(of_type(&notifications, NotificationType::Diet).is_empty());
    assert_eq!(of_type(&notifications, NotificationType::Wellness).len(), 1);
}

#[tokio::test]
async fn unreachable_directory_reports_failure() {
    let store = Arc::new(InMemoryStore::new());
    let notifier = Notifier::new(
        store.clone(),
        store.clone(),
        Arc::new(UnreachableDirectory),
        Arc::new(StaticTextGenerator(GENERATED_TEXT)),
        chrono_tz::UTC,
        ReminderThresholds::default(),
    );

    let report = notifier.run_daily_sweep().await;

    assert!(!report.success);
    assert_eq!(report.created, 0);
    assert_eq!(store.notification_count().await, 0);
}

#[tokio::test]
async fn each_owner_only_sees_their_own_reminders() {
    let store = Arc::new(InMemoryStore::new());
    let (sam, rex) = owner_with_dog(&store, "Sam", "Rex").await;
    let (kim, bella) = owner_with_dog(&store, "Kim", "Bella").await;

    let report = notifier(store.clone(), Arc::new(StaticTextGenerator(GENERATED_TEXT)))
        .run_daily_sweep()
        .await;
    assert_eq!(report.users, 2);
    assert_eq!(report.dogs, 2);

    let for_sam = store.list_for_user(&sam).await.unwrap();
    let for_kim = store.list_for_user(&kim).await.unwrap();

    assert_eq!(for_sam.len(), NotificationType::ALL.len());
    assert_eq!(for_kim.len(), NotificationType::ALL.len());
    assert!(for_sam.iter().all(|n| n.user_id == sam && n.dog_id == rex));
    assert!(for_kim.iter().all(|n| n.user_id == kim && n.dog_id == bella));
}
