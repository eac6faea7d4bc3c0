// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use recoverflow::db::Storage;
use recoverflow::error::{AppError, Outcome, SkipReason};
use recoverflow::services::Permission;
use std::time::Duration;
use tokio::time::timeout;

mod common;
use common::{at, reminder, reminder_service, ChannelNotifier};

// 2024-04-18 is a Thursday.
const WEEK: Duration = Duration::from_secs(8 * 24 * 60 * 60);
const PAST_FIRST_FIRE: Duration = Duration::from_secs(21 * 60 * 60);

#[tokio::test(start_paused = true)]
async fn test_reminder_fires_on_next_scheduled_day() {
    let (notifier, mut rx) = ChannelNotifier::new(Permission::Granted);
    let service = reminder_service(&Storage::in_memory(), notifier, at(2024, 4, 18, 12, 0));

    let outcome = service.create_reminder(reminder("r1", vec![1, 3, 5], true)).unwrap();
    assert_eq!(outcome, Outcome::Applied);
    assert_eq!(
        service.scheduler().next_fire("r1"),
        Some(at(2024, 4, 19, 8, 0))
    );

    let (title, body) = timeout(WEEK, rx.recv())
        .await
        .expect("reminder should fire")
        .unwrap();
    assert_eq!(title, "Time for your exercises");
    assert_eq!(body, "Reminder r1");
}

#[tokio::test(start_paused = true)]
async fn test_reminder_rearms_after_firing() {
    let (notifier, mut rx) = ChannelNotifier::new(Permission::Granted);
    let service = reminder_service(&Storage::in_memory(), notifier, at(2024, 4, 18, 12, 0));
    assert!(service
        .create_reminder(reminder("r1", vec![1, 3, 5], true))
        .unwrap()
        .is_applied());

    timeout(WEEK, rx.recv()).await.expect("first fire").unwrap();
    tokio::task::yield_now().await;

    // Friday fired, Monday is next
    assert!(service.scheduler().is_armed("r1"));
    assert_eq!(
        service.scheduler().next_fire("r1"),
        Some(at(2024, 4, 22, 8, 0))
    );
    timeout(WEEK, rx.recv()).await.expect("second fire").unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_deleted_reminder_never_fires() {
    let (notifier, mut rx) = ChannelNotifier::new(Permission::Granted);
    let storage = Storage::in_memory();
    let service = reminder_service(&storage, notifier, at(2024, 4, 18, 12, 0));
    assert!(service
        .create_reminder(reminder("r1", vec![5], true))
        .unwrap()
        .is_applied());

    assert_eq!(service.delete_reminder("r1").unwrap(), Outcome::Applied);
    assert!(!service.scheduler().is_armed("r1"));
    assert!(storage.get_reminders().unwrap().is_empty());

    assert!(timeout(WEEK, rx.recv()).await.is_err());
}

#[tokio::test(start_paused = true)]
async fn test_disabling_cancels_pending_fire() {
    let (notifier, mut rx) = ChannelNotifier::new(Permission::Granted);
    let service = reminder_service(&Storage::in_memory(), notifier, at(2024, 4, 18, 12, 0));
    assert!(service
        .create_reminder(reminder("r1", vec![5], true))
        .unwrap()
        .is_applied());

    let outcome = service.update_reminder(reminder("r1", vec![5], false)).unwrap();

    assert_eq!(outcome, Outcome::Applied);
    assert_eq!(service.scheduler().armed_count(), 0);
    assert!(!service.list_reminders().unwrap()[0].enabled);
    assert!(timeout(WEEK, rx.recv()).await.is_err());
}

#[tokio::test(start_paused = true)]
async fn test_permission_revoked_drops_fire_and_stops() {
    let (notifier, mut rx) = ChannelNotifier::new(Permission::Granted);
    let service = reminder_service(
        &Storage::in_memory(),
        notifier.clone(),
        at(2024, 4, 18, 12, 0),
    );
    assert!(service
        .create_reminder(reminder("r1", vec![5], true))
        .unwrap()
        .is_applied());

    notifier.set_permission(Permission::Denied);
    tokio::time::sleep(PAST_FIRST_FIRE).await;
    tokio::task::yield_now().await;

    assert!(rx.try_recv().is_err());
    assert!(!service.scheduler().is_armed("r1"));
    assert_eq!(service.scheduler().next_fire("r1"), None);
}

#[tokio::test(start_paused = true)]
async fn test_initialize_arms_only_schedulable_reminders() {
    let (notifier, _rx) = ChannelNotifier::new(Permission::Granted);
    let storage = Storage::in_memory();
    storage
        .store_reminders(&[
            reminder("r1", vec![1, 3, 5], true),
            reminder("r2", vec![2], false),
            reminder("r3", vec![], true),
        ])
        .unwrap();
    let service = reminder_service(&storage, notifier, at(2024, 4, 18, 12, 0));

    assert_eq!(service.initialize_reminders().unwrap(), 1);
    assert!(service.scheduler().is_armed("r1"));
    assert!(!service.scheduler().is_armed("r2"));
    assert!(!service.scheduler().is_armed("r3"));
}

#[tokio::test(start_paused = true)]
async fn test_update_and_delete_unknown_reminder_are_skipped() {
    let (notifier, _rx) = ChannelNotifier::new(Permission::Granted);
    let storage = Storage::in_memory();
    let service = reminder_service(&storage, notifier, at(2024, 4, 18, 12, 0));

    assert_eq!(
        service.update_reminder(reminder("ghost", vec![1], true)).unwrap(),
        Outcome::Skipped(SkipReason::NotFound("ghost".to_string()))
    );
    assert_eq!(
        service.delete_reminder("ghost").unwrap(),
        Outcome::Skipped(SkipReason::NotFound("ghost".to_string()))
    );
    assert!(storage.get_reminders().unwrap().is_empty());
    assert_eq!(service.scheduler().armed_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_create_rejects_invalid_and_duplicate_reminders() {
    let (notifier, _rx) = ChannelNotifier::new(Permission::Granted);
    let service = reminder_service(&Storage::in_memory(), notifier, at(2024, 4, 18, 12, 0));

    let mut bad_time = reminder("r1", vec![1], true);
    bad_time.time = "8 o'clock".to_string();
    assert!(matches!(
        service.create_reminder(bad_time),
        Err(AppError::BadRequest(_))
    ));

    assert!(matches!(
        service.create_reminder(reminder("r1", vec![7], true)),
        Err(AppError::BadRequest(_))
    ));

    assert!(service
        .create_reminder(reminder("r1", vec![1], true))
        .unwrap()
        .is_applied());
    assert!(matches!(
        service.create_reminder(reminder("r1", vec![2], true)),
        Err(AppError::BadRequest(_))
    ));
    assert_eq!(service.list_reminders().unwrap().len(), 1);
}
