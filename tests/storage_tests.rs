// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use chrono::NaiveDate;
use recoverflow::db::{keys, FileStore, KeyValueStore, Storage};
use recoverflow::error::AppError;
use recoverflow::models::{BodyPart, StreakPolicy};
use recoverflow::seed;
use std::path::PathBuf;
use std::sync::Arc;

mod common;
use common::{at, reminder, tracker_at};

const LEGACY_USER: &str = r#"{
    "id": "user1",
    "name": "Alex Johnson",
    "email": "alex@example.com",
    "profilePicture": "/images/profile/default-avatar.jpg",
    "injuries": [],
    "activePrograms": [],
    "completedPrograms": [],
    "progressStats": {
        "programsCompleted": 0,
        "exercisesCompleted": 12,
        "currentStreak": 3,
        "longestStreak": 5,
        "weeklyProgress": [
            {"weekStartDate": "2024-04-14", "daysActive": 5, "exercisesCompleted": 12, "minutesActive": 95}
        ],
        "painLevels": [
            {"date": "2024-04-20", "level": 3, "bodyPart": "ankle", "notes": "Continuing to improve"},
            {"date": "2024-04-14", "level": 6, "bodyPart": "ankle"}
        ]
    }
}"#;

fn temp_store_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "recoverflow-storage-{}-{}",
        name,
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    dir.join("data").join("store.json")
}

#[test]
fn test_legacy_user_blob_loads() {
    let store = Arc::new(FileStore::open(temp_store_path("legacy")).unwrap());
    store.set(keys::USER, LEGACY_USER.to_string()).unwrap();
    let storage = Storage::new(store);

    let user = storage.get_user().unwrap().expect("legacy user");
    let stats = &user.progress_stats;
    assert_eq!(stats.exercises_completed, 12);
    assert_eq!(stats.last_active_date, None);
    assert_eq!(
        stats
            .week(NaiveDate::from_ymd_opt(2024, 4, 14).unwrap())
            .unwrap()
            .days_active,
        5
    );
    assert_eq!(stats.pain_trend(BodyPart::Ankle), vec![6, 3]);
}

#[test]
fn test_progress_survives_reopen() {
    let path = temp_store_path("reopen");

    {
        let storage = Storage::new(Arc::new(FileStore::open(&path).unwrap()));
        storage.store_user(&seed::demo_user()).unwrap();
        storage
            .store_reminders(&[reminder("r1", vec![1, 3, 5], true)])
            .unwrap();
        let tracker = tracker_at(&storage, at(2024, 4, 22, 9, 0), StreakPolicy::LastActiveDate);
        assert!(tracker.record_completed_exercise().unwrap().is_applied());
    }

    let storage = Storage::new(Arc::new(FileStore::open(&path).unwrap()));
    let stats = storage.get_user().unwrap().unwrap().progress_stats;
    assert_eq!(stats.exercises_completed, 13);
    assert_eq!(
        stats.last_active_date,
        Some(NaiveDate::from_ymd_opt(2024, 4, 22).unwrap())
    );
    assert_eq!(storage.get_reminders().unwrap()[0].days, vec![1, 3, 5]);
}

#[test]
fn test_stored_json_uses_camel_case_keys() {
    let path = temp_store_path("camel");
    let store = Arc::new(FileStore::open(&path).unwrap());
    let storage = Storage::new(store.clone());
    storage.store_user(&seed::demo_user()).unwrap();

    let blob = store.get(keys::USER).unwrap().unwrap();
    assert!(blob.contains("\"progressStats\""));
    assert!(blob.contains("\"weekStartDate\":\"2024-04-14\""));
    assert!(blob.contains("\"bodyPart\":\"ankle\""));
    // Absent until the first completion is recorded
    assert!(!blob.contains("lastActiveDate"));
}

#[test]
fn test_corrupt_user_blob_is_storage_error() {
    let store = Arc::new(FileStore::open(temp_store_path("corrupt")).unwrap());
    store.set(keys::USER, "{\"id\": 42}".to_string()).unwrap();
    let storage = Storage::new(store);

    assert!(matches!(storage.get_user(), Err(AppError::Storage(_))));
}

#[test]
fn test_logout_keeps_catalog_and_reminders() {
    let storage = Storage::new(Arc::new(
        FileStore::open(temp_store_path("logout")).unwrap(),
    ));
    seed::seed_catalog(&storage).unwrap();
    storage.store_user(&seed::demo_user()).unwrap();
    storage.store_auth_token("token").unwrap();
    storage
        .store_reminders(&[reminder("r1", vec![2], true)])
        .unwrap();

    storage.clear_app_data().unwrap();

    assert!(storage.get_user().unwrap().is_none());
    assert!(storage.get_auth_token().unwrap().is_none());
    assert_eq!(storage.get_programs().unwrap().len(), 3);
    assert_eq!(storage.get_reminders().unwrap().len(), 1);
}
