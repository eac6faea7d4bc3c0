// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use chrono::{NaiveDate, NaiveDateTime};
use recoverflow::db::Storage;
use recoverflow::error::{AppError, Result};
use recoverflow::models::{Reminder, StreakPolicy};
use recoverflow::services::{
    Notifier, Permission, ProgressSettings, ProgressTracker, ReminderScheduler, ReminderService,
};
use recoverflow::time_utils::FixedClock;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// Local date-time helper.
#[allow(dead_code)]
pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

/// Tracker over `storage` with the clock pinned to `now`.
#[allow(dead_code)]
pub fn tracker_at(storage: &Storage, now: NaiveDateTime, policy: StreakPolicy) -> ProgressTracker {
    ProgressTracker::new(
        storage.clone(),
        Arc::new(FixedClock(now)),
        ProgressSettings {
            streak_policy: policy,
            ..Default::default()
        },
    )
}

/// Reminder service over `storage` with the clock pinned to `now`.
#[allow(dead_code)]
pub fn reminder_service(
    storage: &Storage,
    notifier: Arc<dyn Notifier>,
    now: NaiveDateTime,
) -> ReminderService {
    let scheduler = ReminderScheduler::new(notifier, Arc::new(FixedClock(now)));
    ReminderService::new(storage.clone(), scheduler)
}

/// Enabled-or-not 08:00 exercise reminder.
#[allow(dead_code)]
pub fn reminder(id: &str, days: Vec<u8>, enabled: bool) -> Reminder {
    Reminder {
        id: id.to_string(),
        user_id: "user1".to_string(),
        title: "Time for your exercises".to_string(),
        body: format!("Reminder {}", id),
        time: "08:00".to_string(),
        days,
        enabled,
        program_id: Some("1".to_string()),
    }
}

/// Notifier that forwards every notification to a channel.
#[allow(dead_code)]
pub struct ChannelNotifier {
    permission: Mutex<Permission>,
    sent: mpsc::UnboundedSender<(String, String)>,
}

#[allow(dead_code)]
impl ChannelNotifier {
    pub fn new(permission: Permission) -> (Arc<Self>, mpsc::UnboundedReceiver<(String, String)>) {
        let (sent, received) = mpsc::unbounded_channel();
        let notifier = Arc::new(Self {
            permission: Mutex::new(permission),
            sent,
        });
        (notifier, received)
    }

    pub fn set_permission(&self, permission: Permission) {
        *self.permission.lock().unwrap() = permission;
    }
}

impl Notifier for ChannelNotifier {
    fn permission(&self) -> Permission {
        *self.permission.lock().unwrap()
    }

    fn emit(&self, title: &str, body: &str) -> Result<()> {
        self.sent
            .send((title.to_string(), body.to_string()))
            .map_err(|_| AppError::Notification("receiver dropped".to_string()))
    }
}
