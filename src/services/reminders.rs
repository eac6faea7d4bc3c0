// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Reminder scheduling and reminder CRUD.
//!
//! Each enabled reminder owns one Tokio task that sleeps until the next
//! occurrence, shows the notification, and re-arms itself for the following
//! occurrence. The task handle is kept so disabling, deleting or re-arming a
//! reminder cancels the pending fire.
//!
//! If notification permission is no longer granted when a timer fires, the
//! fire is dropped and the reminder stays idle until it is scheduled again.

use chrono::NaiveDateTime;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use validator::Validate;

use crate::db::Storage;
use crate::error::{AppError, Outcome, Result, SkipReason};
use crate::models::Reminder;
use crate::services::notifier::{Notifier, Permission};
use crate::time_utils::Clock;

/// A reminder with a pending timer task.
struct ArmedReminder {
    handle: JoinHandle<()>,
    next_fire: watch::Receiver<Option<NaiveDateTime>>,
}

impl ArmedReminder {
    fn is_live(&self) -> bool {
        !self.handle.is_finished()
    }
}

/// Arms and cancels reminder timers.
#[derive(Clone)]
pub struct ReminderScheduler {
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    armed: Arc<DashMap<String, ArmedReminder>>,
}

impl ReminderScheduler {
    pub fn new(notifier: Arc<dyn Notifier>, clock: Arc<dyn Clock>) -> Self {
        Self {
            notifier,
            clock,
            armed: Arc::new(DashMap::new()),
        }
    }

    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }

    /// Arm `reminder` for its next occurrence, replacing any pending timer.
    ///
    /// Disabled reminders and reminders without weekdays are not armed (and
    /// lose any pending timer). Must be called within a Tokio runtime.
    pub fn schedule(&self, reminder: &Reminder) -> Result<Outcome> {
        if !reminder.enabled {
            self.cancel(&reminder.id);
            return Ok(Outcome::Skipped(SkipReason::Disabled));
        }

        let Some(first_fire) = reminder.next_occurrence(self.clock.now()) else {
            self.cancel(&reminder.id);
            tracing::warn!(reminder_id = %reminder.id, "Reminder has no valid schedule");
            return Ok(Outcome::Skipped(SkipReason::NoScheduledDays));
        };

        let runtime = self.runtime()?;

        let (next_fire_tx, next_fire_rx) = watch::channel(Some(first_fire));
        let handle = runtime.spawn(run_reminder(
            reminder.clone(),
            self.notifier.clone(),
            self.clock.clone(),
            next_fire_tx,
        ));

        let armed = ArmedReminder {
            handle,
            next_fire: next_fire_rx,
        };
        if let Some(previous) = self.armed.insert(reminder.id.clone(), armed) {
            previous.handle.abort();
        }

        tracing::info!(
            reminder_id = %reminder.id,
            next_fire = %first_fire,
            "Reminder armed"
        );
        Ok(Outcome::Applied)
    }

    /// Runtime that timer tasks are spawned on.
    fn runtime(&self) -> Result<tokio::runtime::Handle> {
        tokio::runtime::Handle::try_current()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("No Tokio runtime: {}", e)))
    }

    /// Cancel the pending timer for `id`. Returns whether one was pending.
    pub fn cancel(&self, id: &str) -> bool {
        match self.armed.remove(id) {
            Some((_, armed)) => {
                let was_live = armed.is_live();
                armed.handle.abort();
                if was_live {
                    tracing::info!(reminder_id = id, "Reminder cancelled");
                }
                was_live
            }
            None => false,
        }
    }

    /// Cancel every pending timer.
    pub fn cancel_all(&self) {
        let ids: Vec<String> = self.armed.iter().map(|e| e.key().clone()).collect();
        for id in ids {
            self.cancel(&id);
        }
    }

    pub fn is_armed(&self, id: &str) -> bool {
        self.armed.get(id).is_some_and(|armed| armed.is_live())
    }

    /// When the pending timer for `id` fires, if one is pending.
    pub fn next_fire(&self, id: &str) -> Option<NaiveDateTime> {
        self.armed
            .get(id)
            .filter(|armed| armed.is_live())
            .and_then(|armed| *armed.next_fire.borrow())
    }

    pub fn armed_count(&self) -> usize {
        self.armed.iter().filter(|armed| armed.is_live()).count()
    }
}

/// Timer loop for one reminder.
async fn run_reminder(
    reminder: Reminder,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    next_fire: watch::Sender<Option<NaiveDateTime>>,
) {
    let mut last_fired: Option<NaiveDateTime> = None;

    loop {
        let now = clock.now();
        // Never pick the occurrence that just fired, even if the wall clock
        // lags the timer slightly.
        let reference = last_fired.map_or(now, |fired| fired.max(now));
        let Some(target) = reminder.next_occurrence(reference) else {
            break;
        };
        next_fire.send_replace(Some(target));

        let delay = (target - now).to_std().unwrap_or_default();
        tokio::time::sleep(delay).await;
        last_fired = Some(target);

        if notifier.permission() != Permission::Granted {
            tracing::warn!(
                reminder_id = %reminder.id,
                "Notification permission not granted, reminder not re-armed"
            );
            break;
        }

        if let Err(e) = notifier.emit(&reminder.title, &reminder.body) {
            tracing::error!(reminder_id = %reminder.id, error = %e, "Failed to show reminder");
        } else {
            tracing::debug!(reminder_id = %reminder.id, fired_at = %target, "Reminder fired");
        }
    }

    next_fire.send_replace(None);
}

/// Persisted reminder management on top of the scheduler.
#[derive(Clone)]
pub struct ReminderService {
    storage: Storage,
    scheduler: ReminderScheduler,
}

impl ReminderService {
    pub fn new(storage: Storage, scheduler: ReminderScheduler) -> Self {
        Self { storage, scheduler }
    }

    pub fn scheduler(&self) -> &ReminderScheduler {
        &self.scheduler
    }

    /// Ask the platform for notification permission.
    pub fn request_notification_permission(&self) -> Permission {
        self.scheduler.notifier().request_permission()
    }

    pub fn list_reminders(&self) -> Result<Vec<Reminder>> {
        self.storage.get_reminders()
    }

    /// Arm every stored enabled reminder. Returns how many were armed.
    pub fn initialize_reminders(&self) -> Result<usize> {
        let reminders = self.storage.get_reminders()?;
        let mut armed = 0;
        for reminder in reminders.iter().filter(|r| r.enabled) {
            if self.scheduler.schedule(reminder)?.is_applied() {
                armed += 1;
            }
        }
        tracing::info!(total = reminders.len(), armed, "Reminders initialized");
        Ok(armed)
    }

    /// Store a new reminder and arm it if enabled.
    pub fn create_reminder(&self, reminder: Reminder) -> Result<Outcome> {
        validate(&reminder)?;
        if reminder.enabled {
            self.scheduler.runtime()?;
        }

        let mut reminders = self.storage.get_reminders()?;
        if reminders.iter().any(|r| r.id == reminder.id) {
            return Err(AppError::BadRequest(format!(
                "Reminder {} already exists",
                reminder.id
            )));
        }
        reminders.push(reminder.clone());
        self.storage.store_reminders(&reminders)?;
        tracing::info!(reminder_id = %reminder.id, "Reminder created");

        if reminder.enabled {
            if let Outcome::Skipped(reason) = self.scheduler.schedule(&reminder)? {
                tracing::debug!(reminder_id = %reminder.id, ?reason, "Reminder stored but not armed");
            }
        }
        Ok(Outcome::Applied)
    }

    /// Replace a stored reminder and re-arm or cancel it.
    ///
    /// Unknown ids are skipped.
    pub fn update_reminder(&self, reminder: Reminder) -> Result<Outcome> {
        validate(&reminder)?;
        if reminder.enabled {
            self.scheduler.runtime()?;
        }

        let mut reminders = self.storage.get_reminders()?;
        let Some(index) = reminders.iter().position(|r| r.id == reminder.id) else {
            tracing::debug!(reminder_id = %reminder.id, "Update of unknown reminder skipped");
            return Ok(Outcome::Skipped(SkipReason::NotFound(reminder.id)));
        };
        reminders[index] = reminder.clone();
        self.storage.store_reminders(&reminders)?;

        // Disabled reminders are cancelled by schedule()
        let armed = self.scheduler.schedule(&reminder)?;
        tracing::info!(
            reminder_id = %reminder.id,
            enabled = reminder.enabled,
            armed = armed.is_applied(),
            "Reminder updated"
        );
        Ok(Outcome::Applied)
    }

    /// Remove a stored reminder and cancel its timer.
    pub fn delete_reminder(&self, id: &str) -> Result<Outcome> {
        let mut reminders = self.storage.get_reminders()?;
        let before = reminders.len();
        reminders.retain(|r| r.id != id);
        self.scheduler.cancel(id);

        if reminders.len() == before {
            return Ok(Outcome::Skipped(SkipReason::NotFound(id.to_string())));
        }
        self.storage.store_reminders(&reminders)?;
        tracing::info!(reminder_id = id, "Reminder deleted");
        Ok(Outcome::Applied)
    }
}

fn validate(reminder: &Reminder) -> Result<()> {
    reminder
        .validate()
        .map_err(|e| AppError::BadRequest(format!("Invalid reminder {}: {}", reminder.id, e)))
}
