// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! RecoverFlow: guided injury-recovery programs
//!
//! This crate provides the local core of the recovery app: progress and
//! streak tracking over a key-value store, and weekly exercise reminders.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod seed;
pub mod services;
pub mod time_utils;

use std::sync::Arc;

use config::Config;
use db::{FileStore, KeyValueStore, MemoryStore, Storage};
use services::{
    CatalogService, LogNotifier, Notifier, ProgressTracker, ReminderScheduler, ReminderService,
    SessionService,
};
use time_utils::Clock;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub storage: Storage,
    pub progress: ProgressTracker,
    pub reminders: ReminderService,
    pub catalog: CatalogService,
    pub session: SessionService,
}

impl AppState {
    /// Wire up all services over `storage`.
    pub fn new(
        config: Config,
        storage: Storage,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let progress =
            ProgressTracker::new(storage.clone(), clock.clone(), config.progress_settings());
        let scheduler = ReminderScheduler::new(notifier, clock);
        let reminders = ReminderService::new(storage.clone(), scheduler);

        Self {
            progress,
            reminders,
            catalog: CatalogService::new(storage.clone()),
            session: SessionService::new(storage.clone()),
            storage,
            config,
        }
    }

    /// Open the configured store and build the state with the system clock
    /// and the log notifier.
    pub fn from_config(config: Config) -> error::Result<Self> {
        let store: Arc<dyn KeyValueStore> = match &config.data_path {
            Some(path) => Arc::new(FileStore::open(path)?),
            None => {
                tracing::warn!("No data path configured, using in-memory store");
                Arc::new(MemoryStore::new())
            }
        };
        let notifier = Arc::new(LogNotifier::new(config.notification_permission));

        Ok(Self::new(
            config,
            Storage::new(store),
            notifier,
            Arc::new(time_utils::SystemClock),
        ))
    }
}
