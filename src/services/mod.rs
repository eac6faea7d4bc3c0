// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod catalog;
pub mod notifier;
pub mod progress;
pub mod reminders;
pub mod session;

pub use catalog::CatalogService;
pub use notifier::{LogNotifier, Notifier, Permission};
pub use progress::{apply_event, ProgressEvent, ProgressSettings, ProgressTracker};
pub use reminders::{ReminderScheduler, ReminderService};
pub use session::SessionService;
