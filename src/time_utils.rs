// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for local calendar arithmetic.
//!
//! All progress and reminder logic works on the user's local wall clock,
//! represented as naive (timezone-free) values.

use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime};

/// Number of days covered by one week bucket.
pub const DAYS_PER_WEEK: i64 = 7;

/// Source of the current local wall-clock time.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Clock backed by the operating system's local time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock pinned to a single instant. Used by tests and benchmarks.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Weekday index with Sunday as 0 (matching `Reminder::days`).
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// The Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(weekday_index(date)))
}

/// Whether `date` falls in `[week_start, week_start + 7 days)`.
pub fn week_contains(week_start: NaiveDate, date: NaiveDate) -> bool {
    week_start <= date && date < week_start + Duration::days(DAYS_PER_WEEK)
}
