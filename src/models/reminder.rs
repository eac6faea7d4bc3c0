// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Exercise reminder model and next-fire computation.

use chrono::{Duration, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::{Validate, ValidationError};

use crate::time_utils::weekday_index;

const TIME_FORMAT: &str = "%H:%M";
const MAX_WEEKDAY: u8 = 6;

/// A weekly recurring reminder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Reminder {
    pub id: String,
    pub user_id: String,
    #[validate(length(min = 1))]
    pub title: String,
    pub body: String,
    /// Local time of day, "HH:MM"
    #[validate(custom(function = "validate_time"))]
    pub time: String,
    /// Weekdays to fire on, 0 = Sunday
    #[validate(custom(function = "validate_days"))]
    pub days: Vec<u8>,
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program_id: Option<String>,
}

impl Reminder {
    /// Parsed time of day, if `time` is well formed.
    pub fn time_of_day(&self) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(self.time.trim(), TIME_FORMAT).ok()
    }

    /// Next time this reminder should fire after `now`.
    ///
    /// Picks the smallest scheduled weekday strictly after today's, wrapping
    /// to the smallest one next week. When the wrap lands on today and the
    /// time has already passed, the occurrence moves a full week ahead.
    /// Returns `None` when there are no valid weekdays or the time is
    /// malformed.
    pub fn next_occurrence(&self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        let at = self.time_of_day()?;
        let today = weekday_index(now.date());

        let mut days: Vec<u8> = self
            .days
            .iter()
            .copied()
            .filter(|day| *day <= MAX_WEEKDAY)
            .collect();
        days.sort_unstable();

        let next = days
            .iter()
            .copied()
            .find(|day| *day > today)
            .or_else(|| days.first().copied())?;

        let delta = if next < today {
            7 - today + next
        } else {
            next - today
        };

        let target = (now.date() + Duration::days(i64::from(delta))).and_time(at);
        if target <= now {
            Some(target + Duration::days(7))
        } else {
            Some(target)
        }
    }
}

fn validate_time(time: &str) -> Result<(), ValidationError> {
    NaiveTime::parse_from_str(time.trim(), TIME_FORMAT)
        .map(|_| ())
        .map_err(|_| ValidationError::new("time_format"))
}

fn validate_days(days: &[u8]) -> Result<(), ValidationError> {
    if days.iter().all(|day| *day <= MAX_WEEKDAY) {
        Ok(())
    } else {
        Err(ValidationError::new("weekday_range"))
    }
}
