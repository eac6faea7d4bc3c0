// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Progress statistics aggregate.
//!
//! These counters are updated in place when an exercise is completed and are
//! stored inside the user aggregate. Counters only ever move forward.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::BodyPart;
use crate::time_utils;

/// How "was the user active on day X" is decided for streaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakPolicy {
    /// Exact: compare against `ProgressStats::last_active_date`.
    #[default]
    LastActiveDate,
    /// Legacy approximation: any week bucket covering the day counts as
    /// activity on that day.
    WeekBucket,
}

impl FromStr for StreakPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "last_active_date" => Ok(StreakPolicy::LastActiveDate),
            "week_bucket" => Ok(StreakPolicy::WeekBucket),
            other => Err(format!("unknown streak policy '{}'", other)),
        }
    }
}

/// Aggregated progress for a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProgressStats {
    // ─── Counters ────────────────────────────────────────────────
    #[serde(default)]
    pub programs_completed: u32,
    #[serde(default)]
    pub exercises_completed: u32,

    // ─── Streaks ─────────────────────────────────────────────────
    /// Consecutive days with at least one completion
    #[serde(default)]
    pub current_streak: u32,
    /// Never below `current_streak`
    #[serde(default)]
    pub longest_streak: u32,
    /// Most recent day with a completion (absent in legacy records)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_active_date: Option<NaiveDate>,

    // ─── Time Series ─────────────────────────────────────────────
    /// One bucket per week that has seen activity, in creation order
    #[serde(default)]
    pub weekly_progress: Vec<WeeklyProgress>,
    /// Append-only pain log
    #[serde(default)]
    pub pain_levels: Vec<PainLevel>,
}

/// Activity counters for one Sunday-to-Saturday week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WeeklyProgress {
    /// Sunday that starts the week
    pub week_start_date: NaiveDate,
    pub days_active: u32,
    pub exercises_completed: u32,
    pub minutes_active: u32,
}

impl WeeklyProgress {
    pub fn new(week_start_date: NaiveDate) -> Self {
        Self {
            week_start_date,
            days_active: 0,
            exercises_completed: 0,
            minutes_active: 0,
        }
    }

    /// Whether `date` falls inside this week.
    pub fn contains(&self, date: NaiveDate) -> bool {
        time_utils::week_contains(self.week_start_date, date)
    }
}

/// A single pain report. Never modified once logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PainLevel {
    pub date: NaiveDate,
    /// 0 (no pain) to 10 (severe)
    pub level: u8,
    pub body_part: BodyPart,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// What a single completion did to the aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExerciseRecorded {
    /// First completion of the calendar day (days-active and streak updated)
    pub first_activity_today: bool,
    pub current_streak: u32,
}

impl ProgressStats {
    /// Record one completed exercise on `today`.
    ///
    /// Bumps the totals and the week bucket, and on the first completion of
    /// the day counts the day as active and advances or resets the streak.
    pub fn record_exercise(
        &mut self,
        today: NaiveDate,
        policy: StreakPolicy,
        minutes_per_exercise: u32,
    ) -> ExerciseRecorded {
        // Both checks must see the history before this completion.
        let (active_today, active_yesterday) = self.prior_activity(today, policy);
        let first_activity_today = !active_today;

        self.exercises_completed = self.exercises_completed.saturating_add(1);

        {
            let week = self.week_entry_mut(time_utils::week_start(today));
            week.exercises_completed = week.exercises_completed.saturating_add(1);
            week.minutes_active = week.minutes_active.saturating_add(minutes_per_exercise);
            if first_activity_today {
                week.days_active = week.days_active.saturating_add(1);
            }
        }

        if first_activity_today {
            self.advance_streak(active_yesterday);
        }

        self.last_active_date = Some(match self.last_active_date {
            Some(last) if last > today => last,
            _ => today,
        });

        ExerciseRecorded {
            first_activity_today,
            current_streak: self.current_streak,
        }
    }

    /// Append a pain report.
    pub fn record_pain(&mut self, entry: PainLevel) {
        self.pain_levels.push(entry);
    }

    /// Pain levels for `body_part`, oldest first.
    ///
    /// Entries sharing a date keep their logging order.
    pub fn pain_trend(&self, body_part: BodyPart) -> Vec<u8> {
        let mut entries: Vec<&PainLevel> = self
            .pain_levels
            .iter()
            .filter(|p| p.body_part == body_part)
            .collect();
        entries.sort_by_key(|p| p.date);
        entries.into_iter().map(|p| p.level).collect()
    }

    /// The bucket for the week starting at `week_start`, if any.
    pub fn week(&self, week_start: NaiveDate) -> Option<&WeeklyProgress> {
        self.weekly_progress
            .iter()
            .find(|w| w.week_start_date == week_start)
    }

    /// Returns (active today, active yesterday) under `policy`.
    ///
    /// Records written before `last_active_date` existed fall back to the
    /// week buckets for yesterday, so an existing streak carries over.
    fn prior_activity(&self, today: NaiveDate, policy: StreakPolicy) -> (bool, bool) {
        let yesterday = today - Duration::days(1);
        match policy {
            StreakPolicy::LastActiveDate => match self.last_active_date {
                Some(last) => (last >= today, last == yesterday),
                None => (
                    false,
                    self.weekly_progress.iter().any(|w| w.contains(yesterday)),
                ),
            },
            StreakPolicy::WeekBucket => (
                self.weekly_progress.iter().any(|w| w.contains(today)),
                self.weekly_progress.iter().any(|w| w.contains(yesterday)),
            ),
        }
    }

    fn week_entry_mut(&mut self, week_start: NaiveDate) -> &mut WeeklyProgress {
        let index = match self
            .weekly_progress
            .iter()
            .position(|w| w.week_start_date == week_start)
        {
            Some(index) => index,
            None => {
                self.weekly_progress.push(WeeklyProgress::new(week_start));
                self.weekly_progress.len() - 1
            }
        };
        &mut self.weekly_progress[index]
    }

    fn advance_streak(&mut self, active_yesterday: bool) {
        if active_yesterday {
            self.current_streak = self.current_streak.saturating_add(1);
        } else {
            self.current_streak = 1;
        }
        self.longest_streak = self.longest_streak.max(self.current_streak);
    }
}
