// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Progress aggregation service.
//!
//! Every user action is an event applied to the user aggregate:
//! 1. Load the user from storage
//! 2. Apply the event in memory (`apply_event`, a pure function)
//! 3. Store the whole aggregate back in one write
//!
//! When no user is stored, nothing happens and the outcome says so.

use chrono::NaiveDate;
use std::sync::Arc;

use crate::db::Storage;
use crate::error::{Outcome, Result, SkipReason};
use crate::models::{BodyPart, PainLevel, ProgressStats, RecoveryProgram, StreakPolicy, User};
use crate::time_utils::Clock;

/// Minutes credited per completed exercise.
pub const DEFAULT_MINUTES_PER_EXERCISE: u32 = 3;

/// Tunables for progress accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSettings {
    pub streak_policy: StreakPolicy,
    pub minutes_per_exercise: u32,
}

impl Default for ProgressSettings {
    fn default() -> Self {
        Self {
            streak_policy: StreakPolicy::default(),
            minutes_per_exercise: DEFAULT_MINUTES_PER_EXERCISE,
        }
    }
}

/// A user action that changes progress.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    ExerciseCompleted,
    PainRecorded(PainLevel),
    ProgramCompleted(String),
    /// Snapshot of a catalog program to add to the active programs
    ProgramEnrolled(RecoveryProgram),
}

/// Apply `event` to `user` as of the local date `today`.
pub fn apply_event(
    user: &mut User,
    event: ProgressEvent,
    today: NaiveDate,
    settings: &ProgressSettings,
) -> Outcome {
    match event {
        ProgressEvent::ExerciseCompleted => {
            let recorded = user.progress_stats.record_exercise(
                today,
                settings.streak_policy,
                settings.minutes_per_exercise,
            );
            tracing::debug!(
                user_id = %user.id,
                first_today = recorded.first_activity_today,
                streak = recorded.current_streak,
                "Exercise recorded"
            );
            Outcome::Applied
        }
        ProgressEvent::PainRecorded(entry) => {
            user.progress_stats.record_pain(entry);
            Outcome::Applied
        }
        ProgressEvent::ProgramCompleted(program_id) => {
            let Some(index) = user
                .active_programs
                .iter()
                .position(|p| p.id == program_id)
            else {
                return Outcome::Skipped(SkipReason::NotFound(program_id));
            };
            let program = user.active_programs.remove(index);
            user.completed_programs.push(program);
            user.progress_stats.programs_completed =
                user.progress_stats.programs_completed.saturating_add(1);
            Outcome::Applied
        }
        ProgressEvent::ProgramEnrolled(program) => {
            if user.is_enrolled(&program.id) {
                return Outcome::Skipped(SkipReason::AlreadyEnrolled(program.id));
            }
            user.active_programs.push(program);
            Outcome::Applied
        }
    }
}

/// Records progress against the stored user.
#[derive(Clone)]
pub struct ProgressTracker {
    storage: Storage,
    clock: Arc<dyn Clock>,
    settings: ProgressSettings,
}

impl ProgressTracker {
    pub fn new(storage: Storage, clock: Arc<dyn Clock>, settings: ProgressSettings) -> Self {
        Self {
            storage,
            clock,
            settings,
        }
    }

    fn apply(&self, event: ProgressEvent) -> Result<Outcome> {
        let today = self.clock.today();
        self.storage
            .update_user(|user| apply_event(user, event, today, &self.settings))
    }

    /// Count one completed exercise for today.
    pub fn record_completed_exercise(&self) -> Result<Outcome> {
        let outcome = self.apply(ProgressEvent::ExerciseCompleted)?;
        if outcome.is_skipped() {
            tracing::debug!(?outcome, "Exercise completion not recorded");
        }
        Ok(outcome)
    }

    /// Append a pain report. The level is stored as given.
    pub fn record_pain_level(&self, entry: PainLevel) -> Result<Outcome> {
        let body_part = entry.body_part;
        let level = entry.level;
        let outcome = self.apply(ProgressEvent::PainRecorded(entry))?;
        if outcome.is_applied() {
            tracing::info!(%body_part, level, "Pain level recorded");
        }
        Ok(outcome)
    }

    /// Pain levels for `body_part`, oldest first. Empty without a user.
    pub fn get_pain_trend(&self, body_part: BodyPart) -> Result<Vec<u8>> {
        Ok(self
            .storage
            .get_user()?
            .map(|user| user.progress_stats.pain_trend(body_part))
            .unwrap_or_default())
    }

    /// Move an active program to the completed list.
    pub fn complete_program(&self, program_id: &str) -> Result<Outcome> {
        let outcome = self.apply(ProgressEvent::ProgramCompleted(program_id.to_string()))?;
        match &outcome {
            Outcome::Applied => tracing::info!(program_id, "Program completed"),
            Outcome::Skipped(reason) => {
                tracing::debug!(program_id, ?reason, "Program completion skipped")
            }
        }
        Ok(outcome)
    }

    /// Enroll in a copy of `program` unless already enrolled.
    pub fn enroll_program(&self, program: &RecoveryProgram) -> Result<Outcome> {
        let outcome = self.apply(ProgressEvent::ProgramEnrolled(program.clone()))?;
        if outcome.is_applied() {
            tracing::info!(program_id = %program.id, "Enrolled in program");
        }
        Ok(outcome)
    }

    /// Current stats, if a user is stored.
    pub fn stats(&self) -> Result<Option<ProgressStats>> {
        Ok(self.storage.get_user()?.map(|user| user.progress_stats))
    }
}
