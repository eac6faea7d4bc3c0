// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Program and injury catalog queries.
//!
//! The catalog is read from storage, falling back to the built-in demo
//! catalog when nothing has been stored.

use crate::db::Storage;
use crate::error::{AppError, Outcome, Result, SkipReason};
use crate::models::{BodyPart, Exercise, Injury, RecoveryProgram};
use crate::seed;

#[derive(Clone)]
pub struct CatalogService {
    storage: Storage,
}

impl CatalogService {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    // ─── Programs ────────────────────────────────────────────────

    pub fn programs(&self) -> Result<Vec<RecoveryProgram>> {
        let stored = self.storage.get_programs()?;
        Ok(if stored.is_empty() {
            seed::programs()
        } else {
            stored
        })
    }

    pub fn find_program(&self, program_id: &str) -> Result<Option<RecoveryProgram>> {
        Ok(self.programs()?.into_iter().find(|p| p.id == program_id))
    }

    /// Like `find_program`, but an unknown id is an error.
    pub fn program(&self, program_id: &str) -> Result<RecoveryProgram> {
        self.find_program(program_id)?
            .ok_or_else(|| AppError::NotFound(format!("Program {} not found", program_id)))
    }

    /// Programs whose name or description contains `query` (case-insensitive).
    pub fn search_programs(&self, query: &str) -> Result<Vec<RecoveryProgram>> {
        let needle = query.trim().to_lowercase();
        Ok(self
            .programs()?
            .into_iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
            })
            .collect())
    }

    // ─── Injuries ────────────────────────────────────────────────

    pub fn injuries(&self) -> Result<Vec<Injury>> {
        let stored = self.storage.get_injuries()?;
        Ok(if stored.is_empty() {
            seed::injuries()
        } else {
            stored
        })
    }

    pub fn injuries_for_body_part(&self, body_part: BodyPart) -> Result<Vec<Injury>> {
        Ok(self
            .injuries()?
            .into_iter()
            .filter(|i| i.body_part == body_part)
            .collect())
    }

    /// Catalog programs recommended for an injury, in recommendation order.
    ///
    /// Recommended ids missing from the catalog are ignored.
    pub fn recommended_programs(&self, injury_id: &str) -> Result<Vec<RecoveryProgram>> {
        let injury = self
            .injuries()?
            .into_iter()
            .find(|i| i.id == injury_id)
            .ok_or_else(|| AppError::NotFound(format!("Injury {} not found", injury_id)))?;

        let programs = self.programs()?;
        Ok(injury
            .recommended_programs
            .iter()
            .filter_map(|id| programs.iter().find(|p| &p.id == id).cloned())
            .collect())
    }

    // ─── User-specific views ─────────────────────────────────────

    pub fn is_enrolled(&self, program_id: &str) -> Result<bool> {
        Ok(self
            .storage
            .get_user()?
            .is_some_and(|user| user.is_enrolled(program_id)))
    }

    /// Exercises for today: the first phase of the first active program.
    pub fn todays_exercises(&self) -> Result<Vec<Exercise>> {
        Ok(self
            .storage
            .get_user()?
            .and_then(|user| user.active_programs.into_iter().next())
            .and_then(|program| program.phases.into_iter().next())
            .map(|phase| phase.exercises)
            .unwrap_or_default())
    }

    /// Find an exercise in any of the user's active programs.
    pub fn find_active_exercise(&self, exercise_id: &str) -> Result<Option<Exercise>> {
        Ok(self.storage.get_user()?.and_then(|user| {
            user.active_programs
                .iter()
                .flat_map(|program| program.exercises())
                .find(|e| e.id == exercise_id)
                .cloned()
        }))
    }

    /// Record an onboarding injury on the user.
    pub fn add_injury(&self, injury: Injury) -> Result<Outcome> {
        self.storage.update_user(|user| {
            if user.injuries.iter().any(|i| i.id == injury.id) {
                return Outcome::Skipped(SkipReason::Duplicate(injury.id.clone()));
            }
            tracing::info!(injury_id = %injury.id, body_part = %injury.body_part, "Injury added");
            user.injuries.push(injury);
            Outcome::Applied
        })
    }
}
