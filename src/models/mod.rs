// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod injury;
pub mod program;
pub mod reminder;
pub mod stats;
pub mod user;

pub use injury::{BodyPart, Injury, Severity};
pub use program::{
    Difficulty, Exercise, ExerciseModification, ModificationDifficulty, ProgramPhase,
    RecoveryProgram,
};
pub use reminder::Reminder;
pub use stats::{PainLevel, ProgressStats, StreakPolicy, WeeklyProgress};
pub use user::User;
