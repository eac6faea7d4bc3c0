//! User aggregate: the single record read and written as one unit.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::{Injury, ProgressStats, RecoveryProgram};

/// The locally stored user profile with programs and progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    /// Injuries selected during onboarding (order irrelevant)
    #[serde(default)]
    pub injuries: Vec<Injury>,
    /// Snapshots of enrolled programs, in enrollment order
    #[serde(default)]
    pub active_programs: Vec<RecoveryProgram>,
    #[serde(default)]
    pub completed_programs: Vec<RecoveryProgram>,
    #[serde(default)]
    pub progress_stats: ProgressStats,
}

impl User {
    /// Whether a program with `program_id` is currently active.
    pub fn is_enrolled(&self, program_id: &str) -> bool {
        self.active_programs.iter().any(|p| p.id == program_id)
    }
}
