// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Injury catalog model.

use serde::{Deserialize, Serialize};
use std::fmt;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Body part targeted by an injury, program or pain entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum BodyPart {
    Shoulder,
    Knee,
    Ankle,
    Wrist,
    Elbow,
    Back,
    Neck,
    Hip,
}

impl BodyPart {
    pub const ALL: [BodyPart; 8] = [
        BodyPart::Shoulder,
        BodyPart::Knee,
        BodyPart::Ankle,
        BodyPart::Wrist,
        BodyPart::Elbow,
        BodyPart::Back,
        BodyPart::Neck,
        BodyPart::Hip,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BodyPart::Shoulder => "shoulder",
            BodyPart::Knee => "knee",
            BodyPart::Ankle => "ankle",
            BodyPart::Wrist => "wrist",
            BodyPart::Elbow => "elbow",
            BodyPart::Back => "back",
            BodyPart::Neck => "neck",
            BodyPart::Hip => "hip",
        }
    }
}

impl fmt::Display for BodyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Injury severity as chosen during onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
}

/// An injury a user can onboard with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Injury {
    pub id: String,
    pub name: String,
    pub body_part: BodyPart,
    pub severity: Severity,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Program IDs recommended for this injury
    #[serde(default)]
    pub recommended_programs: Vec<String>,
}
