// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Built-in demo catalog and demo user.
//!
//! Used to seed an empty store and as the catalog fallback when no programs
//! or injuries have been stored.

use chrono::NaiveDate;

use crate::db::Storage;
use crate::error::Result;
use crate::models::{
    BodyPart, Difficulty, Exercise, ExerciseModification, Injury, ModificationDifficulty,
    PainLevel, ProgramPhase, ProgressStats, RecoveryProgram, Severity, User, WeeklyProgress,
};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn injury(
    id: &str,
    name: &str,
    body_part: BodyPart,
    severity: Severity,
    description: &str,
    image: &str,
    recommended: &[&str],
) -> Injury {
    Injury {
        id: id.to_string(),
        name: name.to_string(),
        body_part,
        severity,
        description: description.to_string(),
        image_url: Some(format!("/images/injuries/{}.jpg", image)),
        recommended_programs: strings(recommended),
    }
}

#[allow(clippy::too_many_arguments)]
fn exercise(
    id: &str,
    name: &str,
    description: &str,
    (sets, reps): (u32, u32),
    instructions: &[&str],
    target_muscles: &[&str],
    tips: &[&str],
    modifications: Vec<ExerciseModification>,
) -> Exercise {
    Exercise {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        image_url: None,
        video_url: None,
        instructions: strings(instructions),
        sets,
        reps,
        duration: None,
        target_muscles: strings(target_muscles),
        tips: strings(tips),
        modifications,
    }
}

fn easier(id: &str, name: &str, description: &str) -> ExerciseModification {
    ExerciseModification {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        difficulty: ModificationDifficulty::Easier,
    }
}

fn phase(
    id: &str,
    name: &str,
    description: &str,
    duration_days: u32,
    exercises: Vec<Exercise>,
) -> ProgramPhase {
    ProgramPhase {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        duration_days,
        exercises,
    }
}

/// Demo injury catalog.
pub fn injuries() -> Vec<Injury> {
    vec![
        injury(
            "1",
            "Ankle Sprain",
            BodyPart::Ankle,
            Severity::Moderate,
            "A twisted ankle causing damage to the ligaments",
            "ankle-sprain",
            &["1", "5"],
        ),
        injury(
            "2",
            "Rotator Cuff Strain",
            BodyPart::Shoulder,
            Severity::Moderate,
            "Strain to the muscles and tendons that stabilize the shoulder",
            "rotator-cuff",
            &["2"],
        ),
        injury(
            "3",
            "Lower Back Strain",
            BodyPart::Back,
            Severity::Mild,
            "Stretching or tearing of the muscles in the lower back",
            "lower-back",
            &["3"],
        ),
        injury(
            "4",
            "Tennis Elbow",
            BodyPart::Elbow,
            Severity::Mild,
            "Inflammation of the tendons that join the forearm muscles to the elbow",
            "tennis-elbow",
            &["4"],
        ),
        injury(
            "5",
            "Knee Meniscus Tear",
            BodyPart::Knee,
            Severity::Severe,
            "Tear in the cartilage that provides cushioning for the knee joint",
            "knee-meniscus",
            &["6"],
        ),
    ]
}

/// Demo program catalog.
pub fn programs() -> Vec<RecoveryProgram> {
    vec![ankle_program(), shoulder_program(), back_program()]
}

fn ankle_program() -> RecoveryProgram {
    RecoveryProgram {
        id: "1".to_string(),
        name: "Ankle Sprain Recovery".to_string(),
        description: "A comprehensive program to recover from ankle sprains of varying severity"
            .to_string(),
        target_injury: BodyPart::Ankle,
        duration_weeks: 6,
        difficulty: Difficulty::Beginner,
        image_url: Some("/images/programs/ankle-recovery.jpg".to_string()),
        phases: vec![
            phase(
                "p1-1",
                "Rest & Protect",
                "Initial phase focused on protecting the ankle and reducing swelling",
                7,
                vec![
                    exercise(
                        "e1-1",
                        "Ankle Alphabet",
                        "Trace the alphabet with your toe to gently mobilize the ankle",
                        (1, 26),
                        &[
                            "Sit in a chair with your feet flat on the floor",
                            "Lift the injured foot slightly off the ground",
                            "Using your big toe as a pointer, trace each letter of the alphabet in the air",
                            "Move only your ankle, not your entire leg",
                        ],
                        &["ankle flexors", "ankle extensors"],
                        &["Move slowly and gently", "Stop if pain increases"],
                        vec![easier(
                            "m1-1",
                            "Partial Alphabet",
                            "Just do A-M if a full alphabet is too much",
                        )],
                    ),
                    exercise(
                        "e1-2",
                        "Ankle Isometrics",
                        "Strengthen ankle muscles without movement",
                        (3, 10),
                        &[
                            "Sit with your ankle at a 90-degree angle",
                            "Press foot downward against the floor without moving",
                            "Hold for 5 seconds, then relax",
                            "Repeat in all four directions: down, up, in, and out",
                        ],
                        &["ankle stabilizers", "tibialis anterior"],
                        &["Keep the pressure gentle", "Breathe normally during holds"],
                        vec![],
                    ),
                ],
            ),
            phase(
                "p1-2",
                "Mobility & Initial Strengthening",
                "Gradually introducing controlled movements and light strengthening",
                14,
                vec![
                    exercise(
                        "e1-3",
                        "Ankle Circles",
                        "Gentle rotational movement of the ankle joint",
                        (2, 10),
                        &[
                            "Sit in a chair with feet off the ground",
                            "Slowly rotate your ankle in clockwise circles",
                            "After completing the set, rotate counterclockwise",
                        ],
                        &["ankle stabilizers"],
                        &["Keep movements slow and controlled"],
                        vec![],
                    ),
                    exercise(
                        "e1-4",
                        "Resistance Band Eversion",
                        "Strengthening the lateral ankle with controlled resistance",
                        (3, 15),
                        &[
                            "Sit with legs extended and loop a resistance band around both feet",
                            "Keeping heels on the floor, rotate feet outward against the band",
                            "Hold for 2 seconds, then return to start",
                        ],
                        &["peroneus longus", "peroneus brevis"],
                        &["Use light resistance initially", "Focus on control, not speed"],
                        vec![easier(
                            "m1-2",
                            "No Resistance",
                            "Perform without a band if too difficult",
                        )],
                    ),
                ],
            ),
        ],
    }
}

fn shoulder_program() -> RecoveryProgram {
    RecoveryProgram {
        id: "2".to_string(),
        name: "Rotator Cuff Rehabilitation".to_string(),
        description: "Designed to heal and strengthen the rotator cuff muscles after injury"
            .to_string(),
        target_injury: BodyPart::Shoulder,
        duration_weeks: 8,
        difficulty: Difficulty::Intermediate,
        image_url: Some("/images/programs/shoulder-rehab.jpg".to_string()),
        phases: vec![phase(
            "p2-1",
            "Pain Management & Protection",
            "Initial focus on reducing pain and preventing further injury",
            7,
            vec![exercise(
                "e2-1",
                "Pendulum Exercise",
                "Gentle shoulder movement using gravity",
                (3, 10),
                &[
                    "Lean forward and support yourself with your non-injured arm",
                    "Let the injured arm hang freely",
                    "Gently swing the arm in small circles",
                    "Gradually increase the circle size as tolerated",
                ],
                &["rotator cuff"],
                &["Keep movements small and pain-free", "Let gravity do the work"],
                vec![],
            )],
        )],
    }
}

fn back_program() -> RecoveryProgram {
    RecoveryProgram {
        id: "3".to_string(),
        name: "Lower Back Recovery Program".to_string(),
        description: "A gentle approach to healing lower back strains and preventing recurrence"
            .to_string(),
        target_injury: BodyPart::Back,
        duration_weeks: 6,
        difficulty: Difficulty::Beginner,
        image_url: Some("/images/programs/back-recovery.jpg".to_string()),
        phases: vec![phase(
            "p3-1",
            "Initial Recovery",
            "Focus on pain reduction and gentle movement",
            7,
            vec![exercise(
                "e3-1",
                "Pelvic Tilts",
                "Gentle movement to mobilize the lower back",
                (3, 10),
                &[
                    "Lie on your back with knees bent and feet flat on the floor",
                    "Tighten your stomach muscles and flatten your back against the floor",
                    "Hold for 5 seconds, then relax",
                ],
                &["core stabilizers", "lower back"],
                &[
                    "Focus on subtle movement",
                    "Use your breath - exhale during the tilt",
                ],
                vec![],
            )],
        )],
    }
}

/// Demo user: ankle sprain, enrolled in the ankle program, mid-streak.
pub fn demo_user() -> User {
    let pain = |d: NaiveDate, level: u8, notes: &str| PainLevel {
        date: d,
        level,
        body_part: BodyPart::Ankle,
        notes: Some(notes.to_string()),
    };

    User {
        id: "user1".to_string(),
        name: "Alex Johnson".to_string(),
        email: "alex@example.com".to_string(),
        profile_picture: Some("/images/profile/default-avatar.jpg".to_string()),
        injuries: injuries().into_iter().take(1).collect(),
        active_programs: vec![ankle_program()],
        completed_programs: vec![],
        progress_stats: ProgressStats {
            programs_completed: 0,
            exercises_completed: 12,
            current_streak: 3,
            longest_streak: 5,
            last_active_date: None,
            weekly_progress: vec![WeeklyProgress {
                week_start_date: date(2024, 4, 14),
                days_active: 5,
                exercises_completed: 12,
                minutes_active: 95,
            }],
            pain_levels: vec![
                pain(date(2024, 4, 14), 6, "Initial injury pain level"),
                pain(
                    date(2024, 4, 17),
                    4,
                    "Showing improvement after following program",
                ),
                pain(date(2024, 4, 20), 3, "Continuing to improve"),
            ],
        },
    }
}

/// Store the demo catalog for any catalog key that is still empty.
///
/// Returns `true` if anything was written.
pub fn seed_catalog(storage: &Storage) -> Result<bool> {
    let mut seeded = false;

    if storage.get_programs()?.is_empty() {
        let programs = programs();
        storage.store_programs(&programs)?;
        tracing::info!(count = programs.len(), "Seeded program catalog");
        seeded = true;
    }

    if storage.get_injuries()?.is_empty() {
        let injuries = injuries();
        storage.store_injuries(&injuries)?;
        tracing::info!(count = injuries.len(), "Seeded injury catalog");
        seeded = true;
    }

    Ok(seeded)
}
