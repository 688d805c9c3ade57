// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weekly workout templates.

use crate::models::{Day, Experience, Goal, WorkoutDay};

/// Strength and hypertrophy split for muscle gain.
const STRENGTH_SPLIT: [(&str, &str); 7] = [
    ("Upper Body Strength", "3x5 Bench Press, 3x8 Rows"),
    ("Lower Body Strength", "3x5 Squats, 1x5 Deadlifts"),
    ("Active Recovery", "30 min walk or stretching"),
    ("Upper Body Hypertrophy", "4x12 Incline Press, 4x15 Lat Pulldowns"),
    ("Lower Body Hypertrophy", "4x12 Lunges, 4x15 Leg Curls"),
    ("Full Body / Cardio", "30 mins moderate cardio, planks"),
    ("Rest", "Full rest day"),
];

/// General conditioning split for every other goal.
const GENERAL_SPLIT: [(&str, &str); 7] = [
    ("Full Body Strength", "3x10 Goblet Squats, 3x12 Push-ups"),
    ("HIIT Cardio", "20 mins: 30s sprint, 60s rest"),
    ("Active Recovery", "30 min walk"),
    ("Full Body Strength", "3x10 Overhead Press, 3x12 Lunges"),
    ("Steady-State Cardio", "45 mins jogging or cycling"),
    ("Core & Flexibility", "3 sets of leg raises, planks"),
    ("Rest", "Full rest day"),
];

/// Which of the two templates was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleTemplate {
    StrengthSplit,
    GeneralSplit,
}

impl ScheduleTemplate {
    /// Only an exact "muscle_gain" selects the strength split.
    pub fn for_goal(goal: &str) -> Self {
        match Goal::resolve(goal).value {
            Goal::MuscleGain => Self::StrengthSplit,
            Goal::WeightLoss | Goal::Maintenance => Self::GeneralSplit,
        }
    }

    fn rows(&self) -> &'static [(&'static str, &'static str); 7] {
        match self {
            Self::StrengthSplit => &STRENGTH_SPLIT,
            Self::GeneralSplit => &GENERAL_SPLIT,
        }
    }
}

/// Select the seven-day schedule for a goal.
///
/// `experience_level` is resolved and logged but does not change the
/// schedule yet.
pub fn select_workout_schedule(goal: &str, experience_level: &str) -> Vec<WorkoutDay> {
    let experience = Experience::resolve(experience_level);
    let template = ScheduleTemplate::for_goal(goal);

    tracing::debug!(
        goal,
        template = ?template,
        experience = experience.value.as_str(),
        experience_fallback = experience.fell_back,
        "Selected workout schedule"
    );

    Day::ALL
        .iter()
        .zip(template.rows().iter())
        .map(|(day, (workout_type, exercises))| WorkoutDay {
            day: *day,
            workout_type: workout_type.to_string(),
            example_exercises: exercises.to_string(),
            video_link: None,
        })
        .collect()
}
