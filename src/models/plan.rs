// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Plan envelope: diet plan, workout schedule and motivational content.
//!
//! Field names follow the envelope the orchestrator assembles, so meal and
//! workout rows serialize with display-style keys ("Day", "Workout Type").

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Day of the week. Plans always list all seven, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }
}

/// Daily macronutrient targets in grams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Macros {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub protein_g: i64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub carbs_g: i64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub fat_g: i64,
}

/// One day of the weekly meal rotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MealDay {
    #[serde(rename = "Day")]
    pub day: Day,
    #[serde(rename = "Breakfast")]
    pub breakfast: String,
    #[serde(rename = "Lunch")]
    pub lunch: String,
    #[serde(rename = "Dinner")]
    pub dinner: String,
}

/// Calorie and macro targets plus the weekly meal rotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DietPlan {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub daily_calories: i64,
    pub macros: Macros,
    pub weekly_meal_plan: Vec<MealDay>,
}

/// One day of a workout schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutDay {
    #[serde(rename = "Day")]
    pub day: Day,
    #[serde(rename = "Workout Type")]
    pub workout_type: String,
    #[serde(rename = "Example Exercises")]
    pub example_exercises: String,
    /// Markdown link, e.g. `[Title](https://youtube.com/watch?v=...)`
    #[serde(rename = "Video Link", default, skip_serializing_if = "Option::is_none")]
    pub video_link: Option<String>,
}

impl WorkoutDay {
    pub fn is_rest_day(&self) -> bool {
        self.workout_type.eq_ignore_ascii_case("rest")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Quote {
    pub quote: String,
    pub author: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MotivationalContent {
    pub quote: Quote,
    pub fact: String,
}

/// Complete plan as assembled by the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PlanEnvelope {
    pub diet_plan: DietPlan,
    pub workout_plan: Vec<WorkoutDay>,
    pub motivational_content: MotivationalContent,
}
