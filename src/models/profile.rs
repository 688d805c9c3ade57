// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! User profile and the lenient resolution of its enum-like fields.
//!
//! Profiles keep goal, gender, activity and experience as the strings the
//! user submitted. Each is resolved at the point of use into a recognized
//! value; unrecognized strings resolve to a default and are flagged so
//! callers can tell a fallback happened.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Body metrics and goals submitted for one plan generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserProfile {
    /// "weight_loss", "maintenance" or "muscle_gain"
    pub goal: String,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age: u32,
    /// "male" or "female"
    pub gender: String,
    /// "sedentary", "light", "moderate" or "active"
    pub activity_level: String,
    /// "beginner", "intermediate" or "advanced"
    #[serde(default = "default_experience_level")]
    pub experience_level: String,
}

fn default_experience_level() -> String {
    Experience::Beginner.as_str().to_string()
}

/// A resolved value plus whether it came from the default branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved<T> {
    pub value: T,
    pub fell_back: bool,
}

impl<T> Resolved<T> {
    fn exact(value: T) -> Self {
        Self {
            value,
            fell_back: false,
        }
    }

    fn fallback(value: T) -> Self {
        Self {
            value,
            fell_back: true,
        }
    }
}

/// Which profile field was resolved through its default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "snake_case")]
pub enum Fallback {
    Goal,
    Gender,
    ActivityLevel,
    ExperienceLevel,
}

// ─── Goal ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    WeightLoss,
    Maintenance,
    MuscleGain,
}

impl Goal {
    /// Resolve a goal string. Matching is exact; anything else is maintenance.
    pub fn resolve(raw: &str) -> Resolved<Self> {
        match raw {
            "weight_loss" => Resolved::exact(Self::WeightLoss),
            "maintenance" => Resolved::exact(Self::Maintenance),
            "muscle_gain" => Resolved::exact(Self::MuscleGain),
            _ => Resolved::fallback(Self::Maintenance),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WeightLoss => "weight_loss",
            Self::Maintenance => "maintenance",
            Self::MuscleGain => "muscle_gain",
        }
    }

    /// Daily calorie adjustment applied on top of maintenance calories.
    pub fn calorie_offset(&self) -> f64 {
        match self {
            Self::WeightLoss => -400.0,
            Self::Maintenance => 0.0,
            Self::MuscleGain => 400.0,
        }
    }
}

// ─── Gender ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Case-insensitive; anything other than "male" uses the female formula.
    pub fn resolve(raw: &str) -> Resolved<Self> {
        match raw.to_lowercase().as_str() {
            "male" => Resolved::exact(Self::Male),
            "female" => Resolved::exact(Self::Female),
            _ => Resolved::fallback(Self::Female),
        }
    }

    /// Constant term of the Mifflin-St Jeor equation.
    pub fn bmr_constant(&self) -> f64 {
        match self {
            Self::Male => 5.0,
            Self::Female => -161.0,
        }
    }
}

// ─── Activity Level ──────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
}

impl ActivityLevel {
    /// Case-insensitive; unrecognized levels count as moderate.
    pub fn resolve(raw: &str) -> Resolved<Self> {
        match raw.to_lowercase().as_str() {
            "sedentary" => Resolved::exact(Self::Sedentary),
            "light" => Resolved::exact(Self::Light),
            "moderate" => Resolved::exact(Self::Moderate),
            "active" => Resolved::exact(Self::Active),
            _ => Resolved::fallback(Self::Moderate),
        }
    }

    pub fn multiplier(&self) -> f64 {
        match self {
            Self::Sedentary => 1.2,
            Self::Light => 1.375,
            Self::Moderate => 1.55,
            Self::Active => 1.725,
        }
    }
}

// ─── Experience ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Experience {
    Beginner,
    Intermediate,
    Advanced,
}

impl Experience {
    pub fn resolve(raw: &str) -> Resolved<Self> {
        match raw.to_lowercase().as_str() {
            "beginner" => Resolved::exact(Self::Beginner),
            "intermediate" => Resolved::exact(Self::Intermediate),
            "advanced" => Resolved::exact(Self::Advanced),
            _ => Resolved::fallback(Self::Beginner),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}
