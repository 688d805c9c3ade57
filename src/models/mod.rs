// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod plan;
pub mod profile;
pub mod session;

pub use plan::{Day, DietPlan, Macros, MealDay, MotivationalContent, PlanEnvelope, Quote, WorkoutDay};
pub use profile::{ActivityLevel, Experience, Fallback, Gender, Goal, Resolved, UserProfile};
pub use session::{ChatMessage, Role, SessionState};
