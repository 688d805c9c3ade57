// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Calorie and macronutrient targets from body metrics.
//!
//! Uses the Mifflin-St Jeor equation for basal metabolic rate, scaled by an
//! activity multiplier and shifted by a goal-specific offset. Every output
//! is rounded half away from zero.

use crate::models::{
    ActivityLevel, Day, DietPlan, Fallback, Gender, Goal, Macros, MealDay, UserProfile,
};
use serde::Serialize;

/// Calories per gram of carbohydrate.
const KCAL_PER_G_CARBS: f64 = 4.0;
/// Calories per gram of fat.
const KCAL_PER_G_FAT: f64 = 9.0;
/// Fixed carbohydrate target while cutting.
const WEIGHT_LOSS_CARBS_G: f64 = 150.0;

/// Weekly meal rotation, identical for every goal.
const MEAL_TEMPLATE: [(&str, &str, &str); 7] = [
    ("Oatmeal & Berries", "Grilled Chicken Salad", "Salmon & Veggies"),
    ("Scrambled Eggs", "Quinoa Bowl", "Lentil Soup"),
    ("Greek Yogurt & Nuts", "Leftover Salmon", "Turkey Stir-fry"),
    ("Protein Smoothie", "Leftover Stir-fry", "Chicken Fajitas"),
    ("Oatmeal & Berries", "Tuna Salad Sandwich", "Lean Steak & Asparagus"),
    ("Pancakes (Protein)", "Leftover Steak", "Healthy Pizza"),
    ("Scrambled Eggs", "Large Salad", "Roast Chicken"),
];

/// A diet plan plus the inputs that were resolved through their defaults.
#[derive(Debug, Clone, Serialize)]
pub struct DietPlanOutcome {
    pub plan: DietPlan,
    pub fallbacks: Vec<Fallback>,
}

/// Compute calorie and macro targets and attach the weekly meal rotation.
///
/// Never fails: unrecognized goal, gender or activity strings resolve to
/// their defaults and are reported in [`DietPlanOutcome::fallbacks`].
pub fn compute_diet_plan(
    goal: &str,
    weight_kg: f64,
    height_cm: f64,
    age: u32,
    gender: &str,
    activity_level: &str,
) -> DietPlanOutcome {
    let goal = Goal::resolve(goal);
    let gender = Gender::resolve(gender);
    let activity = ActivityLevel::resolve(activity_level);

    let mut fallbacks = Vec::new();
    if goal.fell_back {
        fallbacks.push(Fallback::Goal);
    }
    if gender.fell_back {
        fallbacks.push(Fallback::Gender);
    }
    if activity.fell_back {
        fallbacks.push(Fallback::ActivityLevel);
    }
    if !fallbacks.is_empty() {
        tracing::debug!(fallbacks = ?fallbacks, "Diet plan inputs resolved to defaults");
    }

    let calories = maintenance_calories(weight_kg, height_cm, age, gender.value, activity.value)
        + goal.value.calorie_offset();
    let macros = macros_for(goal.value, calories, weight_kg);

    DietPlanOutcome {
        plan: DietPlan {
            daily_calories: round_to_int(calories),
            macros,
            weekly_meal_plan: weekly_meal_plan(),
        },
        fallbacks,
    }
}

/// Convenience wrapper taking a whole profile.
pub fn diet_plan_for_profile(profile: &UserProfile) -> DietPlanOutcome {
    compute_diet_plan(
        &profile.goal,
        profile.weight_kg,
        profile.height_cm,
        profile.age,
        &profile.gender,
        &profile.activity_level,
    )
}

/// Basal metabolic rate (Mifflin-St Jeor).
pub fn basal_metabolic_rate(weight_kg: f64, height_cm: f64, age: u32, gender: Gender) -> f64 {
    10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age) + gender.bmr_constant()
}

/// BMR scaled by activity, before any goal offset.
pub fn maintenance_calories(
    weight_kg: f64,
    height_cm: f64,
    age: u32,
    gender: Gender,
    activity: ActivityLevel,
) -> f64 {
    basal_metabolic_rate(weight_kg, height_cm, age, gender) * activity.multiplier()
}

fn macros_for(goal: Goal, calories: f64, weight_kg: f64) -> Macros {
    let (protein, carbs, fat) = match goal {
        Goal::WeightLoss => (
            1.8 * weight_kg,
            WEIGHT_LOSS_CARBS_G,
            calories * 0.25 / KCAL_PER_G_FAT,
        ),
        Goal::MuscleGain => (
            2.0 * weight_kg,
            calories * 0.40 / KCAL_PER_G_CARBS,
            calories * 0.30 / KCAL_PER_G_FAT,
        ),
        Goal::Maintenance => (
            1.8 * weight_kg,
            calories * 0.45 / KCAL_PER_G_CARBS,
            calories * 0.25 / KCAL_PER_G_FAT,
        ),
    };

    Macros {
        protein_g: round_to_int(protein),
        carbs_g: round_to_int(carbs),
        fat_g: round_to_int(fat),
    }
}

/// The fixed seven-day meal rotation, Monday first.
pub fn weekly_meal_plan() -> Vec<MealDay> {
    Day::ALL
        .iter()
        .zip(MEAL_TEMPLATE.iter())
        .map(|(day, (breakfast, lunch, dinner))| MealDay {
            day: *day,
            breakfast: breakfast.to_string(),
            lunch: lunch.to_string(),
            dinner: dinner.to_string(),
        })
        .collect()
}

/// Round half away from zero.
fn round_to_int(value: f64) -> i64 {
    value.round() as i64
}
