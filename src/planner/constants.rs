use crate::models::{DietPreference, Goal};

// ─────────────────────────────────────────────────────────────────────────────
// Mifflin-St Jeor (male offset only; no sex is collected)
// ─────────────────────────────────────────────────────────────────────────────

pub const BMR_WEIGHT_COEFF: f64 = 10.0;
pub const BMR_HEIGHT_COEFF: f64 = 6.25;
pub const BMR_AGE_COEFF: f64 = 5.0;
pub const BMR_OFFSET: f64 = 5.0;

/// Fixed "moderately active" multiplier.
pub const ACTIVITY_MULTIPLIER: f64 = 1.55;

// ─────────────────────────────────────────────────────────────────────────────
// Goal calorie adjustments (kcal/day on top of TDEE)
// ─────────────────────────────────────────────────────────────────────────────

pub const FAT_LOSS_ADJUSTMENT: f64 = -500.0;
pub const MUSCLE_BUILDING_ADJUSTMENT: f64 = 300.0;
pub const STRENGTH_ADJUSTMENT: f64 = 200.0;

// ─────────────────────────────────────────────────────────────────────────────
// Macros
// ─────────────────────────────────────────────────────────────────────────────

/// Grams of protein per kg of bodyweight.
pub const PROTEIN_GRAMS_PER_KG: f64 = 2.0;

/// Share of daily calories from fat.
pub const FAT_CALORIE_SHARE: f64 = 0.25;

pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
pub const KCAL_PER_GRAM_CARB: f64 = 4.0;
pub const KCAL_PER_GRAM_FAT: f64 = 9.0;

// ─────────────────────────────────────────────────────────────────────────────
// Lookup tables
// ─────────────────────────────────────────────────────────────────────────────

pub const VEGETARIAN_MEALS: [&str; 5] = [
    "🥣 Oatmeal with nuts and banana",
    "🥗 Quinoa salad with chickpeas",
    "🍛 Dal with brown rice and vegetables",
    "🥜 Protein shake with peanut butter",
    "🧀 Paneer stir-fry with veggies",
];

pub const NON_VEGETARIAN_MEALS: [&str; 5] = [
    "🍳 Eggs with whole wheat toast",
    "🍗 Grilled chicken breast with rice",
    "🐟 Salmon with sweet potato",
    "🥩 Lean beef steak with vegetables",
    "🍖 Turkey wrap with salad",
];

pub const FAT_LOSS_SPLIT: [&str; 7] = [
    "Mon: HIIT Cardio",
    "Tue: Upper Body",
    "Wed: Active Rest",
    "Thu: HIIT Cardio",
    "Fri: Lower Body",
    "Sat: Full Body Circuit",
    "Sun: Rest",
];

pub const MUSCLE_BUILDING_SPLIT: [&str; 7] = [
    "Mon: Chest & Triceps",
    "Tue: Back & Biceps",
    "Wed: Legs",
    "Thu: Shoulders & Arms",
    "Fri: Chest & Back",
    "Sat: Legs & Core",
    "Sun: Rest",
];

pub const STRENGTH_SPLIT: [&str; 7] = [
    "Mon: Squat Day",
    "Tue: Bench Day",
    "Wed: Rest",
    "Thu: Deadlift Day",
    "Fri: OHP Day",
    "Sat: Accessory Work",
    "Sun: Rest",
];

pub const MAINTENANCE_SPLIT: [&str; 7] = [
    "Mon: Full Body",
    "Tue: Cardio",
    "Wed: Upper Body",
    "Thu: Rest",
    "Fri: Lower Body",
    "Sat: Active Recovery",
    "Sun: Rest",
];

/// Meal suggestions for a diet preference.
pub fn meals_for(diet: DietPreference) -> &'static [&'static str; 5] {
    match diet {
        DietPreference::Vegetarian => &VEGETARIAN_MEALS,
        DietPreference::NonVegetarian => &NON_VEGETARIAN_MEALS,
    }
}

/// Weekly training split for a goal.
pub fn split_for(goal: Goal) -> &'static [&'static str; 7] {
    match goal {
        Goal::FatLoss => &FAT_LOSS_SPLIT,
        Goal::MuscleBuilding => &MUSCLE_BUILDING_SPLIT,
        Goal::Strength => &STRENGTH_SPLIT,
        Goal::Maintenance => &MAINTENANCE_SPLIT,
    }
}

/// Calorie adjustment applied to TDEE for a goal.
pub fn goal_adjustment(goal: Goal) -> f64 {
    match goal {
        Goal::FatLoss => FAT_LOSS_ADJUSTMENT,
        Goal::MuscleBuilding => MUSCLE_BUILDING_ADJUSTMENT,
        Goal::Strength => STRENGTH_ADJUSTMENT,
        Goal::Maintenance => 0.0,
    }
}
