use tracing::debug;

use crate::error::{CoachError, Result};
use crate::models::{Goal, PlanResult, UserProfile};
use crate::planner::constants::*;

/// Unrounded macro targets in grams per day.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MacroTargets {
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

impl MacroTargets {
    /// Calories accounted for by the three macros.
    pub fn calories(&self) -> f64 {
        self.protein * KCAL_PER_GRAM_PROTEIN
            + self.carbs * KCAL_PER_GRAM_CARB
            + self.fats * KCAL_PER_GRAM_FAT
    }
}

/// Basal metabolic rate (Mifflin-St Jeor, male offset).
///
/// `10 * weight + 6.25 * height - 5 * age + 5`
pub fn calculate_bmr(weight_kg: f64, height_cm: f64, age: u32) -> f64 {
    BMR_WEIGHT_COEFF * weight_kg + BMR_HEIGHT_COEFF * height_cm - BMR_AGE_COEFF * age as f64
        + BMR_OFFSET
}

/// Total daily energy expenditure at the fixed activity level.
pub fn calculate_tdee(bmr: f64) -> f64 {
    bmr * ACTIVITY_MULTIPLIER
}

/// Daily calorie target for a goal.
pub fn calorie_target(tdee: f64, goal: Goal) -> f64 {
    tdee + goal_adjustment(goal)
}

/// Split a calorie target into protein, fat and carb grams.
///
/// Protein is fixed by bodyweight, fat takes 25% of calories, and carbs get
/// whatever is left. Carbs go negative when protein alone exceeds the budget.
pub fn calculate_macros(calories: f64, weight_kg: f64) -> MacroTargets {
    let protein = weight_kg * PROTEIN_GRAMS_PER_KG;
    let fats = (calories * FAT_CALORIE_SHARE) / KCAL_PER_GRAM_FAT;
    let carbs =
        (calories - protein * KCAL_PER_GRAM_PROTEIN - fats * KCAL_PER_GRAM_FAT) / KCAL_PER_GRAM_CARB;

    MacroTargets {
        protein,
        carbs,
        fats,
    }
}

/// Round to the nearest integer, clamping negatives to zero.
///
/// Finite inputs can still overflow the formula; non-finite or out-of-range
/// results are `InvalidInput`.
fn round_non_negative(value: f64, what: &str) -> Result<u32> {
    let rounded = value.round();
    if !rounded.is_finite() || rounded > u32::MAX as f64 {
        return Err(CoachError::InvalidInput(format!(
            "{} out of range for this profile, got {}",
            what, value
        )));
    }
    if rounded < 0.0 {
        debug!(value, field = what, "Clamping negative plan value to 0");
        return Ok(0);
    }
    Ok(rounded as u32)
}

/// Compute a complete plan without any I/O.
///
/// Deterministic: the same profile always yields the same plan. Values are
/// rounded only here, never during the intermediate steps.
pub fn compute_local_plan(profile: &UserProfile) -> Result<PlanResult> {
    profile.validate()?;

    let bmr = calculate_bmr(profile.weight_kg, profile.height_cm, profile.age);
    let tdee = calculate_tdee(bmr);
    let calories = calorie_target(tdee, profile.goal);
    let macros = calculate_macros(calories, profile.weight_kg);

    debug!(bmr, tdee, calories, ?macros, "Computed local plan");

    Ok(PlanResult {
        calories_per_day: round_non_negative(calories, "calories")?,
        protein_grams: round_non_negative(macros.protein, "protein")?,
        carb_grams: round_non_negative(macros.carbs, "carbs")?,
        fat_grams: round_non_negative(macros.fats, "fats")?,
        meal_suggestions: meals_for(profile.diet).iter().map(|m| m.to_string()).collect(),
        weekly_split: split_for(profile.goal).iter().map(|d| d.to_string()).collect(),
        tip: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DietPreference;

    fn profile(goal: Goal) -> UserProfile {
        UserProfile::new(25, 175.0, 70.0, goal, DietPreference::Vegetarian).unwrap()
    }

    #[test]
    fn test_bmr() {
        // 700 + 1093.75 - 125 + 5
        assert!((calculate_bmr(70.0, 175.0, 25) - 1673.75).abs() < 1e-9);
    }

    #[test]
    fn test_tdee() {
        assert!((calculate_tdee(1673.75) - 2594.3125).abs() < 1e-9);
    }

    #[test]
    fn test_calorie_target_per_goal() {
        let tdee = 2000.0;
        assert_eq!(calorie_target(tdee, Goal::FatLoss), 1500.0);
        assert_eq!(calorie_target(tdee, Goal::MuscleBuilding), 2300.0);
        assert_eq!(calorie_target(tdee, Goal::Strength), 2200.0);
        assert_eq!(calorie_target(tdee, Goal::Maintenance), 2000.0);
    }

    #[test]
    fn test_macros_account_for_all_calories() {
        let macros = calculate_macros(2500.0, 80.0);
        assert!((macros.protein - 160.0).abs() < 1e-9);
        assert!((macros.calories() - 2500.0).abs() < 1e-6);
    }

    #[test]
    fn test_carbs_negative_for_extreme_inputs() {
        // 300 kg at 1000 kcal: protein alone is 2400 kcal
        let macros = calculate_macros(1000.0, 300.0);
        assert!(macros.carbs < 0.0);
    }

    #[test]
    fn test_local_plan_clamps_negative_carbs() {
        // bmr 580, tdee 899, target 399 kcal: protein and fat exceed it
        let low_intake =
            UserProfile::new(90, 100.0, 40.0, Goal::FatLoss, DietPreference::Vegetarian).unwrap();
        let plan = compute_local_plan(&low_intake).unwrap();
        assert_eq!(plan.calories_per_day, 399);
        assert_eq!(plan.protein_grams, 80);
        assert_eq!(plan.carb_grams, 0);
    }

    #[test]
    fn test_local_plan_shape() {
        for goal in Goal::ALL {
            let plan = compute_local_plan(&profile(goal)).unwrap();
            assert!(plan.check_shape().is_ok());
            assert!(plan.tip.is_none());
        }
    }

    #[test]
    fn test_local_plan_rejects_nan() {
        let mut bad = profile(Goal::Strength);
        bad.weight_kg = f64::NAN;
        assert!(matches!(
            compute_local_plan(&bad),
            Err(CoachError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_local_plan_rejects_overflowing_weight() {
        // Finite weight, but 10 * weight overflows to infinity
        let huge = UserProfile::new(
            25,
            175.0,
            1.7e308,
            Goal::Maintenance,
            DietPreference::Vegetarian,
        )
        .unwrap();
        assert!(matches!(
            compute_local_plan(&huge),
            Err(CoachError::InvalidInput(_))
        ));

        // Finite everywhere, but too many calories for a u32
        let heavy = UserProfile::new(25, 175.0, 1.0e9, Goal::Strength, DietPreference::Vegetarian)
            .unwrap();
        let err = compute_local_plan(&heavy).unwrap_err();
        assert!(err.to_string().contains("calories"));
    }
}
