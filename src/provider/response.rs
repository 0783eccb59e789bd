use serde::Deserialize;

use crate::error::{CoachError, Result};
use crate::models::PlanResult;

/// Plan as written by the model, before numeric validation.
#[derive(Debug, Deserialize)]
struct RawPlan {
    calories: f64,
    protein: f64,
    carbs: f64,
    fats: f64,
    #[serde(rename = "dietPlan")]
    diet_plan: Vec<String>,
    #[serde(rename = "workoutSplit")]
    workout_split: Vec<String>,
    #[serde(default)]
    tip: Option<String>,
}

/// Remove every markdown code-fence marker the model wraps JSON in.
pub fn strip_code_fences(content: &str) -> String {
    content
        .replace("```json", "")
        .replace("```", "")
        .trim()
        .to_string()
}

fn grams(field: &str, value: f64) -> Result<u32> {
    if !value.is_finite() || value < 0.0 || value > u32::MAX as f64 {
        return Err(CoachError::ProviderResponseInvalid(format!(
            "{} must be a non-negative number, got {}",
            field, value
        )));
    }
    Ok(value.round() as u32)
}

/// Parse provider output into a validated plan.
///
/// Accepts fenced or bare JSON. Numbers are rounded to integers; the meal and
/// split lists must have exactly 5 and 7 entries.
pub fn parse_plan_content(content: &str) -> Result<PlanResult> {
    let json = strip_code_fences(content);
    let raw: RawPlan = serde_json::from_str(&json)
        .map_err(|e| CoachError::ProviderResponseInvalid(format!("Unparseable plan JSON: {}", e)))?;

    let plan = PlanResult {
        calories_per_day: grams("calories", raw.calories)?,
        protein_grams: grams("protein", raw.protein)?,
        carb_grams: grams("carbs", raw.carbs)?,
        fat_grams: grams("fats", raw.fats)?,
        meal_suggestions: raw.diet_plan,
        weekly_split: raw.workout_split,
        tip: raw
            .tip
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty()),
    };
    plan.check_shape()?;
    Ok(plan)
}
