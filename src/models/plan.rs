use serde::{Deserialize, Serialize};

use crate::error::{CoachError, Result};

/// Number of meal suggestions in every plan.
pub const MEAL_COUNT: usize = 5;

/// Number of days in a weekly split (Monday to Sunday).
pub const DAYS_PER_WEEK: usize = 7;

/// A complete fitness plan, from either the remote provider or the local calculator.
///
/// Serialized with the same field names the provider is asked to produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanResult {
    #[serde(rename = "calories")]
    pub calories_per_day: u32,

    #[serde(rename = "protein")]
    pub protein_grams: u32,

    #[serde(rename = "carbs")]
    pub carb_grams: u32,

    #[serde(rename = "fats")]
    pub fat_grams: u32,

    #[serde(rename = "dietPlan")]
    pub meal_suggestions: Vec<String>,

    #[serde(rename = "workoutSplit")]
    pub weekly_split: Vec<String>,

    /// Only the remote provider writes a tip.
    #[serde(rename = "tip", default, skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
}

impl PlanResult {
    /// Check the list lengths every displayed plan must have.
    pub fn check_shape(&self) -> Result<()> {
        if self.meal_suggestions.len() != MEAL_COUNT {
            return Err(CoachError::ProviderResponseInvalid(format!(
                "expected {} meal suggestions, got {}",
                MEAL_COUNT,
                self.meal_suggestions.len()
            )));
        }
        if self.weekly_split.len() != DAYS_PER_WEEK {
            return Err(CoachError::ProviderResponseInvalid(format!(
                "expected {} days in the weekly split, got {}",
                DAYS_PER_WEEK,
                self.weekly_split.len()
            )));
        }
        Ok(())
    }
}
