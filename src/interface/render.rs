use std::fmt;

use crate::coach::PlanOutcome;
use crate::models::{Goal, PlanResult};

/// Shown when the provider failed and the local calculator stepped in.
pub const FALLBACK_NOTICE: &str = "Failed to generate plan. Using fallback calculation.";

/// A plan paired with the goal it was built for, printable as plain text.
pub struct PlanReport<'a> {
    pub plan: &'a PlanResult,
    pub goal: Goal,
}

impl fmt::Display for PlanReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plan = self.plan;

        writeln!(f, "=== Your AI-Powered Plan ===")?;
        writeln!(f, "Personalized for your {} goal", self.goal.label())?;
        writeln!(f)?;

        if let Some(tip) = &plan.tip {
            writeln!(f, "Tip: {}", tip)?;
            writeln!(f)?;
        }

        writeln!(f, "Daily Calories: {}", plan.calories_per_day)?;
        writeln!(f, "Protein: {}g", plan.protein_grams)?;
        writeln!(f, "Carbs:   {}g", plan.carb_grams)?;
        writeln!(f, "Fats:    {}g", plan.fat_grams)?;
        writeln!(f)?;

        writeln!(f, "--- Sample Meals ---")?;
        for meal in &plan.meal_suggestions {
            writeln!(f, "  {}", meal)?;
        }
        writeln!(f)?;

        writeln!(f, "--- Weekly Split ---")?;
        for day in &plan.weekly_split {
            writeln!(f, "  {}", day)?;
        }
        Ok(())
    }
}

/// Render a plan as plain text.
pub fn format_plan(plan: &PlanResult, goal: Goal) -> String {
    PlanReport { plan, goal }.to_string()
}

/// Print a session outcome, with the fallback notice when the provider failed.
pub fn display_outcome(outcome: &PlanOutcome, goal: Goal) {
    if outcome.provider_failed() {
        eprintln!("{}", FALLBACK_NOTICE);
    }
    println!();
    print!(
        "{}",
        PlanReport {
            plan: outcome.plan(),
            goal
        }
    );
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_plan(tip: Option<&str>) -> PlanResult {
        PlanResult {
            calories_per_day: 2094,
            protein_grams: 140,
            carb_grams: 253,
            fat_grams: 58,
            meal_suggestions: vec!["Oats".to_string()],
            weekly_split: vec!["Mon: HIIT Cardio".to_string()],
            tip: tip.map(str::to_string),
        }
    }

    #[test]
    fn test_format_plan() {
        let text = format_plan(&sample_plan(None), Goal::FatLoss);
        assert!(text.contains("Personalized for your Fat Loss goal"));
        assert!(text.contains("Daily Calories: 2094"));
        assert!(text.contains("Carbs:   253g"));
        assert!(text.contains("  Mon: HIIT Cardio"));
        assert!(!text.contains("Tip:"));
    }

    #[test]
    fn test_format_plan_with_tip() {
        let text = format_plan(&sample_plan(Some("Sleep 8 hours")), Goal::Strength);
        assert!(text.contains("Tip: Sleep 8 hours"));
    }

    #[test]
    fn test_report_lists_every_entry() {
        let mut plan = sample_plan(None);
        plan.meal_suggestions = vec!["Oats".to_string(), "Dal".to_string()];
        let text = PlanReport {
            plan: &plan,
            goal: Goal::Maintenance,
        }
        .to_string();
        assert_eq!(text, format_plan(&plan, Goal::Maintenance));
        assert!(text.contains("  Oats\n  Dal\n\n--- Weekly Split ---"));
        assert!(text.ends_with("  Mon: HIIT Cardio\n"));
    }
}
