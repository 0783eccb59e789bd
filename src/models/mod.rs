mod plan;
mod profile;

pub use plan::{PlanResult, DAYS_PER_WEEK, MEAL_COUNT};
pub use profile::{parse_age, parse_measurement, DietPreference, Goal, ProfileForm, UserProfile};
