pub mod prompts;
pub mod render;

pub use prompts::{collect_profile_form, prompt_yes_no};
pub use render::{display_outcome, format_plan, PlanReport, FALLBACK_NOTICE};
