pub mod cli;
pub mod coach;
pub mod config;
pub mod error;
pub mod interface;
pub mod logging;
pub mod models;
pub mod planner;
pub mod provider;
pub mod server;

pub use coach::{PlanOutcome, PlanSession, PlanState};
pub use error::{CoachError, Result};
pub use models::{DietPreference, Goal, PlanResult, ProfileForm, UserProfile};
pub use planner::compute_local_plan;
