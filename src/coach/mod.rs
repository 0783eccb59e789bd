mod session;

pub use session::{FallbackReason, PlanOutcome, PlanSession, PlanState};
