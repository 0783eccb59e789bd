use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::{CoachError, Result};
use crate::models::{PlanResult, UserProfile};
use crate::planner::compute_local_plan;
use crate::provider::PlanProvider;

/// Where a session is in its request cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanState {
    Idle,
    Requesting,
    Succeeded(PlanResult),
    FellBack(PlanResult),
}

impl PlanState {
    /// The plan on display, if the cycle has finished.
    pub fn result(&self) -> Option<&PlanResult> {
        match self {
            PlanState::Succeeded(plan) | PlanState::FellBack(plan) => Some(plan),
            PlanState::Idle | PlanState::Requesting => None,
        }
    }
}

/// Why the local calculator produced the plan.
#[derive(Debug)]
pub enum FallbackReason {
    /// No remote provider is configured.
    NotAttempted,
    /// The provider failed; the error is kept for diagnostics only.
    ProviderFailed(CoachError),
}

/// Result of one submission, tagged with its provenance.
#[derive(Debug)]
pub enum PlanOutcome {
    Succeeded(PlanResult),
    FellBack {
        plan: PlanResult,
        reason: FallbackReason,
    },
}

impl PlanOutcome {
    pub fn plan(&self) -> &PlanResult {
        match self {
            PlanOutcome::Succeeded(plan) | PlanOutcome::FellBack { plan, .. } => plan,
        }
    }

    pub fn into_plan(self) -> PlanResult {
        match self {
            PlanOutcome::Succeeded(plan) | PlanOutcome::FellBack { plan, .. } => plan,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, PlanOutcome::FellBack { .. })
    }

    /// True when a provider was tried and failed; the UI shows a notice for this.
    pub fn provider_failed(&self) -> bool {
        matches!(
            self,
            PlanOutcome::FellBack {
                reason: FallbackReason::ProviderFailed(_),
                ..
            }
        )
    }

    fn to_state(&self) -> PlanState {
        match self {
            PlanOutcome::Succeeded(plan) => PlanState::Succeeded(plan.clone()),
            PlanOutcome::FellBack { plan, .. } => PlanState::FellBack(plan.clone()),
        }
    }
}

/// Holds the session in `Requesting`; dropping it unfinished returns the session to `Idle`.
struct InFlight<'a> {
    state: &'a mut PlanState,
    finished: bool,
}

impl<'a> InFlight<'a> {
    fn begin(state: &'a mut PlanState) -> Self {
        *state = PlanState::Requesting;
        Self {
            state,
            finished: false,
        }
    }

    fn finish(mut self, next: PlanState) {
        *self.state = next;
        self.finished = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.finished {
            debug!("Plan request abandoned, returning to idle");
            *self.state = PlanState::Idle;
        }
    }
}

/// One wizard's plan cycle: remote provider first, local calculator on any failure.
///
/// `submit` takes `&mut self`, so a session can never have two requests in flight.
pub struct PlanSession {
    provider: Option<Arc<dyn PlanProvider>>,
    state: PlanState,
}

impl PlanSession {
    /// `None` runs fully offline: every plan comes from the local calculator.
    pub fn new(provider: Option<Arc<dyn PlanProvider>>) -> Self {
        Self {
            provider,
            state: PlanState::Idle,
        }
    }

    pub fn offline() -> Self {
        Self::new(None)
    }

    pub fn state(&self) -> &PlanState {
        &self.state
    }

    /// Discard the current plan ("start over").
    pub fn reset(&mut self) {
        self.state = PlanState::Idle;
    }

    /// Produce exactly one plan for `profile`.
    ///
    /// Invalid profiles fail with `InvalidInput` before any request is made.
    /// Provider errors are logged and answered with the local plan; the remote
    /// call is never retried.
    pub async fn submit(&mut self, profile: &UserProfile) -> Result<PlanOutcome> {
        self.state = PlanState::Idle;
        profile.validate()?;

        let Some(provider) = self.provider.clone() else {
            let plan = compute_local_plan(profile)?;
            info!("No plan provider configured, using local calculation");
            self.state = PlanState::FellBack(plan.clone());
            return Ok(PlanOutcome::FellBack {
                plan,
                reason: FallbackReason::NotAttempted,
            });
        };

        let in_flight = InFlight::begin(&mut self.state);

        let remote = match provider.generate(profile).await {
            Ok(plan) => plan.check_shape().map(|_| plan),
            Err(e) => Err(e),
        };

        let outcome = match remote {
            Ok(plan) => {
                info!(provider = provider.name(), "Plan generated by provider");
                PlanOutcome::Succeeded(plan)
            }
            Err(e) => {
                warn!(
                    provider = provider.name(),
                    error = %e,
                    "Plan provider failed, using local calculation"
                );
                PlanOutcome::FellBack {
                    plan: compute_local_plan(profile)?,
                    reason: FallbackReason::ProviderFailed(e),
                }
            }
        };

        in_flight.finish(outcome.to_state());
        Ok(outcome)
    }
}
