use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use gym_coach_rs::coach::{FallbackReason, PlanOutcome, PlanSession, PlanState};
use gym_coach_rs::error::{CoachError, Result};
use gym_coach_rs::models::{DietPreference, Goal, PlanResult, UserProfile};
use gym_coach_rs::planner::compute_local_plan;
use gym_coach_rs::provider::{parse_plan_content, PlanProvider};

fn profile() -> UserProfile {
    UserProfile::new(25, 175.0, 70.0, Goal::FatLoss, DietPreference::Vegetarian).unwrap()
}

fn remote_plan() -> PlanResult {
    PlanResult {
        calories_per_day: 2100,
        protein_grams: 140,
        carb_grams: 250,
        fat_grams: 60,
        meal_suggestions: (1..=5).map(|i| format!("AI meal {}", i)).collect(),
        weekly_split: (1..=7).map(|i| format!("Day {}: Train", i)).collect(),
        tip: Some("Drink water".to_string()),
    }
}

enum Behavior {
    Succeed(PlanResult),
    Fail(fn() -> CoachError),
    Hang,
}

struct FakeProvider {
    behavior: Behavior,
    calls: AtomicUsize,
}

impl FakeProvider {
    fn new(behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlanProvider for FakeProvider {
    async fn generate(&self, _profile: &UserProfile) -> Result<PlanResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            Behavior::Succeed(plan) => Ok(plan.clone()),
            Behavior::Fail(make_error) => Err(make_error()),
            Behavior::Hang => {
                std::future::pending::<()>().await;
                unreachable!()
            }
        }
    }

    fn name(&self) -> &str {
        "fake"
    }
}

fn session_with(provider: &Arc<FakeProvider>) -> PlanSession {
    let provider: Arc<dyn PlanProvider> = provider.clone();
    PlanSession::new(Some(provider))
}

#[tokio::test]
async fn test_provider_success_is_used_verbatim() {
    let provider = FakeProvider::new(Behavior::Succeed(remote_plan()));
    let mut session = session_with(&provider);

    let outcome = session.submit(&profile()).await.unwrap();
    assert!(matches!(outcome, PlanOutcome::Succeeded(_)));
    assert_eq!(outcome.plan(), &remote_plan());
    assert_eq!(session.state(), &PlanState::Succeeded(remote_plan()));
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_unavailable_provider_falls_back_without_retry() {
    let provider = FakeProvider::new(Behavior::Fail(|| {
        CoachError::ProviderUnavailable("connection refused".to_string())
    }));
    let mut session = session_with(&provider);

    let outcome = session.submit(&profile()).await.unwrap();
    let local = compute_local_plan(&profile()).unwrap();

    match &outcome {
        PlanOutcome::FellBack {
            plan,
            reason: FallbackReason::ProviderFailed(CoachError::ProviderUnavailable(_)),
        } => assert_eq!(plan, &local),
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert!(outcome.provider_failed());
    assert!(outcome.plan().tip.is_none());
    assert_eq!(session.state(), &PlanState::FellBack(local));
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_malformed_plan_from_provider_falls_back() {
    let mut short = remote_plan();
    short.meal_suggestions.truncate(3);
    let provider = FakeProvider::new(Behavior::Succeed(short));
    let mut session = session_with(&provider);

    let outcome = session.submit(&profile()).await.unwrap();
    assert!(outcome.is_fallback());
    assert_eq!(outcome.plan().meal_suggestions.len(), 5);
}

#[tokio::test]
async fn test_malformed_response_body_falls_back() {
    let body = r#"{"calories": 2000, "protein": 140, "carbs": 200, "fats": 60,
        "dietPlan": ["a", "b", "c"], "workoutSplit": ["1","2","3","4","5","6","7"]}"#;
    let err = parse_plan_content(body).unwrap_err();
    assert!(matches!(err, CoachError::ProviderResponseInvalid(_)));

    let provider = FakeProvider::new(Behavior::Fail(|| {
        CoachError::ProviderResponseInvalid("expected 5 meal suggestions, got 3".to_string())
    }));
    let mut session = session_with(&provider);
    let outcome = session.submit(&profile()).await.unwrap();
    assert!(outcome.provider_failed());
    assert_eq!(outcome.into_plan(), compute_local_plan(&profile()).unwrap());
}

#[tokio::test]
async fn test_offline_session_never_attempts_remote() {
    let mut session = PlanSession::offline();
    let outcome = session.submit(&profile()).await.unwrap();

    assert!(matches!(
        outcome,
        PlanOutcome::FellBack {
            reason: FallbackReason::NotAttempted,
            ..
        }
    ));
    assert!(!outcome.provider_failed());
}

#[tokio::test]
async fn test_invalid_profile_is_not_a_provider_failure() {
    let provider = FakeProvider::new(Behavior::Succeed(remote_plan()));
    let mut session = session_with(&provider);

    let mut bad = profile();
    bad.height_cm = f64::NAN;

    let err = session.submit(&bad).await.unwrap_err();
    assert!(matches!(err, CoachError::InvalidInput(_)));
    assert!(!err.is_provider_failure());
    assert_eq!(session.state(), &PlanState::Idle);
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_cancelled_request_returns_to_idle() {
    let provider = FakeProvider::new(Behavior::Hang);
    let mut session = session_with(&provider);

    let timed_out =
        tokio::time::timeout(Duration::from_millis(50), session.submit(&profile())).await;
    assert!(timed_out.is_err());

    assert_eq!(session.state(), &PlanState::Idle);
    assert!(session.state().result().is_none());
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_reset_discards_previous_plan() {
    let provider = FakeProvider::new(Behavior::Succeed(remote_plan()));
    let mut session = session_with(&provider);

    session.submit(&profile()).await.unwrap();
    assert!(session.state().result().is_some());

    session.reset();
    assert_eq!(session.state(), &PlanState::Idle);

    session.submit(&profile()).await.unwrap();
    assert_eq!(provider.calls(), 2);
}
