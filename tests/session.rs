use chrono::NaiveDate;
use nutriscan_engine::models::{FitnessGoal, HealthProfile};
use nutriscan_engine::{
    compute_targets, DailyLog, EngineError, Nutrient, NutrientRecord, SessionContext, SpanKind,
};

mod common;

use common::{baseline_female, baseline_male};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
}

fn lunch() -> NutrientRecord {
    NutrientRecord::default()
        .with(Nutrient::Calories, 600.0)
        .with(Nutrient::Protein, 35.0)
        .with(Nutrient::Sodium, 900.0)
}

#[test]
fn onboarding_derives_and_caches_goals() {
    common::init_logging();
    let mut session = SessionContext::complete_onboarding(baseline_male(), day(18)).unwrap();

    let cached = *session.cached_targets().unwrap();
    assert_eq!(cached.macros.calories, 2009.0);
    assert_eq!(session.targets().unwrap(), cached);
    assert_eq!(*session.daily_log(), DailyLog::zero());
    assert_eq!(session.log_date(), day(18));
}

#[test]
fn onboarding_rejects_invalid_profile() {
    let profile = HealthProfile {
        age: 0,
        ..baseline_male()
    };
    let err = SessionContext::complete_onboarding(profile, day(18)).unwrap_err();
    assert!(matches!(err, EngineError::InvalidProfile { .. }));
}

#[test]
fn editing_profile_keeps_cached_goals_until_recomputed() {
    let mut session = SessionContext::complete_onboarding(baseline_male(), day(18)).unwrap();

    session
        .edit_profile(HealthProfile {
            fitness_goal: FitnessGoal::LoseWeight,
            ..baseline_male()
        })
        .unwrap();
    assert_eq!(session.profile().fitness_goal, FitnessGoal::LoseWeight);
    assert_eq!(session.targets().unwrap().macros.calories, 2009.0);

    let fresh = session.recompute_targets().unwrap();
    assert_eq!(fresh.macros.calories, 1509.0);
    assert_eq!(session.cached_targets(), Some(&fresh));
}

#[test]
fn invalid_edit_leaves_profile_alone() {
    let mut session = SessionContext::complete_onboarding(baseline_male(), day(18)).unwrap();
    let err = session
        .edit_profile(HealthProfile {
            is_pregnant: true,
            ..baseline_male()
        })
        .unwrap_err();

    assert!(matches!(err, EngineError::InvalidProfile { .. }));
    assert!(!session.profile().is_pregnant);
}

#[test]
fn restored_session_derives_missing_goals() {
    let mut session =
        SessionContext::restore(baseline_female(), None, DailyLog::zero(), day(17)).unwrap();
    assert!(session.cached_targets().is_none());

    let goals = session.targets().unwrap();
    assert_eq!(goals.macros.calories, 1815.0);
    assert!(session.cached_targets().is_some());
}

#[test]
fn restoring_an_invalid_profile_fails_even_with_cached_goals() {
    let goals = compute_targets(&baseline_male()).unwrap();
    let stored = HealthProfile {
        is_pregnant: true,
        ..baseline_male()
    };

    let err = SessionContext::restore(stored, Some(goals), DailyLog::zero(), day(17)).unwrap_err();
    assert!(matches!(err, EngineError::InvalidProfile { .. }));
}

#[test]
fn invalid_record_amounts_never_lower_the_log() {
    let mut session = SessionContext::complete_onboarding(baseline_male(), day(18)).unwrap();
    session.record(&lunch());

    let bad = NutrientRecord::default()
        .with(Nutrient::Calories, -800.0)
        .with(Nutrient::Sodium, f64::NAN)
        .with(Nutrient::Protein, 5.0);
    let log = *session.record(&bad);

    assert_eq!(log.macros.calories, 600.0);
    assert_eq!(log.micros.sodium, 900.0);
    assert_eq!(log.macros.protein, 40.0);
}

#[test]
fn records_accumulate_and_roll_over_by_day() {
    let mut session = SessionContext::complete_onboarding(baseline_male(), day(18)).unwrap();

    session.record(&lunch());
    let log = *session.record(&lunch());
    assert_eq!(log.macros.calories, 1200.0);
    assert_eq!(log.micros.sodium, 1800.0);

    let left = session.remaining().unwrap();
    assert_eq!(left.get(Nutrient::Calories), Some(809.0));
    assert_eq!(left.get(Nutrient::Sodium), Some(500.0));

    let protein = session
        .progress()
        .unwrap()
        .into_iter()
        .find(|p| p.nutrient == Nutrient::Protein)
        .unwrap();
    assert_eq!(protein.consumed, 70.0);

    assert!(!session.roll_over(day(18)));
    assert_eq!(session.daily_log().macros.calories, 1200.0);

    assert!(session.roll_over(day(19)));
    assert_eq!(session.log_date(), day(19));
    assert_eq!(*session.daily_log(), DailyLog::zero());

    session.record(&lunch());
    session.reset_log();
    assert_eq!(*session.daily_log(), DailyLog::zero());
}

#[test]
fn session_annotates_with_its_profile() {
    let profile = HealthProfile {
        allergies: "wheat".to_string(),
        is_diabetic: true,
        ..baseline_male()
    };
    let session = SessionContext::complete_onboarding(profile, day(18)).unwrap();

    let out = session.annotate_ingredients("Wheat flour, glucose syrup").unwrap();
    let tags: Vec<(&str, SpanKind)> = out
        .spans
        .iter()
        .map(|s| (out.span_text(s), s.kind))
        .collect();
    assert_eq!(
        tags,
        vec![
            ("Wheat", SpanKind::Allergen),
            ("glucose", SpanKind::Condition),
            ("syrup", SpanKind::Condition),
        ]
    );
}

#[test]
fn session_round_trips_through_json() {
    let mut session = SessionContext::complete_onboarding(baseline_female(), day(18)).unwrap();
    session.record(&lunch());

    let json = serde_json::to_string(&session).unwrap();
    assert!(json.contains("\"logDate\":\"2026-10-18\""));
    assert!(json.contains("\"hasHighBP\":false"));

    let restored: SessionContext = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, session);
}
