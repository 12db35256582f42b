use nutriscan_engine::models::NutrientRecord;
use nutriscan_engine::{
    compute_targets, fold, progress, remaining, DailyLog, Nutrient, NutrientUnit,
};

mod common;

use common::baseline_male;

fn breakfast() -> NutrientRecord {
    NutrientRecord::default()
        .with(Nutrient::Calories, 350.0)
        .with(Nutrient::Protein, 12.5)
        .with(Nutrient::Sodium, 420.0)
}

fn snack() -> NutrientRecord {
    NutrientRecord::default()
        .with(Nutrient::Calories, 150.0)
        .with(Nutrient::Sugar, 18.25)
        .with(Nutrient::Fiber, 2.0)
}

#[test]
fn fold_adds_only_present_fields() {
    common::init_logging();
    let log = fold(&DailyLog::zero(), &breakfast());

    assert_eq!(log.macros.calories, 350.0);
    assert_eq!(log.macros.protein, 12.5);
    assert_eq!(log.micros.sodium, 420.0);
    assert_eq!(log.macros.fat, 0.0);
    assert_eq!(log.micros.sugar, 0.0);

    let log = fold(&log, &snack());
    assert_eq!(log.macros.calories, 500.0);
    assert_eq!(log.macros.protein, 12.5);
    assert_eq!(log.micros.sugar, 18.25);
}

#[test]
fn fold_leaves_inputs_untouched() {
    let start = fold(&DailyLog::zero(), &snack());
    let before = start;
    let record = breakfast();

    let next = fold(&start, &record);

    assert_eq!(start, before);
    assert_eq!(record, breakfast());
    assert_ne!(next, start);
}

#[test]
fn negative_amounts_are_skipped() {
    let dinner = NutrientRecord::default().with(Nutrient::Calories, 500.0);
    let log = fold(&DailyLog::zero(), &dinner);
    let refund = NutrientRecord::default()
        .with(Nutrient::Calories, -800.0)
        .with(Nutrient::Fiber, 3.0);

    let next = fold(&log, &refund);
    assert_eq!(next.macros.calories, 500.0);
    assert_eq!(next.micros.fiber, 3.0);
}

#[test]
fn non_finite_amounts_are_skipped() {
    let log = fold(&DailyLog::zero(), &breakfast());
    let garbage = NutrientRecord::default()
        .with(Nutrient::Calories, f64::NAN)
        .with(Nutrient::Sodium, f64::INFINITY)
        .with(Nutrient::Protein, f64::NEG_INFINITY);

    let next = fold(&log, &garbage);
    assert_eq!(next, log);
    for nutrient in Nutrient::ALL {
        assert!(next.get(nutrient) >= log.get(nutrient));
    }
}

#[test]
fn empty_record_is_identity() {
    let log = fold(&DailyLog::zero(), &breakfast());
    assert!(NutrientRecord::default().is_empty());
    assert_eq!(fold(&log, &NutrientRecord::default()), log);
}

#[test]
fn fold_is_commutative() {
    let start = fold(&DailyLog::zero(), &NutrientRecord::default().with(Nutrient::Iron, 1.5));
    let a = breakfast();
    let b = snack();

    let ab = fold(&fold(&start, &a), &b);
    let ba = fold(&fold(&start, &b), &a);
    assert_eq!(ab, ba);
}

#[test]
fn fold_all_matches_sequential_folds() {
    let records = [breakfast(), snack(), breakfast()];
    let all = DailyLog::zero().fold_all(&records);
    let manual = DailyLog::zero()
        .fold(&records[0])
        .fold(&records[1])
        .fold(&records[2]);

    assert_eq!(all, manual);
    assert_eq!(all.macros.calories, 850.0);
    assert_eq!(all.micros.sodium, 840.0);
}

#[test]
fn progress_is_capped_at_one_hundred_percent() {
    let goals = compute_targets(&baseline_male()).unwrap();
    let heavy = NutrientRecord::default()
        .with(Nutrient::Sodium, 4600.0)
        .with(Nutrient::Calories, goals.macros.calories / 2.0);
    let log = fold(&DailyLog::zero(), &heavy);

    let report = progress(&log, &goals);
    assert_eq!(report.len(), Nutrient::ALL.len());

    let sodium = report.iter().find(|p| p.nutrient == Nutrient::Sodium).unwrap();
    assert_eq!(sodium.percent, 100.0);
    assert_eq!(sodium.consumed, 4600.0);
    assert_eq!(sodium.unit, NutrientUnit::Milligram);
    assert!(sodium.exceeded());

    let calories = report.iter().find(|p| p.nutrient == Nutrient::Calories).unwrap();
    assert_eq!(calories.percent, 50.0);
    assert!(!calories.exceeded());

    // trans fat target is zero
    let trans = report.iter().find(|p| p.nutrient == Nutrient::TransFat).unwrap();
    assert_eq!(trans.goal, 0.0);
    assert_eq!(trans.percent, 0.0);
}

#[test]
fn remaining_never_goes_negative() {
    let goals = compute_targets(&baseline_male()).unwrap();
    let log = fold(
        &DailyLog::zero(),
        &NutrientRecord::default()
            .with(Nutrient::Calories, 1000.0)
            .with(Nutrient::Sugar, 80.0),
    );

    let left = remaining(&log, &goals);
    assert_eq!(left.get(Nutrient::Calories), Some(goals.macros.calories - 1000.0));
    assert_eq!(left.get(Nutrient::Sugar), Some(0.0));
    assert_eq!(left.get(Nutrient::Fiber), Some(goals.micros.fiber));
}
