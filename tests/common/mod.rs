#![allow(dead_code)]

use nutriscan_engine::models::{ActivityLevel, FitnessGoal, Gender, HealthProfile};

pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Male, 25, 175 cm, 70 kg, sedentary, maintaining weight, no conditions.
pub fn baseline_male() -> HealthProfile {
    HealthProfile {
        gender: Gender::Male,
        age: 25,
        height_cm: 175.0,
        weight_kg: 70.0,
        activity_level: ActivityLevel::Sedentary,
        is_diabetic: false,
        has_high_bp: false,
        has_high_cholesterol: false,
        has_pcos: false,
        has_thyroid_issues: false,
        is_pregnant: false,
        is_breastfeeding: false,
        diet_preference: Default::default(),
        fitness_goal: FitnessGoal::MaintainWeight,
        allergies: String::new(),
    }
}

/// Female, 30, 165 cm, 60 kg, lightly active.
pub fn baseline_female() -> HealthProfile {
    HealthProfile {
        gender: Gender::Female,
        age: 30,
        height_cm: 165.0,
        weight_kg: 60.0,
        activity_level: ActivityLevel::LightlyActive,
        ..baseline_male()
    }
}

pub fn approx(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}
