//! Daily target derivation.
//!
//! BMR uses the Mifflin-St Jeor equation (Mifflin et al. 1990), scaled by an
//! activity factor into TDEE. Health conditions then override individual
//! targets in a fixed order, and the fitness goal shifts the calorie goal
//! before macros are converted to grams with the Atwater factors.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{GenderedValue, GoalConfig, MacroSplit};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    ActivityLevel, FitnessGoal, Gender, HealthProfile, Macros, Micros, NutritionGoals,
};

const KCAL_PER_G_CARB: f64 = 4.0;
const KCAL_PER_G_PROTEIN: f64 = 4.0;
const KCAL_PER_G_FAT: f64 = 9.0;

/// Intermediate values of a target derivation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalBreakdown {
    pub bmr: f64,
    /// TDEE including pregnancy/breastfeeding extras
    pub tdee: f64,
    /// TDEE plus the fitness goal offset, unrounded
    pub calorie_goal: f64,
    pub split: MacroSplit,
    pub micros: Micros,
}

/// Check the profile invariants that must hold before goals are derived.
pub fn validate_profile(profile: &HealthProfile) -> EngineResult<()> {
    if profile.age == 0 {
        return Err(EngineError::invalid_profile("age must be positive"));
    }
    if !profile.height_cm.is_finite() || profile.height_cm <= 0.0 {
        return Err(EngineError::invalid_profile(
            "height must be a positive number of cm",
        ));
    }
    if !profile.weight_kg.is_finite() || profile.weight_kg <= 0.0 {
        return Err(EngineError::invalid_profile(
            "weight must be a positive number of kg",
        ));
    }
    if profile.gender != Gender::Female && (profile.is_pregnant || profile.is_breastfeeding) {
        return Err(EngineError::invalid_profile(
            "pregnancy and breastfeeding apply only to female profiles",
        ));
    }
    Ok(())
}

pub fn calculate_bmr(profile: &HealthProfile, config: &GoalConfig) -> f64 {
    let bmr = &config.bmr;
    let gender_constant = match profile.gender {
        Gender::Male => bmr.male_constant,
        Gender::Female => bmr.female_constant,
        Gender::Other => bmr.neutral_constant,
    };

    bmr.weight_coef * profile.weight_kg
        + bmr.height_coef * profile.height_cm
        + bmr.age_coef * f64::from(profile.age)
        + gender_constant
}

pub fn activity_factor(level: ActivityLevel, config: &GoalConfig) -> f64 {
    let factors = &config.activity_factors;
    match level {
        ActivityLevel::Sedentary => factors.sedentary,
        ActivityLevel::LightlyActive => factors.lightly_active,
        ActivityLevel::ModeratelyActive => factors.moderately_active,
        ActivityLevel::VeryActive => factors.very_active,
    }
}

fn gendered(value: GenderedValue, gender: Gender) -> f64 {
    match gender {
        Gender::Male => value.male,
        Gender::Female | Gender::Other => value.default,
    }
}

fn baseline_micros(gender: Gender, config: &GoalConfig) -> Micros {
    let d = &config.micro_defaults;
    Micros {
        saturated_fat: d.saturated_fat_g,
        polyunsaturated_fat: d.polyunsaturated_fat_g,
        monounsaturated_fat: d.monounsaturated_fat_g,
        trans_fat: d.trans_fat_g,
        cholesterol: d.cholesterol_mg,
        sodium: d.sodium_mg,
        potassium: d.potassium_mg,
        fiber: d.fiber_g,
        sugar: d.sugar_g,
        vitamin_a: gendered(d.vitamin_a_mcg, gender),
        vitamin_c: gendered(d.vitamin_c_mg, gender),
        calcium: d.calcium_mg,
        iron: gendered(d.iron_mg, gender),
    }
}

/// Run the derivation and return every intermediate value.
///
/// # Errors
///
/// Returns `InvalidProfile` when the profile breaks its invariants or yields a
/// non-positive calorie goal.
pub fn goal_breakdown(
    profile: &HealthProfile,
    config: &GoalConfig,
) -> EngineResult<GoalBreakdown> {
    validate_profile(profile)?;

    let bmr = calculate_bmr(profile, config);
    let mut tdee = bmr * activity_factor(profile.activity_level, config);

    let splits = &config.macro_splits;
    let adjust = &config.conditions;
    let mut split = splits.baseline;
    let mut micros = baseline_micros(profile.gender, config);

    if profile.is_diabetic || profile.has_pcos {
        split = splits.glycemic;
        micros.sugar = adjust.glycemic_sugar_g;
    }
    if profile.has_high_bp {
        micros.sodium = adjust.high_bp_sodium_mg;
        micros.potassium = adjust.high_bp_potassium_mg;
    }
    if profile.has_high_cholesterol {
        micros.saturated_fat = adjust.high_cholesterol_saturated_fat_g;
    }
    if profile.is_pregnant && profile.is_breastfeeding {
        warn!("profile is both pregnant and breastfeeding, stacking both adjustments");
    }
    if profile.is_pregnant {
        tdee += adjust.pregnancy_extra_kcal;
        split = splits.pregnancy;
        micros.iron = adjust.pregnancy_iron_mg;
        micros.calcium = adjust.pregnancy_calcium_mg;
    }
    if profile.is_breastfeeding {
        tdee += adjust.breastfeeding_extra_kcal;
        split = splits.breastfeeding;
        micros.iron = adjust.breastfeeding_iron_mg;
        micros.calcium = adjust.breastfeeding_calcium_mg;
    }

    let offsets = &config.calorie_offsets;
    let calorie_goal = tdee
        + match profile.fitness_goal {
            FitnessGoal::LoseWeight => offsets.lose_weight,
            FitnessGoal::MaintainWeight => offsets.maintain_weight,
            FitnessGoal::GainMuscle => offsets.gain_muscle,
        };

    debug!(bmr, tdee, calorie_goal, "derived energy targets");

    if !calorie_goal.is_finite() || calorie_goal.round() <= 0.0 {
        return Err(EngineError::invalid_profile(format!(
            "profile yields a non-positive calorie goal ({calorie_goal:.0} kcal)"
        )));
    }

    Ok(GoalBreakdown {
        bmr,
        tdee,
        calorie_goal,
        split,
        micros,
    })
}

/// Derive the full target profile using the default guideline constants.
pub fn compute_targets(profile: &HealthProfile) -> EngineResult<NutritionGoals> {
    compute_targets_with(profile, &GoalConfig::default())
}

pub fn compute_targets_with(
    profile: &HealthProfile,
    config: &GoalConfig,
) -> EngineResult<NutritionGoals> {
    let breakdown = goal_breakdown(profile, config)?;
    let kcal = breakdown.calorie_goal;
    let split = breakdown.split;

    Ok(NutritionGoals {
        macros: Macros {
            calories: kcal.round(),
            carbohydrates: (kcal * split.carbohydrate / KCAL_PER_G_CARB).round(),
            protein: (kcal * split.protein / KCAL_PER_G_PROTEIN).round(),
            fat: (kcal * split.fat / KCAL_PER_G_FAT).round(),
        },
        micros: breakdown.micros,
    })
}
