//! Tunable constants for goal derivation and product lookup.
//!
//! Defaults reproduce the published guideline values; a caller can
//! deserialize a custom [`GoalConfig`] to experiment with them.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Goal derivation configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalConfig {
    pub bmr: BmrConfig,
    pub activity_factors: ActivityFactorsConfig,
    pub macro_splits: MacroSplitsConfig,
    pub micro_defaults: MicroDefaultsConfig,
    pub conditions: ConditionAdjustmentsConfig,
    pub calorie_offsets: CalorieOffsetsConfig,
}

/// Mifflin-St Jeor coefficients.
///
/// BMR = weight_coef·kg + height_coef·cm + age_coef·years + gender constant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmrConfig {
    pub weight_coef: f64,
    pub height_coef: f64,
    pub age_coef: f64,
    pub male_constant: f64,
    pub female_constant: f64,
    /// Midpoint used when gender is `other`
    pub neutral_constant: f64,
}

impl Default for BmrConfig {
    fn default() -> Self {
        Self {
            weight_coef: 10.0,
            height_coef: 6.25,
            age_coef: -5.0,
            male_constant: 5.0,
            female_constant: -161.0,
            neutral_constant: -78.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityFactorsConfig {
    pub sedentary: f64,
    pub lightly_active: f64,
    pub moderately_active: f64,
    pub very_active: f64,
}

impl Default for ActivityFactorsConfig {
    fn default() -> Self {
        Self {
            sedentary: 1.2,
            lightly_active: 1.375,
            moderately_active: 1.55,
            very_active: 1.725,
        }
    }
}

/// Fractions of the calorie goal assigned to each macronutrient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroSplit {
    pub carbohydrate: f64,
    pub protein: f64,
    pub fat: f64,
}

impl MacroSplit {
    pub const fn new(carbohydrate: f64, protein: f64, fat: f64) -> Self {
        Self {
            carbohydrate,
            protein,
            fat,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroSplitsConfig {
    pub baseline: MacroSplit,
    /// Diabetes or PCOS
    pub glycemic: MacroSplit,
    pub pregnancy: MacroSplit,
    pub breastfeeding: MacroSplit,
}

impl Default for MacroSplitsConfig {
    fn default() -> Self {
        Self {
            baseline: MacroSplit::new(0.45, 0.25, 0.30),
            glycemic: MacroSplit::new(0.45, 0.30, 0.25),
            pregnancy: MacroSplit::new(0.45, 0.30, 0.25),
            breastfeeding: MacroSplit::new(0.50, 0.25, 0.25),
        }
    }
}

/// A value that differs between male and everyone else.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenderedValue {
    pub male: f64,
    /// Used for `female` and `other`
    pub default: f64,
}

/// Baseline micronutrient targets (FDA/NIH guidelines).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MicroDefaultsConfig {
    pub saturated_fat_g: f64,
    pub polyunsaturated_fat_g: f64,
    pub monounsaturated_fat_g: f64,
    pub trans_fat_g: f64,
    pub cholesterol_mg: f64,
    pub sodium_mg: f64,
    pub potassium_mg: f64,
    pub fiber_g: f64,
    pub sugar_g: f64,
    pub vitamin_a_mcg: GenderedValue,
    pub vitamin_c_mg: GenderedValue,
    pub calcium_mg: f64,
    pub iron_mg: GenderedValue,
}

impl Default for MicroDefaultsConfig {
    fn default() -> Self {
        Self {
            saturated_fat_g: 20.0,
            polyunsaturated_fat_g: 22.0,
            monounsaturated_fat_g: 50.0,
            trans_fat_g: 0.0,
            cholesterol_mg: 300.0,
            sodium_mg: 2300.0,
            // Adequate Intake
            potassium_mg: 4700.0,
            fiber_g: 28.0,
            sugar_g: 50.0,
            vitamin_a_mcg: GenderedValue {
                male: 900.0,
                default: 700.0,
            },
            vitamin_c_mg: GenderedValue {
                male: 90.0,
                default: 75.0,
            },
            calcium_mg: 1000.0,
            // pre-menopause value for everyone but male
            iron_mg: GenderedValue {
                male: 8.0,
                default: 18.0,
            },
        }
    }
}

/// Field overrides applied by health conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionAdjustmentsConfig {
    pub glycemic_sugar_g: f64,
    /// DASH diet targets
    pub high_bp_sodium_mg: f64,
    pub high_bp_potassium_mg: f64,
    pub high_cholesterol_saturated_fat_g: f64,
    pub pregnancy_extra_kcal: f64,
    pub pregnancy_iron_mg: f64,
    pub pregnancy_calcium_mg: f64,
    pub breastfeeding_extra_kcal: f64,
    pub breastfeeding_iron_mg: f64,
    pub breastfeeding_calcium_mg: f64,
}

impl Default for ConditionAdjustmentsConfig {
    fn default() -> Self {
        Self {
            glycemic_sugar_g: 30.0,
            high_bp_sodium_mg: 1500.0,
            high_bp_potassium_mg: 4700.0,
            high_cholesterol_saturated_fat_g: 15.0,
            pregnancy_extra_kcal: 300.0,
            pregnancy_iron_mg: 27.0,
            pregnancy_calcium_mg: 1300.0,
            breastfeeding_extra_kcal: 450.0,
            breastfeeding_iron_mg: 10.0,
            breastfeeding_calcium_mg: 1300.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalorieOffsetsConfig {
    pub lose_weight: f64,
    pub maintain_weight: f64,
    pub gain_muscle: f64,
}

impl Default for CalorieOffsetsConfig {
    fn default() -> Self {
        Self {
            lose_weight: -500.0,
            maintain_weight: 0.0,
            gain_muscle: 400.0,
        }
    }
}

pub const DEFAULT_LOOKUP_BASE_URL: &str = "https://world.openfoodfacts.org";
const DEFAULT_USER_AGENT: &str = concat!("nutriscan-engine/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Product lookup client settings.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_LOOKUP_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl LookupConfig {
    /// Read overrides from `NUTRISCAN_OFF_BASE_URL`, `NUTRISCAN_USER_AGENT`
    /// and `NUTRISCAN_TIMEOUT_SECS`; unset or unparsable values keep the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let base_url = std::env::var("NUTRISCAN_OFF_BASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.trim_end_matches('/').to_string())
            .unwrap_or(defaults.base_url);
        let user_agent = std::env::var("NUTRISCAN_USER_AGENT")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.user_agent);
        let timeout = std::env::var("NUTRISCAN_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        Self {
            base_url,
            user_agent,
            timeout,
        }
    }
}
