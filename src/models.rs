use serde::{Deserialize, Serialize};

use crate::annotate::parse_allergen_list;
use crate::error::EngineResult;
use crate::units::Nutrient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    VeryActive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DietPreference {
    #[default]
    None,
    Vegetarian,
    NonVegetarian,
    Vegan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessGoal {
    LoseWeight,
    #[default]
    MaintainWeight,
    GainMuscle,
}

/// The user's health profile, captured at onboarding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthProfile {
    pub gender: Gender,
    /// Age in years
    pub age: u32,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub activity_level: ActivityLevel,
    #[serde(default)]
    pub is_diabetic: bool,
    #[serde(default, rename = "hasHighBP")]
    pub has_high_bp: bool,
    #[serde(default)]
    pub has_high_cholesterol: bool,
    #[serde(default, rename = "hasPCOS")]
    pub has_pcos: bool,
    #[serde(default)]
    pub has_thyroid_issues: bool,
    /// Only meaningful for `Gender::Female`
    #[serde(default)]
    pub is_pregnant: bool,
    /// Only meaningful for `Gender::Female`
    #[serde(default)]
    pub is_breastfeeding: bool,
    #[serde(default)]
    pub diet_preference: DietPreference,
    #[serde(default)]
    pub fitness_goal: FitnessGoal,
    /// Comma-separated allergen terms as typed by the user
    #[serde(default)]
    pub allergies: String,
}

impl HealthProfile {
    /// Check the invariants goal derivation relies on.
    pub fn validate(&self) -> EngineResult<()> {
        crate::goals::validate_profile(self)
    }

    /// Human-readable names of the active health conditions, in a fixed order.
    pub fn condition_labels(&self) -> Vec<&'static str> {
        [
            (self.is_diabetic, "Diabetes"),
            (self.has_high_bp, "High Blood Pressure"),
            (self.has_high_cholesterol, "High Cholesterol"),
            (self.has_pcos, "PCOS"),
            (self.has_thyroid_issues, "Thyroid Issues"),
            (self.is_pregnant, "Pregnancy"),
            (self.is_breastfeeding, "Breastfeeding"),
        ]
        .into_iter()
        .filter_map(|(active, label)| active.then_some(label))
        .collect()
    }

    /// The allergy list split into normalised terms.
    pub fn allergen_terms(&self) -> EngineResult<Vec<String>> {
        parse_allergen_list(&self.allergies)
    }
}

/// Calorie and macronutrient amounts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Macros {
    /// kcal
    pub calories: f64,
    /// g
    pub carbohydrates: f64,
    /// g
    pub protein: f64,
    /// g
    pub fat: f64,
}

/// Micronutrient amounts, each in the unit reported by [`Nutrient::unit`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Micros {
    pub saturated_fat: f64,
    pub polyunsaturated_fat: f64,
    pub monounsaturated_fat: f64,
    pub trans_fat: f64,
    pub cholesterol: f64,
    pub sodium: f64,
    pub potassium: f64,
    pub fiber: f64,
    pub sugar: f64,
    pub vitamin_a: f64,
    pub vitamin_c: f64,
    pub calcium: f64,
    pub iron: f64,
}

fn amount(macros: &Macros, micros: &Micros, nutrient: Nutrient) -> f64 {
    match nutrient {
        Nutrient::Calories => macros.calories,
        Nutrient::Carbohydrates => macros.carbohydrates,
        Nutrient::Protein => macros.protein,
        Nutrient::Fat => macros.fat,
        Nutrient::SaturatedFat => micros.saturated_fat,
        Nutrient::PolyunsaturatedFat => micros.polyunsaturated_fat,
        Nutrient::MonounsaturatedFat => micros.monounsaturated_fat,
        Nutrient::TransFat => micros.trans_fat,
        Nutrient::Cholesterol => micros.cholesterol,
        Nutrient::Sodium => micros.sodium,
        Nutrient::Potassium => micros.potassium,
        Nutrient::Fiber => micros.fiber,
        Nutrient::Sugar => micros.sugar,
        Nutrient::VitaminA => micros.vitamin_a,
        Nutrient::VitaminC => micros.vitamin_c,
        Nutrient::Calcium => micros.calcium,
        Nutrient::Iron => micros.iron,
    }
}

fn amount_mut<'a>(
    macros: &'a mut Macros,
    micros: &'a mut Micros,
    nutrient: Nutrient,
) -> &'a mut f64 {
    match nutrient {
        Nutrient::Calories => &mut macros.calories,
        Nutrient::Carbohydrates => &mut macros.carbohydrates,
        Nutrient::Protein => &mut macros.protein,
        Nutrient::Fat => &mut macros.fat,
        Nutrient::SaturatedFat => &mut micros.saturated_fat,
        Nutrient::PolyunsaturatedFat => &mut micros.polyunsaturated_fat,
        Nutrient::MonounsaturatedFat => &mut micros.monounsaturated_fat,
        Nutrient::TransFat => &mut micros.trans_fat,
        Nutrient::Cholesterol => &mut micros.cholesterol,
        Nutrient::Sodium => &mut micros.sodium,
        Nutrient::Potassium => &mut micros.potassium,
        Nutrient::Fiber => &mut micros.fiber,
        Nutrient::Sugar => &mut micros.sugar,
        Nutrient::VitaminA => &mut micros.vitamin_a,
        Nutrient::VitaminC => &mut micros.vitamin_c,
        Nutrient::Calcium => &mut micros.calcium,
        Nutrient::Iron => &mut micros.iron,
    }
}

/// Daily targets derived from a [`HealthProfile`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutritionGoals {
    pub macros: Macros,
    pub micros: Micros,
}

impl NutritionGoals {
    pub fn get(&self, nutrient: Nutrient) -> f64 {
        amount(&self.macros, &self.micros, nutrient)
    }
}

/// Cumulative consumption for the current day.
///
/// Only grows through folds; starts and resets at all-zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyLog {
    pub macros: Macros,
    pub micros: Micros,
}

impl DailyLog {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn get(&self, nutrient: Nutrient) -> f64 {
        amount(&self.macros, &self.micros, nutrient)
    }

    pub(crate) fn get_mut(&mut self, nutrient: Nutrient) -> &mut f64 {
        amount_mut(&mut self.macros, &mut self.micros, nutrient)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialMacros {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbohydrates: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialMicros {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saturated_fat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polyunsaturated_fat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monounsaturated_fat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trans_fat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cholesterol: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sodium: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub potassium: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiber: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sugar: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vitamin_a: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vitamin_c: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calcium: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iron: Option<f64>,
}

/// Nutrients produced by one scan or analysis event.
///
/// Absent fields are unknown rather than zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientRecord {
    #[serde(default)]
    pub macros: PartialMacros,
    #[serde(default)]
    pub micros: PartialMicros,
}

impl NutrientRecord {
    fn slot(&mut self, nutrient: Nutrient) -> &mut Option<f64> {
        let (m, u) = (&mut self.macros, &mut self.micros);
        match nutrient {
            Nutrient::Calories => &mut m.calories,
            Nutrient::Carbohydrates => &mut m.carbohydrates,
            Nutrient::Protein => &mut m.protein,
            Nutrient::Fat => &mut m.fat,
            Nutrient::SaturatedFat => &mut u.saturated_fat,
            Nutrient::PolyunsaturatedFat => &mut u.polyunsaturated_fat,
            Nutrient::MonounsaturatedFat => &mut u.monounsaturated_fat,
            Nutrient::TransFat => &mut u.trans_fat,
            Nutrient::Cholesterol => &mut u.cholesterol,
            Nutrient::Sodium => &mut u.sodium,
            Nutrient::Potassium => &mut u.potassium,
            Nutrient::Fiber => &mut u.fiber,
            Nutrient::Sugar => &mut u.sugar,
            Nutrient::VitaminA => &mut u.vitamin_a,
            Nutrient::VitaminC => &mut u.vitamin_c,
            Nutrient::Calcium => &mut u.calcium,
            Nutrient::Iron => &mut u.iron,
        }
    }

    pub fn get(&self, nutrient: Nutrient) -> Option<f64> {
        let (m, u) = (&self.macros, &self.micros);
        match nutrient {
            Nutrient::Calories => m.calories,
            Nutrient::Carbohydrates => m.carbohydrates,
            Nutrient::Protein => m.protein,
            Nutrient::Fat => m.fat,
            Nutrient::SaturatedFat => u.saturated_fat,
            Nutrient::PolyunsaturatedFat => u.polyunsaturated_fat,
            Nutrient::MonounsaturatedFat => u.monounsaturated_fat,
            Nutrient::TransFat => u.trans_fat,
            Nutrient::Cholesterol => u.cholesterol,
            Nutrient::Sodium => u.sodium,
            Nutrient::Potassium => u.potassium,
            Nutrient::Fiber => u.fiber,
            Nutrient::Sugar => u.sugar,
            Nutrient::VitaminA => u.vitamin_a,
            Nutrient::VitaminC => u.vitamin_c,
            Nutrient::Calcium => u.calcium,
            Nutrient::Iron => u.iron,
        }
    }

    pub fn set(&mut self, nutrient: Nutrient, value: f64) {
        *self.slot(nutrient) = Some(value);
    }

    pub fn with(mut self, nutrient: Nutrient, value: f64) -> Self {
        self.set(nutrient, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        Nutrient::ALL.iter().all(|n| self.get(*n).is_none())
    }
}

/// Per-100g nutrient facts as reported by the product database.
///
/// Every mass is in grams, including cholesterol, sodium and potassium.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutriments {
    #[serde(rename = "energy-kcal_100g", default, skip_serializing_if = "Option::is_none")]
    pub energy_kcal: Option<f64>,
    #[serde(rename = "fat_100g", default, skip_serializing_if = "Option::is_none")]
    pub fat: Option<f64>,
    #[serde(rename = "saturated-fat_100g", default, skip_serializing_if = "Option::is_none")]
    pub saturated_fat: Option<f64>,
    #[serde(rename = "polyunsaturated-fat_100g", default, skip_serializing_if = "Option::is_none")]
    pub polyunsaturated_fat: Option<f64>,
    #[serde(rename = "monounsaturated-fat_100g", default, skip_serializing_if = "Option::is_none")]
    pub monounsaturated_fat: Option<f64>,
    #[serde(rename = "trans-fat_100g", default, skip_serializing_if = "Option::is_none")]
    pub trans_fat: Option<f64>,
    #[serde(rename = "cholesterol_100g", default, skip_serializing_if = "Option::is_none")]
    pub cholesterol: Option<f64>,
    #[serde(rename = "carbohydrates_100g", default, skip_serializing_if = "Option::is_none")]
    pub carbohydrates: Option<f64>,
    #[serde(rename = "sugars_100g", default, skip_serializing_if = "Option::is_none")]
    pub sugars: Option<f64>,
    #[serde(rename = "fiber_100g", default, skip_serializing_if = "Option::is_none")]
    pub fiber: Option<f64>,
    #[serde(rename = "proteins_100g", default, skip_serializing_if = "Option::is_none")]
    pub proteins: Option<f64>,
    #[serde(rename = "salt_100g", default, skip_serializing_if = "Option::is_none")]
    pub salt: Option<f64>,
    #[serde(rename = "sodium_100g", default, skip_serializing_if = "Option::is_none")]
    pub sodium: Option<f64>,
    #[serde(rename = "potassium_100g", default, skip_serializing_if = "Option::is_none")]
    pub potassium: Option<f64>,
}

/// A product returned by a barcode lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub image_front_url: Option<String>,
    #[serde(default)]
    pub nutriments: Option<Nutriments>,
    #[serde(default)]
    pub nutriscore_grade: Option<String>,
    /// Free text, e.g. "30 g" or "1 biscuit (12.5 g)"
    #[serde(default)]
    pub serving_size: Option<String>,
    #[serde(default)]
    pub ingredients_text: Option<String>,
    #[serde(default)]
    pub allergens_from_ingredients: Option<String>,
}
