//! Shapes exchanged with the AI analysis service.
//!
//! The service itself lives outside this crate; only its structured output is
//! consumed here, with missing fields treated as absent.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::{HealthProfile, NutrientRecord, Product};
use crate::units::Nutrient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    Allergen,
    HealthCondition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warning {
    #[serde(rename = "type")]
    pub kind: WarningKind,
    /// Ingredient or reason, e.g. "Peanuts" or "High Sugar"
    #[serde(alias = "triggerIngredient")]
    pub trigger: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimatedMacros {
    #[serde(default)]
    pub protein: Option<f64>,
    #[serde(default)]
    pub carbohydrates: Option<f64>,
    #[serde(default)]
    pub fat: Option<f64>,
}

/// Micronutrient estimates; sodium, potassium and cholesterol in mg.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimatedMicros {
    #[serde(default)]
    pub saturated_fat: Option<f64>,
    #[serde(default)]
    pub cholesterol: Option<f64>,
    #[serde(default)]
    pub sodium: Option<f64>,
    #[serde(default)]
    pub potassium: Option<f64>,
    #[serde(default)]
    pub fiber: Option<f64>,
    #[serde(default)]
    pub sugar: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifiedIngredient {
    pub name: String,
    #[serde(default)]
    pub estimated_weight_grams: Option<f64>,
}

/// Result of analysing a meal photo.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MealAnalysis {
    pub meal_name: String,
    pub estimated_calories: Option<f64>,
    pub macros: EstimatedMacros,
    pub micronutrients: EstimatedMicros,
    pub ingredients: Vec<IdentifiedIngredient>,
    pub health_analysis: String,
    pub portion_advice: String,
    pub is_recommended: bool,
    pub personalized_warnings: Vec<Warning>,
    pub alternative_suggestions: Vec<String>,
}

impl MealAnalysis {
    /// The estimate as a record ready to fold into the daily log.
    ///
    /// Negative and non-finite estimates are dropped.
    pub fn to_record(&self) -> NutrientRecord {
        let micros = &self.micronutrients;
        let fields = [
            (Nutrient::Calories, self.estimated_calories),
            (Nutrient::Protein, self.macros.protein),
            (Nutrient::Carbohydrates, self.macros.carbohydrates),
            (Nutrient::Fat, self.macros.fat),
            (Nutrient::SaturatedFat, micros.saturated_fat),
            (Nutrient::Cholesterol, micros.cholesterol),
            (Nutrient::Sodium, micros.sodium),
            (Nutrient::Potassium, micros.potassium),
            (Nutrient::Fiber, micros.fiber),
            (Nutrient::Sugar, micros.sugar),
        ];

        let mut record = NutrientRecord::default();
        for (nutrient, value) in fields {
            if let Some(value) = value.filter(|v| v.is_finite() && *v >= 0.0) {
                record.set(nutrient, value);
            }
        }
        record
    }
}

/// Personalised advice for a scanned product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductAnalysis {
    pub warnings: Vec<Warning>,
    pub alternative_suggestions: Vec<String>,
}

impl ProductAnalysis {
    pub fn has_advice(&self) -> bool {
        !self.warnings.is_empty() || !self.alternative_suggestions.is_empty()
    }
}

/// The external AI analysis service.
#[async_trait]
pub trait NutritionAnalyzer: Send + Sync {
    /// Analyse a base64-encoded meal photo for the given profile.
    async fn analyze_meal(
        &self,
        image_base64: &str,
        profile: &HealthProfile,
    ) -> anyhow::Result<MealAnalysis>;

    async fn analyze_product(
        &self,
        product: &Product,
        profile: &HealthProfile,
    ) -> anyhow::Result<ProductAnalysis>;
}
