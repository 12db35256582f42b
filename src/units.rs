use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Unit a nutrient quantity is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NutrientUnit {
    Kcal,
    Gram,
    Milligram,
    Microgram,
}

impl NutrientUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            NutrientUnit::Kcal => "kcal",
            NutrientUnit::Gram => "g",
            NutrientUnit::Milligram => "mg",
            NutrientUnit::Microgram => "mcg",
        }
    }

    /// Micrograms per one of this unit. Energy has no mass basis.
    fn micrograms(self) -> Option<f64> {
        match self {
            NutrientUnit::Kcal => None,
            NutrientUnit::Gram => Some(1_000_000.0),
            NutrientUnit::Milligram => Some(1_000.0),
            NutrientUnit::Microgram => Some(1.0),
        }
    }

    /// Convert `value` from `self` into `to`.
    ///
    /// Mass units convert freely between each other; kcal only converts to itself.
    pub fn convert(self, value: f64, to: NutrientUnit) -> EngineResult<f64> {
        if self == to {
            return Ok(value);
        }
        match (self.micrograms(), to.micrograms()) {
            (Some(from), Some(target)) => Ok(value * from / target),
            _ => Err(EngineError::invalid_serving(format!(
                "cannot convert {} to {}",
                self.symbol(),
                to.symbol()
            ))),
        }
    }
}

/// Multiply a quantity stored against some basis (per 100 g, per serving) by a factor.
pub fn scale_amount(value: f64, factor: f64) -> f64 {
    value * factor
}

/// Every nutrient tracked against the daily targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Nutrient {
    Calories,
    Carbohydrates,
    Protein,
    Fat,
    SaturatedFat,
    PolyunsaturatedFat,
    MonounsaturatedFat,
    TransFat,
    Cholesterol,
    Sodium,
    Potassium,
    Fiber,
    Sugar,
    VitaminA,
    VitaminC,
    Calcium,
    Iron,
}

impl Nutrient {
    pub const MACROS: [Nutrient; 4] = [
        Nutrient::Calories,
        Nutrient::Carbohydrates,
        Nutrient::Protein,
        Nutrient::Fat,
    ];

    pub const MICROS: [Nutrient; 13] = [
        Nutrient::SaturatedFat,
        Nutrient::PolyunsaturatedFat,
        Nutrient::MonounsaturatedFat,
        Nutrient::TransFat,
        Nutrient::Cholesterol,
        Nutrient::Sodium,
        Nutrient::Potassium,
        Nutrient::Fiber,
        Nutrient::Sugar,
        Nutrient::VitaminA,
        Nutrient::VitaminC,
        Nutrient::Calcium,
        Nutrient::Iron,
    ];

    pub const ALL: [Nutrient; 17] = [
        Nutrient::Calories,
        Nutrient::Carbohydrates,
        Nutrient::Protein,
        Nutrient::Fat,
        Nutrient::SaturatedFat,
        Nutrient::PolyunsaturatedFat,
        Nutrient::MonounsaturatedFat,
        Nutrient::TransFat,
        Nutrient::Cholesterol,
        Nutrient::Sodium,
        Nutrient::Potassium,
        Nutrient::Fiber,
        Nutrient::Sugar,
        Nutrient::VitaminA,
        Nutrient::VitaminC,
        Nutrient::Calcium,
        Nutrient::Iron,
    ];

    /// Unit used by the targets and the daily log.
    pub fn unit(self) -> NutrientUnit {
        match self {
            Nutrient::Calories => NutrientUnit::Kcal,
            Nutrient::Cholesterol
            | Nutrient::Sodium
            | Nutrient::Potassium
            | Nutrient::VitaminC
            | Nutrient::Calcium
            | Nutrient::Iron => NutrientUnit::Milligram,
            Nutrient::VitaminA => NutrientUnit::Microgram,
            _ => NutrientUnit::Gram,
        }
    }

    pub fn is_macro(self) -> bool {
        Self::MACROS.contains(&self)
    }

    pub fn label(self) -> &'static str {
        match self {
            Nutrient::Calories => "Calories",
            Nutrient::Carbohydrates => "Carbohydrates",
            Nutrient::Protein => "Protein",
            Nutrient::Fat => "Fat",
            Nutrient::SaturatedFat => "Saturated Fat",
            Nutrient::PolyunsaturatedFat => "Polyunsaturated Fat",
            Nutrient::MonounsaturatedFat => "Monounsaturated Fat",
            Nutrient::TransFat => "Trans Fat",
            Nutrient::Cholesterol => "Cholesterol",
            Nutrient::Sodium => "Sodium",
            Nutrient::Potassium => "Potassium",
            Nutrient::Fiber => "Fiber",
            Nutrient::Sugar => "Sugar",
            Nutrient::VitaminA => "Vitamin A",
            Nutrient::VitaminC => "Vitamin C",
            Nutrient::Calcium => "Calcium",
            Nutrient::Iron => "Iron",
        }
    }
}
