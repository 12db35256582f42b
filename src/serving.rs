use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{NutrientRecord, Nutriments, Product};
use crate::units::{scale_amount, Nutrient, NutrientUnit};

/// Serving assumed when a product does not state a parsable one.
pub const DEFAULT_SERVING_GRAMS: f64 = 100.0;

/// Salt to sodium mass ratio used by the product database.
const SALT_PER_SODIUM: f64 = 2.5;

/// First quantity with a mass or volume unit, e.g. "30 g", "12,5g", "250 ml".
static SERVING_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:[.,]\d+)?)\s*(kg|mg|g|gr|grams?|ml|cl|l)\b").ok()
});

/// Multiplier applied to per-100g facts for `servings` servings of `serving_grams`.
///
/// # Errors
///
/// Returns `InvalidServingInput` when the serving weight is not a positive
/// finite number or the serving count is negative or not finite.
pub fn serving_multiplier(serving_grams: f64, servings: f64) -> EngineResult<f64> {
    if !serving_grams.is_finite() || serving_grams <= 0.0 {
        return Err(EngineError::invalid_serving(format!(
            "serving size must be a positive number of grams, got {serving_grams}"
        )));
    }
    if !servings.is_finite() || servings < 0.0 {
        return Err(EngineError::invalid_serving(format!(
            "serving count must be zero or more, got {servings}"
        )));
    }
    Ok(serving_grams * servings / 100.0)
}

/// Per-100g source fields paired with the nutrient they feed.
fn per_100g_fields(per100g: &Nutriments) -> [(Nutrient, Option<f64>); 13] {
    let sodium = per100g
        .sodium
        .or_else(|| per100g.salt.map(|salt| salt / SALT_PER_SODIUM));
    [
        (Nutrient::Calories, per100g.energy_kcal),
        (Nutrient::Fat, per100g.fat),
        (Nutrient::SaturatedFat, per100g.saturated_fat),
        (Nutrient::PolyunsaturatedFat, per100g.polyunsaturated_fat),
        (Nutrient::MonounsaturatedFat, per100g.monounsaturated_fat),
        (Nutrient::TransFat, per100g.trans_fat),
        (Nutrient::Cholesterol, per100g.cholesterol),
        (Nutrient::Carbohydrates, per100g.carbohydrates),
        (Nutrient::Sugar, per100g.sugars),
        (Nutrient::Fiber, per100g.fiber),
        (Nutrient::Protein, per100g.proteins),
        (Nutrient::Sodium, sodium),
        (Nutrient::Potassium, per100g.potassium),
    ]
}

/// Scale per-100g facts to the amount actually eaten.
///
/// The product database reports every mass in grams, so cholesterol, sodium
/// and potassium are converted to milligrams on the way through.
///
/// # Errors
///
/// Returns `InvalidServingInput` for a bad serving weight or count, or for a
/// negative or non-finite per-100g fact.
pub fn scale(
    per100g: &Nutriments,
    serving_grams: f64,
    servings: f64,
) -> EngineResult<NutrientRecord> {
    let multiplier = serving_multiplier(serving_grams, servings)?;
    let mut record = NutrientRecord::default();

    for (nutrient, value) in per_100g_fields(per100g) {
        let Some(value) = value else { continue };
        if !value.is_finite() || value < 0.0 {
            return Err(EngineError::invalid_serving(format!(
                "{} per 100 g must be zero or more, got {value}",
                nutrient.label()
            )));
        }
        let source_unit = if nutrient == Nutrient::Calories {
            NutrientUnit::Kcal
        } else {
            NutrientUnit::Gram
        };
        let amount = source_unit.convert(scale_amount(value, multiplier), nutrient.unit())?;
        record.set(nutrient, amount);
    }

    debug!(serving_grams, servings, multiplier, "scaled per-100g facts");
    Ok(record)
}

/// Grams in a free-text serving size such as "1 biscuit (12.5 g)".
///
/// Volumes are read as grams at water density. Returns `None` when no
/// quantity with a recognised unit is present.
pub fn parse_serving_grams(serving_size: &str) -> Option<f64> {
    let pattern = SERVING_PATTERN.as_ref()?;
    let caps = pattern.captures(serving_size)?;
    let amount: f64 = caps.get(1)?.as_str().replace(',', ".").parse().ok()?;
    let factor = match caps.get(2)?.as_str().to_lowercase().as_str() {
        "kg" | "l" => 1000.0,
        "cl" => 10.0,
        "mg" => 0.001,
        _ => 1.0,
    };
    let grams = amount * factor;
    (grams > 0.0).then_some(grams)
}

/// Scale a looked-up product by its own serving size.
///
/// Falls back to [`DEFAULT_SERVING_GRAMS`] when the serving size is missing or
/// unparsable, and returns `Ok(None)` when the product carries no nutrient facts.
pub fn scale_product(product: &Product, servings: f64) -> EngineResult<Option<NutrientRecord>> {
    let Some(nutriments) = product.nutriments.as_ref() else {
        return Ok(None);
    };
    let serving_grams = product
        .serving_size
        .as_deref()
        .and_then(parse_serving_grams)
        .unwrap_or(DEFAULT_SERVING_GRAMS);
    scale(nutriments, serving_grams, servings).map(Some)
}
