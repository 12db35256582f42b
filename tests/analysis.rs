use nutriscan_engine::analysis::{MealAnalysis, ProductAnalysis, WarningKind};
use nutriscan_engine::{fold, DailyLog, Nutrient, NutrientRecord};

mod common;

#[test]
fn meal_estimate_folds_into_log() {
    common::init_logging();
    let json = r#"{
        "mealName": "Grilled chicken salad",
        "estimatedCalories": 420,
        "macros": { "protein": 38, "carbohydrates": 12.5, "fat": 22 },
        "micronutrients": { "sodium": 640, "fiber": 6 },
        "ingredients": [
            { "name": "chicken breast", "estimatedWeightGrams": 150 },
            { "name": "olive oil" }
        ],
        "healthAnalysis": "High protein, moderate fat.",
        "portionAdvice": "Good portion for lunch.",
        "isRecommended": true,
        "personalizedWarnings": [],
        "alternativeSuggestions": []
    }"#;

    let meal: MealAnalysis = serde_json::from_str(json).unwrap();
    assert_eq!(meal.ingredients.len(), 2);
    assert_eq!(meal.ingredients[1].estimated_weight_grams, None);

    let record = meal.to_record();
    assert_eq!(record.get(Nutrient::Calories), Some(420.0));
    assert_eq!(record.get(Nutrient::Carbohydrates), Some(12.5));
    assert_eq!(record.get(Nutrient::Sodium), Some(640.0));
    assert_eq!(record.get(Nutrient::Sugar), None);
    assert_eq!(record.get(Nutrient::Cholesterol), None);

    let log = fold(&DailyLog::zero(), &record);
    assert_eq!(log.macros.protein, 38.0);
    assert_eq!(log.micros.sugar, 0.0);
}

#[test]
fn sparse_meal_estimate_is_tolerated() {
    let meal: MealAnalysis = serde_json::from_str(r#"{ "mealName": "Unknown dish" }"#).unwrap();
    assert!(!meal.is_recommended);
    assert!(meal.to_record().is_empty());
}

#[test]
fn negative_estimates_are_dropped() {
    let json = r#"{
        "mealName": "Confused estimate",
        "estimatedCalories": -300,
        "macros": { "protein": 20, "fat": -4 }
    }"#;
    let meal: MealAnalysis = serde_json::from_str(json).unwrap();
    let record = meal.to_record();
    assert_eq!(record.get(Nutrient::Calories), None);
    assert_eq!(record.get(Nutrient::Fat), None);
    assert_eq!(record.get(Nutrient::Protein), Some(20.0));

    let dinner = NutrientRecord::default().with(Nutrient::Calories, 500.0);
    let start = fold(&DailyLog::zero(), &dinner);
    let log = fold(&start, &record);
    assert_eq!(log.macros.calories, 500.0);
}

#[test]
fn product_warnings_accept_either_trigger_key() {
    let json = r#"{
        "warnings": [
            { "type": "allergen", "triggerIngredient": "Peanuts", "message": "Contains peanuts." },
            { "type": "health_condition", "trigger": "High Sugar", "message": "Too much sugar." }
        ],
        "alternativeSuggestions": ["Unsweetened almond butter"]
    }"#;

    let analysis: ProductAnalysis = serde_json::from_str(json).unwrap();
    assert!(analysis.has_advice());
    assert_eq!(analysis.warnings[0].kind, WarningKind::Allergen);
    assert_eq!(analysis.warnings[0].trigger, "Peanuts");
    assert_eq!(analysis.warnings[1].kind, WarningKind::HealthCondition);

    assert!(!ProductAnalysis::default().has_advice());
}
