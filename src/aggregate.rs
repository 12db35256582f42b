//! Folding nutrient records into the daily log and comparing it to targets.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::{DailyLog, NutrientRecord, NutritionGoals};
use crate::units::{Nutrient, NutrientUnit};

/// Add every present field of `record` onto `current`, returning a new log.
///
/// Absent fields leave the running total untouched. Negative or non-finite
/// amounts are skipped with a warning, so the log never decreases. Callers
/// must fold each record exactly once; there is no deduplication here.
pub fn fold(current: &DailyLog, record: &NutrientRecord) -> DailyLog {
    let mut next = *current;
    for nutrient in Nutrient::ALL {
        let Some(amount) = record.get(nutrient) else {
            continue;
        };
        if !amount.is_finite() || amount < 0.0 {
            warn!(?nutrient, amount, "skipping invalid amount in nutrient record");
            continue;
        }
        *next.get_mut(nutrient) += amount;
    }
    debug!(calories = next.macros.calories, "folded nutrient record");
    next
}

impl DailyLog {
    pub fn fold(&self, record: &NutrientRecord) -> DailyLog {
        fold(self, record)
    }

    /// Fold records in iteration order starting from `self`.
    pub fn fold_all<'a, I>(&self, records: I) -> DailyLog
    where
        I: IntoIterator<Item = &'a NutrientRecord>,
    {
        records
            .into_iter()
            .fold(*self, |log, record| fold(&log, record))
    }
}

/// Consumption of one nutrient measured against its target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutrientProgress {
    pub nutrient: Nutrient,
    pub consumed: f64,
    pub goal: f64,
    pub unit: NutrientUnit,
    /// `consumed / goal` as a percentage, capped at 100; 0 when the goal is not positive
    pub percent: f64,
}

impl NutrientProgress {
    pub fn exceeded(&self) -> bool {
        self.goal > 0.0 && self.consumed > self.goal
    }
}

pub fn progress(log: &DailyLog, goals: &NutritionGoals) -> Vec<NutrientProgress> {
    Nutrient::ALL
        .iter()
        .map(|&nutrient| {
            let consumed = log.get(nutrient);
            let goal = goals.get(nutrient);
            let percent = if goal > 0.0 {
                (consumed / goal * 100.0).min(100.0)
            } else {
                0.0
            };
            NutrientProgress {
                nutrient,
                consumed,
                goal,
                unit: nutrient.unit(),
                percent,
            }
        })
        .collect()
}

/// What is left of each target for the day, never below zero.
pub fn remaining(log: &DailyLog, goals: &NutritionGoals) -> NutrientRecord {
    let mut left = NutrientRecord::default();
    for nutrient in Nutrient::ALL {
        left.set(nutrient, (goals.get(nutrient) - log.get(nutrient)).max(0.0));
    }
    left
}
