//! Personalization and aggregation engine for a nutrition-tracking assistant.
//!
//! Derives daily targets from a [`HealthProfile`], scales product facts and
//! AI meal estimates into [`NutrientRecord`]s, folds them into a [`DailyLog`],
//! and annotates ingredient text with allergen and condition flags.

pub mod aggregate;
pub mod analysis;
pub mod annotate;
pub mod client;
pub mod config;
pub mod error;
pub mod goals;
pub mod models;
pub mod serving;
pub mod session;
pub mod units;

pub use aggregate::{fold, progress, remaining, NutrientProgress};
pub use annotate::{annotate, AnnotatedSpan, AnnotatedText, ConditionFlags, SpanKind};
pub use error::{EngineError, EngineResult};
pub use goals::{compute_targets, compute_targets_with};
pub use models::{DailyLog, HealthProfile, NutrientRecord, Nutriments, NutritionGoals};
pub use serving::scale;
pub use session::SessionContext;
pub use units::{Nutrient, NutrientUnit};
