use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::aggregate::{fold, progress, remaining, NutrientProgress};
use crate::annotate::{annotate_for_profile, AnnotatedText};
use crate::config::GoalConfig;
use crate::error::EngineResult;
use crate::goals::compute_targets_with;
use crate::models::{DailyLog, HealthProfile, NutrientRecord, NutritionGoals};

/// Per-user state handed to the engine's pure functions.
///
/// Targets are cached on first derivation and only replaced through
/// [`SessionContext::recompute_targets`]. Persisting this value is the
/// caller's job; it round-trips through serde.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionContext {
    profile: HealthProfile,
    #[serde(default)]
    nutrition_goals: Option<NutritionGoals>,
    #[serde(default)]
    daily_log: DailyLog,
    log_date: NaiveDate,
    #[serde(skip)]
    config: GoalConfig,
}

impl SessionContext {
    /// Start a session for a freshly onboarded profile, deriving its targets.
    pub fn complete_onboarding(profile: HealthProfile, today: NaiveDate) -> EngineResult<Self> {
        Self::with_config(profile, today, GoalConfig::default())
    }

    pub fn with_config(
        profile: HealthProfile,
        today: NaiveDate,
        config: GoalConfig,
    ) -> EngineResult<Self> {
        let goals = compute_targets_with(&profile, &config)?;
        info!(calories = goals.macros.calories, "derived nutrition goals at onboarding");
        Ok(Self {
            profile,
            nutrition_goals: Some(goals),
            daily_log: DailyLog::zero(),
            log_date: today,
            config,
        })
    }

    /// Resume from stored parts; goals may be missing and are derived on demand.
    ///
    /// # Errors
    ///
    /// Returns `InvalidProfile` when the stored profile no longer passes validation.
    pub fn restore(
        profile: HealthProfile,
        nutrition_goals: Option<NutritionGoals>,
        daily_log: DailyLog,
        log_date: NaiveDate,
    ) -> EngineResult<Self> {
        profile.validate()?;
        Ok(Self {
            profile,
            nutrition_goals,
            daily_log,
            log_date,
            config: GoalConfig::default(),
        })
    }

    pub fn profile(&self) -> &HealthProfile {
        &self.profile
    }

    pub fn daily_log(&self) -> &DailyLog {
        &self.daily_log
    }

    pub fn log_date(&self) -> NaiveDate {
        self.log_date
    }

    pub fn cached_targets(&self) -> Option<&NutritionGoals> {
        self.nutrition_goals.as_ref()
    }

    /// Cached targets, derived from the profile only when absent.
    pub fn targets(&mut self) -> EngineResult<NutritionGoals> {
        if let Some(goals) = self.nutrition_goals {
            return Ok(goals);
        }
        let goals = compute_targets_with(&self.profile, &self.config)?;
        info!(calories = goals.macros.calories, "derived missing nutrition goals");
        self.nutrition_goals = Some(goals);
        Ok(goals)
    }

    /// Replace the profile. Cached targets are left as they are.
    pub fn edit_profile(&mut self, profile: HealthProfile) -> EngineResult<()> {
        profile.validate()?;
        self.profile = profile;
        Ok(())
    }

    /// Re-derive targets from the current profile, overwriting the cache.
    pub fn recompute_targets(&mut self) -> EngineResult<NutritionGoals> {
        let goals = compute_targets_with(&self.profile, &self.config)?;
        info!(calories = goals.macros.calories, "re-derived nutrition goals");
        self.nutrition_goals = Some(goals);
        Ok(goals)
    }

    /// Fold one completed scan into the day's log.
    pub fn record(&mut self, record: &NutrientRecord) -> &DailyLog {
        self.daily_log = fold(&self.daily_log, record);
        &self.daily_log
    }

    pub fn reset_log(&mut self) {
        self.daily_log = DailyLog::zero();
    }

    /// Start a fresh log when the calendar day has changed. Returns whether it did.
    pub fn roll_over(&mut self, today: NaiveDate) -> bool {
        if today == self.log_date {
            return false;
        }
        info!(from = %self.log_date, to = %today, "starting a new daily log");
        self.log_date = today;
        self.reset_log();
        true
    }

    pub fn progress(&mut self) -> EngineResult<Vec<NutrientProgress>> {
        let goals = self.targets()?;
        Ok(progress(&self.daily_log, &goals))
    }

    pub fn remaining(&mut self) -> EngineResult<NutrientRecord> {
        let goals = self.targets()?;
        Ok(remaining(&self.daily_log, &goals))
    }

    pub fn annotate_ingredients(&self, text: &str) -> EngineResult<AnnotatedText> {
        annotate_for_profile(text, &self.profile)
    }
}
