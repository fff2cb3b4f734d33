//! Planner configuration.
//!
//! ```toml
//! people = 4
//! days = 7
//! meals_per_day = 2
//! consume_on_suggestion = true
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, PlannerResult};

/// Longest plan horizon, in days.
pub const MAX_DAYS: u32 = 14;

/// Plan horizon and household settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Diners per meal.
    pub people: u32,
    /// Days in the plan.
    pub days: u32,
    /// Meal slots per day.
    pub meals_per_day: u32,
    /// Deduct stock for best-effort suggestions too (negative results clamp
    /// at zero). On by default.
    pub consume_on_suggestion: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            people: 4,
            days: 7,
            meals_per_day: 2,
            consume_on_suggestion: true,
        }
    }
}

impl PlannerConfig {
    /// Creates a config for a horizon.
    pub fn new(people: u32, days: u32, meals_per_day: u32) -> Self {
        Self {
            people,
            days,
            meals_per_day,
            ..Self::default()
        }
    }

    /// Sets whether suggestions deduct stock.
    pub fn with_consume_on_suggestion(mut self, consume: bool) -> Self {
        self.consume_on_suggestion = consume;
        self
    }

    /// Parses TOML. Missing keys take defaults.
    pub fn from_toml_str(text: &str) -> PlannerResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Total slots in the plan grid.
    pub fn total_slots(&self) -> usize {
        self.days as usize * self.meals_per_day as usize
    }

    /// Checks ranges: at least one person, `1..=14` days, at least one meal.
    pub fn validate(&self) -> PlannerResult<()> {
        if self.people == 0 {
            return Err(invalid("people must be at least 1"));
        }
        if self.days == 0 || self.days > MAX_DAYS {
            return Err(invalid(format!("days must be in 1..={MAX_DAYS}, got {}", self.days)));
        }
        if self.meals_per_day == 0 {
            return Err(invalid("meals_per_day must be at least 1"));
        }
        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> PlannerError {
    PlannerError::InvalidConfig {
        message: message.into(),
    }
}
