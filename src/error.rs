//! Error types for meal planning.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors returned by planning operations.
///
/// Infeasible slots and unconvertible units are not errors: they are
/// ordinary outcomes carried in the plan (`is_feasible = false`) or as
/// `None` from the converter.
#[derive(Debug, Error)]
pub enum PlannerError {
    /// Scheduling was requested with zero recipes.
    #[error("recipe catalog is empty; add at least one recipe before planning")]
    EmptyCatalog,

    /// Planner configuration is out of range.
    #[error("invalid planner configuration: {message}")]
    InvalidConfig { message: String },

    /// One or more recipes failed validation.
    #[error("invalid recipes: {}", summarize(.0))]
    InvalidRecipes(Vec<ValidationError>),

    /// A density entry was not a finite positive number.
    #[error("invalid density {density} for ingredient '{name}'")]
    InvalidDensity { name: String, density: f64 },

    /// A plan coordinate outside the plan grid.
    #[error("slot (day {day}, meal {meal}) is outside the plan")]
    SlotOutOfRange { day: usize, meal: usize },

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("config parse failed: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type for planning operations.
pub type PlannerResult<T> = std::result::Result<T, PlannerError>;
