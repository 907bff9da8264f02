//! Error types for the decision aid
//!
//! Provides a unified error type and the validation taxonomy used by the core

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using AidError
pub type Result<T> = std::result::Result<T, AidError>;

/// Unified error type for decision aid operations
#[derive(Debug, Error)]
pub enum AidError {
    // Validation errors (the only kind the core computations raise)
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    // IO errors while loading data files or writing reports
    #[error("IO error: {0}")]
    Io(String),

    // Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AidError {
    /// Borrow the validation error, if this is one
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            AidError::Validation(err) => Some(err),
            _ => None,
        }
    }
}

/// Input validation errors
///
/// Always recoverable by the caller: correct the input and retry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Please provide: {}", describe_issues(.0))]
    InvalidScenario(Vec<FieldIssue>),

    #[error("Unrecognized experiment: {0}")]
    UnknownExperiment(String),

    #[error("Unrecognized QALY scenario: {0} (expected low, moderate or high)")]
    UnknownQalyScenario(String),

    #[error("Uptake probability {0} is outside [0, 100]")]
    ProbabilityOutOfRange(f64),

    /// `exp` under- or overflowed, e.g. an enormous cost with unbounded costs
    #[error("Predicted uptake {0} is not strictly between 0 and 100; the scenario's values are too extreme")]
    ProbabilityDegenerate(f64),

    #[error("Please calculate uptake probability before saving the scenario")]
    ProbabilityNotComputed,

    #[error("Scenario has already been saved; change an input and recalculate first")]
    AlreadySaved,

    #[error("No saved scenarios to export")]
    NoSavedScenarios,
}

impl ValidationError {
    /// Issues reported for an invalid scenario (empty for other variants)
    pub fn issues(&self) -> &[FieldIssue] {
        match self {
            ValidationError::InvalidScenario(issues) => issues,
            _ => &[],
        }
    }
}

fn describe_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Scenario form fields, named as shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioField {
    Experiment,
    EfficacySelf,
    RiskSelf,
    CostSelf,
    EfficacyOthers,
    RiskOthers,
    CostOthers,
}

impl ScenarioField {
    pub fn label(&self) -> &'static str {
        match self {
            ScenarioField::Experiment => "Experiment",
            ScenarioField::EfficacySelf => "Efficacy (Self)",
            ScenarioField::RiskSelf => "Risk (Self)",
            ScenarioField::CostSelf => "Cost (Self)",
            ScenarioField::EfficacyOthers => "Efficacy (Others)",
            ScenarioField::RiskOthers => "Risk (Others)",
            ScenarioField::CostOthers => "Cost (Others)",
        }
    }
}

impl std::fmt::Display for ScenarioField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// What is wrong with a single field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum FieldProblem {
    /// Field was absent or blank
    Missing,
    /// Cost did not parse as an integer
    NotAnInteger { raw: String },
    /// Cost parsed but falls outside the configured bounds
    OutOfRange { value: i64, min: u32, max: Option<u32> },
    /// Level is not one of the attribute's levels
    UnknownLevel { raw: String },
}

/// One field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIssue {
    pub field: ScenarioField,
    pub problem: FieldProblem,
}

impl FieldIssue {
    pub fn new(field: ScenarioField, problem: FieldProblem) -> Self {
        Self { field, problem }
    }

    pub fn missing(field: ScenarioField) -> Self {
        Self::new(field, FieldProblem::Missing)
    }
}

impl std::fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.problem {
            FieldProblem::Missing => write!(f, "{}", self.field),
            FieldProblem::NotAnInteger { raw } => {
                write!(f, "{} (\"{}\" is not a whole number)", self.field, raw)
            }
            FieldProblem::OutOfRange { value, min, max } => match max {
                Some(max) => write!(f, "{} ({} not in {}..={})", self.field, value, min, max),
                None => write!(f, "{} ({} below {})", self.field, value, min),
            },
            FieldProblem::UnknownLevel { raw } => {
                write!(f, "{} (unknown level \"{}\")", self.field, raw)
            }
        }
    }
}

// Implement From for common external error types
impl From<serde_json::Error> for AidError {
    fn from(err: serde_json::Error) -> Self {
        AidError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for AidError {
    fn from(err: std::io::Error) -> Self {
        AidError::Io(err.to_string())
    }
}

impl From<anyhow::Error> for AidError {
    fn from(err: anyhow::Error) -> Self {
        AidError::Internal(err.to_string())
    }
}
