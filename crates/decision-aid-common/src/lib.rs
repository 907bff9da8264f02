//! # Decision Aid Common
//!
//! Shared types and errors for the T2DM equity-efficiency decision aid.
//!
//! ## Core Types
//!
//! - [`ExperimentId`]: which of the three discrete-choice experiments applies
//! - [`EfficacyLevel`]/[`RiskLevel`]: attribute levels, with 0% as reference
//! - [`Scenario`]: a validated plan configuration ([`ScenarioInput`] is the raw form)
//! - [`CoefficientSet`]: mixed-logit coefficients for one experiment
//! - [`WtpRecord`]: willingness-to-pay row derived from a coefficient set
//! - [`CostBenefitResult`]: cost, QALY and net benefit for an uptake level
//!
//! ## Errors
//!
//! - [`ValidationError`]: the only error the core produces
//! - [`AidError`]: unified error wrapping validation plus config/IO failures

pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{AidError, FieldIssue, FieldProblem, Result, ScenarioField, ValidationError};
pub use types::{
    coefficients::{
        CoefficientSet, CoefficientTable, ConstantKind, EfficacyCoefficients,
        OthersCoefficients, RiskCoefficients,
    },
    cost_benefit::{
        CostBehavior, CostBenefitResult, CostComponent, InterpretationTier, QalyScenario,
    },
    levels::{EfficacyLevel, ExperimentId, RiskLevel},
    scenario::{
        CostBounds, OthersAttributes, SavedScenario, Scenario, ScenarioInput, NOT_APPLICABLE,
    },
    wtp::{AttributeKey, Perspective, WtpRecord, WtpReference},
};

/// Decision aid version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Lowest monthly cost accepted by default (USD)
pub const DEFAULT_MIN_COST: u32 = 0;

/// Highest monthly cost accepted by default (USD)
pub const DEFAULT_MAX_COST: u32 = 1000;

/// Number of respondents the uptake fraction is scaled against
pub const TOTAL_SAMPLE_SIZE: u32 = 701;

/// Monetary value of one QALY (USD)
pub const VALUE_PER_QALY: u32 = 50_000;

/// Upper bound (exclusive) of the low uptake tier, in percent
pub const LOW_UPTAKE_THRESHOLD: f64 = 30.0;

/// Upper bound (exclusive) of the moderate uptake tier, in percent
pub const MODERATE_UPTAKE_THRESHOLD: f64 = 70.0;
