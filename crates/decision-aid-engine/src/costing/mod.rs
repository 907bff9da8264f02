//! Cost-benefit analysis
//!
//! Provides the programme cost and monetised QALY benefit for an uptake level:
//! - Fixed costs paid regardless of uptake
//! - Variable costs scaled by the uptake fraction
//! - QALY gains per participant, valued per QALY

pub mod calculator;

pub use calculator::{compute_cost_benefit, CostBenefitCalculator};
