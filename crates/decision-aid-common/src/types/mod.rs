//! Core data types for the decision aid

pub mod coefficients;
pub mod cost_benefit;
pub mod levels;
pub mod scenario;
pub mod wtp;
