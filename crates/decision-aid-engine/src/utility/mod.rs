//! Utility and choice probability
//!
//! Binary logit between the plan and opting out:
//! - utility of the plan is a fold over level → coefficient lookups
//! - utility of opting out is the experiment's opt-out constant

pub mod engine;

pub use engine::{
    compute_uptake_probability, logit_probability, utility_terms, UptakeEngine, UptakeEstimate,
    UtilityTerm,
};
