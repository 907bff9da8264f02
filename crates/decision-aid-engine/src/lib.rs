//! # Decision Aid Engine
//!
//! Choice probability, willingness to pay and cost-benefit for the T2DM
//! equity-efficiency decision aid.
//!
//! ## Uptake Formula
//!
//! ```text
//! U = ASC + β_eff + β_risk + β_cost × cost [+ others terms, experiment 3]
//! P = exp(U) / (exp(U) + exp(ASC_optout)) × 100
//! ```
//!
//! ## Components
//!
//! - [`catalog`]: canonical coefficients, WTP literature constants, cost catalog
//! - [`utility`]: the utility/probability engine
//! - [`wtp`]: WTP table builder and cross-experiment risk comparison
//! - [`costing`]: cost/QALY benefit calculator
//! - [`store`]: saved-scenario store
//! - [`session`]: one user's interaction state, tying the above together
//! - [`report`]: plain-text and JSON export of saved scenarios

pub mod catalog;
pub mod config;
pub mod costing;
pub mod report;
pub mod session;
pub mod store;
pub mod utility;
pub mod wtp;

pub use config::AidConfig;
pub use costing::{compute_cost_benefit, CostBenefitCalculator};
pub use report::ScenarioReport;
pub use session::{DecisionAidSession, SessionState};
pub use store::{InMemoryScenarioStore, ScenarioStore};
pub use utility::{compute_uptake_probability, UptakeEngine, UptakeEstimate, UtilityTerm};
pub use wtp::{build_wtp_table, RiskWtpComparison, WtpTableBuilder};
