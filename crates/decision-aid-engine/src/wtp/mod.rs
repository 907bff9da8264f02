//! Willingness to pay
//!
//! - [`builder`]: per-experiment WTP tables from a coefficient set
//! - [`comparison`]: risk WTP across the experiments of saved scenarios

pub mod builder;
pub mod comparison;

pub use builder::{build_wtp_table, WtpTableBuilder};
pub use comparison::{RiskWtpComparison, RiskWtpRow};
