//! Static model data
//!
//! Canonical literals for the three experiments: mixed-logit coefficients,
//! the literature standard errors and p-values used in the WTP table, and the
//! programme cost catalog. All of it is configuration, never computed.

pub mod coefficients;
pub mod costs;
pub mod wtp_reference;

pub use coefficients::canonical_coefficients;
pub use costs::{canonical_cost_catalog, validate_cost_catalog};
pub use wtp_reference::{canonical_wtp_references, WtpReferenceTable};
