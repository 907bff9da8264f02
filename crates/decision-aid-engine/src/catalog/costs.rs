//! Canonical programme cost catalog (USD)

use decision_aid_common::{AidError, CostComponent, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashSet;

pub fn canonical_cost_catalog() -> Vec<CostComponent> {
    vec![
        CostComponent::new("Advertisement", dec!(5000.00)),
        CostComponent::new("Training", dec!(3000.00)),
        CostComponent::new("Medication (Insulin, Oral Hypoglycemics)", dec!(2000.00)),
        CostComponent::new("Delivery Variable Costs", dec!(1500.00)),
        CostComponent::new("Blood Glucose Monitoring", dec!(500.00)),
        CostComponent::new("Healthcare Provider Visits", dec!(1200.00)),
        CostComponent::new("Hospitalization for Complications", dec!(5000.00)),
        CostComponent::new("Patient Time & Travel", dec!(600.00)),
        CostComponent::new("Administrative & Additional Training", dec!(1000.00)),
    ]
}

/// Check a catalog loaded from configuration
///
/// It must list at least one item, with unique names and non-negative amounts.
pub fn validate_cost_catalog(components: &[CostComponent]) -> Result<()> {
    if components.is_empty() {
        return Err(AidError::Config("cost catalog is empty".to_string()));
    }

    let mut seen = HashSet::with_capacity(components.len());
    for component in components {
        if component.amount < Decimal::ZERO {
            return Err(AidError::Config(format!(
                "cost item {:?} has negative amount {}",
                component.item, component.amount
            )));
        }
        if !seen.insert(component.item.as_str()) {
            return Err(AidError::Config(format!(
                "cost item {:?} is listed more than once",
                component.item
            )));
        }
    }
    Ok(())
}
