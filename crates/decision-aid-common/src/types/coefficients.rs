//! Coefficient sets - fixed mixed-logit estimates per experiment
//!
//! Each experiment has its own set. Experiment 1 was estimated with a fixed
//! alternative-specific constant; experiments 2 and 3 with a random constant
//! whose mean is reported. Both fields are kept distinct: the constant used
//! for an experiment is chosen by [`ConstantKind::for_experiment`], never by
//! whichever field happens to be populated.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{AidError, Result};
use crate::types::levels::{EfficacyLevel, ExperimentId, RiskLevel};

/// Largest coefficient magnitude accepted from a coefficient table
///
/// Published estimates are well inside +-10; anything beyond this cannot come
/// from a fitted logit and would overflow `exp` in the choice probability.
pub const MAX_COEFFICIENT_MAGNITUDE: f64 = 100.0;

/// Which plan constant an experiment's utility uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstantKind {
    /// Fixed ASC (experiment 1)
    Fixed,
    /// Mean of the random ASC (experiments 2 and 3)
    Mean,
}

impl ConstantKind {
    pub fn for_experiment(experiment: ExperimentId) -> Self {
        match experiment {
            ExperimentId::One => ConstantKind::Fixed,
            ExperimentId::Two | ExperimentId::Three => ConstantKind::Mean,
        }
    }
}

/// Utility increments for the efficacy levels above reference
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EfficacyCoefficients {
    pub fifty: f64,
    pub ninety: f64,
}

impl EfficacyCoefficients {
    #[inline]
    pub fn for_level(&self, level: EfficacyLevel) -> f64 {
        match level {
            EfficacyLevel::Reference => 0.0,
            EfficacyLevel::Fifty => self.fifty,
            EfficacyLevel::Ninety => self.ninety,
        }
    }
}

/// Utility increments for the risk levels above reference
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskCoefficients {
    pub eight: f64,
    pub sixteen: f64,
    pub thirty: f64,
}

impl RiskCoefficients {
    #[inline]
    pub fn for_level(&self, level: RiskLevel) -> f64 {
        match level {
            RiskLevel::Reference => 0.0,
            RiskLevel::Eight => self.eight,
            RiskLevel::Sixteen => self.sixteen,
            RiskLevel::Thirty => self.thirty,
        }
    }
}

/// Coefficients describing the welfare of others (experiment 3)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OthersCoefficients {
    pub efficacy: EfficacyCoefficients,
    pub risk: RiskCoefficients,
    /// Marginal utility per dollar of others' monthly cost
    pub cost: f64,
}

/// Coefficients for one experiment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoefficientSet {
    /// Utility of declining the plan
    pub opt_out_constant: f64,
    /// Fixed plan constant (used by experiment 1 only)
    #[serde(default)]
    pub plan_constant: Option<f64>,
    /// Mean of the random plan constant (used by experiments 2 and 3)
    #[serde(default)]
    pub mean_constant: Option<f64>,
    pub efficacy: EfficacyCoefficients,
    pub risk: RiskCoefficients,
    /// Marginal utility per dollar of own monthly cost (negative)
    pub cost: f64,
    #[serde(default)]
    pub others: Option<OthersCoefficients>,
}

impl CoefficientSet {
    /// The constant term for the given selection rule
    pub fn constant(&self, kind: ConstantKind) -> Option<f64> {
        match kind {
            ConstantKind::Fixed => self.plan_constant,
            ConstantKind::Mean => self.mean_constant,
        }
    }

    /// Every populated coefficient with its name
    fn named_values(&self) -> Vec<(&'static str, f64)> {
        let mut values = vec![
            ("opt_out_constant", self.opt_out_constant),
            ("efficacy.fifty", self.efficacy.fifty),
            ("efficacy.ninety", self.efficacy.ninety),
            ("risk.eight", self.risk.eight),
            ("risk.sixteen", self.risk.sixteen),
            ("risk.thirty", self.risk.thirty),
            ("cost", self.cost),
        ];
        if let Some(plan) = self.plan_constant {
            values.push(("plan_constant", plan));
        }
        if let Some(mean) = self.mean_constant {
            values.push(("mean_constant", mean));
        }
        if let Some(others) = &self.others {
            values.extend([
                ("others.efficacy.fifty", others.efficacy.fifty),
                ("others.efficacy.ninety", others.efficacy.ninety),
                ("others.risk.eight", others.risk.eight),
                ("others.risk.sixteen", others.risk.sixteen),
                ("others.risk.thirty", others.risk.thirty),
                ("others.cost", others.cost),
            ]);
        }
        values
    }

    /// Check the set is usable for `experiment`
    pub fn validate_for(&self, experiment: ExperimentId) -> Result<()> {
        if let Some((name, value)) = self
            .named_values()
            .into_iter()
            .find(|(_, v)| !v.is_finite() || v.abs() > MAX_COEFFICIENT_MAGNITUDE)
        {
            return Err(AidError::Config(format!(
                "experiment {} coefficient {} = {} is not a finite value within +-{}",
                experiment, name, value, MAX_COEFFICIENT_MAGNITUDE
            )));
        }

        let kind = ConstantKind::for_experiment(experiment);
        if self.constant(kind).is_none() {
            return Err(AidError::Config(format!(
                "experiment {} requires a {:?} plan constant",
                experiment, kind
            )));
        }
        if !(self.cost < 0.0) {
            return Err(AidError::Config(format!(
                "experiment {} cost coefficient must be negative, got {}",
                experiment, self.cost
            )));
        }
        match (&self.others, experiment.has_others()) {
            (None, true) => Err(AidError::Config(format!(
                "experiment {} requires others coefficients",
                experiment
            ))),
            (Some(others), true) if !(others.cost < 0.0) => Err(AidError::Config(format!(
                "experiment {} others cost coefficient must be negative, got {}",
                experiment, others.cost
            ))),
            _ => Ok(()),
        }
    }
}

/// All coefficient sets, keyed by experiment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoefficientTable {
    sets: BTreeMap<ExperimentId, CoefficientSet>,
}

impl CoefficientTable {
    /// Build a table, validating every set against its experiment
    pub fn new(sets: impl IntoIterator<Item = (ExperimentId, CoefficientSet)>) -> Result<Self> {
        let table = Self {
            sets: sets.into_iter().collect(),
        };
        table.validate()?;
        Ok(table)
    }

    /// Parse a table from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let table: Self = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    pub fn validate(&self) -> Result<()> {
        for experiment in ExperimentId::ALL {
            match self.sets.get(&experiment) {
                Some(set) => set.validate_for(experiment)?,
                None => {
                    return Err(AidError::Config(format!(
                        "missing coefficients for experiment {}",
                        experiment
                    )))
                }
            }
        }
        Ok(())
    }

    pub fn get(&self, experiment: ExperimentId) -> Option<&CoefficientSet> {
        self.sets.get(&experiment)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ExperimentId, &CoefficientSet)> {
        self.sets.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(plan: Option<f64>, mean: Option<f64>) -> CoefficientSet {
        CoefficientSet {
            opt_out_constant: -0.5,
            plan_constant: plan,
            mean_constant: mean,
            efficacy: EfficacyCoefficients {
                fifty: 0.8,
                ninety: 1.5,
            },
            risk: RiskCoefficients {
                eight: -0.03,
                sixteen: -0.4,
                thirty: -0.5,
            },
            cost: -0.001,
            others: None,
        }
    }

    #[test]
    fn test_constant_selection_rule() {
        assert_eq!(ConstantKind::for_experiment(ExperimentId::One), ConstantKind::Fixed);
        assert_eq!(ConstantKind::for_experiment(ExperimentId::Two), ConstantKind::Mean);
        assert_eq!(ConstantKind::for_experiment(ExperimentId::Three), ConstantKind::Mean);

        let both = set(Some(-0.2), Some(-0.9));
        assert_eq!(both.constant(ConstantKind::Fixed), Some(-0.2));
        assert_eq!(both.constant(ConstantKind::Mean), Some(-0.9));
    }

    #[test]
    fn test_reference_levels_contribute_nothing() {
        let s = set(Some(0.0), None);
        assert_eq!(s.efficacy.for_level(EfficacyLevel::Reference), 0.0);
        assert_eq!(s.risk.for_level(RiskLevel::Reference), 0.0);
        assert_eq!(s.risk.for_level(RiskLevel::Sixteen), -0.4);
    }

    #[test]
    fn test_validate_requires_matching_constant() {
        // Mean constant alone is not enough for experiment 1
        assert!(set(None, Some(-0.2)).validate_for(ExperimentId::One).is_err());
        assert!(set(Some(-0.2), None).validate_for(ExperimentId::One).is_ok());
        assert!(set(Some(-0.2), None).validate_for(ExperimentId::Two).is_err());
    }

    #[test]
    fn test_validate_requires_others_for_experiment_three() {
        let s = set(None, Some(-0.1));
        assert!(s.validate_for(ExperimentId::Three).is_err());
        assert!(s.validate_for(ExperimentId::Two).is_ok());
    }

    #[test]
    fn test_validate_rejects_non_negative_cost() {
        let mut s = set(Some(-0.2), None);
        s.cost = 0.0;
        assert!(s.validate_for(ExperimentId::One).is_err());
    }

    #[test]
    fn test_validate_rejects_extreme_coefficients() {
        let mut s = set(Some(-0.2), None);
        s.efficacy.fifty = 1e308;
        assert!(matches!(
            s.validate_for(ExperimentId::One),
            Err(AidError::Config(msg)) if msg.contains("efficacy.fifty")
        ));

        let mut s = set(Some(-0.2), None);
        s.opt_out_constant = f64::NAN;
        assert!(s.validate_for(ExperimentId::One).is_err());

        let mut s = set(Some(f64::INFINITY), None);
        s.cost = -0.001;
        assert!(s.validate_for(ExperimentId::One).is_err());
    }

    #[test]
    fn test_extreme_table_rejected_from_json() {
        let s = set(Some(-0.2), Some(-0.2));
        let others = OthersCoefficients {
            efficacy: s.efficacy,
            risk: s.risk,
            cost: -0.001,
        };
        let ok = CoefficientTable::new([
            (ExperimentId::One, s.clone()),
            (ExperimentId::Two, s.clone()),
            (ExperimentId::Three, CoefficientSet { others: Some(others), ..s.clone() }),
        ])
        .unwrap();
        let json = serde_json::to_string(&ok).unwrap();
        assert!(CoefficientTable::from_json(&json).is_ok());

        let bad = json.replacen("\"thirty\":-0.5", "\"thirty\":-1e300", 1);
        assert_ne!(bad, json);
        assert!(matches!(
            CoefficientTable::from_json(&bad),
            Err(AidError::Config(_))
        ));
    }

    #[test]
    fn test_table_requires_all_experiments() {
        let err = CoefficientTable::new([(ExperimentId::One, set(Some(-0.2), None))]);
        assert!(matches!(err, Err(AidError::Config(_))));
    }
}
