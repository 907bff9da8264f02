//! Uptake probability engine

use decision_aid_common::{
    AidError, CoefficientSet, CoefficientTable, ConstantKind, CostBounds, ExperimentId,
    FieldIssue, InterpretationTier, Result, Scenario, ScenarioField, ScenarioInput,
    ValidationError,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// One additive contribution to the plan's utility
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtilityTerm {
    /// e.g. "constant", "efficacy_self", "cost_others"
    pub name: String,
    pub value: f64,
}

impl UtilityTerm {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Uptake probability with its utility breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UptakeEstimate {
    pub experiment: ExperimentId,
    /// Utility of taking the plan (sum of `terms`)
    pub utility: f64,
    /// Utility of opting out
    pub opt_out_utility: f64,
    /// Choice probability of the plan, 0-100
    pub probability_percent: f64,
    pub tier: InterpretationTier,
    /// Contributions in evaluation order
    pub terms: Vec<UtilityTerm>,
}

impl UptakeEstimate {
    pub fn message(&self) -> &'static str {
        self.tier.message()
    }
}

/// Contributions to the plan's utility, in evaluation order
///
/// The constant comes first, picked by experiment rather than by which
/// constant field is populated. "Others" terms apply to experiment 3 only.
pub fn utility_terms(scenario: &Scenario, set: &CoefficientSet) -> Result<Vec<UtilityTerm>> {
    let kind = ConstantKind::for_experiment(scenario.experiment);
    let constant = set.constant(kind).ok_or_else(|| {
        AidError::Config(format!(
            "experiment {} has no {:?} plan constant",
            scenario.experiment, kind
        ))
    })?;

    let mut terms = vec![
        UtilityTerm::new("constant", constant),
        UtilityTerm::new("efficacy_self", set.efficacy.for_level(scenario.efficacy_self)),
        UtilityTerm::new("risk_self", set.risk.for_level(scenario.risk_self)),
        UtilityTerm::new("cost_self", set.cost * f64::from(scenario.cost_self)),
    ];

    if scenario.experiment.has_others() {
        let others = scenario.others.as_ref().ok_or_else(|| {
            ValidationError::InvalidScenario(vec![
                FieldIssue::missing(ScenarioField::EfficacyOthers),
                FieldIssue::missing(ScenarioField::RiskOthers),
                FieldIssue::missing(ScenarioField::CostOthers),
            ])
        })?;
        let coefs = set.others.as_ref().ok_or_else(|| {
            AidError::Config(format!(
                "experiment {} has no others coefficients",
                scenario.experiment
            ))
        })?;
        terms.extend([
            UtilityTerm::new("efficacy_others", coefs.efficacy.for_level(others.efficacy)),
            UtilityTerm::new("risk_others", coefs.risk.for_level(others.risk)),
            UtilityTerm::new("cost_others", coefs.cost * f64::from(others.cost)),
        ]);
    }

    Ok(terms)
}

/// Plan choice probability in percent
#[inline]
pub fn logit_probability(utility: f64, opt_out_utility: f64) -> f64 {
    let exp_utility = utility.exp();
    let exp_opt_out = opt_out_utility.exp();
    exp_utility / (exp_utility + exp_opt_out) * 100.0
}

/// Plan choice probability, rejecting results that collapsed to 0, 100 or NaN
fn checked_probability(utility: f64, opt_out_utility: f64) -> Result<f64> {
    let probability = logit_probability(utility, opt_out_utility);
    if probability > 0.0 && probability < 100.0 {
        Ok(probability)
    } else {
        Err(ValidationError::ProbabilityDegenerate(probability).into())
    }
}

/// Uptake probability (0-100) of `scenario` under `set`
///
/// Costs are checked against the default bounds; use [`UptakeEngine`] for
/// configured bounds.
pub fn compute_uptake_probability(scenario: &Scenario, set: &CoefficientSet) -> Result<f64> {
    scenario.check(&CostBounds::default())?;
    let utility: f64 = utility_terms(scenario, set)?.iter().map(|t| t.value).sum();
    checked_probability(utility, set.opt_out_constant)
}

/// Uptake engine over a full coefficient table
#[derive(Debug, Clone)]
pub struct UptakeEngine {
    table: CoefficientTable,
    bounds: CostBounds,
}

impl UptakeEngine {
    pub fn new(table: CoefficientTable, bounds: CostBounds) -> Self {
        Self { table, bounds }
    }

    /// Engine over the canonical coefficients and default cost bounds
    pub fn canonical() -> Result<Self> {
        Ok(Self::new(
            crate::catalog::canonical_coefficients()?,
            CostBounds::default(),
        ))
    }

    pub fn table(&self) -> &CoefficientTable {
        &self.table
    }

    pub fn bounds(&self) -> &CostBounds {
        &self.bounds
    }

    pub fn coefficients(&self, experiment: ExperimentId) -> Result<&CoefficientSet> {
        self.table.get(experiment).ok_or_else(|| {
            AidError::Config(format!("no coefficients for experiment {}", experiment))
        })
    }

    /// Validate raw form input and estimate uptake
    pub fn estimate_input(&self, input: &ScenarioInput) -> Result<(Scenario, UptakeEstimate)> {
        let scenario = input.validate(&self.bounds)?;
        let estimate = self.estimate(&scenario)?;
        Ok((scenario, estimate))
    }

    /// Estimate uptake for a typed scenario
    #[instrument(skip(self), fields(experiment = %scenario.experiment))]
    pub fn estimate(&self, scenario: &Scenario) -> Result<UptakeEstimate> {
        scenario.check(&self.bounds)?;
        let set = self.coefficients(scenario.experiment)?;

        let terms = utility_terms(scenario, set)?;
        let utility = terms.iter().fold(0.0, |acc, term| acc + term.value);
        let probability_percent = checked_probability(utility, set.opt_out_constant)?;
        let tier = InterpretationTier::from_probability(probability_percent);

        debug!(utility, probability_percent, ?tier, "Computed uptake");

        Ok(UptakeEstimate {
            experiment: scenario.experiment,
            utility,
            opt_out_utility: set.opt_out_constant,
            probability_percent,
            tier,
            terms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::coefficients::{experiment_one, experiment_three, experiment_two};
    use decision_aid_common::{EfficacyLevel, RiskLevel};

    #[test]
    fn test_experiment_one_reference_scenario() {
        let scenario = Scenario::new(ExperimentId::One, EfficacyLevel::Fifty, RiskLevel::Sixteen, 100);
        let set = experiment_one();
        let terms = utility_terms(&scenario, &set).unwrap();
        let utility: f64 = terms.iter().map(|t| t.value).sum();
        assert!((utility - 0.131).abs() < 1e-12);

        let p = compute_uptake_probability(&scenario, &set).unwrap();
        assert!((p - 66.463).abs() < 0.001, "p = {}", p);
    }

    #[test]
    fn test_experiment_three_all_reference() {
        let scenario = Scenario::new(ExperimentId::Three, EfficacyLevel::Reference, RiskLevel::Reference, 0)
            .with_others(EfficacyLevel::Reference, RiskLevel::Reference, 0);
        let p = compute_uptake_probability(&scenario, &experiment_three()).unwrap();
        let expected = (-0.160f64).exp() / ((-0.160f64).exp() + (-0.344f64).exp()) * 100.0;
        assert_eq!(p, expected);
        assert!((p - 54.587).abs() < 0.001);
    }

    #[test]
    fn test_constant_only_probability_is_exact() {
        let scenario = Scenario::new(ExperimentId::Two, EfficacyLevel::Reference, RiskLevel::Reference, 0);
        let set = experiment_two();
        let p = compute_uptake_probability(&scenario, &set).unwrap();
        let c = set.mean_constant.unwrap();
        let o = set.opt_out_constant;
        assert_eq!(p, c.exp() / (c.exp() + o.exp()) * 100.0);
    }

    #[test]
    fn test_experiment_one_ignores_mean_constant() {
        let mut set = experiment_one();
        set.mean_constant = Some(5.0);
        let scenario = Scenario::new(ExperimentId::One, EfficacyLevel::Reference, RiskLevel::Reference, 0);
        let terms = utility_terms(&scenario, &set).unwrap();
        assert_eq!(terms[0].value, -0.203);
    }

    #[test]
    fn test_others_terms_only_for_experiment_three() {
        let scenario = Scenario::new(ExperimentId::Two, EfficacyLevel::Ninety, RiskLevel::Eight, 10)
            .with_others(EfficacyLevel::Ninety, RiskLevel::Thirty, 500);
        assert_eq!(utility_terms(&scenario, &experiment_two()).unwrap().len(), 4);

        let scenario = Scenario::new(ExperimentId::Three, EfficacyLevel::Fifty, RiskLevel::Eight, 200)
            .with_others(EfficacyLevel::Fifty, RiskLevel::Sixteen, 100);
        let terms = utility_terms(&scenario, &experiment_three()).unwrap();
        let names: Vec<_> = terms.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "constant",
                "efficacy_self",
                "risk_self",
                "cost_self",
                "efficacy_others",
                "risk_others",
                "cost_others"
            ]
        );
        let p = compute_uptake_probability(&scenario, &experiment_three()).unwrap();
        assert!((p - 66.1055).abs() < 0.001, "p = {}", p);
    }

    #[test]
    fn test_missing_others_is_validation_error() {
        let scenario = Scenario::new(ExperimentId::Three, EfficacyLevel::Fifty, RiskLevel::Eight, 0);
        let err = compute_uptake_probability(&scenario, &experiment_three()).unwrap_err();
        assert_eq!(err.as_validation().map(|v| v.issues().len()), Some(3));
    }

    #[test]
    fn test_cost_out_of_bounds_rejected() {
        let scenario = Scenario::new(ExperimentId::One, EfficacyLevel::Fifty, RiskLevel::Eight, 1001);
        assert!(matches!(
            compute_uptake_probability(&scenario, &experiment_one()),
            Err(AidError::Validation(ValidationError::InvalidScenario(_)))
        ));
    }

    #[test]
    fn test_engine_estimate() {
        let engine = UptakeEngine::canonical().unwrap();
        let input = ScenarioInput::new("1").with_self("90", "0", "0");
        let (_, estimate) = engine.estimate_input(&input).unwrap();
        assert_eq!(estimate.tier, InterpretationTier::High);
        assert_eq!(estimate.opt_out_utility, -0.553);
        assert!(estimate.message().contains("high"));
    }

    #[test]
    fn test_engine_respects_unbounded_cost() {
        let table = crate::catalog::canonical_coefficients().unwrap();
        let engine = UptakeEngine::new(table, CostBounds::unbounded());
        let scenario = Scenario::new(ExperimentId::One, EfficacyLevel::Ninety, RiskLevel::Reference, 5000);
        let estimate = engine.estimate(&scenario).unwrap();
        assert_eq!(estimate.tier, InterpretationTier::Low);
        assert!(estimate.probability_percent > 0.0);
    }

    #[test]
    fn test_underflowing_probability_rejected() {
        let table = crate::catalog::canonical_coefficients().unwrap();
        let engine = UptakeEngine::new(table, CostBounds::unbounded());
        let scenario = Scenario::new(ExperimentId::One, EfficacyLevel::Fifty, RiskLevel::Sixteen, 1_000_000);
        let err = engine.estimate(&scenario).unwrap_err();
        assert!(matches!(
            err,
            AidError::Validation(ValidationError::ProbabilityDegenerate(p)) if p == 0.0
        ));
    }

    #[test]
    fn test_engine_reports_all_input_issues() {
        let engine = UptakeEngine::canonical().unwrap();
        let err = engine
            .estimate_input(&ScenarioInput::new("3").with_self("50", "", "2000"))
            .unwrap_err();
        // risk missing, cost out of range, three others fields missing
        assert_eq!(err.as_validation().unwrap().issues().len(), 5);
    }
}
