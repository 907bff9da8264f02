//! Cost-benefit calculator

use decision_aid_common::{
    AidError, CostBehavior, CostBenefitResult, CostComponent, QalyScenario, Result,
    ValidationError,
};
use rust_decimal::Decimal;
use tracing::{debug, instrument};

use crate::catalog;
use crate::config::AidConfig;

/// Cost-benefit calculator over a fixed cost catalog
#[derive(Debug, Clone)]
pub struct CostBenefitCalculator {
    components: Vec<CostComponent>,
    total_sample_size: u32,
    value_per_qaly: Decimal,
}

impl CostBenefitCalculator {
    pub fn new(components: Vec<CostComponent>, total_sample_size: u32, value_per_qaly: Decimal) -> Self {
        Self {
            components,
            total_sample_size,
            value_per_qaly,
        }
    }

    /// Calculator over the canonical catalog, 701 respondents and $50,000/QALY
    pub fn canonical() -> Self {
        Self::new(
            catalog::canonical_cost_catalog(),
            decision_aid_common::TOTAL_SAMPLE_SIZE,
            Decimal::from(decision_aid_common::VALUE_PER_QALY),
        )
    }

    pub fn from_config(config: &AidConfig) -> Result<Self> {
        Ok(Self::new(
            config.cost_catalog()?,
            config.total_sample_size,
            Decimal::from(config.value_per_qaly),
        ))
    }

    pub fn components(&self) -> &[CostComponent] {
        &self.components
    }

    fn total_for(&self, behavior: CostBehavior) -> Decimal {
        self.components
            .iter()
            .filter(|c| c.behavior() == behavior)
            .map(|c| c.amount)
            .sum()
    }

    /// Compute cost and benefit for `uptake_percent` under a QALY scenario label
    pub fn compute_for_label(&self, uptake_percent: f64, qaly_scenario: &str) -> Result<CostBenefitResult> {
        let qaly_scenario: QalyScenario = qaly_scenario.parse()?;
        self.compute(uptake_percent, qaly_scenario)
    }

    /// Compute cost and benefit for `uptake_percent` (0-100)
    #[instrument(skip(self))]
    pub fn compute(&self, uptake_percent: f64, qaly_scenario: QalyScenario) -> Result<CostBenefitResult> {
        if !(0.0..=100.0).contains(&uptake_percent) {
            return Err(ValidationError::ProbabilityOutOfRange(uptake_percent).into());
        }
        let fraction = uptake_percent / 100.0;
        let fraction_dec = Decimal::try_from(fraction).map_err(|e| {
            AidError::Internal(format!("uptake fraction {} not representable: {}", fraction, e))
        })?;

        // Cost: fixed items in full, the rest scaled by uptake
        let fixed_cost = self.total_for(CostBehavior::Fixed);
        let variable_cost = self.total_for(CostBehavior::Variable) * fraction_dec;
        let total_cost = fixed_cost + variable_cost;

        // Benefit: participants x QALY gain x value per QALY
        let participant_count = (f64::from(self.total_sample_size) * fraction).round() as u32;
        let qaly_per_participant = qaly_scenario.qaly_gain();
        let total_qaly = Decimal::from(participant_count) * qaly_per_participant;
        let monetized_benefit = total_qaly * self.value_per_qaly;
        let net_benefit = monetized_benefit - total_cost;

        debug!(
            participant_count,
            %total_cost,
            %monetized_benefit,
            %net_benefit,
            "Computed cost-benefit"
        );

        Ok(CostBenefitResult {
            uptake_probability: uptake_percent,
            qaly_scenario,
            participant_count,
            fixed_cost,
            variable_cost,
            total_cost,
            qaly_per_participant,
            total_qaly,
            monetized_benefit,
            net_benefit,
            components: self.components.clone(),
        })
    }
}

impl Default for CostBenefitCalculator {
    fn default() -> Self {
        Self::canonical()
    }
}

/// Cost-benefit for `uptake_percent` with the canonical catalog and constants
pub fn compute_cost_benefit(uptake_percent: f64, qaly_scenario: QalyScenario) -> Result<CostBenefitResult> {
    CostBenefitCalculator::canonical().compute(uptake_percent, qaly_scenario)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_half_uptake_moderate() {
        let result = compute_cost_benefit(50.0, QalyScenario::Moderate).unwrap();

        // Fixed = 5000 + 3000, variable = 11800 * 0.5
        assert_eq!(result.fixed_cost, dec!(8000));
        assert_eq!(result.variable_cost, dec!(5900));
        assert_eq!(result.total_cost, dec!(13900));
        // round(701 * 0.5) = 351 (half rounds up)
        assert_eq!(result.participant_count, 351);
        assert_eq!(result.total_qaly, dec!(17.55));
        assert_eq!(result.monetized_benefit, dec!(877500));
        assert_eq!(result.net_benefit, dec!(863600));
        assert!(result.is_net_positive());
    }

    #[test]
    fn test_total_cost_is_not_rounded() {
        let uptake = 66.463087;
        let result = compute_cost_benefit(uptake, QalyScenario::Moderate).unwrap();

        let fraction = Decimal::try_from(uptake / 100.0).unwrap();
        let exact = dec!(8000) + dec!(11800) * fraction;
        assert!((result.total_cost - exact).abs() < dec!(0.0000001));
        assert_eq!(result.total_cost, result.fixed_cost + result.variable_cost);
        assert_eq!(result.net_benefit, result.monetized_benefit - result.total_cost);
        // Cents are a display concern
        assert_ne!(result.total_cost, result.total_cost.round_dp(2));
        assert_eq!(result.total_cost.round_dp(2), dec!(15842.64));
    }

    #[test]
    fn test_zero_uptake_only_fixed_costs() {
        let result = compute_cost_benefit(0.0, QalyScenario::High).unwrap();
        assert_eq!(result.total_cost, dec!(8000));
        assert_eq!(result.participant_count, 0);
        assert_eq!(result.monetized_benefit, Decimal::ZERO);
        assert_eq!(result.net_benefit, dec!(-8000));
    }

    #[test]
    fn test_full_uptake() {
        let result = compute_cost_benefit(100.0, QalyScenario::Low).unwrap();
        assert_eq!(result.total_cost, dec!(19800));
        assert_eq!(result.participant_count, 701);
        assert_eq!(result.total_qaly, dec!(14.02));
        assert_eq!(result.monetized_benefit, dec!(701000));
    }

    #[test]
    fn test_probability_out_of_range() {
        for p in [-0.01, 100.01, f64::NAN] {
            let err = compute_cost_benefit(p, QalyScenario::Low).unwrap_err();
            assert!(matches!(
                err,
                AidError::Validation(ValidationError::ProbabilityOutOfRange(_))
            ));
        }
    }

    #[test]
    fn test_unknown_qaly_label() {
        let err = CostBenefitCalculator::canonical()
            .compute_for_label(50.0, "extreme")
            .unwrap_err();
        assert!(matches!(
            err,
            AidError::Validation(ValidationError::UnknownQalyScenario(_))
        ));
    }

    #[test]
    fn test_benefit_cost_ratio() {
        let result = compute_cost_benefit(50.0, QalyScenario::Moderate).unwrap();
        let ratio = result.benefit_cost_ratio().unwrap();
        assert!(ratio > dec!(63) && ratio < dec!(63.2));
    }

    #[test]
    fn test_custom_catalog() {
        let calculator = CostBenefitCalculator::new(
            vec![
                CostComponent::new("Advertisement", dec!(100)),
                CostComponent::new("Meals", dec!(1000)),
            ],
            100,
            dec!(1000),
        );
        let result = calculator.compute(25.0, QalyScenario::High).unwrap();
        assert_eq!(result.total_cost, dec!(350));
        assert_eq!(result.participant_count, 25);
        assert_eq!(result.monetized_benefit, dec!(2500));
    }
}
