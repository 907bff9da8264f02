//! Property tests for uptake and cost-benefit

use decision_aid_common::{EfficacyLevel, ExperimentId, QalyScenario, RiskLevel, Scenario};
use decision_aid_engine::{compute_cost_benefit, UptakeEngine};
use proptest::prelude::{prop_assert, prop_assert_eq, prop_assume, proptest};
use proptest::sample::select;

fn scenario(
    experiment: ExperimentId,
    efficacy: EfficacyLevel,
    risk: RiskLevel,
    cost: u32,
    others: (EfficacyLevel, RiskLevel, u32),
) -> Scenario {
    let scenario = Scenario::new(experiment, efficacy, risk, cost);
    if experiment.has_others() {
        scenario.with_others(others.0, others.1, others.2)
    } else {
        scenario
    }
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(64))]

    #[test]
    fn prop_probability_strictly_inside_bounds(
        experiment in select(ExperimentId::ALL.to_vec()),
        efficacy in select(EfficacyLevel::ALL.to_vec()),
        risk in select(RiskLevel::ALL.to_vec()),
        cost in 0u32..=1000,
        others_efficacy in select(EfficacyLevel::ALL.to_vec()),
        others_risk in select(RiskLevel::ALL.to_vec()),
        others_cost in 0u32..=1000,
    ) {
        let engine = UptakeEngine::canonical().unwrap();
        let s = scenario(experiment, efficacy, risk, cost, (others_efficacy, others_risk, others_cost));
        let estimate = engine.estimate(&s).unwrap();
        prop_assert!(estimate.probability_percent > 0.0);
        prop_assert!(estimate.probability_percent < 100.0);
        prop_assert!(estimate.probability_percent.is_finite());
    }

    #[test]
    fn prop_higher_cost_lowers_uptake(
        experiment in select(ExperimentId::ALL.to_vec()),
        efficacy in select(EfficacyLevel::ALL.to_vec()),
        risk in select(RiskLevel::ALL.to_vec()),
        low in 0u32..=1000,
        high in 0u32..=1000,
    ) {
        prop_assume!(low < high);
        let engine = UptakeEngine::canonical().unwrap();
        let others = (EfficacyLevel::Fifty, RiskLevel::Sixteen, 100);
        let cheap = engine.estimate(&scenario(experiment, efficacy, risk, low, others)).unwrap();
        let dear = engine.estimate(&scenario(experiment, efficacy, risk, high, others)).unwrap();
        prop_assert!(cheap.probability_percent > dear.probability_percent);
    }

    #[test]
    fn prop_others_ignored_outside_experiment_three(
        efficacy in select(EfficacyLevel::ALL.to_vec()),
        risk in select(RiskLevel::ALL.to_vec()),
        cost in 0u32..=1000,
        others_cost in 0u32..=1000,
    ) {
        let engine = UptakeEngine::canonical().unwrap();
        for experiment in [ExperimentId::One, ExperimentId::Two] {
            let plain = Scenario::new(experiment, efficacy, risk, cost);
            let with_others = plain.with_others(EfficacyLevel::Ninety, RiskLevel::Thirty, others_cost);
            prop_assert_eq!(
                engine.estimate(&plain).unwrap().probability_percent,
                engine.estimate(&with_others).unwrap().probability_percent
            );
        }
    }

    #[test]
    fn prop_cost_benefit_monotonic_in_uptake(
        a in 0.0f64..=100.0,
        b in 0.0f64..=100.0,
        qaly in select(QalyScenario::ALL.to_vec()),
    ) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let lo = compute_cost_benefit(low, qaly).unwrap();
        let hi = compute_cost_benefit(high, qaly).unwrap();
        prop_assert!(lo.total_cost <= hi.total_cost);
        prop_assert!(lo.participant_count <= hi.participant_count);
        prop_assert!(lo.monetized_benefit <= hi.monetized_benefit);
        prop_assert_eq!(lo.fixed_cost, hi.fixed_cost);
    }
}
