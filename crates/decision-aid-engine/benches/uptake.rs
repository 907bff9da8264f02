//! Decision aid benchmarks
//!
//! Hot paths behind every form interaction:
//! - uptake probability per experiment
//! - WTP table construction
//! - cost-benefit calculation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use decision_aid_common::{
    EfficacyLevel, ExperimentId, QalyScenario, RiskLevel, Scenario, ScenarioInput,
};
use decision_aid_engine::{CostBenefitCalculator, UptakeEngine, WtpTableBuilder};
use std::time::Duration;

// ============ UPTAKE BENCHMARKS ============

fn bench_uptake(c: &mut Criterion) {
    let mut group = c.benchmark_group("uptake");
    group.measurement_time(Duration::from_secs(5));

    let engine = match UptakeEngine::canonical() {
        Ok(engine) => engine,
        Err(e) => panic!("canonical coefficients: {}", e),
    };

    for experiment in ExperimentId::ALL {
        let mut scenario = Scenario::new(experiment, EfficacyLevel::Fifty, RiskLevel::Sixteen, 100);
        if experiment.has_others() {
            scenario = scenario.with_others(EfficacyLevel::Fifty, RiskLevel::Eight, 200);
        }
        group.bench_with_input(
            BenchmarkId::new("estimate", experiment.number()),
            &scenario,
            |b, scenario| b.iter(|| engine.estimate(black_box(scenario))),
        );
    }

    // Full form path: parse, validate, estimate
    group.bench_function("estimate_input", |b| {
        let input = ScenarioInput::new("3")
            .with_self("50", "8", "200")
            .with_others("50", "16", "100");
        b.iter(|| engine.estimate_input(black_box(&input)));
    });

    group.finish();
}

// ============ WTP BENCHMARKS ============

fn bench_wtp(c: &mut Criterion) {
    let mut group = c.benchmark_group("wtp");

    let engine = match UptakeEngine::canonical() {
        Ok(engine) => engine,
        Err(e) => panic!("canonical coefficients: {}", e),
    };
    let builder = WtpTableBuilder::default();

    for experiment in ExperimentId::ALL {
        group.bench_with_input(
            BenchmarkId::new("build", experiment.number()),
            &experiment,
            |b, &experiment| {
                b.iter(|| builder.build_for_id(black_box(&experiment.to_string()), engine.table()))
            },
        );
    }

    group.finish();
}

// ============ COST-BENEFIT BENCHMARKS ============

fn bench_cost_benefit(c: &mut Criterion) {
    let mut group = c.benchmark_group("cost_benefit");
    let calculator = CostBenefitCalculator::canonical();

    group.bench_function("compute", |b| {
        b.iter(|| calculator.compute(black_box(66.463087), black_box(QalyScenario::Moderate)));
    });

    group.finish();
}

criterion_group!(uptake, bench_uptake);
criterion_group!(wtp, bench_wtp);
criterion_group!(cost_benefit, bench_cost_benefit);

criterion_main!(uptake, wtp, cost_benefit);
