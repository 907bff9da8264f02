//! Decision Aid CLI
//!
//! Command-line front end for the T2DM equity-efficiency decision aid.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use decision_aid_common::{
    CostBenefitResult, ExperimentId, QalyScenario, ScenarioInput, WtpRecord, VERSION,
};
use decision_aid_engine::{AidConfig, DecisionAidSession, RiskWtpComparison, UptakeEstimate};

#[derive(Parser, Debug)]
#[command(
    name = "decision-aid",
    version = VERSION,
    about = "Uptake, willingness to pay and cost-benefit for T2DM health plan scenarios"
)]
struct Cli {
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Predicted uptake probability for one scenario
    Uptake(ScenarioArgs),
    /// WTP table for an experiment
    Wtp {
        /// Experiment id (1, 2 or 3)
        #[arg(long)]
        experiment: ExperimentId,
    },
    /// Cost-benefit at a given uptake, or at the uptake of a scenario
    CostBenefit {
        /// Uptake probability in percent
        #[arg(long, conflicts_with = "experiment")]
        uptake: Option<f64>,

        /// QALY gain scenario: low, moderate or high
        #[arg(long, default_value = "moderate")]
        qaly: QalyScenario,

        #[command(flatten)]
        scenario: ScenarioArgs,
    },
    /// Compute and save every scenario in a JSON file, then compare them
    Compare {
        /// JSON array of scenario inputs
        #[arg(long, value_name = "FILE")]
        input: PathBuf,

        /// Write the saved-scenario report (.json for JSON, text otherwise)
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,
    },
}

/// Scenario fields as they would come from the form
#[derive(Args, Debug, Default)]
struct ScenarioArgs {
    #[arg(long)]
    experiment: Option<String>,
    /// Efficacy for self: 0, 50 or 90
    #[arg(long)]
    efficacy: Option<String>,
    /// Risk for self: 0, 8, 16 or 30
    #[arg(long)]
    risk: Option<String>,
    /// Monthly cost for self, USD
    #[arg(long)]
    cost: Option<String>,
    #[arg(long)]
    efficacy_others: Option<String>,
    #[arg(long)]
    risk_others: Option<String>,
    #[arg(long)]
    cost_others: Option<String>,
}

impl From<ScenarioArgs> for ScenarioInput {
    fn from(args: ScenarioArgs) -> Self {
        ScenarioInput {
            experiment: args.experiment,
            efficacy: args.efficacy,
            risk: args.risk,
            cost: args.cost,
            efficacy_others: args.efficacy_others,
            risk_others: args.risk_others,
            cost_others: args.cost_others,
        }
    }
}

fn main() -> Result<()> {
    // Initialize tracing; stdout is reserved for results
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    debug!("Starting decision-aid v{}", VERSION);

    let config = AidConfig::load().context("Failed to load configuration")?;
    debug!("Loaded configuration: {:?}", config);
    let mut session = DecisionAidSession::new(config)?;

    match cli.command {
        Command::Uptake(args) => {
            let estimate = session.compute_uptake(&args.into())?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&estimate)?);
            } else {
                print_estimate(&estimate);
            }
        }
        Command::Wtp { experiment } => {
            let table = session.wtp_table_for(experiment)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&table)?);
            } else {
                print_wtp_table(experiment, &table);
            }
        }
        Command::CostBenefit {
            uptake,
            qaly,
            scenario,
        } => {
            let result = match uptake {
                Some(uptake) => session.cost_benefit_at(uptake, qaly)?,
                None => {
                    session.compute_uptake(&scenario.into())?;
                    session.cost_benefit(qaly)?
                }
            };
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_cost_benefit(&result);
            }
        }
        Command::Compare { input, report } => {
            let content = std::fs::read_to_string(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let inputs: Vec<ScenarioInput> = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse {}", input.display()))?;

            session.reset();
            for (index, scenario) in inputs.iter().enumerate() {
                session
                    .compute_uptake(scenario)
                    .with_context(|| format!("Scenario #{} in {}", index + 1, input.display()))?;
                session.save_current()?;
                session.input_changed();
            }
            info!(scenarios = inputs.len(), "Saved scenarios");

            let comparison = session.risk_wtp_comparison()?;
            let saved_report = session.report()?;
            if cli.json {
                let output = serde_json::json!({
                    "scenarios": &saved_report.scenarios,
                    "risk_wtp_comparison": &comparison,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                print!("{}", saved_report.to_text());
                println!();
                print_risk_comparison(&comparison);
            }

            if let Some(path) = report {
                saved_report.write_to(&path)?;
            }
        }
    }

    Ok(())
}

fn print_estimate(estimate: &UptakeEstimate) {
    println!("{}", estimate.experiment.display_name());
    for term in &estimate.terms {
        println!("  {:<16} {:>10.4}", term.name, term.value);
    }
    println!("  {:<16} {:>10.4}", "utility", estimate.utility);
    println!("  {:<16} {:>10.4}", "opt-out", estimate.opt_out_utility);
    println!();
    println!("Predicted probability: {:.2}%", estimate.probability_percent);
    println!("{}", estimate.message());
}

fn print_wtp_table(experiment: ExperimentId, table: &[WtpRecord]) {
    println!("WTP - {} (USD/month)", experiment.display_name());
    println!(
        "{:<26} {:>12} {:>10} {:>8}",
        "Attribute", "WTP", "SE", "p"
    );
    for row in table {
        println!(
            "{:<26} {:>12.2} {:>10.2} {:>8.3}",
            row.attribute_label, row.wtp, row.standard_error, row.p_value
        );
    }
}

fn print_cost_benefit(result: &CostBenefitResult) {
    println!(
        "Uptake {:.2}%, QALY scenario {} ({} per participant)",
        result.uptake_probability, result.qaly_scenario, result.qaly_per_participant
    );
    for component in &result.components {
        println!("  {:<32} ${:>10.2}", component.item, component.amount);
    }
    println!("Fixed cost:          ${:.2}", result.fixed_cost);
    println!("Variable cost:       ${:.2}", result.variable_cost);
    println!("Total cost:          ${:.2}", result.total_cost);
    println!("Participants:        {}", result.participant_count);
    println!("Total QALY gained:   {:.2}", result.total_qaly);
    println!("Monetized benefit:   ${:.2}", result.monetized_benefit);
    println!("Net benefit:         ${:.2}", result.net_benefit);
}

fn print_risk_comparison(comparison: &RiskWtpComparison) {
    println!("Risk WTP comparison (USD/month)");
    print!("{:<14}", "Experiment");
    for level in RiskWtpComparison::LEVELS {
        print!(" {:>12}", format!("Risk {}", level));
    }
    println!();
    for row in &comparison.rows {
        print!("{:<14}", row.experiment.display_name());
        for level in RiskWtpComparison::LEVELS {
            match row.value(level) {
                Some(value) => print!(" {:>12.2}", value),
                None => print!(" {:>12}", "-"),
            }
        }
        println!();
    }
}
