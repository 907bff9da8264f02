//! Decision aid session
//!
//! Holds everything one user interaction needs: the engine, the WTP builder,
//! the cost-benefit calculator and the saved-scenario store, plus where the
//! current scenario stands in `Idle -> ProbabilityComputed -> Saved`.

use decision_aid_common::{
    CostBenefitResult, ExperimentId, QalyScenario, Result, SavedScenario, Scenario,
    ScenarioInput, ValidationError, WtpRecord,
};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::config::AidConfig;
use crate::costing::CostBenefitCalculator;
use crate::report::ScenarioReport;
use crate::store::{InMemoryScenarioStore, ScenarioStore};
use crate::utility::{UptakeEngine, UptakeEstimate};
use crate::wtp::{RiskWtpComparison, WtpTableBuilder};

/// Where the scenario being edited stands
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    /// No probability for the current inputs
    #[default]
    Idle,
    ProbabilityComputed {
        scenario: Scenario,
        estimate: UptakeEstimate,
    },
    /// Terminal for this snapshot; editing inputs starts over at `Idle`
    Saved {
        scenario: Scenario,
        estimate: UptakeEstimate,
        saved: SavedScenario,
    },
}

impl SessionState {
    pub fn estimate(&self) -> Option<&UptakeEstimate> {
        match self {
            SessionState::Idle => None,
            SessionState::ProbabilityComputed { estimate, .. }
            | SessionState::Saved { estimate, .. } => Some(estimate),
        }
    }

    pub fn scenario(&self) -> Option<&Scenario> {
        match self {
            SessionState::Idle => None,
            SessionState::ProbabilityComputed { scenario, .. }
            | SessionState::Saved { scenario, .. } => Some(scenario),
        }
    }
}

/// One user's decision aid session
pub struct DecisionAidSession {
    config: AidConfig,
    engine: UptakeEngine,
    wtp: WtpTableBuilder,
    calculator: CostBenefitCalculator,
    store: Arc<dyn ScenarioStore>,
    state: SessionState,
}

impl DecisionAidSession {
    /// Session over an in-memory store
    pub fn new(config: AidConfig) -> Result<Self> {
        Self::with_store(config, Arc::new(InMemoryScenarioStore::new()))
    }

    /// Session with default configuration and the canonical coefficients
    pub fn canonical() -> Result<Self> {
        Self::new(AidConfig::default())
    }

    pub fn with_store(config: AidConfig, store: Arc<dyn ScenarioStore>) -> Result<Self> {
        config.validate()?;
        let engine = UptakeEngine::new(config.coefficient_table()?, config.cost_bounds);
        let calculator = CostBenefitCalculator::from_config(&config)?;

        info!(
            experiments = engine.table().iter().count(),
            cost_items = calculator.components().len(),
            "Decision aid session ready"
        );

        Ok(Self {
            config,
            engine,
            wtp: WtpTableBuilder::default(),
            calculator,
            store,
            state: SessionState::Idle,
        })
    }

    pub fn config(&self) -> &AidConfig {
        &self.config
    }

    pub fn engine(&self) -> &UptakeEngine {
        &self.engine
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Validate the form and compute uptake for it
    ///
    /// Any failure leaves the session `Idle`: a stale probability must not
    /// survive a rejected edit.
    #[instrument(skip(self, input))]
    pub fn compute_uptake(&mut self, input: &ScenarioInput) -> Result<UptakeEstimate> {
        self.state = SessionState::Idle;
        let (scenario, estimate) = self.engine.estimate_input(input)?;
        self.state = SessionState::ProbabilityComputed {
            scenario,
            estimate: estimate.clone(),
        };
        Ok(estimate)
    }

    /// Any edit to the inputs invalidates the computed probability
    pub fn input_changed(&mut self) {
        if self.state != SessionState::Idle {
            debug!("Inputs changed, discarding computed probability");
        }
        self.state = SessionState::Idle;
    }

    /// Snapshot the current scenario and its probability
    pub fn save_current(&mut self) -> Result<SavedScenario> {
        let (scenario, estimate) = match &self.state {
            SessionState::Idle => return Err(ValidationError::ProbabilityNotComputed.into()),
            SessionState::Saved { .. } => return Err(ValidationError::AlreadySaved.into()),
            SessionState::ProbabilityComputed { scenario, estimate } => {
                (*scenario, estimate.clone())
            }
        };

        let saved = self.store.save(&scenario, estimate.probability_percent)?;
        info!(name = %saved.name, uptake = saved.uptake_probability, "Scenario saved");

        self.state = SessionState::Saved {
            scenario,
            estimate,
            saved: saved.clone(),
        };
        Ok(saved)
    }

    /// WTP table for the experiment of the current scenario
    pub fn wtp_table(&self) -> Result<Vec<WtpRecord>> {
        let experiment = self
            .state
            .scenario()
            .map(|s| s.experiment)
            .ok_or(ValidationError::ProbabilityNotComputed)?;
        self.wtp_table_for(experiment)
    }

    pub fn wtp_table_for(&self, experiment: ExperimentId) -> Result<Vec<WtpRecord>> {
        let set = self.engine.coefficients(experiment)?;
        self.wtp.build(experiment, set)
    }

    /// Cost-benefit at the last computed probability
    pub fn cost_benefit(&self, qaly_scenario: QalyScenario) -> Result<CostBenefitResult> {
        let estimate = self
            .state
            .estimate()
            .ok_or(ValidationError::ProbabilityNotComputed)?;
        self.calculator.compute(estimate.probability_percent, qaly_scenario)
    }

    /// Cost-benefit at an uptake supplied by the caller
    pub fn cost_benefit_at(
        &self,
        uptake_percent: f64,
        qaly_scenario: QalyScenario,
    ) -> Result<CostBenefitResult> {
        self.calculator.compute(uptake_percent, qaly_scenario)
    }

    pub fn saved(&self) -> Vec<SavedScenario> {
        self.store.list()
    }

    pub fn risk_wtp_comparison(&self) -> Result<RiskWtpComparison> {
        RiskWtpComparison::from_saved(&self.store.list(), self.engine.table(), &self.wtp)
    }

    pub fn report(&self) -> Result<ScenarioReport> {
        ScenarioReport::new(&self.store.list())
    }

    /// Start a new session: clear saved scenarios and the current state
    pub fn reset(&mut self) {
        self.store.clear();
        self.state = SessionState::Idle;
    }
}

impl std::fmt::Debug for DecisionAidSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecisionAidSession")
            .field("config", &self.config)
            .field("saved", &self.store.len())
            .field("state", &self.state)
            .finish()
    }
}
