//! In-memory scenario store

use decision_aid_common::{ExperimentId, Result, SavedScenario, Scenario, ValidationError};
use parking_lot::RwLock;
use tracing::debug;

/// Trait for saved-scenario storage backends
pub trait ScenarioStore: Send + Sync {
    /// Snapshot `scenario` with the probability computed for it
    ///
    /// A probability of zero (or below) means nothing has been computed yet
    /// and is refused.
    fn save(&self, scenario: &Scenario, probability_percent: f64) -> Result<SavedScenario>;

    /// All snapshots in insertion order
    fn list(&self) -> Vec<SavedScenario>;

    /// Snapshots for one experiment, in insertion order
    fn by_experiment(&self, experiment: ExperimentId) -> Vec<SavedScenario> {
        self.list()
            .into_iter()
            .filter(|s| s.experiment == experiment)
            .collect()
    }

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every snapshot (session start)
    fn clear(&self);
}

/// In-memory storage implementation
#[derive(Debug, Default)]
pub struct InMemoryScenarioStore {
    saved: RwLock<Vec<SavedScenario>>,
}

impl InMemoryScenarioStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScenarioStore for InMemoryScenarioStore {
    fn save(&self, scenario: &Scenario, probability_percent: f64) -> Result<SavedScenario> {
        if !(probability_percent > 0.0) {
            return Err(ValidationError::ProbabilityNotComputed.into());
        }
        if probability_percent > 100.0 {
            return Err(ValidationError::ProbabilityOutOfRange(probability_percent).into());
        }

        let mut saved = self.saved.write();
        let snapshot = SavedScenario::new(saved.len() + 1, scenario, probability_percent);
        saved.push(snapshot.clone());

        debug!(name = %snapshot.name, experiment = %snapshot.experiment, "Saved scenario");
        Ok(snapshot)
    }

    fn list(&self) -> Vec<SavedScenario> {
        self.saved.read().clone()
    }

    fn len(&self) -> usize {
        self.saved.read().len()
    }

    fn clear(&self) {
        let mut saved = self.saved.write();
        debug!(cleared = saved.len(), "Cleared saved scenarios");
        saved.clear();
    }
}
