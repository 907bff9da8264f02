//! Scenarios - user-selected plan configurations
//!
//! A [`ScenarioInput`] is the raw form state (every field optional text).
//! Validation turns it into a typed [`Scenario`] or reports every problem at
//! once. A [`SavedScenario`] is the immutable snapshot kept in the store.

use serde::{Deserialize, Serialize};

use crate::error::{FieldIssue, FieldProblem, ScenarioField, ValidationError};
use crate::types::levels::{EfficacyLevel, ExperimentId, RiskLevel};

/// Display value for attributes an experiment does not have
pub const NOT_APPLICABLE: &str = "N/A";

/// Inclusive bounds for monthly cost inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBounds {
    pub min: u32,
    /// `None` leaves cost unbounded above
    pub max: Option<u32>,
}

impl Default for CostBounds {
    fn default() -> Self {
        Self {
            min: crate::DEFAULT_MIN_COST,
            max: Some(crate::DEFAULT_MAX_COST),
        }
    }
}

impl CostBounds {
    /// No upper cost limit
    ///
    /// Very large costs drive the plan's choice probability below the smallest
    /// `f64`; the engine reports those as `ValidationError::ProbabilityDegenerate`.
    pub fn unbounded() -> Self {
        Self { min: 0, max: None }
    }

    pub fn contains(&self, value: i64) -> bool {
        value >= i64::from(self.min) && self.max.map_or(true, |max| value <= i64::from(max))
    }

    fn check(&self, field: ScenarioField, value: i64) -> Option<FieldIssue> {
        if self.contains(value) {
            None
        } else {
            Some(FieldIssue::new(
                field,
                FieldProblem::OutOfRange {
                    value,
                    min: self.min,
                    max: self.max,
                },
            ))
        }
    }
}

/// Attributes describing the welfare of others (experiment 3 only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OthersAttributes {
    pub efficacy: EfficacyLevel,
    pub risk: RiskLevel,
    /// Others' monthly cost (USD)
    pub cost: u32,
}

/// A validated plan configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub experiment: ExperimentId,
    pub efficacy_self: EfficacyLevel,
    pub risk_self: RiskLevel,
    /// Own monthly cost (USD)
    pub cost_self: u32,
    #[serde(default)]
    pub others: Option<OthersAttributes>,
}

impl Scenario {
    pub fn new(
        experiment: ExperimentId,
        efficacy_self: EfficacyLevel,
        risk_self: RiskLevel,
        cost_self: u32,
    ) -> Self {
        Self {
            experiment,
            efficacy_self,
            risk_self,
            cost_self,
            others: None,
        }
    }

    pub fn with_others(mut self, efficacy: EfficacyLevel, risk: RiskLevel, cost: u32) -> Self {
        self.others = Some(OthersAttributes {
            efficacy,
            risk,
            cost,
        });
        self
    }

    /// Domain check for scenarios built directly rather than from form input
    pub fn check(&self, bounds: &CostBounds) -> Result<(), ValidationError> {
        let mut issues = Vec::new();
        issues.extend(bounds.check(ScenarioField::CostSelf, i64::from(self.cost_self)));
        if self.experiment.has_others() {
            match &self.others {
                Some(others) => {
                    issues.extend(bounds.check(ScenarioField::CostOthers, i64::from(others.cost)))
                }
                None => issues.extend([
                    FieldIssue::missing(ScenarioField::EfficacyOthers),
                    FieldIssue::missing(ScenarioField::RiskOthers),
                    FieldIssue::missing(ScenarioField::CostOthers),
                ]),
            }
        }
        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::InvalidScenario(issues))
        }
    }

    /// Others attributes, only where the experiment defines them
    pub fn applicable_others(&self) -> Option<&OthersAttributes> {
        if self.experiment.has_others() {
            self.others.as_ref()
        } else {
            None
        }
    }
}

/// Raw scenario form state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioInput {
    pub experiment: Option<String>,
    pub efficacy: Option<String>,
    pub risk: Option<String>,
    pub cost: Option<String>,
    pub efficacy_others: Option<String>,
    pub risk_others: Option<String>,
    pub cost_others: Option<String>,
}

impl ScenarioInput {
    pub fn new(experiment: impl Into<String>) -> Self {
        Self {
            experiment: Some(experiment.into()),
            ..Self::default()
        }
    }

    /// Set own efficacy, risk and cost
    pub fn with_self(
        mut self,
        efficacy: impl Into<String>,
        risk: impl Into<String>,
        cost: impl Into<String>,
    ) -> Self {
        self.efficacy = Some(efficacy.into());
        self.risk = Some(risk.into());
        self.cost = Some(cost.into());
        self
    }

    /// Set others' efficacy, risk and cost
    pub fn with_others(
        mut self,
        efficacy: impl Into<String>,
        risk: impl Into<String>,
        cost: impl Into<String>,
    ) -> Self {
        self.efficacy_others = Some(efficacy.into());
        self.risk_others = Some(risk.into());
        self.cost_others = Some(cost.into());
        self
    }

    /// Validate every field, collecting all issues before failing
    pub fn validate(&self, bounds: &CostBounds) -> Result<Scenario, ValidationError> {
        let mut issues = Vec::new();

        let experiment = match present(&self.experiment) {
            None => {
                issues.push(FieldIssue::missing(ScenarioField::Experiment));
                None
            }
            Some(raw) => match raw.parse::<ExperimentId>() {
                Ok(experiment) => Some(experiment),
                Err(_) => {
                    issues.push(FieldIssue::new(
                        ScenarioField::Experiment,
                        FieldProblem::UnknownLevel {
                            raw: raw.to_string(),
                        },
                    ));
                    None
                }
            },
        };

        let efficacy = parse_level(
            &self.efficacy,
            ScenarioField::EfficacySelf,
            EfficacyLevel::parse,
            &mut issues,
        );
        let risk = parse_level(&self.risk, ScenarioField::RiskSelf, RiskLevel::parse, &mut issues);
        let cost = parse_cost(&self.cost, ScenarioField::CostSelf, bounds, &mut issues);

        let mut others = None;
        if experiment.map_or(false, |e| e.has_others()) {
            let efficacy = parse_level(
                &self.efficacy_others,
                ScenarioField::EfficacyOthers,
                EfficacyLevel::parse,
                &mut issues,
            );
            let risk = parse_level(
                &self.risk_others,
                ScenarioField::RiskOthers,
                RiskLevel::parse,
                &mut issues,
            );
            let cost = parse_cost(&self.cost_others, ScenarioField::CostOthers, bounds, &mut issues);
            if let (Some(efficacy), Some(risk), Some(cost)) = (efficacy, risk, cost) {
                others = Some(OthersAttributes {
                    efficacy,
                    risk,
                    cost,
                });
            }
        }

        match (experiment, efficacy, risk, cost) {
            (Some(experiment), Some(efficacy_self), Some(risk_self), Some(cost_self))
                if issues.is_empty() =>
            {
                Ok(Scenario {
                    experiment,
                    efficacy_self,
                    risk_self,
                    cost_self,
                    others,
                })
            }
            _ => Err(ValidationError::InvalidScenario(issues)),
        }
    }
}

impl From<&Scenario> for ScenarioInput {
    fn from(scenario: &Scenario) -> Self {
        let input = ScenarioInput::new(scenario.experiment.to_string()).with_self(
            scenario.efficacy_self.percent().to_string(),
            scenario.risk_self.percent().to_string(),
            scenario.cost_self.to_string(),
        );
        match &scenario.others {
            Some(others) => input.with_others(
                others.efficacy.percent().to_string(),
                others.risk.percent().to_string(),
                others.cost.to_string(),
            ),
            None => input,
        }
    }
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn parse_level<T>(
    field: &Option<String>,
    name: ScenarioField,
    parse: fn(&str) -> Option<T>,
    issues: &mut Vec<FieldIssue>,
) -> Option<T> {
    let Some(raw) = present(field) else {
        issues.push(FieldIssue::missing(name));
        return None;
    };
    let level = parse(raw);
    if level.is_none() {
        issues.push(FieldIssue::new(
            name,
            FieldProblem::UnknownLevel {
                raw: raw.to_string(),
            },
        ));
    }
    level
}

fn parse_cost(
    field: &Option<String>,
    name: ScenarioField,
    bounds: &CostBounds,
    issues: &mut Vec<FieldIssue>,
) -> Option<u32> {
    let Some(raw) = present(field) else {
        issues.push(FieldIssue::missing(name));
        return None;
    };
    let Ok(value) = raw.parse::<i64>() else {
        issues.push(FieldIssue::new(
            name,
            FieldProblem::NotAnInteger {
                raw: raw.to_string(),
            },
        ));
        return None;
    };
    if let Some(issue) = bounds.check(name, value) {
        issues.push(issue);
        return None;
    }
    match u32::try_from(value) {
        Ok(cost) => Some(cost),
        Err(_) => {
            issues.push(FieldIssue::new(
                name,
                FieldProblem::OutOfRange {
                    value,
                    min: bounds.min,
                    max: Some(u32::MAX),
                },
            ));
            None
        }
    }
}

/// Immutable snapshot of a scenario and the uptake computed for it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedScenario {
    pub id: uuid::Uuid,
    /// Sequential display name ("Scenario N")
    pub name: String,
    pub experiment: ExperimentId,
    pub efficacy_self: EfficacyLevel,
    pub risk_self: RiskLevel,
    pub cost_self: u32,
    /// Always `None` for experiments 1 and 2
    pub others: Option<OthersAttributes>,
    /// Uptake probability in percent, rounded to 2 decimals
    pub uptake_probability: f64,
    /// Unix milliseconds
    pub saved_at: i64,
}

impl SavedScenario {
    /// Snapshot `scenario` as the `sequence`-th saved scenario (1-based)
    pub fn new(sequence: usize, scenario: &Scenario, probability_percent: f64) -> Self {
        Self {
            id: uuid::Uuid::now_v7(),
            name: format!("Scenario {}", sequence),
            experiment: scenario.experiment,
            efficacy_self: scenario.efficacy_self,
            risk_self: scenario.risk_self,
            cost_self: scenario.cost_self,
            others: scenario.applicable_others().copied(),
            uptake_probability: round_to_cents(probability_percent),
            saved_at: chrono::Utc::now().timestamp_millis(),
        }
    }

    /// The scenario this snapshot was taken from
    pub fn scenario(&self) -> Scenario {
        Scenario {
            experiment: self.experiment,
            efficacy_self: self.efficacy_self,
            risk_self: self.risk_self,
            cost_self: self.cost_self,
            others: self.others,
        }
    }

    pub fn efficacy_others_display(&self) -> String {
        self.others
            .map(|o| o.efficacy.percent().to_string())
            .unwrap_or_else(|| NOT_APPLICABLE.to_string())
    }

    pub fn risk_others_display(&self) -> String {
        self.others
            .map(|o| o.risk.percent().to_string())
            .unwrap_or_else(|| NOT_APPLICABLE.to_string())
    }

    pub fn cost_others_display(&self) -> String {
        self.others
            .map(|o| o.cost.to_string())
            .unwrap_or_else(|| NOT_APPLICABLE.to_string())
    }

    /// Uptake formatted with exactly two decimals
    pub fn uptake_display(&self) -> String {
        format!("{:.2}", self.uptake_probability)
    }
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
