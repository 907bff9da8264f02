//! Cost-benefit types - Net Benefit = QALY value - Cost
//!
//! Programme cost is split into fixed components (paid regardless of uptake)
//! and variable components that scale with the uptake fraction. Benefits are
//! QALY gains per participant, monetised at a fixed value per QALY.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ValidationError;

/// How a cost component responds to uptake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostBehavior {
    /// Paid in full whatever the uptake
    Fixed,
    /// Scales linearly with the uptake fraction
    Variable,
}

/// One line of the programme cost catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostComponent {
    pub item: String,
    /// Total cost in USD
    pub amount: Decimal,
}

impl CostComponent {
    /// Items that never scale with uptake
    pub const FIXED_ITEMS: [&'static str; 2] = ["Advertisement", "Training"];

    pub fn new(item: impl Into<String>, amount: Decimal) -> Self {
        Self {
            item: item.into(),
            amount,
        }
    }

    pub fn behavior(&self) -> CostBehavior {
        if Self::FIXED_ITEMS.contains(&self.item.as_str()) {
            CostBehavior::Fixed
        } else {
            CostBehavior::Variable
        }
    }
}

/// Assumed QALY gain per participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QalyScenario {
    Low,
    #[default]
    Moderate,
    High,
}

impl QalyScenario {
    pub const ALL: [QalyScenario; 3] = [QalyScenario::Low, QalyScenario::Moderate, QalyScenario::High];

    /// QALYs gained per participant
    pub fn qaly_gain(&self) -> Decimal {
        match self {
            QalyScenario::Low => Decimal::new(2, 2),
            QalyScenario::Moderate => Decimal::new(5, 2),
            QalyScenario::High => Decimal::new(10, 2),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QalyScenario::Low => "low",
            QalyScenario::Moderate => "moderate",
            QalyScenario::High => "high",
        }
    }
}

impl FromStr for QalyScenario {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(QalyScenario::Low),
            "moderate" => Ok(QalyScenario::Moderate),
            "high" => Ok(QalyScenario::High),
            _ => Err(ValidationError::UnknownQalyScenario(s.to_string())),
        }
    }
}

impl std::fmt::Display for QalyScenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full cost-benefit calculation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBenefitResult {
    /// Uptake probability the figures were computed for (percent)
    pub uptake_probability: f64,
    pub qaly_scenario: QalyScenario,
    /// Respondents expected to take up the plan
    pub participant_count: u32,
    /// Sum of fixed components
    pub fixed_cost: Decimal,
    /// Variable components scaled by uptake
    pub variable_cost: Decimal,
    /// fixed_cost + variable_cost, in USD, unrounded
    pub total_cost: Decimal,
    pub qaly_per_participant: Decimal,
    pub total_qaly: Decimal,
    /// total_qaly x value per QALY
    pub monetized_benefit: Decimal,
    /// monetized_benefit - total_cost
    pub net_benefit: Decimal,
    /// Catalog the cost was computed from
    pub components: Vec<CostComponent>,
}

impl CostBenefitResult {
    pub fn is_net_positive(&self) -> bool {
        self.net_benefit > Decimal::ZERO
    }

    /// Monetised benefit per dollar of cost
    pub fn benefit_cost_ratio(&self) -> Option<Decimal> {
        if self.total_cost > Decimal::ZERO {
            Some(self.monetized_benefit / self.total_cost)
        } else {
            None
        }
    }
}

/// Coarse reading of an uptake probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpretationTier {
    /// Below 30%
    Low,
    /// 30% up to (not including) 70%
    Moderate,
    /// 70% and above
    High,
}

impl InterpretationTier {
    pub fn from_probability(probability_percent: f64) -> Self {
        if probability_percent < crate::LOW_UPTAKE_THRESHOLD {
            InterpretationTier::Low
        } else if probability_percent < crate::MODERATE_UPTAKE_THRESHOLD {
            InterpretationTier::Moderate
        } else {
            InterpretationTier::High
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            InterpretationTier::Low => {
                "Uptake is relatively low. Consider reducing cost or improving efficacy."
            }
            InterpretationTier::Moderate => {
                "Uptake is moderate. Additional improvements could further boost health plan choice."
            }
            InterpretationTier::High => {
                "Uptake is high. Maintaining these attributes is recommended."
            }
        }
    }
}
