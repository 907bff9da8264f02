//! Risk WTP comparison across experiments
//!
//! Contrasts how much respondents would need to be compensated for side-effect
//! risk depending on whether equity (others' outcomes) was part of the choice.
//! Only experiments with at least one saved scenario are included.

use decision_aid_common::{
    AidError, AttributeKey, CoefficientTable, ExperimentId, Result, RiskLevel, SavedScenario,
    WtpRecord,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::builder::WtpTableBuilder;

/// Risk WTP for one experiment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskWtpRow {
    pub experiment: ExperimentId,
    /// (level, USD/month); experiment 3 averages the Self and Others rows
    pub values: Vec<(RiskLevel, f64)>,
}

impl RiskWtpRow {
    pub fn value(&self, level: RiskLevel) -> Option<f64> {
        self.values
            .iter()
            .find(|(l, _)| *l == level)
            .map(|(_, v)| *v)
    }
}

/// Comparison over the experiments present in a set of saved scenarios
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RiskWtpComparison {
    pub rows: Vec<RiskWtpRow>,
}

impl RiskWtpComparison {
    pub const LEVELS: [RiskLevel; 3] = [RiskLevel::Eight, RiskLevel::Sixteen, RiskLevel::Thirty];

    pub fn from_saved(
        saved: &[SavedScenario],
        table: &CoefficientTable,
        builder: &WtpTableBuilder,
    ) -> Result<Self> {
        let experiments: BTreeSet<ExperimentId> = saved.iter().map(|s| s.experiment).collect();

        let mut rows = Vec::with_capacity(experiments.len());
        for experiment in experiments {
            let set = table.get(experiment).ok_or_else(|| {
                AidError::Config(format!(
                    "no coefficients for experiment {}",
                    experiment
                ))
            })?;
            let records = builder.build(experiment, set)?;
            let values = Self::LEVELS
                .into_iter()
                .filter_map(|level| risk_wtp(&records, level).map(|v| (level, v)))
                .collect();
            rows.push(RiskWtpRow { experiment, values });
        }

        Ok(Self { rows })
    }

    pub fn row(&self, experiment: ExperimentId) -> Option<&RiskWtpRow> {
        self.rows.iter().find(|r| r.experiment == experiment)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Mean WTP of the rows for `level` over every perspective in the table
fn risk_wtp(records: &[WtpRecord], level: RiskLevel) -> Option<f64> {
    let matching: Vec<f64> = records
        .iter()
        .filter(|r| r.attribute == AttributeKey::Risk(level))
        .map(|r| r.wtp)
        .collect();
    if matching.is_empty() {
        None
    } else {
        Some(matching.iter().sum::<f64>() / matching.len() as f64)
    }
}
