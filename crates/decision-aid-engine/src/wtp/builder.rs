//! WTP table builder

use decision_aid_common::{
    AidError, AttributeKey, CoefficientSet, CoefficientTable, ExperimentId, Perspective, Result,
    WtpRecord,
};
use tracing::{debug, instrument};

use crate::catalog::WtpReferenceTable;

/// Builds WTP tables from coefficients and published standard errors
#[derive(Debug, Clone, Default)]
pub struct WtpTableBuilder {
    references: WtpReferenceTable,
}

impl WtpTableBuilder {
    pub fn new(references: WtpReferenceTable) -> Self {
        Self { references }
    }

    pub fn references(&self) -> &WtpReferenceTable {
        &self.references
    }

    /// Build the table for an experiment id given as text (e.g. from a form)
    pub fn build_for_id(&self, experiment_id: &str, table: &CoefficientTable) -> Result<Vec<WtpRecord>> {
        let experiment: ExperimentId = experiment_id.parse()?;
        let set = table.get(experiment).ok_or_else(|| {
            AidError::Config(format!("no coefficients for experiment {}", experiment))
        })?;
        self.build(experiment, set)
    }

    /// Rows in canonical order: self efficacy, self risk, then the others
    /// mirrors for experiment 3.
    ///
    /// Every row, "others" rows included, is divided by the *self* cost
    /// coefficient. This is the published modelling choice; the others cost
    /// coefficient is deliberately not used as a denominator here.
    #[instrument(skip(self, set))]
    pub fn build(&self, experiment: ExperimentId, set: &CoefficientSet) -> Result<Vec<WtpRecord>> {
        let denominator = set.cost.abs();
        if denominator == 0.0 || !denominator.is_finite() {
            return Err(AidError::Config(format!(
                "experiment {} cost coefficient {} cannot scale WTP",
                experiment, set.cost
            )));
        }

        let qualify = experiment.has_others();
        let perspectives: &[Perspective] = if qualify {
            &[Perspective::Own, Perspective::Others]
        } else {
            &[Perspective::Own]
        };

        let mut records = Vec::with_capacity(perspectives.len() * AttributeKey::CANONICAL.len());
        for &perspective in perspectives {
            for attribute in AttributeKey::CANONICAL {
                let coefficient = attribute.coefficient(set, perspective).ok_or_else(|| {
                    AidError::Config(format!(
                        "experiment {} has no {} coefficients",
                        experiment,
                        perspective.label()
                    ))
                })?;
                let reference = self
                    .references
                    .find(experiment, perspective, attribute)
                    .ok_or_else(|| {
                        AidError::Config(format!(
                            "no published statistics for {} in experiment {}",
                            WtpRecord::label(attribute, perspective, qualify),
                            experiment
                        ))
                    })?;

                records.push(WtpRecord {
                    attribute_label: WtpRecord::label(attribute, perspective, qualify),
                    perspective,
                    attribute,
                    wtp: coefficient / denominator,
                    standard_error: reference.coefficient_se / denominator,
                    p_value: reference.p_value,
                });
            }
        }

        debug!(rows = records.len(), "Built WTP table");
        Ok(records)
    }
}

/// WTP table for `experiment` using the published standard errors
pub fn build_wtp_table(experiment: ExperimentId, set: &CoefficientSet) -> Result<Vec<WtpRecord>> {
    WtpTableBuilder::default().build(experiment, set)
}
