//! Saved-scenario report export

use decision_aid_common::{AidError, Result, SavedScenario, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::Path;
use tracing::info;

pub const REPORT_TITLE: &str = "T2DM Equity-Efficiency Decision Aid - Saved Scenarios";

/// Export of the saved scenarios of one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub title: String,
    /// Unix milliseconds
    pub generated_at: i64,
    pub scenarios: Vec<SavedScenario>,
}

impl ScenarioReport {
    pub fn new(scenarios: &[SavedScenario]) -> Result<Self> {
        if scenarios.is_empty() {
            return Err(ValidationError::NoSavedScenarios.into());
        }
        Ok(Self {
            title: REPORT_TITLE.to_string(),
            generated_at: chrono::Utc::now().timestamp_millis(),
            scenarios: scenarios.to_vec(),
        })
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.title);
        let _ = writeln!(out, "{}", "=".repeat(self.title.len()));

        for scenario in &self.scenarios {
            let _ = writeln!(out);
            let _ = writeln!(out, "{}:", scenario.name);
            let _ = writeln!(out, "  Experiment: {}", scenario.experiment.display_name());
            let _ = writeln!(out, "  Efficacy (Self): {}%", scenario.efficacy_self.percent());
            let _ = writeln!(out, "  Risk (Self): {}%", scenario.risk_self.percent());
            let _ = writeln!(out, "  Monthly Cost (Self): ${}", scenario.cost_self);
            if let Some(others) = &scenario.others {
                let _ = writeln!(out, "  Efficacy (Others): {}%", others.efficacy.percent());
                let _ = writeln!(out, "  Risk (Others): {}%", others.risk.percent());
                let _ = writeln!(out, "  Monthly Cost (Others): ${}", others.cost);
            }
            let _ = writeln!(
                out,
                "  Predicted Uptake Probability: {}%",
                scenario.uptake_display()
            );
        }
        out
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the report to `path`; `.json` files get JSON, anything else text
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        let content = if is_json { self.to_json()? } else { self.to_text() };

        std::fs::write(path, content).map_err(|e| {
            AidError::Io(format!("Failed to write report {}: {}", path.display(), e))
        })?;
        info!(path = %path.display(), scenarios = self.scenarios.len(), "Wrote scenario report");
        Ok(())
    }
}
