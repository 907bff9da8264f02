//! Decision aid configuration

use decision_aid_common::{AidError, CoefficientTable, CostBounds, CostComponent, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::catalog;

/// Runtime configuration for the decision aid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AidConfig {
    /// Accepted range for monthly cost inputs
    pub cost_bounds: CostBounds,
    /// Respondents the uptake fraction is scaled against
    pub total_sample_size: u32,
    /// USD per QALY
    pub value_per_qaly: u32,
    /// Optional JSON file replacing the canonical coefficient table
    pub coefficients_path: Option<PathBuf>,
    /// Optional JSON file replacing the canonical cost catalog
    pub cost_catalog_path: Option<PathBuf>,
}

impl Default for AidConfig {
    fn default() -> Self {
        Self {
            cost_bounds: CostBounds::default(),
            total_sample_size: decision_aid_common::TOTAL_SAMPLE_SIZE,
            value_per_qaly: decision_aid_common::VALUE_PER_QALY,
            coefficients_path: None,
            cost_catalog_path: None,
        }
    }
}

impl AidConfig {
    /// Load configuration from `.env` and `DECISION_AID_*` environment variables
    pub fn load() -> Result<Self> {
        // Try to load .env file
        let _ = dotenvy::dotenv();

        let mut cfg = Self::default();

        if let Some(max) = env_parse::<u32>("DECISION_AID_COST_MAX") {
            cfg.cost_bounds.max = Some(max);
        }
        if let Some(min) = env_parse::<u32>("DECISION_AID_COST_MIN") {
            cfg.cost_bounds.min = min;
        }
        if env_parse::<bool>("DECISION_AID_COST_UNBOUNDED").unwrap_or(false) {
            cfg.cost_bounds.max = None;
        }
        if let Some(size) = env_parse("DECISION_AID_SAMPLE_SIZE") {
            cfg.total_sample_size = size;
        }
        if let Some(value) = env_parse("DECISION_AID_VALUE_PER_QALY") {
            cfg.value_per_qaly = value;
        }
        if let Ok(path) = std::env::var("DECISION_AID_COEFFICIENTS_PATH") {
            cfg.coefficients_path = Some(PathBuf::from(path));
        }
        if let Ok(path) = std::env::var("DECISION_AID_COST_CATALOG_PATH") {
            cfg.cost_catalog_path = Some(PathBuf::from(path));
        }

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(max) = self.cost_bounds.max {
            if max < self.cost_bounds.min {
                return Err(AidError::Config(format!(
                    "cost bounds are empty: min {} > max {}",
                    self.cost_bounds.min, max
                )));
            }
        }
        if self.total_sample_size == 0 {
            return Err(AidError::Config("total sample size must be positive".to_string()));
        }
        Ok(())
    }

    /// Coefficient table from `coefficients_path`, or the canonical one
    pub fn coefficient_table(&self) -> Result<CoefficientTable> {
        match &self.coefficients_path {
            Some(path) => {
                debug!(path = %path.display(), "Loading coefficient table");
                let content = std::fs::read_to_string(path).map_err(|e| {
                    AidError::Config(format!("Failed to read coefficients file: {}", e))
                })?;
                CoefficientTable::from_json(&content)
            }
            None => catalog::canonical_coefficients(),
        }
    }

    /// Cost catalog from `cost_catalog_path`, or the canonical one
    pub fn cost_catalog(&self) -> Result<Vec<CostComponent>> {
        match &self.cost_catalog_path {
            Some(path) => {
                debug!(path = %path.display(), "Loading cost catalog");
                let content = std::fs::read_to_string(path).map_err(|e| {
                    AidError::Config(format!("Failed to read cost catalog file: {}", e))
                })?;
                let components: Vec<CostComponent> = serde_json::from_str(&content)
                    .map_err(|e| AidError::Config(format!("Failed to parse cost catalog: {}", e)))?;
                catalog::validate_cost_catalog(&components)?;
                Ok(components)
            }
            None => Ok(catalog::canonical_cost_catalog()),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "Ignoring unparseable configuration value");
            None
        }
    }
}
