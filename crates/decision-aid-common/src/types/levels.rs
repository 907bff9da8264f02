//! Attribute levels and experiment identifiers
//!
//! Levels are the percentages shown on the choice cards. The 0% level of each
//! attribute is the reference level and contributes nothing to utility.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ValidationError;

/// Which discrete-choice experiment a scenario belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExperimentId {
    /// Self attributes, fixed plan constant
    #[serde(rename = "1")]
    One,
    /// Self attributes, random (mean) plan constant
    #[serde(rename = "2")]
    Two,
    /// Self and others attributes, random (mean) plan constant
    #[serde(rename = "3")]
    Three,
}

impl ExperimentId {
    pub const ALL: [ExperimentId; 3] = [ExperimentId::One, ExperimentId::Two, ExperimentId::Three];

    pub fn number(&self) -> u8 {
        match self {
            ExperimentId::One => 1,
            ExperimentId::Two => 2,
            ExperimentId::Three => 3,
        }
    }

    /// Whether scenarios for this experiment carry "others" attributes
    pub fn has_others(&self) -> bool {
        matches!(self, ExperimentId::Three)
    }

    /// Display name used in saved-scenario tables ("Experiment N")
    pub fn display_name(&self) -> String {
        format!("Experiment {}", self.number())
    }
}

impl std::fmt::Display for ExperimentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl FromStr for ExperimentId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(ExperimentId::One),
            "2" => Ok(ExperimentId::Two),
            "3" => Ok(ExperimentId::Three),
            other => Err(ValidationError::UnknownExperiment(other.to_string())),
        }
    }
}

/// Treatment efficacy level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EfficacyLevel {
    /// 0% (reference)
    #[default]
    #[serde(rename = "0")]
    Reference,
    #[serde(rename = "50")]
    Fifty,
    #[serde(rename = "90")]
    Ninety,
}

impl EfficacyLevel {
    pub const ALL: [EfficacyLevel; 3] = [
        EfficacyLevel::Reference,
        EfficacyLevel::Fifty,
        EfficacyLevel::Ninety,
    ];

    pub fn percent(&self) -> u8 {
        match self {
            EfficacyLevel::Reference => 0,
            EfficacyLevel::Fifty => 50,
            EfficacyLevel::Ninety => 90,
        }
    }

    /// Parse a form value such as `"50"`
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|level| raw.trim() == level.percent().to_string())
    }
}

impl std::fmt::Display for EfficacyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

/// Risk of side effects level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RiskLevel {
    /// 0% (reference)
    #[default]
    #[serde(rename = "0")]
    Reference,
    #[serde(rename = "8")]
    Eight,
    #[serde(rename = "16")]
    Sixteen,
    #[serde(rename = "30")]
    Thirty,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 4] = [
        RiskLevel::Reference,
        RiskLevel::Eight,
        RiskLevel::Sixteen,
        RiskLevel::Thirty,
    ];

    pub fn percent(&self) -> u8 {
        match self {
            RiskLevel::Reference => 0,
            RiskLevel::Eight => 8,
            RiskLevel::Sixteen => 16,
            RiskLevel::Thirty => 30,
        }
    }

    /// Parse a form value such as `"16"`
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|level| raw.trim() == level.percent().to_string())
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_experiment_parse() {
        assert_eq!("1".parse::<ExperimentId>().unwrap(), ExperimentId::One);
        assert_eq!(" 3 ".parse::<ExperimentId>().unwrap(), ExperimentId::Three);
        assert_eq!(
            "4".parse::<ExperimentId>(),
            Err(ValidationError::UnknownExperiment("4".to_string()))
        );
    }

    #[test]
    fn test_only_experiment_three_has_others() {
        assert!(!ExperimentId::One.has_others());
        assert!(!ExperimentId::Two.has_others());
        assert!(ExperimentId::Three.has_others());
    }

    #[test]
    fn test_level_parse() {
        assert_eq!(EfficacyLevel::parse("0"), Some(EfficacyLevel::Reference));
        assert_eq!(EfficacyLevel::parse("90"), Some(EfficacyLevel::Ninety));
        assert_eq!(EfficacyLevel::parse("75"), None);
        assert_eq!(RiskLevel::parse("16"), Some(RiskLevel::Sixteen));
        assert_eq!(RiskLevel::parse("N/A"), None);
    }

    #[test]
    fn test_levels_serialize_as_percent_strings() {
        assert_eq!(serde_json::to_string(&RiskLevel::Thirty).unwrap(), "\"30\"");
        assert_eq!(serde_json::to_string(&ExperimentId::Two).unwrap(), "\"2\"");
        let level: EfficacyLevel = serde_json::from_str("\"50\"").unwrap();
        assert_eq!(level, EfficacyLevel::Fifty);
    }
}
