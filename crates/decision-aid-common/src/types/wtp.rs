//! Willingness-to-pay records
//!
//! WTP for an attribute level is its utility coefficient divided by the
//! absolute cost coefficient, giving the monthly dollar amount a respondent
//! would trade for that level relative to the reference.

use serde::{Deserialize, Serialize};

use crate::types::coefficients::CoefficientSet;
use crate::types::levels::{EfficacyLevel, RiskLevel};

/// Whose outcome an attribute describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Perspective {
    #[serde(rename = "self")]
    Own,
    Others,
}

impl Perspective {
    pub fn label(&self) -> &'static str {
        match self {
            Perspective::Own => "Self",
            Perspective::Others => "Others",
        }
    }
}

/// A non-reference attribute level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "attribute", content = "level")]
pub enum AttributeKey {
    Efficacy(EfficacyLevel),
    Risk(RiskLevel),
}

impl AttributeKey {
    /// Canonical order: efficacy levels, then risk levels
    pub const CANONICAL: [AttributeKey; 5] = [
        AttributeKey::Efficacy(EfficacyLevel::Fifty),
        AttributeKey::Efficacy(EfficacyLevel::Ninety),
        AttributeKey::Risk(RiskLevel::Eight),
        AttributeKey::Risk(RiskLevel::Sixteen),
        AttributeKey::Risk(RiskLevel::Thirty),
    ];

    pub fn is_risk(&self) -> bool {
        matches!(self, AttributeKey::Risk(_))
    }

    /// Coefficient for this level from `set`, `None` when the perspective is absent
    pub fn coefficient(&self, set: &CoefficientSet, perspective: Perspective) -> Option<f64> {
        let (efficacy, risk) = match perspective {
            Perspective::Own => (&set.efficacy, &set.risk),
            Perspective::Others => {
                let others = set.others.as_ref()?;
                (&others.efficacy, &others.risk)
            }
        };
        Some(match self {
            AttributeKey::Efficacy(level) => efficacy.for_level(*level),
            AttributeKey::Risk(level) => risk.for_level(*level),
        })
    }
}

impl std::fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttributeKey::Efficacy(level) => write!(f, "Efficacy {}", level),
            AttributeKey::Risk(level) => write!(f, "Risk {}", level),
        }
    }
}

/// Literature-supplied statistics for one attribute level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WtpReference {
    pub perspective: Perspective,
    pub attribute: AttributeKey,
    /// Standard error of the utility coefficient
    pub coefficient_se: f64,
    pub p_value: f64,
}

impl WtpReference {
    pub fn new(
        perspective: Perspective,
        attribute: AttributeKey,
        coefficient_se: f64,
        p_value: f64,
    ) -> Self {
        Self {
            perspective,
            attribute,
            coefficient_se,
            p_value,
        }
    }
}

/// One row of a WTP table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WtpRecord {
    /// e.g. "Risk 16%" or "Risk 16% (Others)"
    pub attribute_label: String,
    pub perspective: Perspective,
    pub attribute: AttributeKey,
    /// USD per month
    pub wtp: f64,
    pub standard_error: f64,
    pub p_value: f64,
}

impl WtpRecord {
    /// Label shown for an attribute; perspective is suffixed only when both exist
    pub fn label(attribute: AttributeKey, perspective: Perspective, qualify: bool) -> String {
        if qualify {
            format!("{} ({})", attribute, perspective.label())
        } else {
            attribute.to_string()
        }
    }

    /// Whether the estimate is significant at `alpha`
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}
