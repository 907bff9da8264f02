//! Canonical coefficient table

use decision_aid_common::{
    CoefficientSet, CoefficientTable, EfficacyCoefficients, ExperimentId, OthersCoefficients,
    Result, RiskCoefficients,
};

/// Experiment 1: self attributes, fixed plan constant
pub fn experiment_one() -> CoefficientSet {
    CoefficientSet {
        opt_out_constant: -0.553,
        plan_constant: Some(-0.203),
        mean_constant: None,
        efficacy: EfficacyCoefficients {
            fifty: 0.855,
            ninety: 1.558,
        },
        risk: RiskCoefficients {
            eight: -0.034,
            sixteen: -0.398,
            thirty: -0.531,
        },
        cost: -0.00123,
        others: None,
    }
}

/// Experiment 2: self attributes, random plan constant
pub fn experiment_two() -> CoefficientSet {
    CoefficientSet {
        opt_out_constant: -0.338,
        plan_constant: None,
        mean_constant: Some(-0.159),
        efficacy: EfficacyCoefficients {
            fifty: 1.031,
            ninety: 1.780,
        },
        risk: RiskCoefficients {
            eight: -0.054,
            sixteen: -0.305,
            thirty: -0.347,
        },
        cost: -0.00140,
        others: None,
    }
}

/// Experiment 3: self and others attributes, random plan constant
pub fn experiment_three() -> CoefficientSet {
    CoefficientSet {
        opt_out_constant: -0.344,
        plan_constant: None,
        mean_constant: Some(-0.160),
        efficacy: EfficacyCoefficients {
            fifty: 0.604,
            ninety: 1.267,
        },
        risk: RiskCoefficients {
            eight: -0.108,
            sixteen: -0.218,
            thirty: -0.339,
        },
        cost: -0.0007,
        others: Some(OthersCoefficients {
            efficacy: EfficacyCoefficients {
                fifty: 0.272,
                ninety: 0.370,
            },
            risk: RiskCoefficients {
                eight: -0.111,
                sixteen: -0.103,
                thirty: -0.197,
            },
            cost: -0.00041,
        }),
    }
}

/// The published coefficient table
pub fn canonical_coefficients() -> Result<CoefficientTable> {
    CoefficientTable::new([
        (ExperimentId::One, experiment_one()),
        (ExperimentId::Two, experiment_two()),
        (ExperimentId::Three, experiment_three()),
    ])
}
