//! Rule-Based Aging Clock
//!
//! Classifies a feature vector into an age band by summing the features and
//! dispatching on an ordered list of (upper-bound, label, age) bands. No
//! learned model: the thresholds are fixed demo values.

use serde::Serialize;

/// A predicted age band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AgePrediction {
    pub label: &'static str,
    pub age_value: u32,
}

/// One band of the rule table: feature sums up to `upper` (exclusive unless
/// `inclusive`) fall into this band.
struct AgeBand {
    upper: f64,
    inclusive: bool,
    label: &'static str,
    age_value: u32,
}

/// Ordered age bands, evaluated first match wins. Boundaries follow the
/// rule: sum < 150 is Young, 150 <= sum <= 300 is Mid, sum > 300 is Old.
const AGE_BANDS: &[AgeBand] = &[
    AgeBand { upper: 150.0, inclusive: false, label: "Young", age_value: 25 },
    AgeBand { upper: 300.0, inclusive: true, label: "Mid", age_value: 45 },
];

/// Fallthrough band for sums above every upper bound.
const OLD_BAND: AgePrediction = AgePrediction {
    label: "Old",
    age_value: 70,
};

/// Predict an age band from a feature vector.
///
/// The features are summed; an empty vector sums to 0 and lands in the
/// youngest band. Pure and deterministic.
pub fn predict_age(features: &[f64]) -> AgePrediction {
    let total: f64 = features.iter().sum();

    for band in AGE_BANDS {
        let within = if band.inclusive {
            total <= band.upper
        } else {
            total < band.upper
        };
        if within {
            return AgePrediction {
                label: band.label,
                age_value: band.age_value,
            };
        }
    }

    OLD_BAND
}
