//! Ratio values that may be undefined

use serde::{Deserialize, Serialize};
use std::fmt;

/// A ratio computed against a denominator that may not be positive
///
/// `NotMeaningful` is reported as `0.0` in tabular output, but consumers that
/// need to tell "0%" from "undefined" can match on the variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RatioValue {
    Defined(f64),
    NotMeaningful,
}

impl RatioValue {
    /// `numerator / denominator * scale`, or `NotMeaningful` when the denominator is not positive
    pub fn over_positive(numerator: f64, denominator: f64, scale: f64) -> Self {
        if denominator > 0.0 {
            RatioValue::Defined(numerator / denominator * scale)
        } else {
            RatioValue::NotMeaningful
        }
    }

    /// Value as shown in tables and charts; zero when not meaningful
    pub fn reported(&self) -> f64 {
        match self {
            RatioValue::Defined(v) => *v,
            RatioValue::NotMeaningful => 0.0,
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            RatioValue::Defined(v) => Some(*v),
            RatioValue::NotMeaningful => None,
        }
    }

    pub fn is_meaningful(&self) -> bool {
        matches!(self, RatioValue::Defined(_))
    }

    pub fn map(self, f: impl FnOnce(f64) -> f64) -> Self {
        match self {
            RatioValue::Defined(v) => RatioValue::Defined(f(v)),
            RatioValue::NotMeaningful => RatioValue::NotMeaningful,
        }
    }
}

impl fmt::Display for RatioValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // precision applies to the number only, width right-aligns either form
        let text = match (self, f.precision()) {
            (RatioValue::Defined(v), Some(p)) => format!("{:.*}", p, v),
            (RatioValue::Defined(v), None) => v.to_string(),
            (RatioValue::NotMeaningful, _) => "n.m.".to_string(),
        };
        match f.width() {
            Some(w) => write!(f, "{:>w$}", text, w = w),
            None => f.write_str(&text),
        }
    }
}

/// Compound annual growth from `start` to `end` over `years`, in percent
///
/// Not meaningful unless both ends and the span are positive.
pub(crate) fn compound_growth(start: f64, end: f64, years: f64) -> RatioValue {
    if start <= 0.0 || end <= 0.0 || years <= 0.0 {
        return RatioValue::NotMeaningful;
    }
    RatioValue::Defined(((end / start).powf(1.0 / years) - 1.0) * 100.0)
}

/// Round half away from zero to `decimals` places
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
