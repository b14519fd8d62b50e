//! Payout ratios against earnings and free cash flow per share

use super::yields::check_dividend;
use super::RatioValue;
use crate::company::YearlyFinancials;
use crate::error::{MetricsError, MetricsResult};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Per-share inputs of the payout calculation for one fiscal year
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayoutInput {
    pub year: u16,
    pub eps: f64,
    pub dps: f64,
    pub fcf_per_share: f64,
}

impl PayoutInput {
    pub fn new(year: u16, eps: f64, dps: f64, fcf_per_share: f64) -> Self {
        Self {
            year,
            eps,
            dps,
            fcf_per_share,
        }
    }

    fn validate(&self) -> MetricsResult<()> {
        for (field, value) in [("eps", self.eps), ("fcf_per_share", self.fcf_per_share)] {
            if !value.is_finite() {
                return Err(MetricsError::NonFinite {
                    year: self.year,
                    field,
                });
            }
        }
        check_dividend(self.year, self.dps)?;
        if self.eps == 0.0 {
            return Err(MetricsError::ZeroEarnings { year: self.year });
        }
        Ok(())
    }
}

impl From<&YearlyFinancials> for PayoutInput {
    fn from(fin: &YearlyFinancials) -> Self {
        Self::new(fin.year, fin.diluted_eps, fin.dps, fin.fcf_per_share)
    }
}

/// Payout ratios derived for one fiscal year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedRatios {
    pub year: u16,
    pub dps: f64,
    pub eps: f64,
    pub fcf_per_share: f64,

    /// DPS / EPS in percent, never suppressed
    pub payout_vs_eps: f64,

    /// DPS / FCF per share in percent, not meaningful when FCF per share <= 0
    pub payout_vs_fcf: RatioValue,
}

impl DerivedRatios {
    pub fn pays_dividend(&self) -> bool {
        self.dps > 0.0
    }
}

/// Derive the payout ratios for a single year
pub fn compute_payout_ratio(input: &PayoutInput) -> MetricsResult<DerivedRatios> {
    input.validate()?;

    if input.eps < 0.0 {
        warn!(
            "{}: negative EPS {:.4}, payout vs EPS is negative",
            input.year, input.eps
        );
    }

    let payout_vs_eps = input.dps / input.eps * 100.0;
    let payout_vs_fcf = RatioValue::over_positive(input.dps, input.fcf_per_share, 100.0);

    if !payout_vs_fcf.is_meaningful() && input.dps > 0.0 {
        warn!(
            "{}: FCF per share {:.2} is not positive, payout vs FCF not meaningful",
            input.year, input.fcf_per_share
        );
    }
    debug!(
        "{}: payout vs EPS {:.2}%, payout vs FCF {:.2}",
        input.year, payout_vs_eps, payout_vs_fcf
    );

    Ok(DerivedRatios {
        year: input.year,
        dps: input.dps,
        eps: input.eps,
        fcf_per_share: input.fcf_per_share,
        payout_vs_eps,
        payout_vs_fcf,
    })
}

/// Derive the payout ratios for every year, in input order
pub fn compute_payout_ratios(inputs: &[PayoutInput]) -> MetricsResult<Vec<DerivedRatios>> {
    inputs.iter().map(compute_payout_ratio).collect()
}
