//! Free cash flow coverage of total dividends paid

use super::ratio::round_to;
use super::RatioValue;
use crate::company::YearlyFinancials;
use crate::error::{MetricsError, MetricsResult};
use log::debug;
use serde::{Deserialize, Serialize};

/// FCF against total dividends for one fiscal year (EUR millions)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FcfCoverage {
    pub year: u16,
    pub free_cash_flow: f64,

    /// DPS times shares outstanding, rounded to 0.1M
    pub total_dividends: f64,

    /// Times the dividend is funded by FCF, rounded to 2 decimals
    pub coverage: RatioValue,
}

/// Total cash paid out for a DPS, in the same unit as the share count
pub fn total_dividends(dps: f64, shares_outstanding: f64) -> f64 {
    round_to(dps * shares_outstanding, 1)
}

/// Coverage for every year with a positive dividend
///
/// Coverage is only defined when FCF is positive; a negative FCF year
/// is kept in the series with a `NotMeaningful` multiple.
pub fn compute_fcf_coverage(
    financials: &[YearlyFinancials],
    shares_outstanding: f64,
) -> MetricsResult<Vec<FcfCoverage>> {
    if !(shares_outstanding.is_finite() && shares_outstanding > 0.0) {
        return Err(MetricsError::InvalidShares(shares_outstanding));
    }

    financials
        .iter()
        .filter(|fin| fin.pays_dividend())
        .map(|fin| {
            if !fin.free_cash_flow.is_finite() {
                return Err(MetricsError::NonFinite {
                    year: fin.year,
                    field: "free_cash_flow",
                });
            }

            let total = total_dividends(fin.dps, shares_outstanding);
            let coverage = if fin.free_cash_flow > 0.0 {
                RatioValue::over_positive(fin.free_cash_flow, total, 1.0).map(|c| round_to(c, 2))
            } else {
                RatioValue::NotMeaningful
            };
            debug!(
                "{}: FCF {:.2}M vs dividends {:.1}M, coverage {:.2}",
                fin.year, fin.free_cash_flow, total, coverage
            );

            Ok(FcfCoverage {
                year: fin.year,
                free_cash_flow: fin.free_cash_flow,
                total_dividends: total,
                coverage,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Dataset;

    #[test]
    fn test_reference_coverage() {
        let data = Dataset::enav_reference();
        let cov = compute_fcf_coverage(&data.financials, data.profile.shares_outstanding).unwrap();

        let years: Vec<u16> = cov.iter().map(|c| c.year).collect();
        assert_eq!(years, vec![2021, 2022, 2023, 2024]);

        let totals: Vec<f64> = cov.iter().map(|c| c.total_dividends).collect();
        assert_eq!(totals, vec![58.6, 106.6, 124.6, 146.3]);

        assert_eq!(cov[0].coverage, RatioValue::NotMeaningful);
        assert_eq!(cov[1].coverage, RatioValue::Defined(1.31));
        assert_eq!(cov[2].coverage, RatioValue::Defined(0.80));
        assert_eq!(cov[3].coverage, RatioValue::Defined(1.36));
    }

    #[test]
    fn test_invalid_share_count() {
        let data = Dataset::enav_reference();
        for shares in [0.0, -1.0, f64::NAN] {
            assert!(compute_fcf_coverage(&data.financials, shares).is_err());
        }
    }

    #[test]
    fn test_years_without_dividend_skipped() {
        let data = Dataset::enav_reference();
        let cov = compute_fcf_coverage(&data.financials[..2], 541.74).unwrap();
        assert!(cov.is_empty());
    }
}
