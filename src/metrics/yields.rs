//! Dividend yield, dividend growth and yield spread over benchmarks

use super::ratio::{compound_growth, round_to};
use super::RatioValue;
use crate::company::{DividendKind, DividendRecord, PeerYield};
use crate::error::{MetricsError, MetricsResult};
use serde::{Deserialize, Serialize};

/// Dividend yield at the reference price for one year's DPS
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YieldPoint {
    pub year: u16,
    pub dps: f64,
    pub kind: DividendKind,
    /// Percent, rounded to 2 decimals
    pub yield_pct: f64,
}

/// Year-over-year change in DPS
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DividendGrowth {
    pub year: u16,
    pub dps: f64,
    /// Percent change vs the previous record; not meaningful after a zero dividend
    pub growth_pct: RatioValue,
}

/// Company forward yield against one benchmark
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerSpread {
    pub name: String,
    pub yield_pct: f64,
    /// Company yield minus benchmark yield, percentage points
    pub spread_pp: f64,
}

/// DPS must be finite and not negative
pub(crate) fn check_dividend(year: u16, dps: f64) -> MetricsResult<()> {
    if !dps.is_finite() {
        return Err(MetricsError::NonFinite { year, field: "dps" });
    }
    if dps < 0.0 {
        return Err(MetricsError::NegativeDividend { year, dps });
    }
    Ok(())
}

/// DPS as a percentage of the share price, rounded to 2 decimals
pub fn dividend_yield(dps: f64, price: f64) -> MetricsResult<f64> {
    if !(price.is_finite() && price > 0.0) {
        return Err(MetricsError::InvalidPrice(price));
    }
    Ok(round_to(dps / price * 100.0, 2))
}

pub fn yield_series(dividends: &[DividendRecord], price: f64) -> MetricsResult<Vec<YieldPoint>> {
    dividends
        .iter()
        .map(|d| {
            check_dividend(d.year, d.dps)?;
            Ok(YieldPoint {
                year: d.year,
                dps: d.dps,
                kind: d.kind,
                yield_pct: dividend_yield(d.dps, price)?,
            })
        })
        .collect()
}

/// Growth of each record over the one before it; the first record has none
pub fn dividend_growth(dividends: &[DividendRecord]) -> MetricsResult<Vec<DividendGrowth>> {
    let mut growth = Vec::with_capacity(dividends.len());
    let mut previous: Option<f64> = None;

    for d in dividends {
        check_dividend(d.year, d.dps)?;
        let growth_pct = match previous {
            Some(prev) => RatioValue::over_positive(d.dps - prev, prev, 100.0),
            None => RatioValue::NotMeaningful,
        };
        growth.push(DividendGrowth {
            year: d.year,
            dps: d.dps,
            growth_pct,
        });
        previous = Some(d.dps);
    }

    Ok(growth)
}

/// Compound annual growth of DPS between two records, in percent
pub fn plan_cagr(from: &DividendRecord, to: &DividendRecord) -> RatioValue {
    let years = f64::from(to.year) - f64::from(from.year);
    compound_growth(from.dps, to.dps, years)
}

/// Spread of the company yield over each benchmark, rounded to 2 decimals
pub fn peer_spreads(peers: &[PeerYield], company_yield_pct: f64) -> Vec<PeerSpread> {
    peers
        .iter()
        .map(|p| PeerSpread {
            name: p.name.clone(),
            yield_pct: p.yield_pct,
            spread_pp: round_to(company_yield_pct - p.yield_pct, 2),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Dataset;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_headline_yields() {
        assert_eq!(dividend_yield(0.23, 3.60).unwrap(), 6.39);
        assert_eq!(dividend_yield(0.27, 3.60).unwrap(), 7.5);
        assert_eq!(dividend_yield(0.0, 3.60).unwrap(), 0.0);
    }

    #[test]
    fn test_invalid_price() {
        assert_eq!(dividend_yield(0.23, 0.0), Err(MetricsError::InvalidPrice(0.0)));
        assert!(dividend_yield(0.23, -3.6).is_err());
        assert!(yield_series(&Dataset::enav_reference().dividends, f64::INFINITY).is_err());
    }

    #[test]
    fn test_yield_series_keeps_kind() {
        let data = Dataset::enav_reference();
        let series = yield_series(&data.dividends, 3.60).unwrap();
        assert_eq!(series.len(), 11);
        assert_eq!(series[5].kind, DividendKind::Proposed);
        assert_eq!(series[10].yield_pct, 8.89);
    }

    #[test]
    fn test_bad_dividend_rejected() {
        let mut dividends = Dataset::enav_reference().dividends;
        dividends[7].dps = f64::NAN;
        assert_eq!(
            yield_series(&dividends, 3.60).unwrap_err(),
            MetricsError::NonFinite { year: 2026, field: "dps" }
        );
        assert!(dividend_growth(&dividends).is_err());

        dividends[7].dps = -0.29;
        assert!(matches!(
            dividend_growth(&dividends).unwrap_err(),
            MetricsError::NegativeDividend { year: 2026, .. }
        ));
        assert!(yield_series(&dividends, 3.60).is_err());
    }

    #[test]
    fn test_dividend_growth() {
        let data = Dataset::enav_reference();
        let growth = dividend_growth(&data.dividends).unwrap();

        assert_eq!(growth[0].growth_pct, RatioValue::NotMeaningful);
        // Restart after the cancelled 2020 dividend has no base
        assert_eq!(growth[2].growth_pct, RatioValue::NotMeaningful);

        let proposed = growth.iter().find(|g| g.year == 2024).unwrap();
        assert_abs_diff_eq!(proposed.growth_pct.reported(), 17.391, epsilon = 1e-3);
    }

    #[test]
    fn test_plan_cagr() {
        let from = DividendRecord::new(2024, 0.27, DividendKind::Proposed);
        let to = DividendRecord::new(2029, 0.32, DividendKind::Plan);
        assert_abs_diff_eq!(plan_cagr(&from, &to).reported(), 3.456, epsilon = 1e-3);

        let zero = DividendRecord::new(2020, 0.0, DividendKind::Historical);
        assert_eq!(plan_cagr(&zero, &to), RatioValue::NotMeaningful);
        assert_eq!(plan_cagr(&to, &from), RatioValue::NotMeaningful);
    }

    #[test]
    fn test_peer_spreads() {
        let data = Dataset::enav_reference();
        let spreads = peer_spreads(&data.peer_yields, 7.5);
        assert_eq!(spreads.len(), 4);
        assert_eq!(spreads[2].name, "BTP 10Y");
        assert_eq!(spreads[2].spread_pp, 3.7);
        assert_eq!(spreads[0].spread_pp, 2.3);
    }
}
