//! Output structures of a metrics run

use super::{
    DerivedRatios, DividendGrowth, EbitdaTrajectory, FcfCoverage, FinancialPoint, PeerSpread,
    RatioValue, TargetProgress, YieldPoint,
};
use serde::{Deserialize, Serialize};

/// Complete set of derived series for one dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    pub company: String,
    pub ticker: String,
    pub reference_price: f64,

    /// Declared payout policy, percent of FCF
    pub payout_policy_pct: f64,

    pub last_paid_year: u16,
    pub proposed_year: Option<u16>,

    /// Yield of the last paid DPS
    pub current_yield_pct: Option<f64>,
    /// Yield of the proposed DPS
    pub forward_yield_pct: Option<f64>,

    /// Reported and estimated financials, one row per fiscal year
    pub financials: Vec<FinancialPoint>,

    /// One row per fiscal year, including years without a dividend
    pub payout: Vec<DerivedRatios>,
    pub coverage: Vec<FcfCoverage>,
    pub yields: Vec<YieldPoint>,
    pub growth: Vec<DividendGrowth>,

    /// DPS CAGR from the proposed dividend to the end of the plan, percent
    pub plan_cagr_pct: RatioValue,

    pub ebitda: EbitdaTrajectory,
    pub targets: Vec<TargetProgress>,

    /// Forward yield (current when nothing is proposed) over each benchmark
    pub peer_spreads: Vec<PeerSpread>,
}

impl MetricsReport {
    /// Payout rows for years that pay a dividend
    pub fn with_dividend(&self) -> impl Iterator<Item = &DerivedRatios> {
        self.payout.iter().filter(|r| r.pays_dividend())
    }

    /// Years whose payout vs FCF is above the declared policy
    pub fn years_above_policy(&self) -> Vec<u16> {
        self.with_dividend()
            .filter(|r| {
                r.payout_vs_fcf
                    .value()
                    .is_some_and(|p| p > self.payout_policy_pct)
            })
            .map(|r| r.year)
            .collect()
    }

    /// Headline figures
    pub fn summary(&self) -> MetricsSummary {
        let meaningful: Vec<f64> = self
            .with_dividend()
            .filter_map(|r| r.payout_vs_fcf.value())
            .collect();
        let avg_payout_vs_fcf = if meaningful.is_empty() {
            RatioValue::NotMeaningful
        } else {
            RatioValue::Defined(meaningful.iter().sum::<f64>() / meaningful.len() as f64)
        };

        let proposed_growth_pct = self
            .proposed_year
            .and_then(|year| self.growth.iter().find(|g| g.year == year))
            .map(|g| g.growth_pct)
            .unwrap_or(RatioValue::NotMeaningful);

        MetricsSummary {
            current_yield_pct: self.current_yield_pct,
            forward_yield_pct: self.forward_yield_pct,
            proposed_growth_pct,
            avg_payout_vs_fcf,
            plan_cagr_pct: self.plan_cagr_pct,
            dividend_years: self.with_dividend().count(),
            ebitda_reset_pct: self.ebitda.reset_change_pct,
            ebitda_recovery_cagr_pct: self.ebitda.recovery_cagr_pct,
        }
    }
}

/// Headline dividend metrics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    /// Yield of the last paid DPS
    pub current_yield_pct: Option<f64>,
    /// Yield of the proposed DPS
    pub forward_yield_pct: Option<f64>,
    pub proposed_growth_pct: RatioValue,
    /// Mean over years where the ratio is meaningful
    pub avg_payout_vs_fcf: RatioValue,
    pub plan_cagr_pct: RatioValue,
    pub dividend_years: usize,
    pub ebitda_reset_pct: RatioValue,
    pub ebitda_recovery_cagr_pct: RatioValue,
}
