//! Derived dividend metrics: payout ratios, FCF coverage, yields, growth and plan outlook

mod ratio;
mod payout;
mod coverage;
mod yields;
mod performance;
mod outlook;
mod results;
mod calculator;

pub use ratio::RatioValue;
pub use payout::{compute_payout_ratio, compute_payout_ratios, DerivedRatios, PayoutInput};
pub use coverage::{compute_fcf_coverage, total_dividends, FcfCoverage};
pub use yields::{
    dividend_growth, dividend_yield, peer_spreads, plan_cagr, yield_series, DividendGrowth,
    PeerSpread, YieldPoint,
};
pub use performance::{financial_series, FinancialPoint};
pub use outlook::{ebitda_trajectory, target_progress, EbitdaTrajectory, TargetProgress};
pub use results::{MetricsReport, MetricsSummary};
pub use calculator::{compute_metrics, MetricsCalculator};
