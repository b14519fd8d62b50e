//! Dividend Metrics - derived figures for a single-company dividend dashboard
//!
//! This library provides:
//! - Yearly financial facts and the dividend history/plan (reference data or CSV)
//! - Payout ratios against EPS and FCF per share
//! - FCF coverage of total dividends paid
//! - Dividend yields at a reference price, DPS growth and spread over benchmarks
//! - The EBITDA path through the regulatory reset and the plan targets
//! - CSV/JSON export for the rendering layer

pub mod error;
pub mod company;
pub mod dataset;
pub mod metrics;
pub mod report;

// Re-export commonly used types
pub use error::{LoadError, MetricsError};
pub use company::{
    CompanyProfile, DividendRecord, EbitdaPoint, Leverage, PeerYield, PlanTarget, YearlyFinancials,
};
pub use dataset::Dataset;
pub use metrics::{
    DerivedRatios, EbitdaTrajectory, FinancialPoint, MetricsCalculator, MetricsReport, RatioValue,
};
