//! Company facts: yearly financials, dividend history, profile and plan outlook

mod data;
pub mod loader;

pub use data::{
    CompanyProfile, DividendKind, DividendRecord, EbitdaPhase, EbitdaPoint, Leverage, PeerYield,
    PlanTarget, TargetKind, YearlyFinancials,
};
pub use loader::{
    load_dividends, load_ebitda_outlook, load_financials, load_peer_yields, load_profile,
    load_targets, DEFAULT_DATA_PATH,
};
