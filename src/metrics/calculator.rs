//! Metrics calculator: dataset in, derived series out

use super::coverage::compute_fcf_coverage;
use super::outlook::{ebitda_trajectory, target_progress};
use super::payout::{compute_payout_ratios, PayoutInput};
use super::performance::financial_series;
use super::results::MetricsReport;
use super::yields::{dividend_growth, dividend_yield, peer_spreads, plan_cagr, yield_series};
use super::RatioValue;
use crate::company::DividendKind;
use crate::error::MetricsResult;
use crate::Dataset;
use log::info;

/// Runs every derived-metric calculation over a borrowed dataset
///
/// The calculator holds no state of its own, so repeated runs over the
/// same dataset produce identical reports.
#[derive(Debug, Clone, Copy)]
pub struct MetricsCalculator<'a> {
    dataset: &'a Dataset,
}

impl<'a> MetricsCalculator<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        Self { dataset }
    }

    pub fn run(&self) -> MetricsResult<MetricsReport> {
        let data = self.dataset;
        let profile = &data.profile;

        let inputs: Vec<PayoutInput> = data.financials.iter().map(PayoutInput::from).collect();
        let payout = compute_payout_ratios(&inputs)?;
        let coverage = compute_fcf_coverage(&data.financials, profile.shares_outstanding)?;
        let yields = yield_series(&data.dividends, profile.reference_price)?;
        let growth = dividend_growth(&data.dividends)?;

        let price = profile.reference_price;
        let current_yield_pct = data
            .last_paid_dividend()
            .map(|d| dividend_yield(d.dps, price))
            .transpose()?;
        let proposed = data.next_proposed_dividend();
        let forward_yield_pct = proposed.map(|d| dividend_yield(d.dps, price)).transpose()?;
        let plan_end = data
            .dividends
            .iter()
            .filter(|d| d.kind == DividendKind::Plan)
            .max_by_key(|d| d.year);
        let plan_cagr_pct = match (proposed, plan_end) {
            (Some(from), Some(to)) => plan_cagr(from, to),
            _ => RatioValue::NotMeaningful,
        };

        let spreads = match forward_yield_pct.or(current_yield_pct) {
            Some(company) => peer_spreads(&data.peer_yields, company),
            None => Vec::new(),
        };
        let ebitda = ebitda_trajectory(&data.ebitda_outlook)?;
        let targets = target_progress(&data.targets)?;

        info!(
            "Computed metrics for {}: {} payout rows, {} coverage rows, {} yield points",
            profile.ticker,
            payout.len(),
            coverage.len(),
            yields.len()
        );

        Ok(MetricsReport {
            company: profile.name.clone(),
            ticker: profile.ticker.clone(),
            reference_price: profile.reference_price,
            payout_policy_pct: profile.payout_policy_fcf * 100.0,
            last_paid_year: profile.last_paid_year,
            proposed_year: proposed.map(|d| d.year),
            current_yield_pct,
            forward_yield_pct,
            financials: financial_series(&data.financials),
            payout,
            coverage,
            yields,
            growth,
            plan_cagr_pct,
            ebitda,
            targets,
            peer_spreads: spreads,
        })
    }
}

/// Convenience wrapper for a one-off run
pub fn compute_metrics(dataset: &Dataset) -> MetricsResult<MetricsReport> {
    MetricsCalculator::new(dataset).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MetricsError;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_reference_run() {
        let data = Dataset::enav_reference();
        let report = compute_metrics(&data).unwrap();

        assert_eq!(report.ticker, "ENAV.MI");
        assert_eq!(report.payout.len(), 6);
        assert_eq!(report.with_dividend().count(), 4);
        assert_eq!(report.payout_policy_pct, 80.0);
        assert_eq!(report.proposed_year, Some(2024));
    }

    #[test]
    fn test_summary() {
        let report = compute_metrics(&Dataset::enav_reference()).unwrap();
        let summary = report.summary();

        assert_eq!(summary.current_yield_pct, Some(6.39));
        assert_eq!(summary.forward_yield_pct, Some(7.5));
        assert_abs_diff_eq!(summary.proposed_growth_pct.reported(), 17.39, epsilon = 0.01);
        assert_abs_diff_eq!(summary.plan_cagr_pct.reported(), 3.46, epsilon = 0.01);
        assert_eq!(summary.dividend_years, 4);

        // 2022: 75.65, 2023: 121.05, 2024: 72.97
        assert_abs_diff_eq!(summary.avg_payout_vs_fcf.reported(), 89.89, epsilon = 0.01);
    }

    #[test]
    fn test_years_above_policy() {
        let report = compute_metrics(&Dataset::enav_reference()).unwrap();
        assert_eq!(report.years_above_policy(), vec![2023]);
    }

    #[test]
    fn test_price_override_moves_yields_only() {
        let base = compute_metrics(&Dataset::enav_reference()).unwrap();
        let cheaper_data = Dataset::enav_reference().with_reference_price(3.0);
        let cheaper = compute_metrics(&cheaper_data).unwrap();

        assert_eq!(cheaper.summary().current_yield_pct, Some(7.67));
        assert_eq!(cheaper.payout, base.payout);
        assert_eq!(cheaper.coverage, base.coverage);
        assert_eq!(cheaper.financials, base.financials);

        // 0.27 / 3.00 = 9.00%, 3.8% for the 10Y BTP
        let btp = cheaper.peer_spreads.iter().find(|p| p.name == "BTP 10Y").unwrap();
        assert_eq!(btp.spread_pp, 5.2);
    }

    #[test]
    fn test_yields_follow_last_paid_year() {
        let mut data = Dataset::enav_reference();
        data.profile.last_paid_year = 2022;
        let report = compute_metrics(&data).unwrap();

        // 0.1967 / 3.60, and 2023 becomes the next dividend but is not proposed
        assert_eq!(report.current_yield_pct, Some(5.46));
        assert_eq!(report.forward_yield_pct, Some(7.5));

        data.profile.last_paid_year = 2030;
        let report = compute_metrics(&data).unwrap();
        assert_eq!(report.current_yield_pct, None);
        assert_eq!(report.forward_yield_pct, None);
        assert!(report.peer_spreads.is_empty());
    }

    #[test]
    fn test_outlook_and_peers_in_report() {
        let report = compute_metrics(&Dataset::enav_reference()).unwrap();
        assert_eq!(report.financials.len(), 6);
        assert_eq!(report.financials[5].label, "2024E");
        assert_eq!(report.targets.len(), 6);
        assert_eq!(report.peer_spreads.len(), 4);
        assert_eq!(report.peer_spreads[0].spread_pp, 2.3);

        let summary = report.summary();
        assert_abs_diff_eq!(summary.ebitda_reset_pct.reported(), -27.65, epsilon = 0.01);
        assert_abs_diff_eq!(summary.ebitda_recovery_cagr_pct.reported(), 12.55, epsilon = 0.01);
    }

    #[test]
    fn test_negative_dividend_fails_run() {
        let mut data = Dataset::enav_reference();
        data.dividends[9].dps = -0.31;
        let err = compute_metrics(&data).unwrap_err();
        assert!(matches!(err, MetricsError::NegativeDividend { year: 2028, .. }));
    }

    #[test]
    fn test_zero_eps_fails_run() {
        let mut data = Dataset::enav_reference();
        data.financials[3].diluted_eps = 0.0;
        let err = compute_metrics(&data).unwrap_err();
        assert_eq!(err, MetricsError::ZeroEarnings { year: 2022 });
    }

    #[test]
    fn test_run_is_idempotent() {
        let data = Dataset::enav_reference();
        let calc = MetricsCalculator::new(&data);
        let first = serde_json::to_string(&calc.run().unwrap()).unwrap();
        let second = serde_json::to_string(&calc.run().unwrap()).unwrap();
        assert_eq!(first, second);
    }
}
