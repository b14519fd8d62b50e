//! Per-year financial performance series

use super::RatioValue;
use crate::company::YearlyFinancials;
use serde::{Deserialize, Serialize};

/// Reported or estimated figures for one year, ready for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialPoint {
    pub year: u16,
    /// "2024E" for estimated years
    pub label: String,
    pub estimate: bool,
    pub revenue: f64,
    pub ebitda: f64,
    pub net_income: f64,
    pub diluted_eps: f64,
    pub operating_cash_flow: f64,
    pub capex: f64,
    pub free_cash_flow: f64,

    /// Leverage as published ("net cash", "1.45x", "<0.8x")
    pub leverage: String,
    /// Numeric reading of the leverage, net cash as zero
    pub leverage_multiple: f64,

    /// EBITDA / revenue in percent
    pub ebitda_margin_pct: RatioValue,
}

pub fn financial_series(financials: &[YearlyFinancials]) -> Vec<FinancialPoint> {
    financials
        .iter()
        .map(|f| FinancialPoint {
            year: f.year,
            label: f.label(),
            estimate: f.estimate,
            revenue: f.revenue,
            ebitda: f.ebitda,
            net_income: f.net_income,
            diluted_eps: f.diluted_eps,
            operating_cash_flow: f.operating_cash_flow,
            capex: f.capex,
            free_cash_flow: f.free_cash_flow,
            leverage: f.leverage.to_string(),
            leverage_multiple: f.leverage.as_multiple(),
            ebitda_margin_pct: RatioValue::over_positive(f.ebitda, f.revenue, 100.0),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Dataset;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_reference_series() {
        let series = financial_series(&Dataset::enav_reference().financials);
        assert_eq!(series.len(), 6);

        assert_eq!(series[0].leverage, "net cash");
        assert_eq!(series[0].leverage_multiple, 0.0);
        assert_eq!(series[1].leverage, "1.45x");

        let last = &series[5];
        assert_eq!(last.label, "2024E");
        assert!(last.estimate);
        assert_eq!(last.leverage, "<0.8x");
        assert_eq!(last.leverage_multiple, 0.8);
        assert_eq!(last.revenue, 1037.0);
        assert_abs_diff_eq!(last.ebitda_margin_pct.reported(), 29.99, epsilon = 0.01);
    }

    #[test]
    fn test_margin_needs_positive_revenue() {
        let mut financials = Dataset::enav_reference().financials;
        financials[0].revenue = 0.0;
        let series = financial_series(&financials);
        assert_eq!(series[0].ebitda_margin_pct, RatioValue::NotMeaningful);
    }
}
