//! Export of a metrics report for the dashboard renderer
//!
//! The derived table is written as CSV (one row per fiscal year) and the
//! whole report, with its summary, as JSON.

use crate::metrics::{MetricsReport, MetricsSummary};
use chrono::NaiveDate;
use serde::Serialize;
use std::io::Write;

/// One row of the exported per-year table
#[derive(Debug, Serialize)]
struct TableRow {
    #[serde(rename = "Year")]
    year: u16,
    #[serde(rename = "DPS")]
    dps: f64,
    #[serde(rename = "EPS")]
    eps: f64,
    #[serde(rename = "FCFPerShare")]
    fcf_per_share: f64,
    #[serde(rename = "PayoutVsEps")]
    payout_vs_eps: f64,
    /// Zero when not meaningful, see the flag column
    #[serde(rename = "PayoutVsFcf")]
    payout_vs_fcf: f64,
    #[serde(rename = "PayoutVsFcfMeaningful")]
    payout_vs_fcf_meaningful: bool,
    #[serde(rename = "TotalDividends")]
    total_dividends: Option<f64>,
    #[serde(rename = "FcfCoverage")]
    fcf_coverage: Option<f64>,
    #[serde(rename = "DividendYield")]
    dividend_yield: Option<f64>,
    #[serde(rename = "Label")]
    label: String,
    #[serde(rename = "Estimate")]
    estimate: bool,
    #[serde(rename = "Revenue")]
    revenue: Option<f64>,
    #[serde(rename = "EBITDA")]
    ebitda: Option<f64>,
    #[serde(rename = "NetIncome")]
    net_income: Option<f64>,
    #[serde(rename = "OperatingCashFlow")]
    operating_cash_flow: Option<f64>,
    #[serde(rename = "Capex")]
    capex: Option<f64>,
    #[serde(rename = "FreeCashFlow")]
    free_cash_flow: Option<f64>,
    #[serde(rename = "Leverage")]
    leverage: Option<String>,
}

fn table_rows(report: &MetricsReport) -> Vec<TableRow> {
    report
        .payout
        .iter()
        .map(|r| {
            let coverage = report.coverage.iter().find(|c| c.year == r.year);
            let fin = report.financials.iter().find(|f| f.year == r.year);
            TableRow {
                year: r.year,
                dps: r.dps,
                eps: r.eps,
                fcf_per_share: r.fcf_per_share,
                payout_vs_eps: r.payout_vs_eps,
                payout_vs_fcf: r.payout_vs_fcf.reported(),
                payout_vs_fcf_meaningful: r.payout_vs_fcf.is_meaningful(),
                total_dividends: coverage.map(|c| c.total_dividends),
                fcf_coverage: coverage.map(|c| c.coverage.reported()),
                dividend_yield: report
                    .yields
                    .iter()
                    .find(|y| y.year == r.year)
                    .map(|y| y.yield_pct),
                label: fin.map_or_else(|| r.year.to_string(), |f| f.label.clone()),
                estimate: fin.is_some_and(|f| f.estimate),
                revenue: fin.map(|f| f.revenue),
                ebitda: fin.map(|f| f.ebitda),
                net_income: fin.map(|f| f.net_income),
                operating_cash_flow: fin.map(|f| f.operating_cash_flow),
                capex: fin.map(|f| f.capex),
                free_cash_flow: fin.map(|f| f.free_cash_flow),
                leverage: fin.map(|f| f.leverage.clone()),
            }
        })
        .collect()
}

/// Write the per-year derived table as CSV
pub fn write_csv<W: Write>(report: &MetricsReport, writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in table_rows(report) {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    generated_on: NaiveDate,
    summary: MetricsSummary,
    #[serde(flatten)]
    report: &'a MetricsReport,
}

/// Pretty JSON of the report and its summary, stamped with the analysis date
pub fn to_json(report: &MetricsReport, generated_on: NaiveDate) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport {
        generated_on,
        summary: report.summary(),
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::compute_metrics;
    use crate::Dataset;

    fn reference_report() -> MetricsReport {
        compute_metrics(&Dataset::enav_reference()).unwrap()
    }

    #[test]
    fn test_csv_table() {
        let mut buf = Vec::new();
        write_csv(&reference_report(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 7);
        assert_eq!(
            lines[0],
            "Year,DPS,EPS,FCFPerShare,PayoutVsEps,PayoutVsFcf,PayoutVsFcfMeaningful,\
             TotalDividends,FcfCoverage,DividendYield,Label,Estimate,Revenue,EBITDA,\
             NetIncome,OperatingCashFlow,Capex,FreeCashFlow,Leverage"
        );

        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();

        // 2021: suppressed payout vs FCF is written as 0 with the flag cleared
        let y2021 = &rows[2];
        assert_eq!(&y2021[0], "2021");
        assert_eq!(y2021[5].parse::<f64>().unwrap(), 0.0);
        assert_eq!(&y2021[6], "false");
        assert_eq!(y2021[8].parse::<f64>().unwrap(), 0.0);

        // 2019 pays no dividend, so no coverage columns
        assert_eq!(&rows[0][7], "");
        assert_eq!(&rows[0][8], "");

        assert_eq!(&rows[4][6], "true");
        assert_eq!(rows[4][8].parse::<f64>().unwrap(), 0.8);
    }

    #[test]
    fn test_csv_carries_financials() {
        let mut buf = Vec::new();
        write_csv(&reference_report(), &mut buf).unwrap();
        let mut reader = csv::Reader::from_reader(buf.as_slice());
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();

        assert_eq!(&rows[0][10], "2019");
        assert_eq!(&rows[0][11], "false");
        assert_eq!(&rows[0][18], "net cash");
        assert_eq!(&rows[1][18], "1.45x");

        let estimate = &rows[5];
        assert_eq!(&estimate[10], "2024E");
        assert_eq!(&estimate[11], "true");
        assert_eq!(estimate[12].parse::<f64>().unwrap(), 1037.0);
        assert_eq!(estimate[13].parse::<f64>().unwrap(), 311.0);
        assert_eq!(estimate[14].parse::<f64>().unwrap(), 126.0);
        assert_eq!(estimate[15].parse::<f64>().unwrap(), 257.44);
        assert_eq!(&estimate[18], "<0.8x");
    }

    #[test]
    fn test_json_report() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let json = to_json(&reference_report(), date).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["generated_on"], "2025-03-01");
        assert_eq!(value["ticker"], "ENAV.MI");
        assert_eq!(value["summary"]["forward_yield_pct"], 7.5);
        assert_eq!(value["payout"].as_array().unwrap().len(), 6);
        assert_eq!(value["payout"][2]["payout_vs_fcf"], "NotMeaningful");
        assert_eq!(value["coverage"][1]["coverage"]["Defined"], 1.31);
    }

    #[test]
    fn test_json_carries_outlook() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let json = to_json(&reference_report(), date).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let financials = value["financials"].as_array().unwrap();
        assert_eq!(financials.len(), 6);
        assert_eq!(financials[5]["label"], "2024E");
        assert_eq!(financials[5]["estimate"], true);
        assert_eq!(financials[5]["leverage"], "<0.8x");
        assert_eq!(financials[5]["revenue"], 1037.0);
        assert_eq!(financials[5]["ebitda"], 311.0);
        assert_eq!(financials[0]["leverage"], "net cash");

        assert_eq!(value["current_yield_pct"], 6.39);
        assert_eq!(value["ebitda"]["points"].as_array().unwrap().len(), 7);
        assert_eq!(value["ebitda"]["points"][2]["phase"], "PostReset");
        assert_eq!(value["targets"].as_array().unwrap().len(), 6);
        assert_eq!(value["peer_spreads"][2]["spread_pp"], 3.7);
    }
}
