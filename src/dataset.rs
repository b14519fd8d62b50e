//! Immutable container for every raw input of the metrics calculation
//!
//! Built once, either from the reference figures compiled into the crate or
//! from CSV files in data/company/, then passed by reference to the calculator.

use crate::company::{
    self, CompanyProfile, DividendKind, DividendRecord, EbitdaPhase, EbitdaPoint, Leverage,
    PeerYield, PlanTarget, TargetKind, YearlyFinancials,
};
use crate::error::LoadError;
use log::info;
use std::path::Path;

/// Everything the calculator reads
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub profile: CompanyProfile,
    /// Reported and estimated years, ascending
    pub financials: Vec<YearlyFinancials>,
    /// Dividend history followed by the plan, ascending
    pub dividends: Vec<DividendRecord>,
    /// EBITDA through the regulatory reset and recovery, ascending
    pub ebitda_outlook: Vec<EbitdaPoint>,
    /// Benchmark yields, excluding the company itself
    pub peer_yields: Vec<PeerYield>,
    pub targets: Vec<PlanTarget>,
}

impl Dataset {
    /// ENAV S.p.A. figures for fiscal years 2019-2024E and the 2025-2029 plan
    pub fn enav_reference() -> Self {
        let profile = CompanyProfile {
            ticker: "ENAV.MI".to_string(),
            name: "ENAV S.p.A.".to_string(),
            sector: "Transport Infrastructure - Air Traffic Control".to_string(),
            reference_price: 3.60,
            shares_outstanding: 541.74,
            payout_policy_fcf: 0.80,
            last_paid_year: 2023,
        };

        let financials = vec![
            YearlyFinancials {
                year: 2019,
                estimate: false,
                revenue: 911.91,
                ebitda: 312.27,
                net_income: 118.43,
                diluted_eps: 0.22,
                operating_cash_flow: 341.63,
                capex: -101.76,
                free_cash_flow: 225.32,
                leverage: Leverage::NetCash,
                dps: 0.0,
                fcf_per_share: 0.42,
            },
            YearlyFinancials {
                year: 2020,
                estimate: false,
                revenue: 780.87,
                ebitda: 210.42,
                net_income: 54.28,
                diluted_eps: 0.1,
                operating_cash_flow: -173.06,
                capex: -74.0,
                free_cash_flow: -264.55,
                leverage: Leverage::Multiple(1.45),
                dps: 0.0,
                fcf_per_share: -0.49,
            },
            YearlyFinancials {
                year: 2021,
                estimate: false,
                revenue: 845.11,
                ebitda: 238.83,
                net_income: 78.37,
                diluted_eps: 0.14,
                operating_cash_flow: -157.15,
                capex: -71.5,
                free_cash_flow: -242.78,
                leverage: Leverage::Multiple(1.85),
                dps: 0.1081,
                fcf_per_share: -0.45,
            },
            YearlyFinancials {
                year: 2022,
                estimate: false,
                revenue: 952.78,
                ebitda: 284.38,
                net_income: 105.0,
                diluted_eps: 0.19,
                operating_cash_flow: 236.9,
                capex: -79.76,
                free_cash_flow: 139.13,
                leverage: Leverage::Multiple(1.1),
                dps: 0.1967,
                fcf_per_share: 0.26,
            },
            YearlyFinancials {
                year: 2023,
                estimate: false,
                revenue: 1011.31,
                ebitda: 313.23,
                net_income: 112.92,
                diluted_eps: 0.21,
                operating_cash_flow: 210.62,
                capex: -83.83,
                free_cash_flow: 100.14,
                leverage: Leverage::Multiple(0.8),
                dps: 0.23,
                fcf_per_share: 0.19,
            },
            YearlyFinancials {
                year: 2024,
                estimate: true,
                revenue: 1037.0,
                ebitda: 311.0,
                net_income: 126.0,
                diluted_eps: 0.23,
                operating_cash_flow: 257.44,
                capex: -85.0,
                free_cash_flow: 199.0,
                leverage: Leverage::Below(0.8),
                dps: 0.27,
                fcf_per_share: 0.37,
            },
        ];

        let dividends = vec![
            DividendRecord::new(2019, 0.0, DividendKind::Historical).with_note("Pre-Covid"),
            DividendRecord::new(2020, 0.0, DividendKind::Historical).with_note("Covid (cancelled)"),
            DividendRecord::new(2021, 0.1081, DividendKind::Historical).with_note("Recovery"),
            DividendRecord::new(2022, 0.1967, DividendKind::Historical).with_note("Growth"),
            DividendRecord::new(2023, 0.23, DividendKind::Historical).with_note("Record"),
            DividendRecord::new(2024, 0.27, DividendKind::Proposed).with_note("Proposed"),
            DividendRecord::new(2025, 0.28, DividendKind::Plan),
            DividendRecord::new(2026, 0.29, DividendKind::Plan),
            DividendRecord::new(2027, 0.30, DividendKind::Plan),
            DividendRecord::new(2028, 0.31, DividendKind::Plan),
            DividendRecord::new(2029, 0.32, DividendKind::Plan),
        ];

        let outlook = [
            (2023, false, 313.23, EbitdaPhase::Current),
            (2024, true, 311.0, EbitdaPhase::Current),
            (2025, true, 225.0, EbitdaPhase::PostReset),
            (2026, true, 246.0, EbitdaPhase::Recovery),
            (2027, true, 285.0, EbitdaPhase::Recovery),
            (2028, true, 325.0, EbitdaPhase::Recovery),
            (2029, true, 361.0, EbitdaPhase::Recovery),
        ];
        let ebitda_outlook = outlook
            .into_iter()
            .map(|(year, estimate, ebitda, phase)| EbitdaPoint {
                year,
                estimate,
                ebitda,
                phase,
            })
            .collect();

        let peer_yields = [
            ("Italian utilities average", 5.2),
            ("FTSE MIB", 4.5),
            ("BTP 10Y", 3.8),
            ("EU infrastructure average", 4.1),
        ]
        .into_iter()
        .map(|(name, yield_pct)| PeerYield {
            name: name.to_string(),
            yield_pct,
        })
        .collect();

        let plan = [
            ("Revenue", TargetKind::Level, Some(1037.0), 1200.0),
            ("EBITDA", TargetKind::Level, Some(311.0), 361.0),
            ("Net income", TargetKind::Level, Some(126.0), 165.0),
            ("Cumulative FCF", TargetKind::Cumulative, None, 1000.0),
            ("Cumulative dividends", TargetKind::Cumulative, None, 813.0),
            ("Debt/EBITDA", TargetKind::Level, Some(0.8), 0.0),
        ];
        let targets = plan
            .into_iter()
            .map(|(metric, kind, base, target)| PlanTarget {
                metric: metric.to_string(),
                kind,
                base_year: 2024,
                base,
                target_year: 2029,
                target,
            })
            .collect();

        Self {
            profile,
            financials,
            dividends,
            ebitda_outlook,
            peer_yields,
            targets,
        }
    }

    /// Load from CSV files in the default location (data/company/)
    pub fn from_csv() -> Result<Self, LoadError> {
        Self::from_csv_path(Path::new(company::DEFAULT_DATA_PATH))
    }

    /// Load from CSV files in a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self, LoadError> {
        let mut financials = company::load_financials(path)?;
        let mut dividends = company::load_dividends(path)?;
        let profile = company::load_profile(path)?;
        let mut ebitda_outlook = company::load_ebitda_outlook(path)?;
        let peer_yields = company::load_peer_yields(path)?;
        let targets = company::load_targets(path)?;

        financials.sort_by_key(|f| f.year);
        dividends.sort_by_key(|d| d.year);
        ebitda_outlook.sort_by_key(|p| p.year);

        info!(
            "Loaded {} ({}) from {}: {} fiscal years, {} dividend records",
            profile.name,
            profile.ticker,
            path.display(),
            financials.len(),
            dividends.len()
        );

        let dataset = Self {
            profile,
            financials,
            dividends,
            ebitda_outlook,
            peer_yields,
            targets,
        };
        dataset.check_dividends_agree()?;
        Ok(dataset)
    }

    /// Every fiscal year in both tables must carry the same DPS
    pub fn check_dividends_agree(&self) -> Result<(), LoadError> {
        for fin in &self.financials {
            if let Some(rec) = self.dividend_for(fin.year) {
                if rec.dps != fin.dps {
                    return Err(LoadError::DividendMismatch {
                        year: fin.year,
                        financials: fin.dps,
                        dividends: rec.dps,
                    });
                }
            }
        }
        Ok(())
    }

    /// Same dataset with a different reference share price
    pub fn with_reference_price(mut self, price: f64) -> Self {
        self.profile.reference_price = price;
        self
    }

    pub fn dividend_for(&self, year: u16) -> Option<&DividendRecord> {
        self.dividends.iter().find(|d| d.year == year)
    }

    /// Last dividend actually paid, per the profile
    pub fn last_paid_dividend(&self) -> Option<&DividendRecord> {
        self.dividend_for(self.profile.last_paid_year)
    }

    /// First proposed dividend after the last paid one
    pub fn next_proposed_dividend(&self) -> Option<&DividendRecord> {
        self.dividends
            .iter()
            .find(|d| d.kind == DividendKind::Proposed && d.year > self.profile.last_paid_year)
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Self::enav_reference()
    }
}
