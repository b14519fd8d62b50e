//! Per-year financial facts and company profile

use crate::error::LoadError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Net debt / EBITDA as reported, or a net cash position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Leverage {
    /// Net debt is negative
    NetCash,
    /// Net debt / EBITDA multiple (e.g. 1.45x)
    Multiple(f64),
    /// Upper bound only (e.g. "<0.8x" in guidance)
    Below(f64),
}

impl Leverage {
    /// Best numeric reading of the indicator; net cash counts as zero
    pub fn as_multiple(&self) -> f64 {
        match self {
            Leverage::NetCash => 0.0,
            Leverage::Multiple(x) | Leverage::Below(x) => *x,
        }
    }
}

impl FromStr for Leverage {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.eq_ignore_ascii_case("net cash") {
            return Ok(Leverage::NetCash);
        }

        let (bounded, rest) = match text.strip_prefix('<') {
            Some(rest) => (true, rest),
            None => (false, text),
        };

        let value: f64 = rest
            .trim()
            .strip_suffix(['x', 'X'])
            .and_then(|n| n.trim().parse().ok())
            .filter(|v: &f64| v.is_finite() && *v >= 0.0)
            .ok_or_else(|| LoadError::InvalidLeverage(s.to_string()))?;

        Ok(if bounded {
            Leverage::Below(value)
        } else {
            Leverage::Multiple(value)
        })
    }
}

impl fmt::Display for Leverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Leverage::NetCash => write!(f, "net cash"),
            Leverage::Multiple(x) => write!(f, "{}x", x),
            Leverage::Below(x) => write!(f, "<{}x", x),
        }
    }
}

/// Status of a dividend-per-share figure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DividendKind {
    /// Paid
    Historical,
    /// Proposed to the shareholders' meeting, not yet paid
    Proposed,
    /// Business plan target
    Plan,
}

impl DividendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DividendKind::Historical => "Historical",
            DividendKind::Proposed => "Proposed",
            DividendKind::Plan => "Plan",
        }
    }
}

impl FromStr for DividendKind {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Historical" => Ok(DividendKind::Historical),
            "Proposed" => Ok(DividendKind::Proposed),
            "Plan" => Ok(DividendKind::Plan),
            other => Err(LoadError::UnknownValue {
                field: "Kind",
                value: other.to_string(),
            }),
        }
    }
}

/// Raw financial facts for one fiscal year
///
/// Monetary amounts are in millions of EUR, per-share amounts in EUR.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyFinancials {
    /// Fiscal year
    pub year: u16,

    /// Figures are estimates rather than reported results
    pub estimate: bool,

    pub revenue: f64,
    pub ebitda: f64,
    pub net_income: f64,

    /// Diluted earnings per share
    pub diluted_eps: f64,

    pub operating_cash_flow: f64,

    /// Capital expenditure (negative = cash outflow)
    pub capex: f64,

    pub free_cash_flow: f64,
    pub leverage: Leverage,

    /// Dividend per share paid or proposed for the year
    pub dps: f64,

    /// Free cash flow per share as published in the analysis
    pub fcf_per_share: f64,
}

impl YearlyFinancials {
    /// Display label, "2024E" for estimated years
    pub fn label(&self) -> String {
        if self.estimate {
            format!("{}E", self.year)
        } else {
            self.year.to_string()
        }
    }

    pub fn pays_dividend(&self) -> bool {
        self.dps > 0.0
    }
}

/// Dividend per share for one year of the history or plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DividendRecord {
    pub year: u16,
    pub dps: f64,
    pub kind: DividendKind,
    #[serde(default)]
    pub note: Option<String>,
}

impl DividendRecord {
    pub fn new(year: u16, dps: f64, kind: DividendKind) -> Self {
        Self {
            year,
            dps,
            kind,
            note: None,
        }
    }

    pub fn with_note(mut self, note: &str) -> Self {
        self.note = Some(note.to_string());
        self
    }
}

/// Static facts about the company and its market reference values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub ticker: String,
    pub name: String,
    pub sector: String,

    /// Approximate share price used for yield calculations (EUR)
    pub reference_price: f64,

    /// Shares outstanding in millions
    pub shares_outstanding: f64,

    /// Declared payout policy as a fraction of free cash flow
    pub payout_policy_fcf: f64,

    /// Fiscal year of the last dividend actually paid
    pub last_paid_year: u16,
}

/// Stage of the regulatory-period EBITDA trajectory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EbitdaPhase {
    /// Before the tariff reset
    Current,
    /// First year of the new regulatory period
    PostReset,
    Recovery,
}

impl EbitdaPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            EbitdaPhase::Current => "Current",
            EbitdaPhase::PostReset => "PostReset",
            EbitdaPhase::Recovery => "Recovery",
        }
    }
}

impl FromStr for EbitdaPhase {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Current" => Ok(EbitdaPhase::Current),
            "PostReset" => Ok(EbitdaPhase::PostReset),
            "Recovery" => Ok(EbitdaPhase::Recovery),
            other => Err(LoadError::UnknownValue {
                field: "Phase",
                value: other.to_string(),
            }),
        }
    }
}

/// EBITDA (EUR millions) for one year of the regulatory-period outlook
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EbitdaPoint {
    pub year: u16,
    pub estimate: bool,
    pub ebitda: f64,
    pub phase: EbitdaPhase,
}

/// Dividend yield of a comparable investment or benchmark
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerYield {
    pub name: String,
    /// Percent
    pub yield_pct: f64,
}

/// How a business plan target is measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetKind {
    /// Value reached in the target year (revenue, EBITDA, leverage)
    Level,
    /// Sum over the plan years (cumulative FCF, cumulative dividends)
    Cumulative,
}

impl FromStr for TargetKind {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Level" => Ok(TargetKind::Level),
            "Cumulative" => Ok(TargetKind::Cumulative),
            other => Err(LoadError::UnknownValue {
                field: "Kind",
                value: other.to_string(),
            }),
        }
    }
}

/// One line of the business plan targets table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanTarget {
    pub metric: String,
    pub kind: TargetKind,
    pub base_year: u16,
    /// Value in the base year; cumulative targets have none
    pub base: Option<f64>,
    pub target_year: u16,
    pub target: f64,
}
