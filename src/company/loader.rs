//! Load company data from CSV files in data/company/

use super::{
    CompanyProfile, DividendKind, DividendRecord, EbitdaPhase, EbitdaPoint, Leverage, PeerYield,
    PlanTarget, TargetKind, YearlyFinancials,
};
use crate::error::LoadError;
use csv::Reader;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Default path to the company data directory
pub const DEFAULT_DATA_PATH: &str = "data/company";

pub const FINANCIALS_FILE: &str = "financials.csv";
pub const DIVIDENDS_FILE: &str = "dividends.csv";
pub const PROFILE_FILE: &str = "profile.csv";
pub const EBITDA_OUTLOOK_FILE: &str = "ebitda_outlook.csv";
pub const PEER_YIELDS_FILE: &str = "peer_yields.csv";
pub const TARGETS_FILE: &str = "targets.csv";

/// "Y"/"N" estimate flag
fn parse_estimate(flag: &str) -> Result<bool, LoadError> {
    match flag {
        "Y" => Ok(true),
        "N" => Ok(false),
        other => Err(LoadError::UnknownValue {
            field: "Estimate",
            value: other.to_string(),
        }),
    }
}

/// Raw CSV row matching financials.csv columns
#[derive(Debug, serde::Deserialize)]
struct FinancialsRow {
    #[serde(rename = "Year")]
    year: u16,
    #[serde(rename = "Estimate")]
    estimate: String,
    #[serde(rename = "Revenue")]
    revenue: f64,
    #[serde(rename = "EBITDA")]
    ebitda: f64,
    #[serde(rename = "NetIncome")]
    net_income: f64,
    #[serde(rename = "DilutedEPS")]
    diluted_eps: f64,
    #[serde(rename = "OperatingCashFlow")]
    operating_cash_flow: f64,
    #[serde(rename = "Capex")]
    capex: f64,
    #[serde(rename = "FreeCashFlow")]
    free_cash_flow: f64,
    #[serde(rename = "Leverage")]
    leverage: String,
    #[serde(rename = "DPS")]
    dps: f64,
    #[serde(rename = "FCFPerShare")]
    fcf_per_share: f64,
}

impl FinancialsRow {
    fn into_financials(self) -> Result<YearlyFinancials, LoadError> {
        let estimate = parse_estimate(&self.estimate)?;
        let leverage: Leverage = self.leverage.parse()?;

        Ok(YearlyFinancials {
            year: self.year,
            estimate,
            revenue: self.revenue,
            ebitda: self.ebitda,
            net_income: self.net_income,
            diluted_eps: self.diluted_eps,
            operating_cash_flow: self.operating_cash_flow,
            capex: self.capex,
            free_cash_flow: self.free_cash_flow,
            leverage,
            dps: self.dps,
            fcf_per_share: self.fcf_per_share,
        })
    }
}

/// Raw CSV row matching dividends.csv columns
#[derive(Debug, serde::Deserialize)]
struct DividendRow {
    #[serde(rename = "Year")]
    year: u16,
    #[serde(rename = "DPS")]
    dps: f64,
    #[serde(rename = "Kind")]
    kind: String,
    #[serde(rename = "Note")]
    note: Option<String>,
}

impl DividendRow {
    fn into_record(self) -> Result<DividendRecord, LoadError> {
        let kind: DividendKind = self.kind.parse()?;
        Ok(DividendRecord {
            year: self.year,
            dps: self.dps,
            kind,
            note: self.note.filter(|n| !n.is_empty()),
        })
    }
}

/// Raw CSV row matching ebitda_outlook.csv columns
#[derive(Debug, serde::Deserialize)]
struct EbitdaRow {
    #[serde(rename = "Year")]
    year: u16,
    #[serde(rename = "Estimate")]
    estimate: String,
    #[serde(rename = "EBITDA")]
    ebitda: f64,
    #[serde(rename = "Phase")]
    phase: String,
}

/// Raw CSV row matching targets.csv columns
#[derive(Debug, serde::Deserialize)]
struct TargetRow {
    #[serde(rename = "Metric")]
    metric: String,
    #[serde(rename = "Kind")]
    kind: String,
    #[serde(rename = "BaseYear")]
    base_year: u16,
    #[serde(rename = "Base")]
    base: Option<f64>,
    #[serde(rename = "TargetYear")]
    target_year: u16,
    #[serde(rename = "Target")]
    target: f64,
}

fn open(dir: &Path, file: &str) -> Result<File, LoadError> {
    let path = dir.join(file);
    File::open(&path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn csv_error(file: &str) -> impl Fn(csv::Error) -> LoadError + '_ {
    move |source| LoadError::Csv {
        path: file.to_string(),
        source,
    }
}

/// Load per-year financials from any reader
pub fn load_financials_from_reader<R: Read>(reader: R) -> Result<Vec<YearlyFinancials>, LoadError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut rows = Vec::new();

    for result in csv_reader.deserialize() {
        let row: FinancialsRow = result.map_err(csv_error(FINANCIALS_FILE))?;
        rows.push(row.into_financials()?);
    }

    Ok(rows)
}

/// Load dividend history and plan from any reader
pub fn load_dividends_from_reader<R: Read>(reader: R) -> Result<Vec<DividendRecord>, LoadError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut records = Vec::new();

    for result in csv_reader.deserialize() {
        let row: DividendRow = result.map_err(csv_error(DIVIDENDS_FILE))?;
        records.push(row.into_record()?);
    }

    Ok(records)
}

/// Load the company profile from a Key,Value CSV
pub fn load_profile_from_reader<R: Read>(reader: R) -> Result<CompanyProfile, LoadError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut values = HashMap::new();

    for result in csv_reader.records() {
        let record = result.map_err(csv_error(PROFILE_FILE))?;
        let key = record.get(0).unwrap_or_default().trim().to_string();
        let value = record.get(1).unwrap_or_default().trim().to_string();
        values.insert(key, value);
    }

    let text = |key: &'static str| -> Result<String, LoadError> {
        values.get(key).cloned().ok_or(LoadError::MissingKey(key))
    };
    let number = |key: &'static str| -> Result<f64, LoadError> {
        let raw = text(key)?;
        raw.parse().map_err(|_| LoadError::InvalidNumber { key, value: raw })
    };
    let year_key = "LastPaidYear";
    let last_paid_raw = text(year_key)?;
    let last_paid_year = last_paid_raw.parse().map_err(|_| LoadError::InvalidNumber {
        key: year_key,
        value: last_paid_raw,
    })?;

    Ok(CompanyProfile {
        ticker: text("Ticker")?,
        name: text("Name")?,
        sector: text("Sector")?,
        reference_price: number("ReferencePrice")?,
        shares_outstanding: number("SharesOutstanding")?,
        payout_policy_fcf: number("PayoutPolicyFcf")?,
        last_paid_year,
    })
}

/// Load the regulatory-period EBITDA outlook from any reader
pub fn load_ebitda_outlook_from_reader<R: Read>(reader: R) -> Result<Vec<EbitdaPoint>, LoadError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut points = Vec::new();

    for result in csv_reader.deserialize() {
        let row: EbitdaRow = result.map_err(csv_error(EBITDA_OUTLOOK_FILE))?;
        let phase: EbitdaPhase = row.phase.parse()?;
        points.push(EbitdaPoint {
            year: row.year,
            estimate: parse_estimate(&row.estimate)?,
            ebitda: row.ebitda,
            phase,
        });
    }

    Ok(points)
}

/// Load benchmark yields from a Name,YieldPct CSV
pub fn load_peer_yields_from_reader<R: Read>(reader: R) -> Result<Vec<PeerYield>, LoadError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut peers = Vec::new();

    for result in csv_reader.records() {
        let record = result.map_err(csv_error(PEER_YIELDS_FILE))?;
        let name = record.get(0).unwrap_or_default().trim().to_string();
        let raw = record.get(1).unwrap_or_default().trim();
        let yield_pct = raw.parse().map_err(|_| LoadError::InvalidNumber {
            key: "YieldPct",
            value: raw.to_string(),
        })?;
        peers.push(PeerYield { name, yield_pct });
    }

    Ok(peers)
}

/// Load business plan targets from any reader
pub fn load_targets_from_reader<R: Read>(reader: R) -> Result<Vec<PlanTarget>, LoadError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut targets = Vec::new();

    for result in csv_reader.deserialize() {
        let row: TargetRow = result.map_err(csv_error(TARGETS_FILE))?;
        let kind: TargetKind = row.kind.parse()?;
        targets.push(PlanTarget {
            metric: row.metric,
            kind,
            base_year: row.base_year,
            base: row.base,
            target_year: row.target_year,
            target: row.target,
        });
    }

    Ok(targets)
}

pub fn load_financials(dir: &Path) -> Result<Vec<YearlyFinancials>, LoadError> {
    load_financials_from_reader(open(dir, FINANCIALS_FILE)?)
}

pub fn load_dividends(dir: &Path) -> Result<Vec<DividendRecord>, LoadError> {
    load_dividends_from_reader(open(dir, DIVIDENDS_FILE)?)
}

pub fn load_profile(dir: &Path) -> Result<CompanyProfile, LoadError> {
    load_profile_from_reader(open(dir, PROFILE_FILE)?)
}

pub fn load_ebitda_outlook(dir: &Path) -> Result<Vec<EbitdaPoint>, LoadError> {
    load_ebitda_outlook_from_reader(open(dir, EBITDA_OUTLOOK_FILE)?)
}

pub fn load_peer_yields(dir: &Path) -> Result<Vec<PeerYield>, LoadError> {
    load_peer_yields_from_reader(open(dir, PEER_YIELDS_FILE)?)
}

pub fn load_targets(dir: &Path) -> Result<Vec<PlanTarget>, LoadError> {
    load_targets_from_reader(open(dir, TARGETS_FILE)?)
}
