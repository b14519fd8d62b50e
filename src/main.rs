//! Dividend Metrics CLI
//!
//! Computes the derived dividend series and prints them, optionally
//! exporting the per-year table as CSV or the full report as JSON.

use anyhow::{Context, Result};
use clap::Parser;
use dividend_metrics::{report, Dataset, MetricsCalculator};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "dividend_metrics", version, about = "Derived dividend metrics for the dashboard")]
struct Args {
    /// Directory with the company CSV files
    /// (built-in reference figures when omitted)
    #[arg(long)]
    data: Option<PathBuf>,

    /// Override the reference share price used for yields
    #[arg(long)]
    price: Option<f64>,

    /// Print the full report as JSON instead of the console table
    #[arg(long)]
    json: bool,

    /// Write the per-year derived table to this CSV file
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut dataset = match &args.data {
        Some(dir) => Dataset::from_csv_path(dir)
            .with_context(|| format!("loading dataset from {}", dir.display()))?,
        None => Dataset::enav_reference(),
    };
    if let Some(price) = args.price {
        dataset = dataset.with_reference_price(price);
    }

    let report = MetricsCalculator::new(&dataset)
        .run()
        .context("computing dividend metrics")?;

    if let Some(path) = &args.output {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        report::write_csv(&report, BufWriter::new(file))
            .with_context(|| format!("writing {}", path.display()))?;
        log::info!("Derived table written to {}", path.display());
    }

    if args.json {
        let today = chrono::Local::now().date_naive();
        println!("{}", report::to_json(&report, today)?);
        return Ok(());
    }

    println!("Dividend Analysis: {} ({})", report.company, report.ticker);
    println!("{}", "=".repeat(48));
    println!("Analysis date: {}", chrono::Local::now().format("%d/%m/%Y"));
    println!();

    let summary = report.summary();
    let pct = |v: Option<f64>| v.map_or_else(|| "n.m.".to_string(), |y| format!("{:.2}%", y));
    println!("  Reference price:     EUR {:.2}", report.reference_price);
    println!(
        "  Current yield:       {} (FY{})",
        pct(summary.current_yield_pct), report.last_paid_year
    );
    println!("  Forward yield:       {}", pct(summary.forward_yield_pct));
    println!("  Proposed DPS growth: {:+.1}%", summary.proposed_growth_pct.reported());
    println!("  Payout policy:       {:.0}% of FCF", report.payout_policy_pct);
    println!("  Plan DPS CAGR:       {:.2}%", summary.plan_cagr_pct.reported());
    println!();

    println!(
        "{:>6} {:>8} {:>6} {:>7} {:>12} {:>12} {:>9} {:>9}",
        "Year", "DPS", "EPS", "FCF/sh", "Payout/EPS", "Payout/FCF", "Coverage", "Leverage"
    );
    println!("{}", "-".repeat(76));
    for row in report.with_dividend() {
        let coverage = report
            .coverage
            .iter()
            .find(|c| c.year == row.year)
            .map(|c| match c.coverage.value() {
                Some(x) => format!("{:.2}x", x),
                None => c.coverage.to_string(),
            })
            .unwrap_or_default();
        let fin = report.financials.iter().find(|f| f.year == row.year);
        let label = fin.map_or_else(|| row.year.to_string(), |f| f.label.clone());
        let leverage = fin.map(|f| f.leverage.as_str()).unwrap_or_default();
        println!(
            "{:>6} {:>8.4} {:>6.2} {:>7.2} {:>11.2}% {:>12.2} {:>9} {:>9}",
            label,
            row.dps,
            row.eps,
            row.fcf_per_share,
            row.payout_vs_eps,
            row.payout_vs_fcf,
            coverage,
            leverage,
        );
    }


    let above = report.years_above_policy();
    if !above.is_empty() {
        println!(
            "\nPayout vs FCF above the {:.0}% policy in: {:?}",
            report.payout_policy_pct, above
        );
    }

    println!();
    println!("Dividend path at EUR {:.2}", report.reference_price);
    for point in &report.yields {
        println!(
            "  {:>5} {:>8.4} {:>6.2}% {}",
            point.year, point.dps, point.yield_pct, point.kind.as_str()
        );
    }

    println!();
    let outlook_end = report.ebitda.points.last().map_or(0, |p| p.year);
    println!(
        "EBITDA reset: {:+.1}%, recovery CAGR {:.2}% to FY{}",
        summary.ebitda_reset_pct.reported(),
        summary.ebitda_recovery_cagr_pct.reported(),
        outlook_end
    );
    for point in &report.ebitda.points {
        let year = if point.estimate {
            format!("{}E", point.year)
        } else {
            point.year.to_string()
        };
        println!("  {:>6} {:>8.1} {}", year, point.ebitda, point.phase.as_str());
    }
    println!();
    println!("Plan targets");
    for target in &report.targets {
        let base = target.base.map_or_else(|| "-".to_string(), |b| format!("{:.1}", b));
        println!(
            "  {:<22} {:>8} -> {:>8.1} (FY{}) CAGR {:>6.2}",
            target.metric, base, target.target, target.target_year, target.cagr_pct
        );
    }

    if !report.peer_spreads.is_empty() {
        println!();
        println!("Yield spread vs benchmarks");
        for peer in &report.peer_spreads {
            println!("  {:<28} {:>5.2}% {:>+6.2}pp", peer.name, peer.yield_pct, peer.spread_pp);
        }
    }

    Ok(())
}
