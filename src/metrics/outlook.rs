//! Business plan outlook: EBITDA through the regulatory reset and plan targets

use super::ratio::compound_growth;
use super::RatioValue;
use crate::company::{EbitdaPhase, EbitdaPoint, PlanTarget, TargetKind};
use crate::error::{MetricsError, MetricsResult};
use log::debug;
use serde::{Deserialize, Serialize};

/// EBITDA path with the size of the reset and the pace of the recovery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EbitdaTrajectory {
    pub points: Vec<EbitdaPoint>,

    /// Change from the last pre-reset year to the first post-reset year, percent
    pub reset_change_pct: RatioValue,

    /// CAGR from the post-reset year to the end of the outlook, percent
    pub recovery_cagr_pct: RatioValue,
}

/// A plan target with its implied growth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetProgress {
    pub metric: String,
    pub kind: TargetKind,
    pub base_year: u16,
    pub target_year: u16,
    pub base: Option<f64>,
    pub target: f64,

    /// Target minus base, for level targets with a base
    pub change: Option<f64>,

    /// CAGR from base to target, percent
    pub cagr_pct: RatioValue,

    /// Cumulative targets spread evenly over the plan years
    pub annual_average: Option<f64>,
}

pub fn ebitda_trajectory(outlook: &[EbitdaPoint]) -> MetricsResult<EbitdaTrajectory> {
    if let Some(bad) = outlook.iter().find(|p| !p.ebitda.is_finite()) {
        return Err(MetricsError::NonFinite {
            year: bad.year,
            field: "ebitda",
        });
    }

    let reset = outlook.iter().position(|p| p.phase == EbitdaPhase::PostReset);
    let before = reset.and_then(|i| {
        outlook[..i]
            .iter()
            .rfind(|p| p.phase == EbitdaPhase::Current)
    });

    let reset_change_pct = match (before, reset.map(|i| &outlook[i])) {
        (Some(pre), Some(post)) => {
            RatioValue::over_positive(post.ebitda - pre.ebitda, pre.ebitda, 100.0)
        }
        _ => RatioValue::NotMeaningful,
    };

    let recovery_cagr_pct = match (reset.map(|i| &outlook[i]), outlook.last()) {
        (Some(post), Some(end)) if end.year > post.year => {
            let years = f64::from(end.year - post.year);
            compound_growth(post.ebitda, end.ebitda, years)
        }
        _ => RatioValue::NotMeaningful,
    };

    debug!("EBITDA reset {:.2}%, recovery CAGR {:.2}%", reset_change_pct, recovery_cagr_pct);

    Ok(EbitdaTrajectory {
        points: outlook.to_vec(),
        reset_change_pct,
        recovery_cagr_pct,
    })
}

pub fn target_progress(targets: &[PlanTarget]) -> MetricsResult<Vec<TargetProgress>> {
    targets
        .iter()
        .map(|t| {
            let finite_base = t.base.map_or(true, f64::is_finite);
            if !t.target.is_finite() || !finite_base {
                return Err(MetricsError::NonFinite {
                    year: t.target_year,
                    field: "target",
                });
            }

            let years = f64::from(t.target_year) - f64::from(t.base_year);
            let (change, cagr_pct, annual_average) = match t.kind {
                TargetKind::Level => (
                    t.base.map(|b| t.target - b),
                    t.base
                        .map_or(RatioValue::NotMeaningful, |b| compound_growth(b, t.target, years)),
                    None,
                ),
                TargetKind::Cumulative => (
                    None,
                    RatioValue::NotMeaningful,
                    (years > 0.0).then(|| t.target / years),
                ),
            };

            Ok(TargetProgress {
                metric: t.metric.clone(),
                kind: t.kind,
                base_year: t.base_year,
                target_year: t.target_year,
                base: t.base,
                target: t.target,
                change,
                cagr_pct,
                annual_average,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Dataset;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_reference_trajectory() {
        let data = Dataset::enav_reference();
        let path = ebitda_trajectory(&data.ebitda_outlook).unwrap();

        assert_eq!(path.points.len(), 7);
        // 311 -> 225 across the reset
        assert_abs_diff_eq!(path.reset_change_pct.reported(), -27.65, epsilon = 0.01);
        // 225 -> 361 over 2025-2029
        assert_abs_diff_eq!(path.recovery_cagr_pct.reported(), 12.55, epsilon = 0.01);
    }

    #[test]
    fn test_trajectory_without_reset() {
        let points: Vec<EbitdaPoint> = Dataset::enav_reference()
            .ebitda_outlook
            .into_iter()
            .filter(|p| p.phase != EbitdaPhase::PostReset)
            .collect();
        let path = ebitda_trajectory(&points).unwrap();
        assert_eq!(path.reset_change_pct, RatioValue::NotMeaningful);
        assert_eq!(path.recovery_cagr_pct, RatioValue::NotMeaningful);
    }

    #[test]
    fn test_trajectory_rejects_nan() {
        let mut points = Dataset::enav_reference().ebitda_outlook;
        points[4].ebitda = f64::NAN;
        let err = ebitda_trajectory(&points).unwrap_err();
        assert_eq!(err, MetricsError::NonFinite { year: 2027, field: "ebitda" });
    }

    #[test]
    fn test_reference_targets() {
        let progress = target_progress(&Dataset::enav_reference().targets).unwrap();
        let find = |name: &str| progress.iter().find(|p| p.metric == name).unwrap();

        assert_abs_diff_eq!(find("Revenue").cagr_pct.reported(), 2.96, epsilon = 0.01);
        assert_abs_diff_eq!(find("EBITDA").cagr_pct.reported(), 3.03, epsilon = 0.01);
        assert_abs_diff_eq!(find("Net income").cagr_pct.reported(), 5.54, epsilon = 0.01);
        assert_eq!(find("Revenue").change, Some(163.0));

        // Deleveraging to zero has a change but no growth rate
        let debt = find("Debt/EBITDA");
        assert_abs_diff_eq!(debt.change.unwrap(), -0.8, epsilon = 1e-12);
        assert_eq!(debt.cagr_pct, RatioValue::NotMeaningful);

        assert_eq!(find("Cumulative FCF").annual_average, Some(200.0));
        assert_abs_diff_eq!(
            find("Cumulative dividends").annual_average.unwrap(),
            162.6,
            epsilon = 1e-9
        );
        assert_eq!(find("Cumulative FCF").change, None);
    }
}
