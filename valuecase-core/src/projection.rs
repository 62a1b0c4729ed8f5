//! KPI projection engine.
//!
//! For every KPI in the catalog, start from its (possibly market-scaled)
//! baseline and compound the damped impact of each active feature on it:
//!
//! - lower-is-better: `improved *= 1 - (1 - multiplier) * S`
//! - higher-is-better: `improved *= 1 + (multiplier - 1) * S`
//!
//! Features are applied in catalog order and each acts on the running value,
//! so joint effects multiply rather than add.

use serde::{Deserialize, Serialize};

use crate::catalog::{Feature, Kpi, REVENUE_AT_RISK};
use crate::error::{Result, ValueCaseError};

/// Baseline vs projected value for one KPI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KpiResult {
    pub kpi: Kpi,
    pub baseline: f64,
    pub improved: f64,
    /// (improved - baseline) / baseline * 100
    pub delta: f64,
}

impl KpiResult {
    pub fn id(&self) -> &str {
        &self.kpi.id
    }

    /// True when the projection moved in the KPI's "better" direction.
    pub fn is_improvement(&self) -> bool {
        if self.kpi.lower_is_better {
            self.improved < self.baseline
        } else {
            self.improved > self.baseline
        }
    }
}

/// Baseline used for projection: only revenue-at-risk scales with the market.
pub fn scaled_baseline(kpi: &Kpi, total_multiplier: f64) -> f64 {
    if kpi.id == REVENUE_AT_RISK {
        kpi.baseline * total_multiplier
    } else {
        kpi.baseline
    }
}

/// Apply one damped impact to a running value.
pub fn apply_impact(value: f64, multiplier: f64, lower_is_better: bool, sensitivity: f64) -> f64 {
    if lower_is_better {
        let reduction = 1.0 - multiplier;
        value * (1.0 - reduction * sensitivity)
    } else {
        let gain = multiplier - 1.0;
        value * (1.0 + gain * sensitivity)
    }
}

/// Project a single KPI.
///
/// `features` must already be in catalog order.
pub fn project_kpi(
    kpi: &Kpi,
    features: &[&Feature],
    total_multiplier: f64,
    sensitivity: f64,
) -> Result<KpiResult> {
    let baseline = scaled_baseline(kpi, total_multiplier);
    if baseline == 0.0 || !baseline.is_finite() {
        return Err(ValueCaseError::InvalidBaseline {
            kpi: kpi.id.clone(),
        });
    }

    let improved = features
        .iter()
        .filter_map(|f| f.impact_on(&kpi.id))
        .fold(baseline, |value, impact| {
            apply_impact(value, impact.multiplier, kpi.lower_is_better, sensitivity)
        });

    Ok(KpiResult {
        kpi: kpi.clone(),
        baseline,
        improved,
        delta: (improved - baseline) / baseline * 100.0,
    })
}

/// Project every KPI, in catalog order.
pub fn project_kpis(
    kpis: &[Kpi],
    features: &[&Feature],
    total_multiplier: f64,
    sensitivity: f64,
) -> Result<Vec<KpiResult>> {
    kpis.iter()
        .map(|kpi| project_kpi(kpi, features, total_multiplier, sensitivity))
        .collect()
}

/// Find a KPI result by id.
pub fn find_result<'a>(results: &'a [KpiResult], id: &str) -> Option<&'a KpiResult> {
    results.iter().find(|r| r.kpi.id == id)
}
