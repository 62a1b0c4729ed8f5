//! Financial impact calculator: KPI deltas and feature costs to annualized
//! benefit, net ROI, and payback period.

use serde::{Deserialize, Serialize};
use valuecase_core::{
    COST_PER_TICKET, KpiResult, REVENUE_AT_RISK, Result, TimeHorizon, ValueCaseError, find_result,
};

/// Revenue-at-risk is tracked in millions.
pub const REVENUE_UNIT: f64 = 1_000_000.0;
/// Share of protected revenue counted per benefit line.
pub const REVENUE_CAPTURE_RATE: f64 = 0.5;

/// Annual benefit line items. Defined for any selection, including empty.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct AnnualBenefit {
    /// Cost-per-ticket reduction times annual volume.
    pub annual_savings: f64,
    pub revenue_uplift: f64,
    /// Same formula as `revenue_uplift`, reported as its own line.
    pub risk_reduction: f64,
    pub total_annual_benefit: f64,
}

impl AnnualBenefit {
    /// Derive the benefit lines from KPI projections.
    ///
    /// The revenue-at-risk delta is counted twice, once as uplift and once as
    /// risk reduction; both feed `total_annual_benefit`.
    pub fn from_kpis(kpis: &[KpiResult], annual_volume: f64) -> Result<Self> {
        let cost_per_ticket =
            find_result(kpis, COST_PER_TICKET).ok_or(ValueCaseError::MissingKpi(COST_PER_TICKET))?;
        let revenue_at_risk =
            find_result(kpis, REVENUE_AT_RISK).ok_or(ValueCaseError::MissingKpi(REVENUE_AT_RISK))?;

        let annual_savings = (cost_per_ticket.baseline - cost_per_ticket.improved) * annual_volume;
        let protected = (revenue_at_risk.baseline - revenue_at_risk.improved) * REVENUE_UNIT;
        let revenue_uplift = protected * REVENUE_CAPTURE_RATE;
        let risk_reduction = protected * REVENUE_CAPTURE_RATE;

        Ok(Self {
            annual_savings,
            revenue_uplift,
            risk_reduction,
            total_annual_benefit: annual_savings + revenue_uplift + risk_reduction,
        })
    }

    pub fn monthly(&self) -> f64 {
        self.total_annual_benefit / 12.0
    }
}

/// Full financial picture for a non-empty selection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FinancialImpact {
    #[serde(flatten)]
    pub benefit: AnnualBenefit,
    /// One-time investment.
    pub total_cost: f64,
    /// Percent return over the horizon after subtracting the investment.
    pub net_roi: f64,
    /// Months until cumulative benefit covers the investment. `None` when
    /// there is no positive benefit to recover it with.
    pub payback_period: Option<f64>,
}

impl FinancialImpact {
    pub fn total_annual_benefit(&self) -> f64 {
        self.benefit.total_annual_benefit
    }

    /// Benefit accrued over `horizon`, before subtracting cost.
    pub fn horizon_benefit(&self, horizon: TimeHorizon) -> f64 {
        self.benefit.total_annual_benefit * horizon.years()
    }
}

/// Compute ROI and payback.
///
/// Fails with `EmptySelection` when `total_cost` is not positive: with no
/// investment both ratios are undefined.
pub fn calculate_financial_impact(
    kpis: &[KpiResult],
    annual_volume: f64,
    total_cost: f64,
    horizon: TimeHorizon,
) -> Result<FinancialImpact> {
    let benefit = AnnualBenefit::from_kpis(kpis, annual_volume)?;
    with_investment(benefit, total_cost, horizon)
}

/// ROI and payback for an already-derived benefit.
pub fn with_investment(
    benefit: AnnualBenefit,
    total_cost: f64,
    horizon: TimeHorizon,
) -> Result<FinancialImpact> {
    if total_cost <= 0.0 || !total_cost.is_finite() {
        return Err(ValueCaseError::EmptySelection);
    }

    let net_roi = (benefit.total_annual_benefit * horizon.years() - total_cost) / total_cost * 100.0;
    let monthly = benefit.monthly();
    let payback_period = (monthly > 0.0).then(|| total_cost / monthly);

    Ok(FinancialImpact {
        benefit,
        total_cost,
        net_roi,
        payback_period,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use valuecase_core::{Catalog, Feature, project_kpis};

    fn kpis_for(ids: &[&str], multiplier: f64, s: f64) -> Vec<KpiResult> {
        let c = Catalog::builtin().unwrap();
        let features: Vec<&Feature> = c
            .features()
            .iter()
            .filter(|f| ids.contains(&f.id.as_str()))
            .collect();
        project_kpis(c.kpis(), &features, multiplier, s).unwrap()
    }

    #[test]
    fn test_triage_only_savings() {
        let kpis = kpis_for(&["triage"], 1.5, 1.0);
        let fi = calculate_financial_impact(&kpis, 1_500_000.0, 150_000.0, TimeHorizon::Months24)
            .unwrap();
        // (25 - 21.25) * 1.5M
        assert!((fi.benefit.annual_savings - 5_625_000.0).abs() < 1e-6);
        assert_eq!(fi.benefit.revenue_uplift, 0.0);
        assert_eq!(fi.benefit.risk_reduction, 0.0);
        let expected_roi = (5_625_000.0 * 2.0 - 150_000.0) / 150_000.0 * 100.0;
        assert!((fi.net_roi - expected_roi).abs() < 1e-6);
        let payback = fi.payback_period.unwrap();
        assert!((payback - 150_000.0 / (5_625_000.0 / 12.0)).abs() < 1e-9);
    }

    #[test]
    fn test_revenue_delta_counted_twice() {
        let kpis = kpis_for(&["churn"], 1.0, 1.0);
        let benefit = AnnualBenefit::from_kpis(&kpis, 1_000_000.0).unwrap();
        // 45 * 0.2 = 9 ($M) protected, half per line
        assert!((benefit.revenue_uplift - 4_500_000.0).abs() < 1e-6);
        assert_eq!(benefit.revenue_uplift, benefit.risk_reduction);
        assert!(
            (benefit.total_annual_benefit - (benefit.annual_savings + 2.0 * benefit.revenue_uplift))
                .abs()
                < 1e-9
        );
    }

    #[test]
    fn test_empty_selection_is_named() {
        let kpis = kpis_for(&[], 1.5, 1.0);
        assert_eq!(
            calculate_financial_impact(&kpis, 1_500_000.0, 0.0, TimeHorizon::Months12),
            Err(ValueCaseError::EmptySelection)
        );
        // the benefit lines themselves are still well defined
        let benefit = AnnualBenefit::from_kpis(&kpis, 1_500_000.0).unwrap();
        assert_eq!(benefit, AnnualBenefit::default());
    }

    #[test]
    fn test_zero_benefit_has_no_payback() {
        // root_cause touches neither cost_per_ticket nor revenue_at_risk
        let kpis = kpis_for(&["root_cause"], 1.0, 1.0);
        let fi = calculate_financial_impact(&kpis, 1_000_000.0, 200_000.0, TimeHorizon::Months36)
            .unwrap();
        assert_eq!(fi.total_annual_benefit(), 0.0);
        assert_eq!(fi.payback_period, None);
        assert_eq!(fi.net_roi, -100.0);
    }

    #[test]
    fn test_missing_kpi() {
        let kpis = kpis_for(&["triage"], 1.0, 1.0)
            .into_iter()
            .filter(|k| k.id() != REVENUE_AT_RISK)
            .collect::<Vec<_>>();
        assert_eq!(
            AnnualBenefit::from_kpis(&kpis, 1.0),
            Err(ValueCaseError::MissingKpi(REVENUE_AT_RISK))
        );
    }

    #[test]
    fn test_serializes_flat() {
        let kpis = kpis_for(&["triage"], 1.0, 1.0);
        let fi = calculate_financial_impact(&kpis, 1_000_000.0, 150_000.0, TimeHorizon::Months12)
            .unwrap();
        let v = serde_json::to_value(fi).unwrap();
        assert!(v.get("annual_savings").is_some());
        assert!(v.get("net_roi").is_some());
        assert!(v.get("benefit").is_none());
    }
}
