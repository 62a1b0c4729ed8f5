//! The derivation pipeline: one selection snapshot in, every dashboard
//! number out.
//!
//! selection -> scale -> KPI projection -> financial impact -> timeline
//!
//! Each stage reads only the outputs of the stages before it in the same
//! call, so a `ValueCase` is always internally consistent.

use serde::Serialize;
use valuecase_core::{
    Catalog, KpiResult, Outcome, Result, Scale, SelectionState, ValueCaseError, project_kpis,
    resolve_scale,
};

use crate::impact::{AnnualBenefit, FinancialImpact, with_investment};
use crate::timeline::{ChartPoint, Timeline, project_timeline};

/// Everything derived from one selection snapshot.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ValueCase {
    pub selection: SelectionState,
    pub scale: Scale,
    pub sensitivity_factor: f64,
    /// Selected feature ids in catalog order.
    pub active_features: Vec<String>,
    pub total_cost: f64,
    pub kpis: Vec<KpiResult>,
    pub benefit: AnnualBenefit,
    /// `None` when nothing is selected.
    pub financial: Option<FinancialImpact>,
    #[serde(skip)]
    pub timeline: Timeline,
    pub active_outcomes: Vec<Outcome>,
}

impl ValueCase {
    /// Run the whole chain for `selection`.
    ///
    /// An empty selection is not an error here: it yields a case with
    /// `financial == None`. Only catalog defects propagate.
    pub fn derive(catalog: &Catalog, selection: &SelectionState) -> Result<Self> {
        let scale = resolve_scale(selection.industry, selection.size);
        let sensitivity_factor = selection.sensitivity.factor();
        let features = selection.active_features(catalog);
        let total_cost: f64 = features.iter().map(|f| f.cost).sum();

        let kpis = project_kpis(
            catalog.kpis(),
            &features,
            scale.total_multiplier,
            sensitivity_factor,
        )?;
        let benefit = AnnualBenefit::from_kpis(&kpis, scale.annual_volume)?;

        let financial = match with_investment(benefit, total_cost, selection.horizon) {
            Ok(fi) => Some(fi),
            Err(ValueCaseError::EmptySelection) => None,
            Err(e) => return Err(e),
        };

        let timeline = project_timeline(
            benefit.total_annual_benefit,
            total_cost,
            selection.horizon.months(),
        );

        let active_outcomes = selection
            .active_outcomes(catalog)
            .into_iter()
            .cloned()
            .collect();

        tracing::debug!(
            industry = %selection.industry,
            size = %selection.size,
            horizon = selection.horizon.months(),
            features = features.len(),
            sensitivity = sensitivity_factor,
            total_cost,
            annual_benefit = benefit.total_annual_benefit,
            "derived value case"
        );

        Ok(Self {
            selection: selection.clone(),
            scale,
            sensitivity_factor,
            active_features: features.iter().map(|f| f.id.clone()).collect(),
            total_cost,
            kpis,
            benefit,
            financial,
            timeline,
            active_outcomes,
        })
    }

    pub fn has_selection(&self) -> bool {
        self.financial.is_some()
    }

    pub fn chart_data(&self) -> Vec<ChartPoint> {
        self.timeline.to_vec()
    }

    pub fn kpi(&self, id: &str) -> Option<&KpiResult> {
        self.kpis.iter().find(|k| k.kpi.id == id)
    }

    /// Delta of the first catalog KPI, which drives the dashboard headline.
    pub fn headline_delta(&self) -> f64 {
        self.kpis.first().map(|k| k.delta).unwrap_or(0.0)
    }
}
