//! Session: the single owner of mutable selection state.
//!
//! Every `dispatch` replaces the selection and re-derives the full
//! `ValueCase` before returning, so readers never see a projection computed
//! from an older snapshot.

use chrono::{DateTime, Utc};
use valuecase_core::{Action, Catalog, KpiResult, Outcome, Result, SelectionState, reduce};

use crate::export::ExportSummary;
use crate::impact::FinancialImpact;
use crate::pipeline::ValueCase;
use crate::timeline::ChartPoint;

#[derive(Debug, Clone)]
pub struct Session<'c> {
    catalog: &'c Catalog,
    selection: SelectionState,
    case: ValueCase,
}

impl<'c> Session<'c> {
    /// Start a session at the documented defaults.
    pub fn new(catalog: &'c Catalog) -> Result<Self> {
        Self::with_selection(catalog, SelectionState::default())
    }

    pub fn with_selection(catalog: &'c Catalog, selection: SelectionState) -> Result<Self> {
        let case = ValueCase::derive(catalog, &selection)?;
        Ok(Self {
            catalog,
            selection,
            case,
        })
    }

    /// Apply one action and recompute everything.
    ///
    /// On error the session is left exactly as it was.
    pub fn dispatch(&mut self, action: Action) -> Result<&ValueCase> {
        tracing::trace!(?action, "dispatch");
        let next = reduce(self.catalog, &self.selection, action)?;
        let case = ValueCase::derive(self.catalog, &next)?;
        self.selection = next;
        self.case = case;
        Ok(&self.case)
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn value_case(&self) -> &ValueCase {
        &self.case
    }

    pub fn kpi_results(&self) -> &[KpiResult] {
        &self.case.kpis
    }

    /// `None` until at least one capability is selected.
    pub fn financial_impact(&self) -> Option<&FinancialImpact> {
        self.case.financial.as_ref()
    }

    pub fn chart_data(&self) -> Vec<ChartPoint> {
        self.case.chart_data()
    }

    pub fn active_outcomes(&self) -> &[Outcome] {
        &self.case.active_outcomes
    }

    pub fn total_cost(&self) -> f64 {
        self.case.total_cost
    }

    pub fn export(&self, generated_at: DateTime<Utc>) -> ExportSummary {
        ExportSummary::from_case(self.catalog, &self.case, generated_at)
    }
}
