//! Executive value-case summary: a read-only snapshot of one derived case.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Write as _;
use valuecase_core::{
    Catalog, CompanySize, Industry, format_count, format_currency, format_months, format_percent0,
};

use crate::impact::FinancialImpact;
use crate::pipeline::ValueCase;

/// Months the dashboard headline promises results within.
pub const HEADLINE_WINDOW_MONTHS: u32 = 18;

/// Prompt shown instead of ROI figures when nothing is selected.
pub const EMPTY_SELECTION_PROMPT: &str = "Select a capability to begin.";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ExportSummary {
    pub generated_at: DateTime<Utc>,
    pub capabilities: Vec<String>,
    pub total_investment: f64,
    pub financial: Option<FinancialImpact>,
    pub industry: Industry,
    pub size: CompanySize,
    pub annual_volume: f64,
    pub adoption: f64,
    pub data_quality: f64,
    pub headline: String,
}

impl ExportSummary {
    pub fn from_case(catalog: &Catalog, case: &ValueCase, generated_at: DateTime<Utc>) -> Self {
        let capabilities = case
            .active_features
            .iter()
            .filter_map(|id| catalog.feature(id))
            .map(|f| f.name.clone())
            .collect();

        Self {
            generated_at,
            capabilities,
            total_investment: case.total_cost,
            financial: case.financial,
            industry: case.selection.industry,
            size: case.selection.size,
            annual_volume: case.scale.annual_volume,
            adoption: case.selection.sensitivity.adoption.value(),
            data_quality: case.selection.sensitivity.data_quality.value(),
            headline: headline(case),
        }
    }

    /// Plain-text/markdown rendering of the summary.
    pub fn render_markdown(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# Executive Value Case Summary\n");
        let _ = writeln!(out, "Generated: {}\n", self.generated_at.format("%Y-%m-%d %H:%M UTC"));

        let _ = writeln!(out, "## Selected Capabilities\n");
        if self.capabilities.is_empty() {
            let _ = writeln!(out, "- (none)");
        }
        for name in &self.capabilities {
            let _ = writeln!(out, "- {name}");
        }

        let _ = writeln!(out, "\n## Financials\n");
        let _ = writeln!(out, "- Total Investment: {}", format_currency(self.total_investment));
        match &self.financial {
            Some(fi) => {
                let _ = writeln!(out, "- Annual Benefit: {}", format_currency(fi.total_annual_benefit()));
                let _ = writeln!(out, "- Net ROI: {}", format_percent0(fi.net_roi));
                let _ = writeln!(out, "- Payback: {}", format_months(fi.payback_period));
            }
            None => {
                let _ = writeln!(out, "- {EMPTY_SELECTION_PROMPT}");
            }
        }

        let _ = writeln!(out, "\n## Key Assumptions\n");
        let _ = writeln!(out, "- Industry baseline: {}", self.industry);
        let _ = writeln!(
            out,
            "- Scale: {} ({} annual tickets)",
            self.size,
            format_count(self.annual_volume)
        );
        let _ = writeln!(out, "- Adoption: {}%", self.adoption);
        let _ = writeln!(out, "- Data Quality: {}%", self.data_quality);

        let _ = writeln!(out, "\n{}", self.headline);
        out
    }
}

/// The dashboard's one-line takeaway.
pub fn headline(case: &ValueCase) -> String {
    match &case.financial {
        Some(fi) => format!(
            "Based on selected capabilities, the model estimates a {:.0}% reduction in operational costs and a {} annualized ROI within {} months.",
            case.headline_delta().abs(),
            format_currency(fi.total_annual_benefit()),
            HEADLINE_WINDOW_MONTHS
        ),
        None => EMPTY_SELECTION_PROMPT.to_string(),
    }
}
