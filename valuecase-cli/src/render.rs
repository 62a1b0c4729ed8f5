//! Plain-text rendering of catalogs and derived value cases.

use std::fmt::Write as _;
use valuecase_core::{
    Catalog, format_count, format_currency, format_delta, format_months, format_percent0,
};
use valuecase_finance::{EMPTY_SELECTION_PROMPT, ValueCase, headline};

pub fn render_catalog(catalog: &Catalog) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "## Industries\n");
    for i in catalog.industries() {
        let _ = writeln!(out, "- {:<12} x{}", i.to_string(), i.factor());
    }

    let _ = writeln!(out, "\n## Company sizes\n");
    for s in catalog.sizes() {
        let _ = writeln!(out, "- {:<12} x{}", s.to_string(), s.factor());
    }

    let _ = writeln!(out, "\n## Horizons\n");
    for h in catalog.horizons() {
        let _ = writeln!(out, "- {h}");
    }

    let _ = writeln!(out, "\n## KPIs\n");
    for k in catalog.kpis() {
        let direction = if k.lower_is_better { "lower is better" } else { "higher is better" };
        let _ = writeln!(
            out,
            "- {:<16} {} (baseline {}, {})",
            k.id,
            k.name,
            k.format_value(k.baseline),
            direction
        );
    }

    let _ = writeln!(out, "\n## Features\n");
    for f in catalog.features() {
        let impacts: Vec<String> = f
            .impacts
            .iter()
            .map(|i| format!("{} x{}", i.kpi_id, i.multiplier))
            .collect();
        let _ = writeln!(
            out,
            "- {:<13} {} | {} | {} complexity | {} | {}",
            f.id,
            f.name,
            format_currency(f.cost),
            f.complexity,
            f.time_to_value,
            impacts.join(", ")
        );
    }

    let _ = writeln!(out, "\n## Outcomes\n");
    for o in catalog.outcomes() {
        let _ = writeln!(
            out,
            "- {} ({}): {}",
            o.name,
            o.feature_ids.join(", "),
            o.description
        );
    }

    out
}

/// The dashboard: context, outcomes, KPI table, ROI block, headline.
pub fn render_dashboard(case: &ValueCase) -> String {
    let mut out = String::new();
    let sel = &case.selection;

    let _ = writeln!(
        out,
        "# Value case: {} / {} / {}\n",
        sel.industry, sel.size, sel.horizon
    );
    let _ = writeln!(
        out,
        "Scale x{:.2} ({} annual tickets) | adoption {}% | data quality {}% | change mgmt {}% | sensitivity {:.2}",
        case.scale.total_multiplier,
        format_count(case.scale.annual_volume),
        sel.sensitivity.adoption.value(),
        sel.sensitivity.data_quality.value(),
        sel.sensitivity.change_mgmt.value(),
        case.sensitivity_factor
    );

    let _ = writeln!(out, "\n## Capabilities\n");
    if case.active_features.is_empty() {
        let _ = writeln!(out, "(none selected)");
    }
    for id in &case.active_features {
        let _ = writeln!(out, "- {id}");
    }

    let _ = writeln!(out, "\n## Strategic outcomes\n");
    if case.active_outcomes.is_empty() {
        let _ = writeln!(out, "(none unlocked)");
    }
    for o in &case.active_outcomes {
        let _ = writeln!(out, "- {}: {}", o.name, o.description);
    }

    let _ = writeln!(out, "\n## KPI impact\n");
    for k in &case.kpis {
        let _ = writeln!(
            out,
            "{:<20} {:>10} -> {:>10}  {:>7}",
            k.kpi.name,
            k.kpi.format_value(k.baseline),
            k.kpi.format_value(k.improved),
            format_delta(k.delta)
        );
    }

    let _ = writeln!(out, "\n## Financial ROI\n");
    match &case.financial {
        Some(fi) => {
            let _ = writeln!(out, "Net ROI ({}mo):      {}", sel.horizon.months(), format_percent0(fi.net_roi));
            let _ = writeln!(out, "Payback period:      {}", format_months(fi.payback_period));
            let _ = writeln!(out, "Operational savings: {}", format_currency(fi.benefit.annual_savings));
            let _ = writeln!(out, "Revenue uplift:      {}", format_currency(fi.benefit.revenue_uplift));
            let _ = writeln!(out, "Risk reduction:      {}", format_currency(fi.benefit.risk_reduction));
            let _ = writeln!(out, "Total annual value:  {}", format_currency(fi.total_annual_benefit()));
            let _ = writeln!(out, "Investment:          ({})", format_currency(fi.total_cost));
        }
        None => {
            let _ = writeln!(out, "{EMPTY_SELECTION_PROMPT}");
        }
    }

    let _ = writeln!(out, "\n{}", headline(case));
    out
}
