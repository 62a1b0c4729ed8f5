//! valuecase-core: reference data, selection state, and KPI projection for
//! the AI value-case calculator

pub mod catalog;
pub mod error;
pub mod format;
pub mod market;
pub mod projection;
pub mod scale;
pub mod selection;
pub mod sensitivity;

pub use catalog::{
    COST_PER_TICKET, Catalog, CatalogData, Complexity, Feature, Impact, ImpactSpec, Kpi, Outcome,
    REVENUE_AT_RISK,
};
pub use error::{Result, ValueCaseError};
pub use format::{format_count, format_currency, format_delta, format_months, format_percent0};
pub use market::{CompanySize, Industry, TimeHorizon};
pub use projection::{KpiResult, find_result, project_kpi, project_kpis};
pub use scale::{BASE_ANNUAL_VOLUME, Scale, resolve_scale};
pub use selection::{Action, DEFAULT_FEATURES, SelectionState, reduce};
pub use sensitivity::{Percent, Sensitivity};
