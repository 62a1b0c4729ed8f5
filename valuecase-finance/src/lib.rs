//! valuecase-finance: financial impact, cumulative value timeline, and the
//! end-to-end derivation pipeline built on valuecase-core

pub mod export;
pub mod impact;
pub mod pipeline;
pub mod session;
pub mod timeline;

pub use export::{EMPTY_SELECTION_PROMPT, ExportSummary, headline};
pub use impact::{AnnualBenefit, FinancialImpact, calculate_financial_impact, with_investment};
pub use pipeline::ValueCase;
pub use session::Session;
pub use timeline::{ChartPoint, Timeline, project_timeline};
