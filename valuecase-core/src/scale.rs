//! Scale resolver: market selections to demand-volume multipliers.

use serde::{Deserialize, Serialize};

use crate::market::{CompanySize, Industry};

/// Annual ticket volume of a Retail/Enterprise reference company.
pub const BASE_ANNUAL_VOLUME: f64 = 1_000_000.0;

/// Resolved scale for one (industry, size) pair.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Scale {
    pub industry_factor: f64,
    pub size_factor: f64,
    /// industry_factor * size_factor
    pub total_multiplier: f64,
    /// Tickets per year.
    pub annual_volume: f64,
}

/// Both inputs are closed enums, so this is total.
pub fn resolve_scale(industry: Industry, size: CompanySize) -> Scale {
    let industry_factor = industry.factor();
    let size_factor = size.factor();
    let total_multiplier = industry_factor * size_factor;

    Scale {
        industry_factor,
        size_factor,
        total_multiplier,
        annual_volume: BASE_ANNUAL_VOLUME * total_multiplier,
    }
}
