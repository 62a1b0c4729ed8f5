//! Market context selections: industry, company size, and projection horizon.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValueCaseError;

/// Industry vertical. Scales ticket volume and the revenue-at-risk baseline.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Industry {
    #[serde(rename = "Telecom", alias = "telecom")]
    Telecom,
    #[serde(rename = "Banking", alias = "banking")]
    Banking,
    #[serde(rename = "Healthcare", alias = "healthcare")]
    Healthcare,
    #[serde(rename = "Retail", alias = "retail")]
    Retail,
}

impl Industry {
    pub const ALL: [Industry; 4] = [
        Industry::Telecom,
        Industry::Banking,
        Industry::Healthcare,
        Industry::Retail,
    ];

    /// Demand-volume multiplier for this industry
    pub fn factor(&self) -> f64 {
        match self {
            Industry::Telecom => 1.2,
            Industry::Banking => 1.5,
            Industry::Healthcare => 1.3,
            Industry::Retail => 1.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Industry::Telecom => "Telecom",
            Industry::Banking => "Banking",
            Industry::Healthcare => "Healthcare",
            Industry::Retail => "Retail",
        }
    }
}

impl fmt::Display for Industry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Industry {
    type Err = ValueCaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "telecom" | "telco" => Ok(Industry::Telecom),
            "banking" | "bank" => Ok(Industry::Banking),
            "healthcare" | "health" => Ok(Industry::Healthcare),
            "retail" => Ok(Industry::Retail),
            _ => Err(ValueCaseError::UnknownIndustry(s.to_string())),
        }
    }
}

/// Company size tier, a pure scale multiplier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CompanySize {
    #[serde(rename = "Mid-Market", alias = "mid-market")]
    MidMarket,
    #[serde(rename = "Enterprise", alias = "enterprise")]
    Enterprise,
    #[serde(rename = "Global", alias = "global")]
    Global,
}

impl CompanySize {
    pub const ALL: [CompanySize; 3] = [
        CompanySize::MidMarket,
        CompanySize::Enterprise,
        CompanySize::Global,
    ];

    pub fn factor(&self) -> f64 {
        match self {
            CompanySize::MidMarket => 0.5,
            CompanySize::Enterprise => 1.0,
            CompanySize::Global => 2.5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CompanySize::MidMarket => "Mid-Market",
            CompanySize::Enterprise => "Enterprise",
            CompanySize::Global => "Global",
        }
    }
}

impl fmt::Display for CompanySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CompanySize {
    type Err = ValueCaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mid-market" | "midmarket" | "mid_market" | "mid" => Ok(CompanySize::MidMarket),
            "enterprise" => Ok(CompanySize::Enterprise),
            "global" => Ok(CompanySize::Global),
            _ => Err(ValueCaseError::UnknownCompanySize(s.to_string())),
        }
    }
}

/// Projection window length. Only 12, 24 and 36 months exist.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "u32", into = "u32")]
pub enum TimeHorizon {
    Months12,
    Months24,
    Months36,
}

impl TimeHorizon {
    pub const ALL: [TimeHorizon; 3] = [
        TimeHorizon::Months12,
        TimeHorizon::Months24,
        TimeHorizon::Months36,
    ];

    pub fn months(&self) -> u32 {
        match self {
            TimeHorizon::Months12 => 12,
            TimeHorizon::Months24 => 24,
            TimeHorizon::Months36 => 36,
        }
    }

    /// Horizon length in years (months / 12)
    pub fn years(&self) -> f64 {
        f64::from(self.months()) / 12.0
    }
}

impl TryFrom<u32> for TimeHorizon {
    type Error = ValueCaseError;

    fn try_from(months: u32) -> Result<Self, Self::Error> {
        match months {
            12 => Ok(TimeHorizon::Months12),
            24 => Ok(TimeHorizon::Months24),
            36 => Ok(TimeHorizon::Months36),
            other => Err(ValueCaseError::InvalidHorizon(other)),
        }
    }
}

impl From<TimeHorizon> for u32 {
    fn from(h: TimeHorizon) -> Self {
        h.months()
    }
}

impl fmt::Display for TimeHorizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Months", self.months())
    }
}

impl FromStr for TimeHorizon {
    type Err = ValueCaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .trim()
            .to_lowercase()
            .trim_end_matches("months")
            .trim_end_matches("mo")
            .trim()
            .to_string();
        let months: u32 = digits
            .parse()
            .map_err(|_| ValueCaseError::UnparsableHorizon(s.trim().to_string()))?;
        TimeHorizon::try_from(months)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_industry_factors() {
        assert_eq!(Industry::Telecom.factor(), 1.2);
        assert_eq!(Industry::Banking.factor(), 1.5);
        assert_eq!(Industry::Healthcare.factor(), 1.3);
        assert_eq!(Industry::Retail.factor(), 1.0);
    }

    #[test]
    fn test_size_factors() {
        assert_eq!(CompanySize::MidMarket.factor(), 0.5);
        assert_eq!(CompanySize::Enterprise.factor(), 1.0);
        assert_eq!(CompanySize::Global.factor(), 2.5);
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!("banking".parse::<Industry>().unwrap(), Industry::Banking);
        assert_eq!(" Retail ".parse::<Industry>().unwrap(), Industry::Retail);
        assert_eq!("Mid-Market".parse::<CompanySize>().unwrap(), CompanySize::MidMarket);
        assert_eq!("midmarket".parse::<CompanySize>().unwrap(), CompanySize::MidMarket);
        assert!(matches!(
            "energy".parse::<Industry>(),
            Err(ValueCaseError::UnknownIndustry(_))
        ));
    }

    #[test]
    fn test_horizon_is_closed() {
        assert_eq!(TimeHorizon::try_from(24).unwrap().months(), 24);
        assert_eq!(
            TimeHorizon::try_from(18),
            Err(ValueCaseError::InvalidHorizon(18))
        );
        assert_eq!("36".parse::<TimeHorizon>().unwrap(), TimeHorizon::Months36);
        assert_eq!("12 months".parse::<TimeHorizon>().unwrap(), TimeHorizon::Months12);
        assert_eq!(TimeHorizon::Months24.to_string(), "24 Months");
    }

    #[test]
    fn test_horizon_parse_error_keeps_input() {
        assert_eq!(
            "abc".parse::<TimeHorizon>(),
            Err(ValueCaseError::UnparsableHorizon("abc".into()))
        );
        assert_eq!(
            "18 months".parse::<TimeHorizon>(),
            Err(ValueCaseError::InvalidHorizon(18))
        );
    }

    #[test]
    fn test_serde_labels() {
        let json = serde_json::to_string(&CompanySize::MidMarket).unwrap();
        assert_eq!(json, "\"Mid-Market\"");
        let h: TimeHorizon = serde_json::from_str("36").unwrap();
        assert_eq!(h, TimeHorizon::Months36);
        assert!(serde_json::from_str::<TimeHorizon>("30").is_err());
    }
}
