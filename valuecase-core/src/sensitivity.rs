//! Execution-risk inputs and the composite sensitivity factor that damps
//! every feature impact.

use serde::{Deserialize, Serialize};

/// A slider value, clamped to 0-100.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, PartialOrd)]
#[serde(from = "f64", into = "f64")]
pub struct Percent(f64);

impl Percent {
    /// Clamp into [0, 100]. NaN becomes 0; infinities clamp like any
    /// other out-of-range value.
    pub fn new(pct: f64) -> Self {
        if pct.is_nan() {
            Self(0.0)
        } else {
            Self(pct.clamp(0.0, 100.0))
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// As a 0-1 ratio
    pub fn ratio(&self) -> f64 {
        self.0 / 100.0
    }
}

impl From<f64> for Percent {
    fn from(pct: f64) -> Self {
        Self::new(pct)
    }
}

impl From<Percent> for f64 {
    fn from(p: Percent) -> Self {
        p.0
    }
}

/// Adoption, data-quality and change-management readiness.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Sensitivity {
    pub adoption: Percent,
    pub data_quality: Percent,
    pub change_mgmt: Percent,
}

impl Default for Sensitivity {
    fn default() -> Self {
        Self::new(80.0, 75.0, 70.0)
    }
}

impl Sensitivity {
    pub fn new(adoption: f64, data_quality: f64, change_mgmt: f64) -> Self {
        Self {
            adoption: Percent::new(adoption),
            data_quality: Percent::new(data_quality),
            change_mgmt: Percent::new(change_mgmt),
        }
    }

    /// S = adoption * data_quality * (0.5 + change_mgmt / 200), in [0, 1].
    ///
    /// Change management only ever halves the effect; adoption and data
    /// quality can zero it.
    pub fn factor(&self) -> f64 {
        self.adoption.ratio() * self.data_quality.ratio() * (0.5 + self.change_mgmt.value() / 200.0)
    }
}
