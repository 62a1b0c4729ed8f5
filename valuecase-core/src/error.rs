//! Error taxonomy for catalog integrity and pipeline derivation.

/// Errors produced by the catalog, the selection reducer, and the
/// derivation pipeline.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValueCaseError {
    /// A KPI baseline resolved to zero, so its delta is undefined.
    #[error("KPI '{kpi}' has a zero baseline; delta is undefined")]
    InvalidBaseline { kpi: String },

    /// No capabilities are selected, so ROI and payback are undefined.
    #[error("no capabilities selected")]
    EmptySelection,

    /// A feature id that is not in the catalog.
    #[error("unknown feature id: {0}")]
    UnknownFeatureId(String),

    /// A feature impact points at a KPI that is not in the catalog.
    #[error("feature '{owner}' references unknown KPI id '{kpi}'")]
    UnknownKpiId { owner: String, kpi: String },

    /// An outcome depends on a feature that is not in the catalog.
    #[error("outcome '{outcome}' depends on unknown feature id '{feature}'")]
    UnknownOutcomeFeature { outcome: String, feature: String },

    /// A feature cost that is not a positive finite amount.
    #[error("feature '{feature}' has an invalid cost; expected a positive amount")]
    InvalidCost { feature: String },

    /// An impact multiplier that is not a positive finite factor.
    #[error("feature '{owner}' has an invalid multiplier on KPI '{kpi}'; expected a positive factor")]
    InvalidImpact { owner: String, kpi: String },

    /// Two catalog entries of the same kind share an id.
    #[error("duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },

    /// A KPI the financial calculator depends on is missing.
    #[error("catalog is missing required KPI '{0}'")]
    MissingKpi(&'static str),

    /// Horizon outside {12, 24, 36}.
    #[error("invalid horizon {0} (expected 12, 24 or 36 months)")]
    InvalidHorizon(u32),

    /// Horizon text that is not a month count.
    #[error("invalid horizon '{0}' (expected 12, 24 or 36 months)")]
    UnparsableHorizon(String),

    #[error("unknown industry: {0}")]
    UnknownIndustry(String),

    #[error("unknown company size: {0}")]
    UnknownCompanySize(String),
}

impl ValueCaseError {
    /// True for errors that indicate a defect in the reference data rather
    /// than a runtime condition.
    pub fn is_catalog_defect(&self) -> bool {
        matches!(
            self,
            ValueCaseError::InvalidBaseline { .. }
                | ValueCaseError::InvalidCost { .. }
                | ValueCaseError::InvalidImpact { .. }
                | ValueCaseError::UnknownKpiId { .. }
                | ValueCaseError::UnknownOutcomeFeature { .. }
                | ValueCaseError::DuplicateId { .. }
                | ValueCaseError::MissingKpi(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ValueCaseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_defect_classification() {
        assert!(ValueCaseError::MissingKpi("cost_per_ticket").is_catalog_defect());
        assert!(ValueCaseError::InvalidCost { feature: "triage".into() }.is_catalog_defect());
        assert!(
            ValueCaseError::InvalidImpact {
                owner: "triage".into(),
                kpi: "aht".into()
            }
            .is_catalog_defect()
        );
        assert!(!ValueCaseError::EmptySelection.is_catalog_defect());
        assert!(!ValueCaseError::UnknownFeatureId("x".into()).is_catalog_defect());
    }

    #[test]
    fn test_error_messages() {
        let e = ValueCaseError::UnknownKpiId {
            owner: "triage".into(),
            kpi: "nps".into(),
        };
        assert_eq!(e.to_string(), "feature 'triage' references unknown KPI id 'nps'");
        assert_eq!(
            ValueCaseError::InvalidHorizon(18).to_string(),
            "invalid horizon 18 (expected 12, 24 or 36 months)"
        );
        assert_eq!(
            ValueCaseError::UnparsableHorizon("abc".into()).to_string(),
            "invalid horizon 'abc' (expected 12, 24 or 36 months)"
        );
    }
}
