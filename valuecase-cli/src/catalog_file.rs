//! Catalog source: the built-in reference data or a TOML file.
//!
//! Validation happens here, once, before any command runs. A broken
//! catalog is a startup failure.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use valuecase_core::{Catalog, CatalogData};

pub fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    let Some(path) = path else {
        return Catalog::builtin().context("built-in catalog failed validation");
    };
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let catalog = parse_catalog(&s).with_context(|| format!("load catalog {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        features = catalog.features().len(),
        "using catalog file"
    );
    Ok(catalog)
}

pub fn parse_catalog(s: &str) -> Result<Catalog> {
    let data: CatalogData = toml::from_str(s).context("parse catalog TOML")?;
    Ok(Catalog::new(data)?)
}

/// TOML rendering of a catalog, suitable as a starting point for edits.
pub fn catalog_to_toml(catalog: &Catalog) -> Result<String> {
    toml::to_string_pretty(&catalog.to_data()).context("serialize catalog")
}

#[cfg(test)]
mod tests {
    use super::*;
    use valuecase_core::ValueCaseError;

    #[test]
    fn test_builtin_roundtrips_through_toml() {
        let builtin = Catalog::builtin().unwrap();
        let s = catalog_to_toml(&builtin).unwrap();
        assert_eq!(parse_catalog(&s).unwrap(), builtin);
    }

    #[test]
    fn test_dangling_reference_fails_fast() {
        let s = r#"
[[kpis]]
id = "cost_per_ticket"
name = "Cost per Ticket"
unit = "$"
baseline = 25.0
lower_is_better = true

[[kpis]]
id = "revenue_at_risk"
name = "Revenue at Risk"
unit = "$M"
baseline = 45.0
lower_is_better = true

[[features]]
id = "triage"
name = "Triage"
group = "AI Capabilities"
cost = 1000.0
complexity = "Low"
time_to_value = "1 month"

[[features.impacts]]
kpi_id = "nps"
multiplier = 1.1
"#;
        let err = parse_catalog(s).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValueCaseError>(),
            Some(&ValueCaseError::UnknownKpiId {
                owner: "triage".into(),
                kpi: "nps".into()
            })
        );
    }

    #[test]
    fn test_negative_cost_or_nan_multiplier_fails_at_load() {
        let builtin = catalog_to_toml(&Catalog::builtin().unwrap()).unwrap();

        let negative = builtin.replacen("cost = 150000.0", "cost = -150000.0", 1);
        assert_ne!(negative, builtin);
        let err = parse_catalog(&negative).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValueCaseError>(),
            Some(&ValueCaseError::InvalidCost {
                feature: "triage".into()
            })
        );

        let nan = builtin.replacen("multiplier = 0.85", "multiplier = nan", 1);
        assert_ne!(nan, builtin);
        let err = parse_catalog(&nan).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ValueCaseError>(),
            Some(ValueCaseError::InvalidImpact { .. })
        ));
    }
}
