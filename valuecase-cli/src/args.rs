use anyhow::{Context, Result};
use clap::Args;
use std::collections::BTreeSet;
use valuecase_core::{Action, Catalog, CompanySize, Industry, SelectionState, TimeHorizon, reduce};

/// Selection overrides shared by `project`, `chart` and `export`.
#[derive(Args, Debug, Clone, Default)]
pub struct SelectionArgs {
    /// Industry vertical (Telecom, Banking, Healthcare, Retail)
    #[arg(long)]
    pub industry: Option<Industry>,

    /// Company size (Mid-Market, Enterprise, Global)
    #[arg(long)]
    pub size: Option<CompanySize>,

    /// Projection horizon in months (12, 24, 36)
    #[arg(long)]
    pub horizon: Option<TimeHorizon>,

    /// Feature id to select; repeat for several. Replaces the default set.
    #[arg(long = "feature", value_name = "ID")]
    pub features: Vec<String>,

    /// Start from an empty feature set
    #[arg(long, conflicts_with = "features")]
    pub no_features: bool,

    /// AI adoption rate, 0-100
    #[arg(long, value_name = "PCT")]
    pub adoption: Option<f64>,

    /// Data quality, 0-100
    #[arg(long, value_name = "PCT")]
    pub data_quality: Option<f64>,

    /// Change management readiness, 0-100
    #[arg(long, value_name = "PCT")]
    pub change_mgmt: Option<f64>,
}

impl SelectionArgs {
    /// Reducer actions that take `base` to the requested selection.
    pub fn actions(&self, base: &SelectionState) -> Vec<Action> {
        let mut actions = Vec::new();
        if let Some(i) = self.industry {
            actions.push(Action::SetIndustry(i));
        }
        if let Some(s) = self.size {
            actions.push(Action::SetSize(s));
        }
        if let Some(h) = self.horizon {
            actions.push(Action::SetHorizon(h));
        }

        if self.no_features || !self.features.is_empty() {
            let wanted: BTreeSet<&str> = self.features.iter().map(String::as_str).collect();
            let current: BTreeSet<&str> = base.feature_ids().collect();
            for id in current.symmetric_difference(&wanted) {
                actions.push(Action::ToggleFeature(id.to_string()));
            }
        }

        if let Some(pct) = self.adoption {
            actions.push(Action::SetAdoption(pct));
        }
        if let Some(pct) = self.data_quality {
            actions.push(Action::SetDataQuality(pct));
        }
        if let Some(pct) = self.change_mgmt {
            actions.push(Action::SetChangeMgmt(pct));
        }
        actions
    }

    pub fn apply(&self, catalog: &Catalog, base: SelectionState) -> Result<SelectionState> {
        self.actions(&base).into_iter().try_fold(base, |state, action| {
            reduce(catalog, &state, action).context("selection flags")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use valuecase_core::ValueCaseError;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(flatten)]
        selection: SelectionArgs,
    }

    fn parse(args: &[&str]) -> SelectionArgs {
        let argv = std::iter::once("valuecase").chain(args.iter().copied());
        TestCli::try_parse_from(argv).unwrap().selection
    }

    #[test]
    fn test_no_flags_keeps_base() {
        let c = Catalog::builtin().unwrap();
        let base = SelectionState::default();
        let out = parse(&[]).apply(&c, base.clone()).unwrap();
        assert_eq!(out, base);
    }

    #[test]
    fn test_flags_override_base() {
        let c = Catalog::builtin().unwrap();
        let args = parse(&[
            "--industry",
            "retail",
            "--size",
            "mid-market",
            "--horizon",
            "36",
            "--feature",
            "churn",
            "--feature",
            "copilot",
            "--adoption",
            "140",
        ]);
        let out = args.apply(&c, SelectionState::default()).unwrap();
        assert_eq!(out.industry, Industry::Retail);
        assert_eq!(out.size, CompanySize::MidMarket);
        assert_eq!(out.horizon, TimeHorizon::Months36);
        assert_eq!(out.feature_ids().collect::<Vec<_>>(), vec!["churn", "copilot"]);
        assert_eq!(out.sensitivity.adoption.value(), 100.0);
        assert_eq!(out.sensitivity.data_quality.value(), 75.0);
    }

    #[test]
    fn test_repeated_feature_is_selected_once() {
        let c = Catalog::builtin().unwrap();
        let args = parse(&["--feature", "churn", "--feature", "churn"]);
        let out = args.apply(&c, SelectionState::default()).unwrap();
        assert_eq!(out.feature_ids().collect::<Vec<_>>(), vec!["churn"]);
    }

    #[test]
    fn test_no_features_clears_selection() {
        let c = Catalog::builtin().unwrap();
        let out = parse(&["--no-features"])
            .apply(&c, SelectionState::default())
            .unwrap();
        assert!(!out.has_features());
    }

    #[test]
    fn test_unknown_feature_fails() {
        let c = Catalog::builtin().unwrap();
        let err = parse(&["--feature", "hologram"])
            .apply(&c, SelectionState::default())
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValueCaseError>(),
            Some(&ValueCaseError::UnknownFeatureId("hologram".into()))
        );
    }

    #[test]
    fn test_bad_horizon_is_a_parse_error() {
        let argv = ["valuecase", "--horizon", "18"];
        assert!(TestCli::try_parse_from(argv).is_err());
    }
}
