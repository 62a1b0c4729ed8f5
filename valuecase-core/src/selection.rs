//! Selection state and its pure transition function.
//!
//! `SelectionState` is the only mutable entity of a session. It is modelled
//! as a value: the owner replaces it with `reduce(...)`'s output and then
//! re-derives everything downstream from the new snapshot.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::catalog::{Catalog, Feature, Outcome};
use crate::error::{Result, ValueCaseError};
use crate::market::{CompanySize, Industry, TimeHorizon};
use crate::sensitivity::{Percent, Sensitivity};

/// Feature ids selected when a session starts.
pub const DEFAULT_FEATURES: [&str; 2] = ["triage", "copilot"];

/// One consistent snapshot of the user's choices.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SelectionState {
    pub industry: Industry,
    pub size: CompanySize,
    pub horizon: TimeHorizon,
    /// Membership only; impacts are applied in catalog order.
    features: BTreeSet<String>,
    pub sensitivity: Sensitivity,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            industry: Industry::Banking,
            size: CompanySize::Enterprise,
            horizon: TimeHorizon::Months24,
            features: DEFAULT_FEATURES.iter().map(|f| f.to_string()).collect(),
            sensitivity: Sensitivity::default(),
        }
    }
}

impl SelectionState {
    /// Build a state with an explicit feature set, checked against `catalog`.
    pub fn new<I, S>(
        catalog: &Catalog,
        industry: Industry,
        size: CompanySize,
        horizon: TimeHorizon,
        features: I,
        sensitivity: Sensitivity,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ids = BTreeSet::new();
        for id in features {
            let id = id.into();
            if !catalog.contains_feature(&id) {
                return Err(ValueCaseError::UnknownFeatureId(id));
            }
            ids.insert(id);
        }
        Ok(Self {
            industry,
            size,
            horizon,
            features: ids,
            sensitivity,
        })
    }

    pub fn feature_ids(&self) -> impl Iterator<Item = &str> {
        self.features.iter().map(String::as_str)
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.features.contains(id)
    }

    pub fn has_features(&self) -> bool {
        !self.features.is_empty()
    }

    /// Selected features in catalog declaration order.
    pub fn active_features<'c>(&self, catalog: &'c Catalog) -> Vec<&'c Feature> {
        catalog
            .features()
            .iter()
            .filter(|f| self.features.contains(&f.id))
            .collect()
    }

    /// Sum of one-time costs of the selected features.
    pub fn total_cost(&self, catalog: &Catalog) -> f64 {
        self.active_features(catalog).iter().map(|f| f.cost).sum()
    }

    /// Outcomes with at least one selected dependency, in catalog order.
    pub fn active_outcomes<'c>(&self, catalog: &'c Catalog) -> Vec<&'c Outcome> {
        catalog
            .outcomes()
            .iter()
            .filter(|o| o.is_active(self.feature_ids()))
            .collect()
    }
}

/// A single user interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetIndustry(Industry),
    SetSize(CompanySize),
    SetHorizon(TimeHorizon),
    ToggleFeature(String),
    SetAdoption(f64),
    SetDataQuality(f64),
    SetChangeMgmt(f64),
    /// Back to session-start defaults.
    Reset,
}

/// Pure transition: `state` + `action` -> next state.
///
/// Toggling an id that is not in the catalog fails with `UnknownFeatureId`
/// and leaves the caller's state untouched. Slider values are clamped.
pub fn reduce(catalog: &Catalog, state: &SelectionState, action: Action) -> Result<SelectionState> {
    let mut next = state.clone();
    match action {
        Action::SetIndustry(industry) => next.industry = industry,
        Action::SetSize(size) => next.size = size,
        Action::SetHorizon(horizon) => next.horizon = horizon,
        Action::ToggleFeature(id) => {
            if !catalog.contains_feature(&id) {
                return Err(ValueCaseError::UnknownFeatureId(id));
            }
            if !next.features.remove(&id) {
                next.features.insert(id);
            }
        }
        Action::SetAdoption(pct) => next.sensitivity.adoption = Percent::new(pct),
        Action::SetDataQuality(pct) => next.sensitivity.data_quality = Percent::new(pct),
        Action::SetChangeMgmt(pct) => next.sensitivity.change_mgmt = Percent::new(pct),
        Action::Reset => next = SelectionState::default(),
    }
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn catalog() -> Catalog {
        Catalog::builtin().unwrap()
    }

    #[test]
    fn test_documented_defaults() {
        let s = SelectionState::default();
        assert_eq!(s.industry, Industry::Banking);
        assert_eq!(s.size, CompanySize::Enterprise);
        assert_eq!(s.horizon, TimeHorizon::Months24);
        assert_eq!(s.feature_ids().collect::<Vec<_>>(), vec!["copilot", "triage"]);
        assert_eq!(s.sensitivity.adoption.value(), 80.0);
        assert_eq!(s.sensitivity.data_quality.value(), 75.0);
        assert_eq!(s.sensitivity.change_mgmt.value(), 70.0);
    }

    #[test]
    fn test_toggle_adds_and_removes() {
        let c = catalog();
        let s = SelectionState::default();
        let added = reduce(&c, &s, Action::ToggleFeature("churn".into())).unwrap();
        assert!(added.is_selected("churn"));
        let removed = reduce(&c, &added, Action::ToggleFeature("triage".into())).unwrap();
        assert!(!removed.is_selected("triage"));
        assert!(removed.is_selected("copilot"));
    }

    #[test]
    fn test_toggle_unknown_id_fails() {
        let c = catalog();
        let s = SelectionState::default();
        assert_eq!(
            reduce(&c, &s, Action::ToggleFeature("sla_breach".into())),
            Err(ValueCaseError::UnknownFeatureId("sla_breach".into()))
        );
    }

    #[test]
    fn test_sliders_clamp() {
        let c = catalog();
        let s = SelectionState::default();
        let s = reduce(&c, &s, Action::SetAdoption(120.0)).unwrap();
        let s = reduce(&c, &s, Action::SetDataQuality(-10.0)).unwrap();
        let s = reduce(&c, &s, Action::SetChangeMgmt(55.5)).unwrap();
        assert_eq!(s.sensitivity.adoption.value(), 100.0);
        assert_eq!(s.sensitivity.data_quality.value(), 0.0);
        assert_eq!(s.sensitivity.change_mgmt.value(), 55.5);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let c = catalog();
        let s = reduce(&c, &SelectionState::default(), Action::SetSize(CompanySize::Global)).unwrap();
        let s = reduce(&c, &s, Action::Reset).unwrap();
        assert_eq!(s, SelectionState::default());
    }

    #[test]
    fn test_active_features_follow_catalog_order() {
        let c = catalog();
        let s = SelectionState::new(
            &c,
            Industry::Retail,
            CompanySize::Global,
            TimeHorizon::Months12,
            ["self_service", "triage", "prevention"],
            Sensitivity::default(),
        )
        .unwrap();
        let ids: Vec<&str> = s.active_features(&c).iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["triage", "prevention", "self_service"]);
        assert_eq!(s.total_cost(&c), 680_000.0);
    }

    #[test]
    fn test_new_rejects_unknown_feature() {
        let c = catalog();
        let err = SelectionState::new(
            &c,
            Industry::Retail,
            CompanySize::Global,
            TimeHorizon::Months12,
            ["triage", "teleport"],
            Sensitivity::default(),
        )
        .unwrap_err();
        assert_eq!(err, ValueCaseError::UnknownFeatureId("teleport".into()));
    }

    #[test]
    fn test_active_outcomes() {
        let c = catalog();
        let ids: Vec<String> = SelectionState::default()
            .active_outcomes(&c)
            .iter()
            .map(|o| o.id.clone())
            .collect();
        assert_eq!(ids, vec!["op_cost", "resolution"]);
    }

    proptest! {
        #[test]
        fn toggling_twice_is_identity(idx in 0usize..6, start in proptest::collection::vec(0usize..6, 0..6)) {
            let c = catalog();
            let ids: Vec<String> = c.features().iter().map(|f| f.id.clone()).collect();
            let s = SelectionState::new(
                &c,
                Industry::Telecom,
                CompanySize::Enterprise,
                TimeHorizon::Months36,
                start.iter().map(|i| ids[*i].clone()),
                Sensitivity::default(),
            ).unwrap();
            let once = reduce(&c, &s, Action::ToggleFeature(ids[idx].clone())).unwrap();
            let twice = reduce(&c, &once, Action::ToggleFeature(ids[idx].clone())).unwrap();
            prop_assert_eq!(twice, s);
        }

        #[test]
        fn total_cost_ignores_selection_order(order in Just((0usize..6).collect::<Vec<_>>()).prop_shuffle(), take in 0usize..=6) {
            let c = catalog();
            let picked: Vec<String> = order.iter().take(take).map(|i| c.features()[*i].id.clone()).collect();
            let expected: f64 = c.features().iter().filter(|f| picked.contains(&f.id)).map(|f| f.cost).sum();
            let s = SelectionState::new(
                &c,
                Industry::Telecom,
                CompanySize::Enterprise,
                TimeHorizon::Months36,
                picked.iter().rev().cloned(),
                Sensitivity::default(),
            ).unwrap();
            prop_assert_eq!(s.total_cost(&c), expected);
        }
    }
}
