//! Reference data catalog: KPIs, features (with per-KPI impact multipliers),
//! and strategic outcomes.
//!
//! The catalog is immutable once built. `Catalog::new` is the only way to
//! construct one and it validates every cross reference, so downstream code
//! can look ids up without re-checking them.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::error::{Result, ValueCaseError};
use crate::market::{CompanySize, Industry, TimeHorizon};

/// KPI the financial calculator derives operational savings from.
pub const COST_PER_TICKET: &str = "cost_per_ticket";
/// KPI whose baseline is scaled by the market multiplier.
pub const REVENUE_AT_RISK: &str = "revenue_at_risk";

/// An operational KPI with its pre-AI baseline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Kpi {
    pub id: String,
    pub name: String,
    pub unit: String,
    pub baseline: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    /// Direction of improvement; also sets the sign convention of deltas.
    pub lower_is_better: bool,
}

impl Kpi {
    /// Render a value the way the dashboard shows it: prefix, one decimal, suffix.
    pub fn format_value(&self, value: f64) -> String {
        format!(
            "{}{:.1}{}",
            self.prefix.as_deref().unwrap_or(""),
            value,
            self.suffix.as_deref().unwrap_or("")
        )
    }
}

/// Maximum (undamped) effect of a feature on one KPI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impact<'a> {
    pub kpi_id: &'a str,
    pub multiplier: f64,
}

/// Owned form of [`Impact`] as stored in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImpactSpec {
    pub kpi_id: String,
    pub multiplier: f64,
}

impl ImpactSpec {
    pub fn new(kpi_id: impl Into<String>, multiplier: f64) -> Self {
        Self {
            kpi_id: kpi_id.into(),
            multiplier,
        }
    }

    pub fn as_impact(&self) -> Impact<'_> {
        Impact {
            kpi_id: &self.kpi_id,
            multiplier: self.multiplier,
        }
    }
}

/// Implementation complexity tier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Complexity {
    Low,
    Medium,
    High,
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Complexity::Low => "Low",
            Complexity::Medium => "Medium",
            Complexity::High => "High",
        };
        f.write_str(s)
    }
}

/// A candidate product capability.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Feature {
    pub id: String,
    pub name: String,
    pub group: String,
    /// Flat one-time cost.
    pub cost: f64,
    pub complexity: Complexity,
    pub time_to_value: String,
    pub impacts: Vec<ImpactSpec>,
}

impl Feature {
    /// The impact this feature declares on `kpi_id`, if any.
    pub fn impact_on(&self, kpi_id: &str) -> Option<Impact<'_>> {
        self.impacts
            .iter()
            .find(|i| i.kpi_id == kpi_id)
            .map(ImpactSpec::as_impact)
    }
}

/// A strategic outcome unlocked by any one of its features.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Outcome {
    pub id: String,
    pub name: String,
    pub description: String,
    pub feature_ids: Vec<String>,
}

impl Outcome {
    /// Active iff at least one dependency is in `active_ids`.
    pub fn is_active<'a, I>(&self, active_ids: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        let active: HashSet<&str> = active_ids.into_iter().collect();
        self.feature_ids.iter().any(|f| active.contains(f.as_str()))
    }
}

/// Unvalidated catalog contents, e.g. as read from a file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CatalogData {
    #[serde(default)]
    pub kpis: Vec<Kpi>,
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default)]
    pub outcomes: Vec<Outcome>,
}

/// Validated, read-only reference data.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Catalog {
    kpis: Vec<Kpi>,
    features: Vec<Feature>,
    outcomes: Vec<Outcome>,
}

impl Catalog {
    /// Validate `data` and freeze it into a catalog.
    ///
    /// Fails on duplicate ids, zero or non-finite baselines, costs and
    /// multipliers that are not positive and finite, impacts on unknown
    /// KPIs, outcome dependencies on unknown features, and missing KPIs the
    /// financial calculator needs.
    pub fn new(data: CatalogData) -> Result<Self> {
        let CatalogData {
            kpis,
            features,
            outcomes,
        } = data;

        let kpi_ids = unique_ids("kpi", kpis.iter().map(|k| k.id.as_str()))?;
        let feature_ids = unique_ids("feature", features.iter().map(|f| f.id.as_str()))?;
        unique_ids("outcome", outcomes.iter().map(|o| o.id.as_str()))?;

        for kpi in &kpis {
            if kpi.baseline == 0.0 || !kpi.baseline.is_finite() {
                return Err(ValueCaseError::InvalidBaseline {
                    kpi: kpi.id.clone(),
                });
            }
        }

        for required in [COST_PER_TICKET, REVENUE_AT_RISK] {
            if !kpi_ids.contains(required) {
                return Err(ValueCaseError::MissingKpi(required));
            }
        }

        for feature in &features {
            if !(feature.cost.is_finite() && feature.cost > 0.0) {
                return Err(ValueCaseError::InvalidCost {
                    feature: feature.id.clone(),
                });
            }
            for impact in &feature.impacts {
                // Keeps every projected value on the baseline's side of zero.
                if !(impact.multiplier.is_finite() && impact.multiplier > 0.0) {
                    return Err(ValueCaseError::InvalidImpact {
                        owner: feature.id.clone(),
                        kpi: impact.kpi_id.clone(),
                    });
                }
                if !kpi_ids.contains(impact.kpi_id.as_str()) {
                    return Err(ValueCaseError::UnknownKpiId {
                        owner: feature.id.clone(),
                        kpi: impact.kpi_id.clone(),
                    });
                }
            }
        }

        for outcome in &outcomes {
            for fid in &outcome.feature_ids {
                if !feature_ids.contains(fid.as_str()) {
                    return Err(ValueCaseError::UnknownOutcomeFeature {
                        outcome: outcome.id.clone(),
                        feature: fid.clone(),
                    });
                }
            }
        }

        tracing::debug!(
            kpis = kpis.len(),
            features = features.len(),
            outcomes = outcomes.len(),
            "catalog validated"
        );

        Ok(Self {
            kpis,
            features,
            outcomes,
        })
    }

    /// The shipped reference data.
    pub fn builtin() -> Result<Self> {
        Self::new(builtin_data())
    }

    pub fn industries(&self) -> &'static [Industry] {
        &Industry::ALL
    }

    pub fn sizes(&self) -> &'static [CompanySize] {
        &CompanySize::ALL
    }

    pub fn horizons(&self) -> &'static [TimeHorizon] {
        &TimeHorizon::ALL
    }

    /// Features in declaration order. Impacts compound in this order.
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn kpis(&self) -> &[Kpi] {
        &self.kpis
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    pub fn feature(&self, id: &str) -> Option<&Feature> {
        self.features.iter().find(|f| f.id == id)
    }

    pub fn kpi(&self, id: &str) -> Option<&Kpi> {
        self.kpis.iter().find(|k| k.id == id)
    }

    pub fn contains_feature(&self, id: &str) -> bool {
        self.feature(id).is_some()
    }

    /// Unvalidated copy of the contents, e.g. for writing a catalog file.
    pub fn to_data(&self) -> CatalogData {
        CatalogData {
            kpis: self.kpis.clone(),
            features: self.features.clone(),
            outcomes: self.outcomes.clone(),
        }
    }
}

fn unique_ids<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<HashSet<&'a str>> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ValueCaseError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(seen)
}

fn kpi(
    id: &str,
    name: &str,
    unit: &str,
    baseline: f64,
    prefix: Option<&str>,
    suffix: Option<&str>,
    lower_is_better: bool,
) -> Kpi {
    Kpi {
        id: id.to_string(),
        name: name.to_string(),
        unit: unit.to_string(),
        baseline,
        prefix: prefix.map(str::to_string),
        suffix: suffix.map(str::to_string),
        lower_is_better,
    }
}

fn feature(
    id: &str,
    name: &str,
    cost: f64,
    complexity: Complexity,
    time_to_value: &str,
    impacts: &[(&str, f64)],
) -> Feature {
    Feature {
        id: id.to_string(),
        name: name.to_string(),
        group: "AI Capabilities".to_string(),
        cost,
        complexity,
        time_to_value: time_to_value.to_string(),
        impacts: impacts
            .iter()
            .map(|(kpi_id, m)| ImpactSpec::new(*kpi_id, *m))
            .collect(),
    }
}

fn outcome(id: &str, name: &str, description: &str, feature_ids: &[&str]) -> Outcome {
    Outcome {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        feature_ids: feature_ids.iter().map(|f| f.to_string()).collect(),
    }
}

/// Built-in reference data, unvalidated.
pub fn builtin_data() -> CatalogData {
    let kpis = vec![
        kpi(COST_PER_TICKET, "Cost per Ticket", "$", 25.0, Some("$"), None, true),
        kpi("aht", "Avg Handle Time", "min", 12.0, None, Some(" min"), true),
        kpi("churn_rate", "Annual Churn Rate", "%", 15.0, None, Some("%"), true),
        kpi(REVENUE_AT_RISK, "Revenue at Risk", "$M", 45.0, Some("$"), Some("M"), true),
        kpi("sla_breach", "SLA Breach Rate", "%", 8.0, None, Some("%"), true),
        kpi("productivity", "Agent Productivity", "tasks/hr", 4.0, None, Some(" t/h"), false),
    ];

    let features = vec![
        feature(
            "triage",
            "Intelligent Ticket Triage",
            150_000.0,
            Complexity::Low,
            "2-3 months",
            &[(COST_PER_TICKET, 0.85), ("aht", 0.9)],
        ),
        feature(
            "churn",
            "Predictive Churn Detection",
            250_000.0,
            Complexity::Medium,
            "4-6 months",
            &[("churn_rate", 0.75), (REVENUE_AT_RISK, 0.8)],
        ),
        feature(
            "root_cause",
            "Automated Root Cause Analysis",
            200_000.0,
            Complexity::Medium,
            "3-5 months",
            &[("aht", 0.8), ("sla_breach", 0.7)],
        ),
        feature(
            "copilot",
            "AI-Assisted Agent Copilot",
            400_000.0,
            Complexity::High,
            "6-9 months",
            &[("productivity", 1.4), ("aht", 0.75), (COST_PER_TICKET, 0.8)],
        ),
        feature(
            "prevention",
            "Proactive Incident Prevention",
            350_000.0,
            Complexity::High,
            "6-12 months",
            &[("sla_breach", 0.5), (COST_PER_TICKET, 0.7)],
        ),
        feature(
            "self_service",
            "Self-Service Knowledge Automation",
            180_000.0,
            Complexity::Medium,
            "3-4 months",
            &[(COST_PER_TICKET, 0.6), ("productivity", 1.2)],
        ),
    ];

    let outcomes = vec![
        outcome(
            "op_cost",
            "Reduced Operational Cost",
            "Lower overhead through automation and efficiency.",
            &["triage", "copilot", "self_service"],
        ),
        outcome(
            "retention",
            "Improved Customer Retention",
            "Proactive engagement and faster resolution.",
            &["churn", "prevention"],
        ),
        outcome(
            "resolution",
            "Faster Resolution Times",
            "AI-driven insights and automated triage.",
            &["triage", "root_cause", "copilot"],
        ),
        outcome(
            "support_load",
            "Lower Support Load",
            "Deflecting tickets to self-service channels.",
            &["self_service", "prevention"],
        ),
        // Only `churn` can activate this one; "sla_breach" is a KPI id.
        outcome(
            "revenue_leakage",
            "Reduced Revenue Leakage",
            "Preventing churn and SLA penalties.",
            &["churn"],
        ),
        outcome(
            "sla_compliance",
            "Improved SLA Compliance",
            "Meeting commitments through better resource allocation.",
            &["root_cause", "prevention"],
        ),
    ];

    CatalogData {
        kpis,
        features,
        outcomes,
    }
}
