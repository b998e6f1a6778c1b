#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Scoring table and result types for activity risk assessment.
//!
//! The two tables ([`GuidelineTable`] and the set of [`ActivityProfile`]s)
//! are built once and shared read-only. Everything else in this crate is a
//! per-evaluation value that callers render and then discard.

use std::collections::BTreeMap;

use air_risk_pollutant_models::Pollutant;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Per-pollutant values produced by one evaluation, in declared order.
pub type PollutantMap = BTreeMap<Pollutant, f64>;

/// Health-based reference concentration for each pollutant.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GuidelineTable {
    limits: BTreeMap<Pollutant, f64>,
}

impl GuidelineTable {
    /// Returns the reference concentration for `pollutant`, if configured.
    #[must_use]
    pub fn get(&self, pollutant: Pollutant) -> Option<f64> {
        self.limits.get(&pollutant).copied()
    }

    #[must_use]
    pub fn contains(&self, pollutant: Pollutant) -> bool {
        self.limits.contains_key(&pollutant)
    }

    /// Iterates over configured guidelines in declared pollutant order.
    pub fn iter(&self) -> impl Iterator<Item = (Pollutant, f64)> + '_ {
        self.limits.iter().map(|(p, v)| (*p, *v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.limits.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.limits.is_empty()
    }
}

impl FromIterator<(Pollutant, f64)> for GuidelineTable {
    fn from_iter<T: IntoIterator<Item = (Pollutant, f64)>>(iter: T) -> Self {
        Self {
            limits: iter.into_iter().collect(),
        }
    }
}

/// An outdoor activity and how sensitive it is to each pollutant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityProfile {
    /// Stable identifier (e.g. `"strenuous_exercise"`).
    pub id: String,
    /// Display name (e.g. `"Strenuous Exercise"`).
    pub name: String,
    /// Example activities shown next to the name.
    pub examples: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    full_label: Option<String>,
    weights: BTreeMap<Pollutant, f64>,
}

impl ActivityProfile {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        examples: Option<String>,
        weights: impl IntoIterator<Item = (Pollutant, f64)>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            examples,
            full_label: None,
            weights: weights.into_iter().collect(),
        }
    }

    /// Overrides the label derived from name and examples.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.full_label = Some(label.into());
        self
    }

    /// Sensitivity weight for `pollutant`. Unweighted pollutants are 0.
    #[must_use]
    pub fn weight(&self, pollutant: Pollutant) -> f64 {
        self.weights.get(&pollutant).copied().unwrap_or(0.0)
    }

    /// Iterates over explicitly weighted pollutants in declared order.
    pub fn weights(&self) -> impl Iterator<Item = (Pollutant, f64)> + '_ {
        self.weights.iter().map(|(p, w)| (*p, *w))
    }

    /// Name with examples, e.g. `"Strenuous Exercise (e.g., running, cycling)"`,
    /// unless an explicit label was set with [`Self::with_label`].
    #[must_use]
    pub fn label(&self) -> String {
        if let Some(label) = &self.full_label {
            return label.clone();
        }
        match &self.examples {
            Some(examples) => format!("{} (e.g., {examples})", self.name),
            None => self.name.clone(),
        }
    }

    /// Whether `identifier` names this activity by id, name, or full label.
    ///
    /// Comparison ignores surrounding whitespace and ASCII case.
    #[must_use]
    pub fn matches(&self, identifier: &str) -> bool {
        let identifier = identifier.trim();
        identifier.eq_ignore_ascii_case(&self.id)
            || identifier.eq_ignore_ascii_case(&self.name)
            || identifier.eq_ignore_ascii_case(&self.label())
    }
}

/// Three-level go/no-go outcome of an assessment.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    /// Low risk, proceed
    Go = 1,
    /// Moderate risk, proceed with reduced exposure
    Caution = 2,
    /// High risk, postpone or move indoors
    Stop = 3,
}

impl Decision {
    /// Numeric severity rank (1-3).
    #[must_use]
    pub const fn rank(self) -> u8 {
        self as u8
    }

    /// Risk level label, e.g. `"MODERATE RISK"`.
    #[must_use]
    pub const fn level(self) -> &'static str {
        match self {
            Self::Go => "LOW RISK",
            Self::Caution => "MODERATE RISK",
            Self::Stop => "HIGH RISK",
        }
    }

    /// Returns all variants in ascending severity.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Go, Self::Caution, Self::Stop]
    }
}

/// A classified risk score with text ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub decision: Decision,
    /// Same as [`Decision::rank`], kept alongside for serialized output.
    pub severity_rank: u8,
    /// Same as [`Decision::level`].
    pub level: String,
    /// Multi-line explanation naming the activity and score.
    pub explanation: String,
    /// One-line advice.
    pub short_advice: String,
}

/// Result of scoring one activity against one set of readings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    /// Id of the profile that was evaluated.
    pub activity_id: String,
    /// Sum of all contributions. Non-negative, unbounded above.
    pub risk_score: f64,
    /// Weighted contribution of each scored pollutant.
    pub contributions: PollutantMap,
    /// Concentration divided by guideline for each scored pollutant.
    pub normalized: PollutantMap,
}

/// How a single concentration compares with its guideline.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum GuidelineStatus {
    /// Below half the guideline
    Safe,
    /// Between half and the full guideline
    Elevated,
    /// At or above the guideline
    Exceeds,
}

impl GuidelineStatus {
    /// Classifies a concentration-to-guideline ratio.
    #[must_use]
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio < 0.5 {
            Self::Safe
        } else if ratio < 1.0 {
            Self::Elevated
        } else {
            Self::Exceeds
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Safe => "Safe",
            Self::Elevated => "Elevated",
            Self::Exceeds => "Exceeds",
        }
    }
}

/// One row of the "current vs. guideline" table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuidelineComparison {
    pub pollutant: Pollutant,
    /// Reported concentration.
    pub concentration: f64,
    /// Guideline it is compared against.
    pub guideline: f64,
    /// Normalized ratio; 0 for missing or invalid concentrations.
    pub ratio: f64,
    pub status: GuidelineStatus,
}

impl GuidelineComparison {
    /// Ratio expressed as a percentage of the guideline.
    #[must_use]
    pub fn percent_of_guideline(&self) -> f64 {
        self.ratio * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise() -> ActivityProfile {
        ActivityProfile::new(
            "strenuous_exercise",
            "Strenuous Exercise",
            Some("running, cycling".to_string()),
            [
                (Pollutant::FineParticulate, 0.5),
                (Pollutant::Ozone, 0.2),
            ],
        )
    }

    #[test]
    fn unweighted_pollutant_is_zero() {
        let profile = exercise();
        assert!((profile.weight(Pollutant::FineParticulate) - 0.5).abs() < f64::EPSILON);
        assert!(profile.weight(Pollutant::SulfurDioxide).abs() < f64::EPSILON);
    }

    #[test]
    fn matches_id_name_and_label() {
        let profile = exercise();
        assert!(profile.matches("strenuous_exercise"));
        assert!(profile.matches("Strenuous Exercise"));
        assert!(profile.matches("  strenuous exercise "));
        assert!(profile.matches("Strenuous Exercise (e.g., running, cycling)"));
        assert!(!profile.matches("Scuba Diving"));
        assert!(!profile.matches(""));
    }

    #[test]
    fn explicit_label_replaces_derived_label() {
        let profile = ActivityProfile::new(
            "commuting",
            "Commuting",
            Some("walking/biking".to_string()),
            [(Pollutant::NitrogenDioxide, 0.2)],
        )
        .with_label("Commuting (walking/biking)");

        assert_eq!(profile.label(), "Commuting (walking/biking)");
        assert!(profile.matches("commuting (walking/biking)"));
        assert!(!profile.matches("Commuting (e.g., walking/biking)"));
    }

    #[test]
    fn decision_ranks_are_ordered() {
        let ranks: Vec<u8> = Decision::all().iter().map(|d| d.rank()).collect();
        assert_eq!(ranks, [1, 2, 3]);
        assert_eq!(Decision::Caution.to_string(), "CAUTION");
    }

    #[test]
    fn guideline_status_boundaries() {
        assert_eq!(GuidelineStatus::from_ratio(0.0), GuidelineStatus::Safe);
        assert_eq!(GuidelineStatus::from_ratio(0.49), GuidelineStatus::Safe);
        assert_eq!(GuidelineStatus::from_ratio(0.5), GuidelineStatus::Elevated);
        assert_eq!(GuidelineStatus::from_ratio(0.99), GuidelineStatus::Elevated);
        assert_eq!(GuidelineStatus::from_ratio(1.0), GuidelineStatus::Exceeds);
    }

    #[test]
    fn assessment_serializes_provider_keys() {
        let assessment = RiskAssessment {
            activity_id: "commuting".to_string(),
            risk_score: 0.25,
            contributions: [(Pollutant::NitrogenDioxide, 0.25)].into_iter().collect(),
            normalized: [(Pollutant::NitrogenDioxide, 1.25)].into_iter().collect(),
        };
        let json = serde_json::to_value(&assessment).unwrap();
        assert_eq!(json["contributions"]["no2"], 0.25);
        assert_eq!(json["normalized"]["no2"], 1.25);
    }
}
