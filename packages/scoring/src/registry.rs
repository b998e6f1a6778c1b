//! Guideline and activity profile tables.
//!
//! The default tables are TOML files under `profiles/`, embedded at
//! compile time. Adding an activity requires creating a TOML file in
//! `profiles/activities/` and adding a corresponding entry to
//! [`ACTIVITY_TOMLS`]. Replacement tables can also be loaded from disk
//! with [`ScoringTables::from_path`].

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::str::FromStr;
use std::sync::LazyLock;

use air_risk_pollutant_models::Pollutant;
use air_risk_scoring_models::{ActivityProfile, GuidelineTable};
use serde::Deserialize;

use crate::RegistryError;
use crate::engine::{RiskEngine, SCORED_POLLUTANTS};

/// An activity profile as written in TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct ActivityProfileConfig {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Example activities, e.g. `"running, cycling"`.
    #[serde(default)]
    pub examples: Option<String>,
    /// Full label, when it differs from `"name (e.g., examples)"`.
    #[serde(default)]
    pub label: Option<String>,
    /// Pollutant key to sensitivity weight.
    #[serde(default)]
    pub weights: BTreeMap<String, f64>,
}

/// A complete table file: `[guidelines]` plus `[[activities]]`.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoringTablesConfig {
    /// Pollutant key to guideline concentration.
    pub guidelines: BTreeMap<String, f64>,
    /// Activities in display order.
    pub activities: Vec<ActivityProfileConfig>,
}

/// Validated, immutable scoring tables.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringTables {
    /// Guideline concentrations.
    pub guidelines: GuidelineTable,
    /// Activity profiles in declared order.
    pub activities: Vec<ActivityProfile>,
}

impl ScoringTables {
    /// Validates raw configuration into scoring tables.
    ///
    /// # Errors
    ///
    /// * If a key is not a known pollutant
    /// * If a guideline is not positive and finite
    /// * If a weight is negative or not finite
    /// * If an activity weights a pollutant that has no guideline
    /// * If activity ids repeat or no activities are defined
    pub fn from_config(config: ScoringTablesConfig) -> Result<Self, RegistryError> {
        let guidelines = parse_guidelines(&config.guidelines)?;

        if config.activities.is_empty() {
            return Err(RegistryError::NoActivities);
        }

        let mut seen = BTreeSet::new();
        let mut activities = Vec::with_capacity(config.activities.len());

        for activity in config.activities {
            if !seen.insert(activity.id.clone()) {
                return Err(RegistryError::DuplicateActivity(activity.id));
            }
            activities.push(parse_activity(activity, &guidelines)?);
        }

        Ok(Self {
            guidelines,
            activities,
        })
    }

    /// Parses and validates a table file's contents.
    ///
    /// # Errors
    ///
    /// * If the TOML is malformed
    /// * If validation fails (see [`Self::from_config`])
    pub fn from_toml_str(contents: &str) -> Result<Self, RegistryError> {
        let config: ScoringTablesConfig = toml::de::from_str(contents)?;
        Self::from_config(config)
    }

    /// Loads tables from a TOML file on disk.
    ///
    /// # Errors
    ///
    /// * If the file cannot be read
    /// * If parsing or validation fails (see [`Self::from_toml_str`])
    pub fn from_path(path: &Path) -> Result<Self, RegistryError> {
        log::debug!("Loading scoring tables from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Borrows these tables as a scoring engine.
    #[must_use]
    pub fn engine(&self) -> RiskEngine<'_> {
        RiskEngine::new(&self.guidelines, &self.activities)
    }
}

fn parse_pollutant(key: &str, context: &str) -> Result<Pollutant, RegistryError> {
    Pollutant::from_str(key).map_err(|_| RegistryError::UnknownPollutant {
        key: key.to_string(),
        context: context.to_string(),
    })
}

fn parse_guidelines(raw: &BTreeMap<String, f64>) -> Result<GuidelineTable, RegistryError> {
    raw.iter()
        .map(|(key, &value)| {
            let pollutant = parse_pollutant(key, "guidelines")?;
            if !value.is_finite() || value <= 0.0 {
                return Err(RegistryError::InvalidGuideline { pollutant, value });
            }
            Ok((pollutant, value))
        })
        .collect()
}

fn parse_activity(
    config: ActivityProfileConfig,
    guidelines: &GuidelineTable,
) -> Result<ActivityProfile, RegistryError> {
    let mut weights = Vec::with_capacity(config.weights.len());

    for (key, &weight) in &config.weights {
        let pollutant = parse_pollutant(key, &config.id)?;

        if !weight.is_finite() || weight < 0.0 {
            return Err(RegistryError::InvalidWeight {
                activity: config.id.clone(),
                pollutant,
                weight,
            });
        }
        if !guidelines.contains(pollutant) {
            return Err(RegistryError::MissingGuideline {
                activity: config.id.clone(),
                pollutant,
            });
        }
        if !SCORED_POLLUTANTS.contains(&pollutant) && weight > 0.0 {
            log::warn!(
                "Activity '{}' weights {pollutant}, which is not scored; the weight is ignored",
                config.id
            );
        }

        weights.push((pollutant, weight));
    }

    let profile = ActivityProfile::new(config.id, config.name, config.examples, weights);

    Ok(match config.label {
        Some(label) => profile.with_label(label),
        None => profile,
    })
}

// ── Compile-time embedded TOML files ────────────────────────────────

const GUIDELINES_TOML: &str = include_str!("../profiles/guidelines.toml");

/// Embedded activity profiles, in display order.
const ACTIVITY_TOMLS: &[(&str, &str)] = &[
    (
        "strenuous_exercise",
        include_str!("../profiles/activities/strenuous_exercise.toml"),
    ),
    (
        "moderate_activity",
        include_str!("../profiles/activities/moderate_activity.toml"),
    ),
    (
        "relaxing_outdoors",
        include_str!("../profiles/activities/relaxing_outdoors.toml"),
    ),
    (
        "outdoor_event",
        include_str!("../profiles/activities/outdoor_event.toml"),
    ),
    (
        "childrens_outdoor_play",
        include_str!("../profiles/activities/childrens_outdoor_play.toml"),
    ),
    (
        "commuting",
        include_str!("../profiles/activities/commuting.toml"),
    ),
];

#[cfg(test)]
const EXPECTED_ACTIVITY_COUNT: usize = 6;

static DEFAULT_TABLES: LazyLock<ScoringTables> = LazyLock::new(load_embedded);

/// Returns the built-in guideline table and activity profiles.
///
/// # Panics
///
/// Panics if any embedded TOML file fails to parse or validate. Since
/// these are compile-time constants, failures indicate a development
/// error and are caught by tests.
#[must_use]
pub fn default_tables() -> &'static ScoringTables {
    &DEFAULT_TABLES
}

fn load_embedded() -> ScoringTables {
    let guidelines: BTreeMap<String, f64> = toml::de::from_str(GUIDELINES_TOML)
        .unwrap_or_else(|e| panic!("Failed to parse embedded guidelines: {e}"));

    let activities = ACTIVITY_TOMLS
        .iter()
        .map(|(name, toml_str)| {
            toml::de::from_str(toml_str)
                .unwrap_or_else(|e| panic!("Failed to parse activity profile '{name}': {e}"))
        })
        .collect();

    ScoringTables::from_config(ScoringTablesConfig {
        guidelines,
        activities,
    })
    .unwrap_or_else(|e| panic!("Invalid embedded scoring tables: {e}"))
}
