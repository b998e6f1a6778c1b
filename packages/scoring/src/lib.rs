#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Activity-weighted air quality risk scoring.
//!
//! Converts raw pollutant concentrations into a risk score for a chosen
//! outdoor activity and maps that score to a GO / CAUTION / STOP
//! recommendation. The engine is a pure, table-driven calculation:
//!
//! 1. Each pollutant is normalized against its health guideline.
//! 2. Normalized values are multiplied by the activity's sensitivity weights.
//! 3. The weighted contributions are summed into a single risk score.
//! 4. The score is classified against fixed thresholds.
//!
//! The guideline table and activity profiles are loaded once (see
//! [`registry`]) and passed into [`engine::RiskEngine`] by reference.

pub mod comparison;
pub mod engine;
pub mod recommendation;
pub mod registry;

use air_risk_pollutant_models::Pollutant;
use thiserror::Error;

pub use engine::{RiskEngine, SCORED_POLLUTANTS, top_contributors};
pub use recommendation::classify;
pub use registry::{ScoringTables, default_tables};

/// Errors raised while scoring.
#[derive(Debug, Error)]
pub enum ScoringError {
    /// The activity identifier matched no configured profile.
    #[error("Unknown activity: {activity}")]
    UnknownActivity {
        /// The identifier as supplied by the caller.
        activity: String,
    },
}

/// Errors raised while loading guideline and activity tables.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Reading a table file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A table file is not valid TOML or has the wrong shape.
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// A table key does not name a known pollutant.
    #[error("Unknown pollutant '{key}' in {context}")]
    UnknownPollutant {
        /// The unrecognized key.
        key: String,
        /// Where the key appeared (guidelines or an activity id).
        context: String,
    },

    /// A guideline is zero, negative, or not finite.
    #[error("Invalid guideline {value} for {pollutant}: must be positive and finite")]
    InvalidGuideline {
        /// Pollutant the guideline belongs to.
        pollutant: Pollutant,
        /// The rejected value.
        value: f64,
    },

    /// An activity weight is negative or not finite.
    #[error("Invalid weight {weight} for {pollutant} in activity '{activity}'")]
    InvalidWeight {
        /// Activity id.
        activity: String,
        /// Pollutant the weight belongs to.
        pollutant: Pollutant,
        /// The rejected value.
        weight: f64,
    },

    /// An activity weights a pollutant that has no guideline.
    #[error("Activity '{activity}' weights {pollutant}, which has no guideline")]
    MissingGuideline {
        /// Activity id.
        activity: String,
        /// Pollutant without a guideline.
        pollutant: Pollutant,
    },

    /// Two activities share an id.
    #[error("Duplicate activity id '{0}'")]
    DuplicateActivity(String),

    /// The table defines no activities.
    #[error("No activities defined")]
    NoActivities,
}
