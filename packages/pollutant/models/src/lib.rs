#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Pollutant taxonomy and concentration reading types.
//!
//! This crate defines the fixed set of pollutants that air-quality
//! providers report and that the risk scoring engine understands, along
//! with [`PollutantReading`], the partial concentration mapping that data
//! collaborators hand to the engine.

pub mod aqi;

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};
use strum_macros::{AsRefStr, Display, EnumString};

/// A pollutant reported by an air-quality provider.
///
/// Variants are declared in the order the scoring engine evaluates them.
/// That order is also the tie-break order for contribution rankings, so
/// the derived [`Ord`] is load-bearing.
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
#[strum(ascii_case_insensitive)]
pub enum Pollutant {
    /// Fine particulate matter (PM2.5)
    #[serde(rename = "pm2_5", alias = "fine_particulate")]
    #[strum(to_string = "pm2_5", serialize = "fine_particulate")]
    FineParticulate,
    /// Coarse particulate matter (PM10)
    #[serde(rename = "pm10", alias = "coarse_particulate")]
    #[strum(to_string = "pm10", serialize = "coarse_particulate")]
    CoarseParticulate,
    /// Ground-level ozone (O3)
    #[serde(rename = "o3", alias = "ozone")]
    #[strum(to_string = "o3", serialize = "ozone")]
    Ozone,
    /// Nitrogen dioxide (NO2)
    #[serde(rename = "no2", alias = "nitrogen_dioxide")]
    #[strum(to_string = "no2", serialize = "nitrogen_dioxide")]
    NitrogenDioxide,
    /// Carbon monoxide (CO), reported on a much larger numeric scale
    #[serde(rename = "co", alias = "carbon_monoxide")]
    #[strum(to_string = "co", serialize = "carbon_monoxide")]
    CarbonMonoxide,
    /// Sulfur dioxide (SO2)
    #[serde(rename = "so2", alias = "sulfur_dioxide")]
    #[strum(to_string = "so2", serialize = "sulfur_dioxide")]
    SulfurDioxide,
}

impl Pollutant {
    /// Returns all variants of this enum in declared order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::FineParticulate,
            Self::CoarseParticulate,
            Self::Ozone,
            Self::NitrogenDioxide,
            Self::CarbonMonoxide,
            Self::SulfurDioxide,
        ]
    }

    /// Short chemical label used in tables and charts (e.g. `PM2.5`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FineParticulate => "PM2.5",
            Self::CoarseParticulate => "PM10",
            Self::Ozone => "O3",
            Self::NitrogenDioxide => "NO2",
            Self::CarbonMonoxide => "CO",
            Self::SulfurDioxide => "SO2",
        }
    }
}

/// Concentrations keyed by pollutant, in micrograms per cubic meter.
///
/// The mapping is partial: pollutants the provider did not report are
/// simply absent. Values are stored as given, including negative or
/// non-finite ones; deciding what those mean is the scoring engine's job.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "BTreeMap<String, Option<f64>>")]
pub struct PollutantReading {
    values: BTreeMap<Pollutant, f64>,
}

impl PollutantReading {
    /// Creates an empty reading.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    #[must_use]
    pub fn with(mut self, pollutant: Pollutant, concentration: f64) -> Self {
        self.set(pollutant, concentration);
        self
    }

    /// Sets the concentration for `pollutant`, replacing any previous value.
    pub fn set(&mut self, pollutant: Pollutant, concentration: f64) {
        self.values.insert(pollutant, concentration);
    }

    /// Returns the raw concentration for `pollutant`, if one was reported.
    #[must_use]
    pub fn get(&self, pollutant: Pollutant) -> Option<f64> {
        self.values.get(&pollutant).copied()
    }

    /// Iterates over reported concentrations in declared pollutant order.
    pub fn iter(&self) -> impl Iterator<Item = (Pollutant, f64)> + '_ {
        self.values.iter().map(|(p, v)| (*p, *v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Builds a reading from loosely-typed provider data.
    ///
    /// Keys are matched against both provider keys (`pm2_5`) and
    /// descriptive keys (`fine_particulate`). Unknown keys and `None`
    /// values are skipped. When two keys name the same pollutant, the
    /// later one wins.
    pub fn from_raw<I, K>(raw: I) -> Self
    where
        I: IntoIterator<Item = (K, Option<f64>)>,
        K: AsRef<str>,
    {
        let mut reading = Self::new();

        for (key, value) in raw {
            let key = key.as_ref();
            let Ok(pollutant) = Pollutant::from_str(key) else {
                log::debug!("Skipping unknown pollutant key '{key}'");
                continue;
            };
            match value {
                Some(value) => {
                    if let Some(previous) = reading.values.insert(pollutant, value) {
                        log::debug!(
                            "Key '{key}' replaces earlier {pollutant} concentration {previous} with {value}"
                        );
                    }
                }
                None => log::debug!("No concentration reported for {pollutant}"),
            }
        }

        reading
    }
}

impl From<BTreeMap<String, Option<f64>>> for PollutantReading {
    fn from(raw: BTreeMap<String, Option<f64>>) -> Self {
        Self::from_raw(raw)
    }
}

impl FromIterator<(Pollutant, f64)> for PollutantReading {
    fn from_iter<T: IntoIterator<Item = (Pollutant, f64)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl Serialize for PollutantReading {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.values.iter().map(|(p, v)| {
            let key: &str = p.as_ref();
            (key, v)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_provider_and_descriptive_keys() {
        assert_eq!(
            Pollutant::from_str("pm2_5").unwrap(),
            Pollutant::FineParticulate
        );
        assert_eq!(
            Pollutant::from_str("fine_particulate").unwrap(),
            Pollutant::FineParticulate
        );
        assert_eq!(Pollutant::from_str("CO").unwrap(), Pollutant::CarbonMonoxide);
        assert!(Pollutant::from_str("pollen").is_err());
    }

    #[test]
    fn display_uses_provider_key() {
        for pollutant in Pollutant::all() {
            let key = pollutant.to_string();
            let as_ref: &str = pollutant.as_ref();
            assert_eq!(key, as_ref);
            assert_eq!(Pollutant::from_str(&key).unwrap(), *pollutant);
        }
    }

    #[test]
    fn declared_order_matches_all() {
        let mut sorted = Pollutant::all().to_vec();
        sorted.sort();
        assert_eq!(sorted, Pollutant::all());
    }

    #[test]
    fn from_raw_skips_unknown_and_null() {
        let reading = PollutantReading::from_raw([
            ("pm2_5", Some(12.0)),
            ("pollen", Some(3.0)),
            ("o3", None),
            ("nitrogen_dioxide", Some(-4.0)),
        ]);

        assert_eq!(reading.len(), 2);
        assert_eq!(reading.get(Pollutant::FineParticulate), Some(12.0));
        assert_eq!(reading.get(Pollutant::Ozone), None);
        assert_eq!(reading.get(Pollutant::NitrogenDioxide), Some(-4.0));
    }

    #[test]
    fn later_alias_replaces_earlier_value() {
        let reading =
            PollutantReading::from_raw([("fine_particulate", Some(10.0)), ("pm2_5", Some(12.0))]);
        assert_eq!(reading.len(), 1);
        assert_eq!(reading.get(Pollutant::FineParticulate), Some(12.0));

        let reading =
            PollutantReading::from_raw([("pm2_5", Some(12.0)), ("fine_particulate", None)]);
        assert_eq!(reading.get(Pollutant::FineParticulate), Some(12.0));
    }

    #[test]
    fn iterates_in_declared_order() {
        let reading = PollutantReading::new()
            .with(Pollutant::SulfurDioxide, 1.0)
            .with(Pollutant::FineParticulate, 2.0)
            .with(Pollutant::Ozone, 3.0);

        let order: Vec<Pollutant> = reading.iter().map(|(p, _)| p).collect();
        assert_eq!(
            order,
            [
                Pollutant::FineParticulate,
                Pollutant::Ozone,
                Pollutant::SulfurDioxide
            ]
        );
    }

    #[test]
    fn json_uses_provider_keys() {
        let reading: PollutantReading =
            serde_json::from_str(r#"{"pm10": 70.0, "carbon_monoxide": 800.0, "so2": null}"#)
                .unwrap();
        assert_eq!(reading.get(Pollutant::CoarseParticulate), Some(70.0));
        assert_eq!(reading.get(Pollutant::CarbonMonoxide), Some(800.0));
        assert_eq!(reading.get(Pollutant::SulfurDioxide), None);

        let json = serde_json::to_string(&reading).unwrap();
        assert_eq!(json, r#"{"pm10":70.0,"co":800.0}"#);
    }
}
