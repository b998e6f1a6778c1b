//! Provider Air Quality Index categories.
//!
//! Providers report a coarse 1-5 index alongside raw concentrations. It is
//! unrelated to the activity risk score and is only used for display.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Provider AQI category, from 1 (good) to 5 (very poor).
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
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
pub enum AqiCategory {
    /// Level 1
    #[default]
    Good = 1,
    /// Level 2
    Fair = 2,
    /// Level 3
    Moderate = 3,
    /// Level 4
    Poor = 4,
    /// Level 5
    VeryPoor = 5,
}

impl AqiCategory {
    /// Returns the numeric index of this category.
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Creates a category from a provider index.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not in the range 1-5.
    pub const fn from_value(value: u8) -> Result<Self, InvalidAqiError> {
        match value {
            1 => Ok(Self::Good),
            2 => Ok(Self::Fair),
            3 => Ok(Self::Moderate),
            4 => Ok(Self::Poor),
            5 => Ok(Self::VeryPoor),
            _ => Err(InvalidAqiError { value }),
        }
    }

    /// Like [`Self::from_value`], but out-of-range indices fall back to
    /// [`AqiCategory::Good`], matching how the dashboard displays them.
    #[must_use]
    pub fn from_value_or_default(value: u8) -> Self {
        Self::from_value(value).unwrap_or_else(|e| {
            log::warn!("{e}, displaying as {}", Self::default().label());
            Self::default()
        })
    }

    /// Display name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Moderate => "Moderate",
            Self::Poor => "Poor",
            Self::VeryPoor => "Very Poor",
        }
    }

    /// Health message for the category.
    #[must_use]
    pub const fn health_message(self) -> &'static str {
        match self {
            Self::Good => "Air quality is satisfactory",
            Self::Fair => "Acceptable for most people",
            Self::Moderate => "Sensitive individuals may experience symptoms",
            Self::Poor => "Health warnings of emergency conditions",
            Self::VeryPoor => "Health alert: everyone may experience serious effects",
        }
    }

    /// General outdoor advice, independent of any particular activity.
    #[must_use]
    pub const fn outdoor_advice(self) -> &'static str {
        match self {
            Self::Good | Self::Fair => "Good air quality. Safe for outdoor activities.",
            Self::Moderate => {
                "Moderate air quality. Sensitive people should limit outdoor activities."
            }
            Self::Poor | Self::VeryPoor => {
                "Poor air quality. Avoid outdoor activities and use masks."
            }
        }
    }
}

/// Error returned when a provider index is outside 1-5.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidAqiError {
    /// The invalid index that was provided.
    pub value: u8,
}

impl std::fmt::Display for InvalidAqiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid AQI value {}: expected 1-5", self.value)
    }
}

impl std::error::Error for InvalidAqiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_value_accepts_provider_range() {
        for v in 1..=5u8 {
            assert_eq!(AqiCategory::from_value(v).unwrap().value(), v);
        }
        assert!(AqiCategory::from_value(0).is_err());
        assert!(AqiCategory::from_value(6).is_err());
    }

    #[test]
    fn out_of_range_displays_as_good() {
        assert_eq!(AqiCategory::from_value_or_default(9), AqiCategory::Good);
        assert_eq!(AqiCategory::from_value_or_default(4), AqiCategory::Poor);
    }

    #[test]
    fn outdoor_advice_bands() {
        assert_eq!(
            AqiCategory::Fair.outdoor_advice(),
            AqiCategory::Good.outdoor_advice()
        );
        assert_ne!(
            AqiCategory::Moderate.outdoor_advice(),
            AqiCategory::Good.outdoor_advice()
        );
        assert_eq!(
            AqiCategory::VeryPoor.outdoor_advice(),
            AqiCategory::Poor.outdoor_advice()
        );
    }
}
