//! Reading-versus-guideline comparison rows.

use air_risk_pollutant_models::PollutantReading;
use air_risk_scoring_models::{GuidelineComparison, GuidelineStatus};

use crate::engine::RiskEngine;

impl RiskEngine<'_> {
    /// Compares each reported concentration with its guideline.
    ///
    /// Covers every pollutant in `readings` that has a guideline, including
    /// unscored ones such as sulfur dioxide. Pollutants without a guideline
    /// are left out.
    #[must_use]
    pub fn compare_guidelines(&self, readings: &PollutantReading) -> Vec<GuidelineComparison> {
        readings
            .iter()
            .filter_map(|(pollutant, concentration)| {
                let guideline = self.guidelines().get(pollutant)?;
                let ratio = self.normalize(Some(concentration), pollutant);
                Some(GuidelineComparison {
                    pollutant,
                    concentration,
                    guideline,
                    ratio,
                    status: GuidelineStatus::from_ratio(ratio),
                })
            })
            .collect()
    }
}
