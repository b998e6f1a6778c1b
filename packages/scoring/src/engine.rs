//! The risk scoring engine.

use air_risk_pollutant_models::{Pollutant, PollutantReading};
use air_risk_scoring_models::{
    ActivityProfile, GuidelineTable, PollutantMap, Recommendation, RiskAssessment,
};

use crate::ScoringError;
use crate::recommendation::classify;

/// Pollutants that contribute to the risk score, in evaluation order.
///
/// Sulfur dioxide has a guideline but is never scored, even if a profile
/// assigns it a weight.
pub const SCORED_POLLUTANTS: [Pollutant; 5] = [
    Pollutant::FineParticulate,
    Pollutant::CoarseParticulate,
    Pollutant::Ozone,
    Pollutant::NitrogenDioxide,
    Pollutant::CarbonMonoxide,
];

/// Scores pollutant readings against borrowed guideline and activity tables.
///
/// The engine holds no state of its own and is cheap to copy; every method
/// is a pure function of its arguments and the two tables.
#[derive(Debug, Clone, Copy)]
pub struct RiskEngine<'a> {
    guidelines: &'a GuidelineTable,
    activities: &'a [ActivityProfile],
}

impl<'a> RiskEngine<'a> {
    #[must_use]
    pub const fn new(guidelines: &'a GuidelineTable, activities: &'a [ActivityProfile]) -> Self {
        Self {
            guidelines,
            activities,
        }
    }

    /// Activity profiles in declared order.
    #[must_use]
    pub const fn list_activities(&self) -> &'a [ActivityProfile] {
        self.activities
    }

    /// Looks up an activity by id, name, or full label.
    ///
    /// # Errors
    ///
    /// * If no profile matches `identifier`
    pub fn activity(&self, identifier: &str) -> Result<&'a ActivityProfile, ScoringError> {
        self.activities
            .iter()
            .find(|profile| profile.matches(identifier))
            .ok_or_else(|| ScoringError::UnknownActivity {
                activity: identifier.to_string(),
            })
    }

    /// Divides a concentration by its guideline.
    ///
    /// Missing, non-positive, and NaN concentrations yield 0. A pollutant
    /// without a guideline is divided by 1, passing the raw value through.
    #[must_use]
    pub fn normalize(&self, concentration: Option<f64>, pollutant: Pollutant) -> f64 {
        let Some(concentration) = concentration else {
            return 0.0;
        };
        if concentration.is_nan() || concentration <= 0.0 {
            if concentration != 0.0 {
                log::debug!("Treating invalid {pollutant} concentration {concentration} as 0");
            }
            return 0.0;
        }

        let guideline = self.guidelines.get(pollutant).unwrap_or_else(|| {
            log::warn!("No guideline configured for {pollutant}, using raw concentration");
            1.0
        });

        concentration / guideline
    }

    /// Computes the weighted risk score for `activity`.
    ///
    /// Pollutants absent from `readings` count as 0.
    ///
    /// # Errors
    ///
    /// * If `activity` names no configured profile
    pub fn compute_risk(
        &self,
        activity: &str,
        readings: &PollutantReading,
    ) -> Result<RiskAssessment, ScoringError> {
        let profile = self.activity(activity)?;
        Ok(self.score(profile, readings))
    }

    /// Scores an already-resolved profile.
    #[must_use]
    pub fn score(&self, profile: &ActivityProfile, readings: &PollutantReading) -> RiskAssessment {
        let mut normalized = PollutantMap::new();
        let mut contributions = PollutantMap::new();
        let mut risk_score = 0.0;

        for pollutant in SCORED_POLLUTANTS {
            let ratio = self.normalize(readings.get(pollutant), pollutant);
            let weight = profile.weight(pollutant);
            // Unweighted pollutants contribute nothing, even at infinite ratios.
            let contribution = if weight == 0.0 { 0.0 } else { ratio * weight };

            normalized.insert(pollutant, ratio);
            contributions.insert(pollutant, contribution);
            risk_score += contribution;
        }

        log::trace!("{} risk score: {risk_score}", profile.id);

        RiskAssessment {
            activity_id: profile.id.clone(),
            risk_score,
            contributions,
            normalized,
        }
    }

    /// Scores and classifies in one call.
    ///
    /// # Errors
    ///
    /// * If `activity` names no configured profile
    pub fn assess(
        &self,
        activity: &str,
        readings: &PollutantReading,
    ) -> Result<(RiskAssessment, Recommendation), ScoringError> {
        let profile = self.activity(activity)?;
        let assessment = self.score(profile, readings);
        let recommendation = classify(assessment.risk_score, &profile.name);
        Ok((assessment, recommendation))
    }

    /// Scores every configured activity, in declared order.
    #[must_use]
    pub fn assess_all(
        &self,
        readings: &PollutantReading,
    ) -> Vec<(&'a ActivityProfile, RiskAssessment, Recommendation)> {
        self.activities
            .iter()
            .map(|profile| {
                let assessment = self.score(profile, readings);
                let recommendation = classify(assessment.risk_score, &profile.name);
                (profile, assessment, recommendation)
            })
            .collect()
    }

    pub(crate) const fn guidelines(&self) -> &'a GuidelineTable {
        self.guidelines
    }
}

/// Ranks contributions from largest to smallest, keeping at most `n`.
///
/// Ties keep declared pollutant order.
#[must_use]
pub fn top_contributors(contributions: &PollutantMap, n: usize) -> Vec<(Pollutant, f64)> {
    let mut ranked: Vec<(Pollutant, f64)> = contributions.iter().map(|(p, c)| (*p, *c)).collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(n);
    ranked
}
