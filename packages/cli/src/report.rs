//! Text and JSON rendering of assessments.

use std::fmt::Write as _;

use air_risk_pollutant_models::Pollutant;
use air_risk_pollutant_models::aqi::AqiCategory;
use air_risk_scoring::top_contributors;
use air_risk_scoring_models::{
    ActivityProfile, GuidelineComparison, Recommendation, RiskAssessment,
};
use serde::Serialize;

/// A pollutant's rank among the risk drivers.
#[derive(Debug, Serialize)]
pub struct RankedContribution {
    pub pollutant: Pollutant,
    pub contribution: f64,
}

/// Everything the `assess` command reports for one activity.
#[derive(Debug, Serialize)]
pub struct AssessmentReport<'a> {
    pub activity: &'a str,
    pub assessment: RiskAssessment,
    pub recommendation: Recommendation,
    pub top_contributors: Vec<RankedContribution>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub comparisons: Vec<GuidelineComparison>,
}

impl<'a> AssessmentReport<'a> {
    #[must_use]
    pub fn new(
        profile: &'a ActivityProfile,
        assessment: RiskAssessment,
        recommendation: Recommendation,
        top: usize,
        comparisons: Vec<GuidelineComparison>,
    ) -> Self {
        let top_contributors = top_contributors(&assessment.contributions, top)
            .into_iter()
            .map(|(pollutant, contribution)| RankedContribution {
                pollutant,
                contribution,
            })
            .collect();

        Self {
            activity: &profile.name,
            assessment,
            recommendation,
            top_contributors,
            comparisons,
        }
    }

    /// Renders the report for a terminal.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let rec = &self.recommendation;

        writeln!(out, "Activity:   {}", self.activity).unwrap();
        writeln!(out, "Risk score: {:.3}", self.assessment.risk_score).unwrap();
        writeln!(
            out,
            "Decision:   {} ({}, severity {})",
            rec.decision, rec.level, rec.severity_rank
        )
        .unwrap();
        writeln!(out, "Advice:     {}", rec.short_advice).unwrap();
        writeln!(out).unwrap();
        writeln!(out, "{}", rec.explanation).unwrap();
        writeln!(out).unwrap();

        writeln!(out, "{:<8}{:>12}{:>14}", "", "vs. WHO", "contribution").unwrap();
        for (pollutant, contribution) in &self.assessment.contributions {
            let ratio = self
                .assessment
                .normalized
                .get(pollutant)
                .copied()
                .unwrap_or_default();
            writeln!(
                out,
                "{:<8}{ratio:>12.3}{contribution:>14.4}",
                pollutant.label()
            )
            .unwrap();
        }

        if !self.top_contributors.is_empty() {
            writeln!(out).unwrap();
            writeln!(out, "Top risk drivers:").unwrap();
            for (i, ranked) in self.top_contributors.iter().enumerate() {
                writeln!(
                    out,
                    "  {}. {} ({:.3})",
                    i + 1,
                    ranked.pollutant.label(),
                    ranked.contribution
                )
                .unwrap();
            }
        }

        if !self.comparisons.is_empty() {
            writeln!(out).unwrap();
            write!(out, "{}", comparison_table(&self.comparisons)).unwrap();
        }

        out
    }
}

/// Renders the current-vs-guideline table.
#[must_use]
pub fn comparison_table(rows: &[GuidelineComparison]) -> String {
    let mut out = String::new();
    writeln!(
        out,
        "{:<8}{:>14}{:>14}{:>14}  Status",
        "", "Current", "Guideline", "% of limit"
    )
    .unwrap();
    for row in rows {
        writeln!(
            out,
            "{:<8}{:>14.1}{:>14.0}{:>13.0}%  {}",
            row.pollutant.label(),
            row.concentration,
            row.guideline,
            row.percent_of_guideline(),
            row.status.label()
        )
        .unwrap();
    }
    out
}

/// One row of the `compare` command's summary.
#[derive(Debug, Serialize)]
pub struct ActivitySummary<'a> {
    pub activity_id: &'a str,
    pub activity: String,
    pub risk_score: f64,
    pub recommendation: Recommendation,
}

/// Renders the cross-activity summary for a terminal.
#[must_use]
pub fn summary_table(rows: &[ActivitySummary<'_>]) -> String {
    let width = rows
        .iter()
        .map(|row| row.activity.len())
        .max()
        .unwrap_or_default();

    let mut out = String::new();
    for row in rows {
        writeln!(
            out,
            "{:<width$}  {:>7.3}  {:<8} {}",
            row.activity, row.risk_score, row.recommendation.decision, row.recommendation.short_advice
        )
        .unwrap();
    }
    out
}

/// Renders a provider AQI category.
#[must_use]
pub fn aqi_text(category: AqiCategory) -> String {
    format!(
        "AQI {} - {}\n{}\n{}\n",
        category.value(),
        category.label(),
        category.health_message(),
        category.outdoor_advice()
    )
}
