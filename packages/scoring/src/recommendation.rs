//! Threshold classification and recommendation text.

use air_risk_scoring_models::{Decision, Recommendation};

/// Scores below this are [`Decision::Go`].
pub const CAUTION_THRESHOLD: f64 = 0.8;

/// Scores at or above this are [`Decision::Stop`].
pub const STOP_THRESHOLD: f64 = 1.5;

/// Maps a risk score onto a decision.
///
/// Each threshold belongs to the higher bucket: exactly 0.8 is CAUTION
/// and exactly 1.5 is STOP. Negative scores are GO, and infinite or NaN
/// scores are STOP.
#[must_use]
pub fn decide(risk_score: f64) -> Decision {
    if risk_score.is_nan() {
        log::warn!("Risk score is NaN, classifying as {}", Decision::Stop);
        return Decision::Stop;
    }

    if risk_score < CAUTION_THRESHOLD {
        Decision::Go
    } else if risk_score < STOP_THRESHOLD {
        Decision::Caution
    } else {
        Decision::Stop
    }
}

/// Classifies `risk_score` and renders advice for `activity`.
///
/// The activity name only appears in the explanation text; it never
/// changes the thresholds.
#[must_use]
pub fn classify(risk_score: f64, activity: &str) -> Recommendation {
    let decision = decide(risk_score);
    let activity = activity.to_lowercase();

    let explanation = match decision {
        Decision::Go => format!(
            "DECISION: PROCEED\n\n\
             Air quality is favorable for {activity}. \
             Calculated risk score is {risk_score:.2} (low threshold).\n\n\
             Action: Enjoy your outdoor activity with minimal concerns. \
             Air quality conditions are within safe limits for this activity type."
        ),
        Decision::Caution => format!(
            "DECISION: PROCEED WITH CAUTION\n\n\
             Air quality presents moderate risk for {activity}. \
             Calculated risk score is {risk_score:.2} (caution threshold).\n\n\
             Suggested actions:\n\
             - Consider reducing intensity or duration of outdoor activity\n\
             - Sensitive individuals (elderly, children, respiratory conditions) should reconsider\n\
             - Monitor for any discomfort (coughing, shortness of breath)\n\
             - Move activity indoors if symptoms develop"
        ),
        Decision::Stop => format!(
            "DECISION: NOT RECOMMENDED\n\n\
             Air quality presents high risk for {activity}. \
             Calculated risk score is {risk_score:.2} (high threshold).\n\n\
             Strongly advised actions:\n\
             - Postpone outdoor activity to another time\n\
             - Move activity indoors if possible\n\
             - If outdoor exposure is unavoidable, use an N95/N99 mask\n\
             - Limit duration to the absolute minimum\n\
             - Vulnerable populations should avoid outdoor exposure entirely"
        ),
    };

    Recommendation {
        decision,
        severity_rank: decision.rank(),
        level: decision.level().to_string(),
        explanation,
        short_advice: short_advice(decision).to_string(),
    }
}

const fn short_advice(decision: Decision) -> &'static str {
    match decision {
        Decision::Go => "Conditions are favorable - enjoy!",
        Decision::Caution => "Proceed with reduced intensity",
        Decision::Stop => "Postpone or move indoors",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_inclusive_upward() {
        assert_eq!(classify(0.79, "Commuting").decision, Decision::Go);
        assert_eq!(classify(0.8, "Commuting").decision, Decision::Caution);
        assert_eq!(classify(1.49, "Commuting").decision, Decision::Caution);
        assert_eq!(classify(1.5, "Commuting").decision, Decision::Stop);
    }

    #[test]
    fn activity_does_not_change_decision() {
        for score in [0.0, 0.79, 0.8, 1.2, 1.5, 7.0] {
            assert_eq!(
                classify(score, "Strenuous Exercise").decision,
                classify(score, "Relaxing Outdoors").decision,
                "score {score}"
            );
        }
    }

    #[test]
    fn severity_rank_matches_decision() {
        for (score, rank) in [(0.1, 1), (1.0, 2), (2.0, 3)] {
            let rec = classify(score, "Outdoor Event");
            assert_eq!(rec.severity_rank, rank);
            assert_eq!(rec.level, rec.decision.level());
        }
    }

    #[test]
    fn explanation_names_activity_and_score() {
        let rec = classify(1.397_75, "Strenuous Exercise");
        assert!(rec.explanation.contains("strenuous exercise"));
        assert!(rec.explanation.contains("1.40"));
        assert_eq!(rec.short_advice, "Proceed with reduced intensity");
    }

    #[test]
    fn non_finite_and_negative_scores() {
        assert_eq!(decide(f64::NAN), Decision::Stop);
        assert_eq!(decide(f64::INFINITY), Decision::Stop);
        assert_eq!(decide(-1.0), Decision::Go);
    }
}
