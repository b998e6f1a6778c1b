#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for activity air quality risk assessment.
//!
//! Readings come from flags or a JSON/TOML file exported by the data
//! fetcher; scoring tables default to the built-in WHO guidelines and
//! activity profiles, or can be replaced with `--profiles`.

mod input;
mod report;

use std::path::PathBuf;

use air_risk_pollutant_models::aqi::AqiCategory;
use air_risk_scoring::{ScoringTables, default_tables};
use clap::{Parser, Subcommand, ValueEnum};

use crate::input::ReadingArgs;
use crate::report::{ActivitySummary, AssessmentReport};

#[derive(Parser)]
#[command(name = "air_risk", about = "Should I go outside? Activity air quality risk")]
struct Cli {
    /// TOML file with `[guidelines]` and `[[activities]]` replacing the built-in tables.
    #[arg(long, global = true)]
    profiles: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available activities
    Activities,
    /// Score one activity against the given readings
    Assess {
        /// Activity id or name (e.g., "`strenuous_exercise`" or "Strenuous Exercise")
        #[arg(long)]
        activity: String,
        #[command(flatten)]
        readings: ReadingArgs,
        /// Number of top risk drivers to show
        #[arg(long, default_value = "3")]
        top: usize,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Score every activity against the given readings
    Compare {
        #[command(flatten)]
        readings: ReadingArgs,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Describe a provider AQI index (1-5)
    Aqi {
        /// Provider AQI index
        index: u8,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Replacement tables when `--profiles` was given, else the built-in ones.
fn tables_or_default(custom: Option<&ScoringTables>) -> &ScoringTables {
    match custom {
        Some(tables) => tables,
        None => default_tables(),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let custom_tables = cli
        .profiles
        .as_deref()
        .map(ScoringTables::from_path)
        .transpose()?;
    let tables = tables_or_default(custom_tables.as_ref());
    let engine = tables.engine();

    match cli.command {
        Commands::Activities => {
            for profile in engine.list_activities() {
                println!("{:<24}{}", profile.id, profile.label());
            }
        }
        Commands::Assess {
            activity,
            readings,
            top,
            format,
        } => {
            let readings = readings.load()?;
            let profile = engine.activity(&activity)?;
            let (assessment, recommendation) = engine.assess(&profile.id, &readings)?;
            let comparisons = engine.compare_guidelines(&readings);

            log::info!(
                "{} scored {:.3} ({})",
                profile.id,
                assessment.risk_score,
                recommendation.decision
            );

            let report =
                AssessmentReport::new(profile, assessment, recommendation, top, comparisons);
            match format {
                Format::Text => print!("{}", report.to_text()),
                Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            }
        }
        Commands::Compare { readings, format } => {
            let readings = readings.load()?;
            let rows: Vec<ActivitySummary<'_>> = engine
                .assess_all(&readings)
                .into_iter()
                .map(|(profile, assessment, recommendation)| ActivitySummary {
                    activity_id: &profile.id,
                    activity: profile.label(),
                    risk_score: assessment.risk_score,
                    recommendation,
                })
                .collect();

            match format {
                Format::Text => print!("{}", report::summary_table(&rows)),
                Format::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
            }
        }
        Commands::Aqi { index } => {
            print!(
                "{}",
                report::aqi_text(AqiCategory::from_value_or_default(index))
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const GARDENING: &str = r#"
        [guidelines]
        pm2_5 = 15.0

        [[activities]]
        id = "gardening"
        name = "Gardening"

        [activities.weights]
        pm2_5 = 1.0
    "#;

    #[test]
    fn locally_loaded_tables_replace_defaults() {
        let custom = Some(ScoringTables::from_toml_str(GARDENING).unwrap());
        let engine = tables_or_default(custom.as_ref()).engine();

        assert_eq!(engine.list_activities().len(), 1);
        assert!(engine.activity("gardening").is_ok());
        assert!(engine.activity("commuting").is_err());
    }

    #[test]
    fn falls_back_to_built_in_tables() {
        let engine = tables_or_default(None).engine();
        assert_eq!(engine.list_activities(), default_tables().activities.as_slice());
    }

    #[test]
    fn cli_parses_assess_flags() {
        let cli = Cli::try_parse_from([
            "air_risk",
            "assess",
            "--activity",
            "commuting",
            "--pm2-5",
            "45",
            "--top",
            "2",
            "--format",
            "json",
        ])
        .unwrap();

        let Commands::Assess {
            activity,
            readings,
            top,
            format,
        } = cli.command
        else {
            panic!("expected assess subcommand");
        };
        assert_eq!(activity, "commuting");
        assert_eq!(readings.pm2_5, Some(45.0));
        assert_eq!(top, 2);
        assert!(matches!(format, Format::Json));
        assert!(cli.profiles.is_none());
    }
}
