//! Pollutant readings from files and command-line flags.

use std::path::{Path, PathBuf};

use air_risk_pollutant_models::{Pollutant, PollutantReading};
use clap::Args;
use thiserror::Error;

/// Errors that can occur while loading readings.
#[derive(Debug, Error)]
pub enum InputError {
    /// Reading the file failed.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The file is not valid JSON.
    #[error("Invalid JSON readings: {0}")]
    Json(#[from] serde_json::Error),

    /// The file is not valid TOML.
    #[error("Invalid TOML readings: {0}")]
    Toml(#[from] toml::de::Error),

    /// The file extension is neither `.json` nor `.toml`.
    #[error("Unsupported readings file {}: expected .json or .toml", .0.display())]
    UnsupportedFormat(PathBuf),
}

/// Concentration inputs shared by the scoring subcommands.
///
/// Values given as flags override values loaded from `--readings`.
#[derive(Debug, Default, Args)]
pub struct ReadingArgs {
    /// JSON or TOML file mapping pollutant keys to concentrations.
    #[arg(long)]
    pub readings: Option<PathBuf>,

    /// Fine particulate matter (µg/m³).
    #[arg(long = "pm2-5", allow_negative_numbers = true)]
    pub pm2_5: Option<f64>,

    /// Coarse particulate matter (µg/m³).
    #[arg(long, allow_negative_numbers = true)]
    pub pm10: Option<f64>,

    /// Ozone (µg/m³).
    #[arg(long, allow_negative_numbers = true)]
    pub o3: Option<f64>,

    /// Nitrogen dioxide (µg/m³).
    #[arg(long, allow_negative_numbers = true)]
    pub no2: Option<f64>,

    /// Carbon monoxide (µg/m³).
    #[arg(long, allow_negative_numbers = true)]
    pub co: Option<f64>,

    /// Sulfur dioxide (µg/m³).
    #[arg(long, allow_negative_numbers = true)]
    pub so2: Option<f64>,
}

impl ReadingArgs {
    /// Builds the reading set from the file (if any) and flag overrides.
    ///
    /// # Errors
    ///
    /// * If the readings file cannot be read or parsed
    pub fn load(&self) -> Result<PollutantReading, InputError> {
        let mut reading = match &self.readings {
            Some(path) => load_file(path)?,
            None => PollutantReading::new(),
        };

        let overrides = [
            (Pollutant::FineParticulate, self.pm2_5),
            (Pollutant::CoarseParticulate, self.pm10),
            (Pollutant::Ozone, self.o3),
            (Pollutant::NitrogenDioxide, self.no2),
            (Pollutant::CarbonMonoxide, self.co),
            (Pollutant::SulfurDioxide, self.so2),
        ];

        for (pollutant, value) in overrides
            .into_iter()
            .filter_map(|(pollutant, value)| value.map(|v| (pollutant, v)))
        {
            reading.set(pollutant, value);
        }

        if reading.is_empty() {
            log::warn!("No pollutant readings supplied; every concentration is treated as 0");
        }

        Ok(reading)
    }
}

/// Loads readings from a `.json` or `.toml` file.
///
/// # Errors
///
/// * If the file cannot be read
/// * If the extension is unsupported or the contents fail to parse
pub fn load_file(path: &Path) -> Result<PollutantReading, InputError> {
    let contents = std::fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    log::debug!("Loaded readings from {}", path.display());

    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => parse_json(&contents),
        Some(ext) if ext.eq_ignore_ascii_case("toml") => parse_toml(&contents),
        _ => Err(InputError::UnsupportedFormat(path.to_path_buf())),
    }
}

fn parse_json(contents: &str) -> Result<PollutantReading, InputError> {
    Ok(serde_json::from_str(contents)?)
}

fn parse_toml(contents: &str) -> Result<PollutantReading, InputError> {
    Ok(toml::de::from_str(contents)?)
}
