//! Analysis configuration.
//!
//! Defaults reproduce the reference constants: 44.1 kHz mono input, an
//! 8192-sample analysis window read from the first `2 * 8192` samples, and a
//! 50-500 Hz vocal band. Any field may be overridden from a TOML file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PitchError, Result};
use crate::estimator::PitchBand;

pub const DEFAULT_SAMPLE_RATE: u32 = 44100;
pub const DEFAULT_WINDOW_SIZE: usize = 8192;
pub const DEFAULT_READ_FACTOR: usize = 2;
pub const DEFAULT_MIN_PITCH_HZ: f64 = 50.0;
pub const DEFAULT_MAX_PITCH_HZ: f64 = 500.0;
pub const DEFAULT_PROCESSED_DIR: &str = "uploads/processed";
pub const DEFAULT_FFMPEG_PROGRAM: &str = "ffmpeg";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Sample rate the transcoder resamples to
    pub sample_rate: u32,
    /// Number of samples fed to the transform
    pub window_size: usize,
    /// How many windows worth of samples the reader pulls from the file
    pub read_factor: usize,
    pub min_pitch_hz: f64,
    pub max_pitch_hz: f64,
    /// Where canonical waveforms are written
    pub processed_dir: PathBuf,
    pub ffmpeg_program: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            sample_rate: DEFAULT_SAMPLE_RATE,
            window_size: DEFAULT_WINDOW_SIZE,
            read_factor: DEFAULT_READ_FACTOR,
            min_pitch_hz: DEFAULT_MIN_PITCH_HZ,
            max_pitch_hz: DEFAULT_MAX_PITCH_HZ,
            processed_dir: PathBuf::from(DEFAULT_PROCESSED_DIR),
            ffmpeg_program: DEFAULT_FFMPEG_PROGRAM.to_string(),
        }
    }
}

impl AnalysisConfig {
    /// Parse a TOML document. Missing keys take their default values.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: AnalysisConfig =
            toml::from_str(contents).map_err(|e| PitchError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| PitchError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(PitchError::Config("sample_rate must be positive".into()));
        }
        if self.window_size < 2 {
            return Err(PitchError::Config(format!(
                "window_size must be at least 2, got {}",
                self.window_size
            )));
        }
        if self.read_factor < 1 {
            return Err(PitchError::Config("read_factor must be at least 1".into()));
        }
        if !(self.min_pitch_hz >= 0.0 && self.min_pitch_hz < self.max_pitch_hz) {
            return Err(PitchError::Config(format!(
                "pitch band must satisfy 0 <= min < max, got {}..{}",
                self.min_pitch_hz, self.max_pitch_hz
            )));
        }
        Ok(())
    }

    pub fn band(&self) -> PitchBand {
        PitchBand::new(self.min_pitch_hz, self.max_pitch_hz)
    }
}
