//! Normalizing arbitrary uploads into canonical mono PCM waveforms.
//!
//! The conversion itself is delegated to an external tool behind the
//! [Transcoder] trait. [FfmpegTranscoder] is the stock implementation.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::config::AnalysisConfig;
use crate::error::{PitchError, Result, TranscodeFailure};

pub const WAVEFORM_EXTENSION: &str = "wav";

pub trait Transcoder {
    /// Convert `input` into a canonical waveform and return where it was written.
    fn transcode(&self, input: &Path) -> Result<PathBuf>;
}

impl<T: Transcoder + ?Sized> Transcoder for &T {
    fn transcode(&self, input: &Path) -> Result<PathBuf> {
        (**self).transcode(input)
    }
}

impl<T: Transcoder + ?Sized> Transcoder for Box<T> {
    fn transcode(&self, input: &Path) -> Result<PathBuf> {
        (**self).transcode(input)
    }
}

/// `<dir>/<input stem>.wav`. The same input always maps to the same path.
pub fn derived_waveform_path(dir: &Path, input: &Path) -> Result<PathBuf> {
    let stem = input
        .file_stem()
        .ok_or_else(|| PitchError::transcode(input, TranscodeFailure::NoFileStem))?;
    let mut name = stem.to_os_string();
    name.push(".");
    name.push(WAVEFORM_EXTENSION);
    Ok(dir.join(name))
}

/// Runs `ffmpeg -i <input> -ar <rate> -ac 1 -y <output>`.
#[derive(Debug, Clone)]
pub struct FfmpegTranscoder {
    program: String,
    output_dir: PathBuf,
    sample_rate: u32,
}

impl FfmpegTranscoder {
    pub fn new(program: impl Into<String>, output_dir: impl Into<PathBuf>, sample_rate: u32) -> Self {
        FfmpegTranscoder {
            program: program.into(),
            output_dir: output_dir.into(),
            sample_rate,
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(
            config.ffmpeg_program.clone(),
            config.processed_dir.clone(),
            config.sample_rate,
        )
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Check whether the configured program can be started at all.
    pub fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok()
    }
}

impl Transcoder for FfmpegTranscoder {
    fn transcode(&self, input: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.output_dir).map_err(|source| {
            PitchError::DirectoryCreation {
                dir: self.output_dir.clone(),
                source,
            }
        })?;
        let output_path = derived_waveform_path(&self.output_dir, input)?;

        tracing::debug!(
            program = %self.program,
            input = %input.display(),
            output = %output_path.display(),
            sample_rate = self.sample_rate,
            "Running transcoder"
        );

        let output = Command::new(&self.program)
            .arg("-i")
            .arg(input)
            .arg("-ar")
            .arg(self.sample_rate.to_string())
            .arg("-ac")
            .arg("1")
            .arg("-y")
            .arg(&output_path)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| {
                PitchError::transcode(
                    input,
                    TranscodeFailure::Spawn {
                        program: self.program.clone(),
                        source,
                    },
                )
            })?;

        if !output.status.success() {
            return Err(PitchError::transcode(
                input,
                TranscodeFailure::Exit {
                    program: self.program.clone(),
                    status: output.status,
                    stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                },
            ));
        }

        Ok(output_path)
    }
}
