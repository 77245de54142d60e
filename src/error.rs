//! Error types for the transcode, read and configuration stages.

use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use thiserror::Error;

/// Result type for fallible voice-pitch operations
pub type Result<T> = std::result::Result<T, PitchError>;

/// Every failure the processing stages can report. All of them are terminal
/// for the current file; nothing is retried.
#[derive(Error, Debug)]
pub enum PitchError {
    /// The processed-output directory could not be created
    #[error("failed to create processed directory {}: {source}", .dir.display())]
    DirectoryCreation {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The external transcoding step failed
    #[error("transcoding {} failed: {cause}", .input.display())]
    Transcode {
        input: PathBuf,
        #[source]
        cause: TranscodeFailure,
    },

    /// The canonical waveform could not be opened
    #[error("failed to open waveform {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a recognized waveform container
    #[error("failed to parse waveform {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    /// Sample extraction failed mid-stream
    #[error("failed to read samples from {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    /// Configuration loading or validation error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Underlying cause of a [PitchError::Transcode].
#[derive(Error, Debug)]
pub enum TranscodeFailure {
    /// The input path has no file name to derive the output from
    #[error("input has no file stem")]
    NoFileStem,

    /// The external tool could not be started (missing binary, permissions)
    #[error("could not run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The external tool ran and reported failure
    #[error("{program} exited with {status}: {stderr}")]
    Exit {
        program: String,
        status: ExitStatus,
        stderr: String,
    },
}

impl PitchError {
    pub(crate) fn transcode(input: &Path, cause: TranscodeFailure) -> Self {
        PitchError::Transcode {
            input: input.to_path_buf(),
            cause,
        }
    }
}
