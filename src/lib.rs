//! # Voice Pitch
//! *voice_pitch* estimates one dominant fundamental frequency for a voice
//! recording. Uploads in any format are first normalized into a canonical
//! mono PCM waveform by an external tool, then the leading window of samples
//! is Hamming-windowed, transformed, and searched for the strongest bin in a
//! plausible vocal band.
//!
//! # Stages
//!   * [Transcoder][transcode::Transcoder]: raw upload to canonical `.wav`
//!   * [WaveformReader][waveform::WaveformReader]: `.wav` to a fixed-size sample window
//!   * [SpectralPeakEstimator][estimator::spectral::SpectralPeakEstimator]: window to pitch
//!   * [Pipeline][pipeline::Pipeline]: all of the above, keeping the waveform on partial failure
//!
//! A returned pitch of exactly 0 Hz means no dominant pitch was found in the band.
//!
//! # Examples
//! ```
//! use voice_pitch::estimator::spectral::SpectralPeakEstimator;
//! use voice_pitch::estimator::{PitchBand, PitchEstimator};
//!
//! fn main() {
//!     const SAMPLE_RATE: usize = 44100;
//!     const SIZE: usize = 8192;
//!
//!     // Signal coming from some source (microphone, decoded file, etc...)
//!     let dt = 1.0 / SAMPLE_RATE as f64;
//!     let freq = 220.0;
//!     let signal: Vec<f64> = (0..SIZE)
//!         .map(|x| (2.0 * std::f64::consts::PI * x as f64 * dt * freq).sin())
//!         .collect();
//!
//!     let estimator = SpectralPeakEstimator::new(SIZE, PitchBand::new(50.0, 500.0));
//!     let pitch = estimator.estimate(&signal, SAMPLE_RATE);
//!
//!     assert!((pitch.frequency - freq).abs() < SAMPLE_RATE as f64 / SIZE as f64);
//!     println!("Frequency: {}, bin: {}", pitch.frequency, pitch.bin);
//! }
//! ```

pub use error::{PitchError, Result};
pub use estimator::internals::PitchEstimate;
pub use pipeline::{Pipeline, ProcessError, ProcessedRecording};

pub mod config;
pub mod error;
pub mod estimator;
pub mod float;
pub mod pipeline;
pub mod transcode;
pub mod utils;
pub mod waveform;
