use std::ops::Range;

use crate::float::Float;

pub mod internals;
pub mod spectral;

pub use internals::PitchEstimate;

pub trait PitchEstimator<T>
where
    T: Float,
{
    /// Estimate the dominant pitch of `signal`, sampled at `sample_rate` Hz.
    fn estimate(&self, signal: &[T], sample_rate: usize) -> PitchEstimate<T>;
}

/// Inclusive range of plausible pitches, in Hz, searched for a peak.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchBand {
    pub min_hz: f64,
    pub max_hz: f64,
}

impl PitchBand {
    pub fn new(min_hz: f64, max_hz: f64) -> Self {
        PitchBand { min_hz, max_hz }
    }

    /// Transform bins scanned for a window of `size` samples at `sample_rate` Hz.
    ///
    /// The lower edge is floored and the upper edge ceiled so the band is not
    /// narrowed by rounding. The end is clamped to `size / 2`: bins above
    /// Nyquist mirror the lower half for real input.
    pub fn bins(&self, size: usize, sample_rate: usize) -> Range<usize> {
        let bins_per_hz = size as f64 / sample_rate as f64;
        let start = (self.min_hz * bins_per_hz).floor().max(0.0) as usize;
        let end = ((self.max_hz * bins_per_hz).ceil().max(0.0) as usize).min(size / 2);
        start.min(end)..end
    }
}

impl Default for PitchBand {
    fn default() -> Self {
        PitchBand::new(
            crate::config::DEFAULT_MIN_PITCH_HZ,
            crate::config::DEFAULT_MAX_PITCH_HZ,
        )
    }
}
