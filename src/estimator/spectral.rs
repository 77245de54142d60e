use std::sync::Arc;

use rustfft::{Fft, FftPlanner};

use crate::estimator::internals::{band_peak, PitchEstimate};
use crate::estimator::{PitchBand, PitchEstimator};
use crate::float::Float;
use crate::utils::buffer::{copy_real_to_complex, fit_to_window, new_complex_buffer};
use crate::utils::buffer::ComplexComponent;
use crate::utils::window::{apply_window, hamming_window};

/// Picks the strongest Hamming-windowed spectral bin inside a [PitchBand].
///
/// The window weights and transform plan are computed once in [new]; each
/// call to [estimate] allocates its own working buffer, so one estimator can
/// be shared between threads.
///
/// [new]: SpectralPeakEstimator::new
/// [estimate]: PitchEstimator::estimate
pub struct SpectralPeakEstimator<T>
where
    T: Float,
{
    size: usize,
    band: PitchBand,
    weights: Vec<T>,
    fft: Arc<dyn Fft<T>>,
}

impl<T> SpectralPeakEstimator<T>
where
    T: Float,
{
    pub fn new(size: usize, band: PitchBand) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        SpectralPeakEstimator {
            size,
            band,
            weights: hamming_window(size),
            fft,
        }
    }
}

impl<T> PitchEstimator<T> for SpectralPeakEstimator<T>
where
    T: Float,
{
    /// `signal` is zero-padded or truncated to the window size before the
    /// transform; only its first `size` samples are ever looked at.
    fn estimate(&self, signal: &[T], sample_rate: usize) -> PitchEstimate<T> {
        let windowed = apply_window(&fit_to_window(signal, self.size), &self.weights);

        let mut spectrum = new_complex_buffer(self.size);
        copy_real_to_complex(&windowed, &mut spectrum, ComplexComponent::Re);
        self.fft.process(&mut spectrum);

        let bins = self.band.bins(self.size, sample_rate);
        match band_peak(&spectrum, bins) {
            Some((bin, _)) => PitchEstimate::from_bin(bin, sample_rate, self.size),
            None => PitchEstimate::undetermined(),
        }
    }
}
