use std::ops::Range;

use rustfft::num_complex::Complex;

use crate::float::{from_usize, Float};

/// Outcome of one estimation. A `bin` of zero means no dominant pitch was
/// found in the band, and `frequency` is then exactly zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchEstimate<T>
where
    T: Float,
{
    pub frequency: T,
    pub bin: usize,
}

impl<T> PitchEstimate<T>
where
    T: Float,
{
    pub fn undetermined() -> Self {
        PitchEstimate {
            frequency: T::zero(),
            bin: 0,
        }
    }

    /// The frequency at the center of `bin` for a `size`-point transform.
    pub fn from_bin(bin: usize, sample_rate: usize, size: usize) -> Self {
        PitchEstimate {
            frequency: bin_to_frequency(bin, sample_rate, size),
            bin,
        }
    }

    pub fn is_undetermined(&self) -> bool {
        self.bin == 0
    }

    pub fn frequency_hz(&self) -> Option<T> {
        match self.is_undetermined() {
            true => None,
            false => Some(self.frequency),
        }
    }
}

pub fn bin_to_frequency<T: Float>(bin: usize, sample_rate: usize, size: usize) -> T {
    from_usize::<T>(bin) * from_usize::<T>(sample_rate) / from_usize::<T>(size)
}

/// `|re| + |im|`. Ranking bins by this avoids a square root per bin; it agrees
/// with the true modulus on the arg-max only when one component dominates.
pub fn l1_magnitude<T: Float>(c: &Complex<T>) -> T {
    c.l1_norm()
}

/// Find the bin in `bins` with the largest L1 magnitude. Only magnitudes
/// strictly above zero count, so a silent band yields `None`. Ties keep the
/// lowest bin.
pub fn band_peak<T: Float>(spectrum: &[Complex<T>], bins: Range<usize>) -> Option<(usize, T)> {
    let end = bins.end.min(spectrum.len());
    let start = bins.start.min(end);
    spectrum[start..end]
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, T)>, (offset, c)| {
            let magnitude = l1_magnitude(c);
            let floor = best.map_or(T::zero(), |(_, m)| m);
            match magnitude > floor {
                true => Some((start + offset, magnitude)),
                false => best,
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peak_is_largest_l1_in_band() {
        let spectrum = vec![
            Complex::new(100.0, 0.0),
            Complex::new(1.0, -1.0),
            Complex::new(0.0, -3.0),
            Complex::new(2.0, 0.5),
            Complex::new(50.0, 50.0),
        ];
        assert_eq!(band_peak(&spectrum, 1..4), Some((2, 3.0)));
    }

    #[test]
    fn l1_ranking_is_kept_over_modulus() {
        // L1 ranks bin 1 first (1.5 > 1.4) although bin 0 has the larger modulus (1.4 > 1.06)
        let spectrum = vec![Complex::new(1.4f64, 0.0), Complex::new(0.75, 0.75)];
        assert_eq!(band_peak(&spectrum, 0..2).map(|p| p.0), Some(1));
    }

    #[test]
    fn silent_band_has_no_peak() {
        let spectrum = vec![Complex::new(0.0f64, 0.0); 16];
        assert_eq!(band_peak(&spectrum, 2..10), None);
    }

    #[test]
    fn out_of_range_bins_are_clamped() {
        let spectrum = vec![Complex::new(1.0f64, 0.0); 4];
        assert_eq!(band_peak(&spectrum, 2..100), Some((2, 1.0)));
        assert_eq!(band_peak(&spectrum, 10..100), None);
    }

    #[test]
    fn bin_conversion() {
        let estimate = PitchEstimate::<f64>::from_bin(41, 44100, 8192);
        assert!((estimate.frequency - 220.715).abs() < 1e-3);
        assert_eq!(estimate.frequency_hz(), Some(estimate.frequency));
        assert!(PitchEstimate::<f64>::undetermined().frequency_hz().is_none());
        assert_eq!(PitchEstimate::<f32>::from_bin(0, 44100, 8192).frequency, 0.0);
    }
}
