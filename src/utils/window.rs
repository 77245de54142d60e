//! Window functions applied to a sample block before the transform.
use std::f64::consts::PI;

use crate::float::{from_f64, Float};

/// Hamming weights `0.54 - 0.46 * cos(2*pi*i / (n - 1))` for `i` in `0..n`.
///
/// A single-sample window has no edges to taper and gets weight 1.
pub fn hamming_window<T: Float>(n: usize) -> Vec<T> {
    if n <= 1 {
        return vec![T::one(); n];
    }
    let denominator = (n - 1) as f64;
    (0..n)
        .map(|i| from_f64(0.54 - 0.46 * (2.0 * PI * i as f64 / denominator).cos()))
        .collect()
}

/// Multiply each sample by its window weight. The output has the length of
/// `signal`; samples beyond `weights.len()` are treated as weight zero.
pub fn apply_window<T: Float>(signal: &[T], weights: &[T]) -> Vec<T> {
    signal
        .iter()
        .enumerate()
        .map(|(i, &s)| weights.get(i).map_or(T::zero(), |&w| s * w))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hamming_edges_and_center() {
        let w: Vec<f64> = hamming_window(8193);
        assert_eq!(w.len(), 8193);
        assert!((w[0] - 0.08).abs() < 1e-12);
        assert!((w[8192] - 0.08).abs() < 1e-12);
        assert!((w[4096] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn hamming_is_symmetric() {
        let w: Vec<f32> = hamming_window(64);
        for i in 0..32 {
            assert!((w[i] - w[63 - i]).abs() < 1e-6);
        }
    }

    #[test]
    fn single_sample_window() {
        assert_eq!(hamming_window::<f64>(1), vec![1.0]);
        assert!(hamming_window::<f64>(0).is_empty());
    }

    #[test]
    fn windowing_preserves_length() {
        for n in [1usize, 2, 7, 256] {
            let signal = vec![1.0f64; n];
            let weights = hamming_window(n);
            let windowed = apply_window(&signal, &weights);
            assert_eq!(windowed.len(), n);
            assert_eq!(windowed, weights);
        }
    }
}
