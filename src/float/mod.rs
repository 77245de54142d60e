//! Generic [Float] type which acts as a stand-in for `f32` or `f64`.
use rustfft::num_traits::Float as NumFloat;
use rustfft::FftNum;
use std::fmt::{Debug, Display};

/// Samples and spectra are processed as arrays of [Float]s. A [Float] is normally `f32` or `f64`.
pub trait Float: Display + Debug + NumFloat + FftNum {}

impl Float for f64 {}
impl Float for f32 {}

/// Convert an `f64` constant into `T`. Both `f32` and `f64` accept any `f64`.
pub(crate) fn from_f64<T: Float>(value: f64) -> T {
    T::from_f64(value).unwrap()
}

pub(crate) fn from_usize<T: Float>(value: usize) -> T {
    T::from_usize(value).unwrap()
}
