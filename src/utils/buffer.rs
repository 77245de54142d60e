use rustfft::num_complex::Complex;
use rustfft::num_traits::Zero;

use crate::float::Float;

pub enum ComplexComponent {
    Re,
    Im,
}

pub fn new_real_buffer<T: Float>(size: usize) -> Vec<T> {
    vec![T::zero(); size]
}

pub fn new_complex_buffer<T: Float>(size: usize) -> Vec<Complex<T>> {
    vec![Complex::zero(); size]
}

/// Copy `input` into one component of `output`. Any part of `input` beyond
/// `output.len()` is dropped and any part of `output` beyond `input.len()` is
/// zeroed, so `output` always ends up fully written.
pub fn copy_real_to_complex<T: Float>(
    input: &[T],
    output: &mut [Complex<T>],
    component: ComplexComponent,
) {
    let n = input.len().min(output.len());
    match component {
        ComplexComponent::Re => input[..n].iter().zip(output.iter_mut()).for_each(|(i, o)| {
            o.re = *i;
            o.im = T::zero();
        }),
        ComplexComponent::Im => input[..n].iter().zip(output.iter_mut()).for_each(|(i, o)| {
            o.im = *i;
            o.re = T::zero();
        }),
    }
    output[n..].iter_mut().for_each(|o| *o = Complex::zero())
}

/// Fit `samples` to exactly `size` entries: keep the first `size` samples and
/// zero-pad whatever is missing.
///
/// ```rust
/// use voice_pitch::utils::buffer::fit_to_window;
///
/// assert_eq!(fit_to_window(&[1.0, 2.0], 4), vec![1.0, 2.0, 0.0, 0.0]);
/// assert_eq!(fit_to_window(&[1.0, 2.0, 3.0, 4.0, 5.0], 4), vec![1.0, 2.0, 3.0, 4.0]);
/// ```
pub fn fit_to_window<T: Float>(samples: &[T], size: usize) -> Vec<T> {
    let mut buffer = new_real_buffer(size);
    let n = samples.len().min(size);
    buffer[..n].copy_from_slice(&samples[..n]);
    buffer
}
