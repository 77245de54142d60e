//! Reading canonical PCM waveforms into normalized sample buffers.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavReader};

use crate::error::{PitchError, Result};
use crate::float::{from_f64, Float};
use crate::utils::buffer::fit_to_window;

/// A decoded analysis window together with the header facts needed to interpret it.
#[derive(Debug, Clone)]
pub struct Waveform<T>
where
    T: Float,
{
    pub path: PathBuf,
    pub sample_rate: u32,
    pub channels: u16,
    /// Exactly `window_size` samples in `[-1.0, 1.0]`, zero-padded if the file was short
    pub samples: Vec<T>,
}

#[derive(Debug, Clone, Copy)]
pub struct WaveformReader {
    window_size: usize,
    read_factor: usize,
}

impl WaveformReader {
    pub fn new(window_size: usize, read_factor: usize) -> Self {
        WaveformReader {
            window_size,
            read_factor,
        }
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Upper bound on samples pulled from a file.
    pub fn read_limit(&self) -> usize {
        self.window_size.saturating_mul(self.read_factor)
    }

    /// Open `path`, validate its header and return the analysis window.
    pub fn read<T: Float>(&self, path: &Path) -> Result<Waveform<T>> {
        let (spec, samples) = self.read_samples::<T>(path)?;
        Ok(Waveform {
            path: path.to_path_buf(),
            sample_rate: spec.sample_rate,
            channels: spec.channels,
            samples: fit_to_window(&samples, self.window_size),
        })
    }

    /// Decode up to [read_limit](Self::read_limit) normalized samples, in file order.
    pub fn read_samples<T: Float>(&self, path: &Path) -> Result<(hound::WavSpec, Vec<T>)> {
        let file = File::open(path).map_err(|source| PitchError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = WavReader::new(BufReader::new(file)).map_err(|source| PitchError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let spec = reader.spec();
        tracing::debug!(
            path = %path.display(),
            channels = spec.channels,
            sample_rate = spec.sample_rate,
            bits_per_sample = spec.bits_per_sample,
            total_samples = reader.len(),
            "Parsed waveform header"
        );
        if spec.channels != 1 {
            tracing::warn!(
                path = %path.display(),
                channels = spec.channels,
                "Waveform is not mono; samples are analyzed interleaved"
            );
        }

        let samples = decode(reader, self.read_limit()).map_err(|source| PitchError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok((spec, samples))
    }
}

/// Integer PCM of bit depth `b` maps to `s / 2^(b-1)`; float PCM is passed through.
fn decode<T, R>(mut reader: WavReader<R>, limit: usize) -> std::result::Result<Vec<T>, hound::Error>
where
    T: Float,
    R: std::io::Read,
{
    let spec = reader.spec();
    match spec.sample_format {
        SampleFormat::Int => {
            let scale = 1.0 / (1u64 << (spec.bits_per_sample.saturating_sub(1))) as f64;
            reader
                .samples::<i32>()
                .take(limit)
                .map(|s| s.map(|s| from_f64(s as f64 * scale)))
                .collect()
        }
        SampleFormat::Float => reader
            .samples::<f32>()
            .take(limit)
            .map(|s| s.map(|s| from_f64(s as f64)))
            .collect(),
    }
}
