//! Transcode, read and estimate, in that order.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::AnalysisConfig;
use crate::error::{PitchError, Result};
use crate::estimator::spectral::SpectralPeakEstimator;
use crate::estimator::{PitchEstimate, PitchEstimator};
use crate::transcode::{FfmpegTranscoder, Transcoder};
use crate::waveform::WaveformReader;

/// Result of a fully processed recording.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedRecording {
    pub waveform_path: PathBuf,
    pub pitch: PitchEstimate<f64>,
}

impl ProcessedRecording {
    /// Dominant pitch in Hz; `0.0` when no pitch was found in the band.
    pub fn pitch_hz(&self) -> f64 {
        self.pitch.frequency
    }
}

/// A failed [Pipeline::process]. When the transcode stage already succeeded,
/// `waveform_path` points at the artifact it produced.
#[derive(Debug)]
pub struct ProcessError {
    pub waveform_path: Option<PathBuf>,
    pub source: PitchError,
}

impl ProcessError {
    pub fn waveform_path(&self) -> Option<&Path> {
        self.waveform_path.as_deref()
    }

    pub fn into_inner(self) -> PitchError {
        self.source
    }
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.waveform_path {
            Some(path) => write!(
                f,
                "pitch detection failed for {}: {}",
                path.display(),
                self.source
            ),
            None => write!(f, "transcoding failed: {}", self.source),
        }
    }
}

impl std::error::Error for ProcessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

pub struct Pipeline<C>
where
    C: Transcoder,
{
    transcoder: C,
    reader: WaveformReader,
    estimator: SpectralPeakEstimator<f64>,
    expected_sample_rate: u32,
}

impl Pipeline<FfmpegTranscoder> {
    /// Build the stock ffmpeg-backed pipeline. The configuration is validated first.
    pub fn from_config(config: &AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Pipeline::with_transcoder(
            FfmpegTranscoder::from_config(config),
            config,
        ))
    }
}

impl<C> Pipeline<C>
where
    C: Transcoder,
{
    pub fn with_transcoder(transcoder: C, config: &AnalysisConfig) -> Self {
        Pipeline {
            transcoder,
            reader: WaveformReader::new(config.window_size, config.read_factor),
            estimator: SpectralPeakEstimator::new(config.window_size, config.band()),
            expected_sample_rate: config.sample_rate,
        }
    }

    pub fn transcoder(&self) -> &C {
        &self.transcoder
    }

    /// Estimate the pitch of an already canonical waveform.
    pub fn analyze(&self, waveform_path: &Path) -> Result<PitchEstimate<f64>> {
        let waveform = self.reader.read::<f64>(waveform_path)?;
        if waveform.sample_rate != self.expected_sample_rate {
            tracing::warn!(
                path = %waveform_path.display(),
                sample_rate = waveform.sample_rate,
                expected = self.expected_sample_rate,
                "Waveform sample rate differs from configuration; using header rate"
            );
        }
        Ok(self
            .estimator
            .estimate(&waveform.samples, waveform.sample_rate as usize))
    }

    /// Transcode `raw_path`, then estimate the pitch of the resulting waveform.
    pub fn process(&self, raw_path: &Path) -> std::result::Result<ProcessedRecording, ProcessError> {
        let waveform_path = self
            .transcoder
            .transcode(raw_path)
            .map_err(|source| ProcessError {
                waveform_path: None,
                source,
            })?;

        let pitch = match self.analyze(&waveform_path) {
            Ok(pitch) => pitch,
            Err(source) => {
                return Err(ProcessError {
                    waveform_path: Some(waveform_path),
                    source,
                })
            }
        };

        tracing::info!(
            input = %raw_path.display(),
            waveform = %waveform_path.display(),
            pitch_hz = pitch.frequency,
            bin = pitch.bin,
            undetermined = pitch.is_undetermined(),
            "Processed recording"
        );

        Ok(ProcessedRecording {
            waveform_path,
            pitch,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TranscodeFailure;
    use hound::{SampleFormat, WavSpec, WavWriter};
    use std::f64::consts::PI;

    /// Writes a fixed waveform to `<dir>/<stem>.wav` instead of calling a tool.
    struct ToneTranscoder {
        dir: PathBuf,
        freq: Option<f64>,
    }

    impl Transcoder for ToneTranscoder {
        fn transcode(&self, input: &Path) -> Result<PathBuf> {
            let path = crate::transcode::derived_waveform_path(&self.dir, input)?;
            let spec = WavSpec {
                channels: 1,
                sample_rate: 44100,
                bits_per_sample: 16,
                sample_format: SampleFormat::Int,
            };
            let mut writer = WavWriter::create(&path, spec).unwrap();
            for i in 0..20000 {
                let s = match self.freq {
                    Some(freq) => 0.8 * (2.0 * PI * freq * i as f64 / 44100.0).sin(),
                    None => 0.0,
                };
                writer.write_sample((s * i16::MAX as f64) as i16).unwrap();
            }
            writer.finalize().unwrap();
            Ok(path)
        }
    }

    struct GarbageTranscoder {
        dir: PathBuf,
    }

    impl Transcoder for GarbageTranscoder {
        fn transcode(&self, input: &Path) -> Result<PathBuf> {
            let path = crate::transcode::derived_waveform_path(&self.dir, input)?;
            std::fs::write(&path, b"not a waveform").unwrap();
            Ok(path)
        }
    }

    struct FailingTranscoder;

    impl Transcoder for FailingTranscoder {
        fn transcode(&self, input: &Path) -> Result<PathBuf> {
            Err(PitchError::transcode(input, TranscodeFailure::NoFileStem))
        }
    }

    #[test]
    fn process_returns_waveform_and_pitch() {
        let dir = tempfile::tempdir().unwrap();
        let transcoder = ToneTranscoder {
            dir: dir.path().to_path_buf(),
            freq: Some(220.0),
        };
        let pipeline = Pipeline::with_transcoder(transcoder, &AnalysisConfig::default());

        let recording = pipeline.process(Path::new("/uploads/sing.m4a")).unwrap();
        assert_eq!(recording.waveform_path, dir.path().join("sing.wav"));
        assert!((recording.pitch_hz() - 220.0).abs() <= 44100.0 / 8192.0);
    }

    #[test]
    fn silent_recording_is_undetermined() {
        let dir = tempfile::tempdir().unwrap();
        let transcoder = ToneTranscoder {
            dir: dir.path().to_path_buf(),
            freq: None,
        };
        let pipeline = Pipeline::with_transcoder(transcoder, &AnalysisConfig::default());

        let recording = pipeline.process(Path::new("quiet.ogg")).unwrap();
        assert!(recording.pitch.is_undetermined());
        assert_eq!(recording.pitch_hz(), 0.0);
    }

    #[test]
    fn analysis_failure_keeps_waveform_path() {
        let dir = tempfile::tempdir().unwrap();
        let transcoder = GarbageTranscoder {
            dir: dir.path().to_path_buf(),
        };
        let pipeline = Pipeline::with_transcoder(transcoder, &AnalysisConfig::default());

        let err = pipeline.process(Path::new("clip.mp3")).unwrap_err();
        assert_eq!(err.waveform_path(), Some(dir.path().join("clip.wav").as_path()));
        assert!(matches!(err.source, PitchError::Parse { .. }));
        assert!(err.to_string().starts_with("pitch detection failed"));
    }

    #[test]
    fn transcode_failure_has_no_waveform_path() {
        let pipeline = Pipeline::with_transcoder(FailingTranscoder, &AnalysisConfig::default());

        let err = pipeline.process(Path::new("clip.mp3")).unwrap_err();
        assert!(err.waveform_path().is_none());
        assert!(matches!(err.into_inner(), PitchError::Transcode { .. }));
    }

    #[test]
    fn from_config_rejects_invalid_config() {
        let config = AnalysisConfig {
            read_factor: 0,
            ..Default::default()
        };
        assert!(matches!(
            Pipeline::from_config(&config),
            Err(PitchError::Config(_))
        ));
    }

    #[test]
    fn from_config_uses_configured_program() {
        let dir = tempfile::tempdir().unwrap();
        let config = AnalysisConfig {
            ffmpeg_program: "voice-pitch-no-such-program".to_string(),
            processed_dir: dir.path().join("processed"),
            ..Default::default()
        };
        let pipeline = Pipeline::from_config(&config).unwrap();
        assert!(!pipeline.transcoder().is_available());
        assert_eq!(pipeline.transcoder().output_dir(), dir.path().join("processed"));

        let err = pipeline.process(Path::new("take.m4a")).unwrap_err();
        assert!(err.waveform_path().is_none());
        assert!(matches!(err.source, PitchError::Transcode { .. }));
    }

    #[test]
    fn boxed_transcoder_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let transcoder: Box<dyn Transcoder> = Box::new(ToneTranscoder {
            dir: dir.path().to_path_buf(),
            freq: Some(330.0),
        });
        let pipeline = Pipeline::with_transcoder(transcoder, &AnalysisConfig::default());
        let recording = pipeline.process(Path::new("box.wav")).unwrap();
        assert!((recording.pitch_hz() - 330.0).abs() <= 44100.0 / 8192.0);
    }
}
