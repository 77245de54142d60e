use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use voice_pitch::config::AnalysisConfig;
use voice_pitch::Pipeline;

/// Estimate the dominant pitch of voice recordings.
#[derive(Parser, Debug)]
#[command(name = "voice-pitch", version, about)]
struct Args {
    /// TOML file overriding the analysis defaults
    #[arg(short, long, env = "VOICE_PITCH_CONFIG")]
    config: Option<PathBuf>,

    /// Directory for canonical waveforms
    #[arg(long)]
    processed_dir: Option<PathBuf>,

    /// Transcoding program to invoke
    #[arg(long)]
    ffmpeg: Option<String>,

    /// Recordings to analyze
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match AnalysisConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => AnalysisConfig::default(),
    };
    if let Some(dir) = args.processed_dir {
        config.processed_dir = dir;
    }
    if let Some(program) = args.ffmpeg {
        config.ffmpeg_program = program;
    }

    let pipeline = match Pipeline::from_config(&config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if !pipeline.transcoder().is_available() {
        tracing::error!(
            program = %config.ffmpeg_program,
            "Transcoding program could not be started"
        );
        return ExitCode::FAILURE;
    }

    let mut failed = false;
    for input in &args.inputs {
        match pipeline.process(input) {
            Ok(recording) => {
                let pitch = recording
                    .pitch
                    .frequency_hz()
                    .map_or_else(|| "-".to_string(), |hz| format!("{:.2}", hz));
                println!(
                    "{}\t{}\t{}",
                    input.display(),
                    recording.waveform_path.display(),
                    pitch
                );
            }
            Err(e) => {
                failed = true;
                tracing::error!(input = %input.display(), "{}", e);
            }
        }
    }

    match failed {
        true => ExitCode::FAILURE,
        false => ExitCode::SUCCESS,
    }
}
