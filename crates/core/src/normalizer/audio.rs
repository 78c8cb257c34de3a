//! FFmpeg-based audio normalization.

use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use std::time::Instant;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tokio::time::{timeout, Duration};
use tracing::debug;

use crate::metrics;

use super::config::NormalizerConfig;
use super::error::NormalizeError;
use super::traits::AudioNormalizer;

/// Audio normalizer that shells out to ffmpeg.
///
/// Input bytes are written to a scoped temp directory, transcoded to
/// mono 16 kHz pcm_s16le WAV, and read back. The temp directory is
/// released on every exit path, including task cancellation.
pub struct FfmpegAudioNormalizer {
    config: NormalizerConfig,
}

impl FfmpegAudioNormalizer {
    /// Creates a new ffmpeg normalizer with the given configuration.
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    /// Creates a normalizer with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(NormalizerConfig::default())
    }

    /// Builds ffmpeg arguments for the canonical PCM conversion.
    fn build_args(&self, input_path: &Path, output_path: &Path) -> Vec<String> {
        vec![
            "-y".to_string(), // Overwrite output
            "-i".to_string(),
            input_path.to_string_lossy().to_string(),
            "-acodec".to_string(),
            "pcm_s16le".to_string(),
            "-ac".to_string(),
            self.config.channels.to_string(),
            "-ar".to_string(),
            self.config.sample_rate_hz.to_string(),
            "-loglevel".to_string(),
            "error".to_string(),
            output_path.to_string_lossy().to_string(),
        ]
    }

    /// Verifies that the configured ffmpeg binary is runnable.
    pub async fn validate(&self) -> Result<(), NormalizeError> {
        let result = Command::new(&self.config.ffmpeg_path)
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(NormalizeError::FfmpegNotFound {
                    path: self.config.ffmpeg_path.clone(),
                })
            }
            Err(e) => Err(NormalizeError::Io(e)),
        }
    }
}

#[async_trait]
impl AudioNormalizer for FfmpegAudioNormalizer {
    async fn normalize(&self, bytes: Vec<u8>) -> Result<Vec<u8>, NormalizeError> {
        let start = Instant::now();

        // Scoped temp dir; dropped (and deleted) on every exit path.
        let temp_dir = tempfile::tempdir()?;
        let input_path = temp_dir.path().join("input");
        let output_path = temp_dir.path().join("output.wav");

        tokio::fs::write(&input_path, &bytes).await?;

        let args = self.build_args(&input_path, &output_path);
        let mut child = Command::new(&self.config.ffmpeg_path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    NormalizeError::FfmpegNotFound {
                        path: self.config.ffmpeg_path.clone(),
                    }
                } else {
                    NormalizeError::Io(e)
                }
            })?;

        let mut stderr = child.stderr.take().expect("stderr should be captured");

        let timeout_duration = Duration::from_secs(self.config.timeout_secs);
        let result = timeout(timeout_duration, async {
            let mut stderr_text = String::new();
            stderr.read_to_string(&mut stderr_text).await?;
            let status = child.wait().await?;
            Ok::<(std::process::ExitStatus, String), std::io::Error>((status, stderr_text))
        })
        .await;

        match result {
            Ok(Ok((status, stderr_text))) => {
                if !status.success() {
                    metrics::NORMALIZATIONS_TOTAL
                        .with_label_values(&["audio", "error"])
                        .inc();
                    return Err(NormalizeError::audio_transcode(if stderr_text.is_empty() {
                        format!("ffmpeg exited with code {:?}", status.code())
                    } else {
                        stderr_text
                    }));
                }
            }
            Ok(Err(e)) => {
                metrics::NORMALIZATIONS_TOTAL
                    .with_label_values(&["audio", "error"])
                    .inc();
                return Err(NormalizeError::Io(e));
            }
            Err(_) => {
                // Kill the process on timeout
                let _ = child.kill().await;
                metrics::NORMALIZATIONS_TOTAL
                    .with_label_values(&["audio", "error"])
                    .inc();
                return Err(NormalizeError::Timeout {
                    timeout_secs: self.config.timeout_secs,
                });
            }
        }

        let wav = tokio::fs::read(&output_path).await.map_err(|_| {
            metrics::NORMALIZATIONS_TOTAL
                .with_label_values(&["audio", "error"])
                .inc();
            NormalizeError::audio_transcode("ffmpeg produced no output file")
        })?;

        debug!(
            input_bytes = bytes.len(),
            output_bytes = wav.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Audio normalized to PCM WAV"
        );
        metrics::NORMALIZATIONS_TOTAL
            .with_label_values(&["audio", "ok"])
            .inc();
        metrics::NORMALIZATION_DURATION
            .with_label_values(&["audio"])
            .observe(start.elapsed().as_secs_f64());

        Ok(wav)
    }
}
