//! Ambient noise estimation from the default microphone.
//!
//! Shells out to ffmpeg to capture a short burst of raw s16le PCM from
//! the default input device, finds the peak absolute amplitude, and
//! converts it to decibels with `20 * log10(amplitude)`.

use std::process::{Command, Stdio};
use std::time::Duration;

use log::{debug, warn};

use crate::snapshot::SENTINEL;

/// Anything that can produce one ambient noise figure in dB.
///
/// The production implementation is [`NoiseEstimator`]; tests substitute
/// a stub so a cycle never has to touch the microphone.
pub trait NoiseProbe: Send + Sync {
    /// Measure the current ambient noise level in dB, or [`SENTINEL`]
    /// if no capture could be made.
    fn measure(&self) -> f64;
}

/// Convert a peak PCM amplitude to decibels.
///
/// Amplitudes at or below 1 clamp to 0 dB, so silence never produces
/// `-inf` or `NaN`.
pub fn amplitude_to_db(amplitude: f64) -> f64 {
    20.0 * amplitude.max(1.0).log10()
}

/// Microphone noise estimator backed by an ffmpeg capture.
pub struct NoiseEstimator {
    capture: Duration,
}

impl NoiseEstimator {
    /// Estimator with the default 2-second capture.
    pub fn new() -> Self {
        Self {
            capture: Duration::from_secs(2),
        }
    }

    /// Estimator with a custom capture duration.
    pub fn with_capture(capture: Duration) -> Self {
        Self { capture }
    }

    /// Check whether ffmpeg is installed.
    pub fn is_available(&self) -> bool {
        command_exists("ffmpeg")
    }

    /// Capture one burst and return the peak absolute sample amplitude.
    fn capture_peak_amplitude(&self) -> Option<f64> {
        let (format, device) = default_input();
        let secs = self.capture.as_secs_f64();
        let output = Command::new("ffmpeg")
            .args([
                "-f",
                format,
                "-i",
                device,
                "-t",
                &format!("{secs}"),
                "-f",
                "s16le",
                "-ar",
                "44100",
                "-ac",
                "1",
                "pipe:1",
            ])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .output()
            .ok()?;
        if !output.status.success() {
            return None;
        }
        peak_amplitude_s16le(&output.stdout)
    }
}

impl Default for NoiseEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl NoiseProbe for NoiseEstimator {
    fn measure(&self) -> f64 {
        match self.capture_peak_amplitude() {
            Some(peak) => {
                let db = amplitude_to_db(peak);
                debug!("microphone peak amplitude {peak}, {db:.1} dB");
                db
            }
            None => {
                warn!("microphone capture failed, recording sentinel noise level");
                SENTINEL
            }
        }
    }
}

/// ffmpeg input format and device for the current platform.
fn default_input() -> (&'static str, &'static str) {
    if cfg!(target_os = "macos") {
        ("avfoundation", ":0")
    } else {
        ("pulse", "default")
    }
}

/// Peak absolute amplitude in a buffer of little-endian signed 16-bit
/// mono samples. `None` if the buffer holds no complete sample.
fn peak_amplitude_s16le(pcm: &[u8]) -> Option<f64> {
    pcm.chunks_exact(2)
        .map(|b| (i16::from_le_bytes([b[0], b[1]]) as f64).abs())
        .fold(None, |max, v| match max {
            Some(m) if m >= v => Some(m),
            _ => Some(v),
        })
}

fn command_exists(name: &str) -> bool {
    Command::new("which")
        .arg(name)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}
