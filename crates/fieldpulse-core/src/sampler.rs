//! Fixed-window sensor sampling with last-write-wins semantics.
//!
//! Each available channel gets one polling thread for the duration of the
//! observation window. Threads overwrite the shared fields with the
//! latest value; nothing reads the fields until every thread has stopped,
//! so no coordination beyond the mutex is needed.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::channel::{ChannelKind, Reading, SensorChannel};
use crate::snapshot::SENTINEL;

/// Default observation window.
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(2);

/// How often each polling thread re-reads its channel.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Field values accumulated during one observation window.
///
/// Starts out all-sentinel; a channel that never reports leaves its field
/// untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampledFields {
    pub accel: [f64; 3],
    pub heart_rate: f64,
    pub steps: f64,
}

impl Default for SampledFields {
    fn default() -> Self {
        Self {
            accel: [SENTINEL; 3],
            heart_rate: SENTINEL,
            steps: SENTINEL,
        }
    }
}

impl SampledFields {
    /// Overwrite the field for `kind` with the latest reading.
    fn apply(&mut self, kind: ChannelKind, reading: Reading) {
        match (kind, reading) {
            (ChannelKind::Accelerometer, Reading::Vector(v)) => self.accel = v,
            (ChannelKind::HeartRate, Reading::Scalar(v)) => self.heart_rate = v,
            (ChannelKind::StepCounter, Reading::Scalar(v)) => self.steps = v,
            (kind, reading) => {
                warn!("ignoring mismatched reading {reading:?} from {kind} channel");
            }
        }
    }
}

/// Sample every available channel over one observation window.
///
/// Unavailable channels are skipped and leave sentinel values. There is
/// no retry: a channel that stays silent for the whole window simply
/// contributes nothing.
pub fn sample_channels(channels: &[Box<dyn SensorChannel>], window: Duration) -> SampledFields {
    let fields = Mutex::new(SampledFields::default());
    let deadline = Instant::now() + window;

    std::thread::scope(|s| {
        for channel in channels {
            if !channel.is_available() {
                debug!("channel {} unavailable, leaving sentinel", channel.name());
                continue;
            }
            let fields = &fields;
            s.spawn(move || {
                let kind = channel.info().kind;
                loop {
                    if let Some(reading) = channel.poll() {
                        fields.lock().unwrap().apply(kind, reading);
                    }
                    let remaining = deadline.saturating_duration_since(Instant::now());
                    if remaining.is_zero() {
                        break;
                    }
                    std::thread::sleep(POLL_INTERVAL.min(remaining));
                }
            });
        }
    });

    // All polling threads have exited; this is the read-after-unsubscribe
    // point.
    fields.into_inner().unwrap()
}
