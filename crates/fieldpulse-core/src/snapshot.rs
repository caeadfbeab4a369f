//! The per-cycle sample record and its wire format.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::sampler::SampledFields;

/// Value recorded when a channel produced no reading during the cycle.
///
/// Inherited wire convention. A legitimate reading of exactly -1 is
/// indistinguishable from "no reading obtained"; consumers of the store
/// live with that ambiguity.
pub const SENTINEL: f64 = -1.0;

/// What started the cycle, serialized under the `source` key with the
/// labels the store consumers already expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trigger {
    /// User pressed the button / ran `sample`.
    #[serde(rename = "manual_button")]
    Manual,
    /// The background task runner invoked the cycle.
    #[serde(rename = "worker")]
    Scheduled,
}

impl std::fmt::Display for Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Manual => write!(f, "manual_button"),
            Self::Scheduled => write!(f, "worker"),
        }
    }
}

/// One cycle's assembled sensor and noise readings.
///
/// Immutable once built; lives only until it is uploaded. Every numeric
/// field is either a valid reading or [`SENTINEL`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleSnapshot {
    /// Milliseconds since the Unix epoch at assembly time.
    pub timestamp: u64,
    /// 3-axis acceleration, each axis [`SENTINEL`] if never reported.
    pub accel: [f64; 3],
    /// Heart rate in bpm, or [`SENTINEL`].
    #[serde(rename = "heartRate")]
    pub heart_rate: f64,
    /// Peak microphone level in dB, or [`SENTINEL`].
    #[serde(rename = "noiseDb")]
    pub noise_db: f64,
    /// Step count, or [`SENTINEL`].
    pub steps: f64,
    /// What started the cycle.
    #[serde(rename = "source")]
    pub trigger: Trigger,
}

impl SampleSnapshot {
    /// Assemble a snapshot from one window's sampled fields, stamped with
    /// the current wall clock.
    pub fn assemble(fields: &SampledFields, noise_db: f64, trigger: Trigger) -> Self {
        Self {
            timestamp: unix_ms_now(),
            accel: fields.accel,
            heart_rate: fields.heart_rate,
            noise_db,
            steps: fields.steps,
            trigger,
        }
    }
}

/// Milliseconds since the Unix epoch.
fn unix_ms_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_field_names() {
        let snapshot = SampleSnapshot {
            timestamp: 1_700_000_000_000,
            accel: [0.1, -0.2, 9.8],
            heart_rate: 72.0,
            noise_db: 60.0,
            steps: 1234.0,
            trigger: Trigger::Scheduled,
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["heartRate"], 72.0);
        assert_eq!(json["noiseDb"], 60.0);
        assert_eq!(json["steps"], 1234.0);
        assert_eq!(json["source"], "worker");
        assert_eq!(json["accel"][2], 9.8);
    }

    #[test]
    fn manual_trigger_label() {
        let json = serde_json::to_value(Trigger::Manual).unwrap();
        assert_eq!(json, "manual_button");
        assert_eq!(Trigger::Manual.to_string(), "manual_button");
    }

    #[test]
    fn assemble_stamps_time_and_copies_fields() {
        let fields = SampledFields::default();
        let snapshot = SampleSnapshot::assemble(&fields, SENTINEL, Trigger::Manual);
        assert!(snapshot.timestamp > 0);
        assert_eq!(snapshot.accel, [SENTINEL; 3]);
        assert_eq!(snapshot.heart_rate, SENTINEL);
        assert_eq!(snapshot.noise_db, SENTINEL);
        assert_eq!(snapshot.steps, SENTINEL);
        assert_eq!(snapshot.trigger, Trigger::Manual);
    }

    #[test]
    fn snapshot_roundtrip() {
        let snapshot = SampleSnapshot {
            timestamp: 42,
            accel: [1.0, 2.0, 3.0],
            heart_rate: SENTINEL,
            noise_db: 0.0,
            steps: 10.0,
            trigger: Trigger::Manual,
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: SampleSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, snapshot);
    }
}
