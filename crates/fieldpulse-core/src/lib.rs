//! # fieldpulse-core
//!
//! Core library for the FieldPulse sampling agent: poll device sensor
//! channels over a fixed observation window, estimate ambient noise from
//! the microphone, assemble a flat snapshot record, and append it under a
//! per-install identity in a remote realtime store.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::time::Duration;
//! use fieldpulse_core::{
//!     detect_available_channels, run_cycle, CycleConfig, NoiseEstimator,
//!     RtdbSink, StateStore, Trigger,
//! };
//!
//! let channels = detect_available_channels();
//! let noise = NoiseEstimator::new();
//! let sink = RtdbSink::new("https://example.firebaseio.com", None);
//! let state = StateStore::open("state.json").unwrap();
//!
//! let cfg = CycleConfig {
//!     channels: &channels,
//!     noise: &noise,
//!     sink: &sink,
//!     state: &state,
//!     session_uid: None,
//!     window: Duration::from_secs(2),
//! };
//! let outcome = run_cycle(&cfg, Trigger::Manual);
//! println!("{outcome:?}");
//! ```
//!
//! ## Architecture
//!
//! Channels → Sampler (fixed window, last-write-wins) → Noise estimator →
//! Snapshot → Identity resolver → Upload sink
//!
//! A channel that never reports leaves the sentinel `-1.0` in its snapshot
//! field; sampling never fails hard. Only the upload step decides the
//! cycle outcome, and only the scheduled path may ask the task runner for
//! a retry.

pub mod channel;
pub mod channels;
pub mod config;
pub mod cycle;
pub mod identity;
pub mod noise;
pub mod sampler;
pub mod scheduler;
pub mod snapshot;
pub mod state;
pub mod upload;

pub use channel::{ChannelInfo, ChannelKind, Platform, Reading, SensorChannel};
pub use channels::{all_channels, detect_available_channels};
pub use config::{Config, ConfigError, DEFAULT_INTERVAL_MINUTES};
pub use cycle::{CycleConfig, CycleOutcome, run_cycle};
pub use identity::resolve_identity;
pub use noise::{NoiseEstimator, NoiseProbe, amplitude_to_db};
pub use sampler::{DEFAULT_WINDOW, SampledFields, sample_channels};
pub use scheduler::{ExistingTaskPolicy, Job, TaskOutcome, TaskScheduler};
pub use snapshot::{SENTINEL, SampleSnapshot, Trigger};
pub use state::{StateError, StateStore};
pub use upload::{RecordSink, RtdbSink, SinkError};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
