//! One full sample-and-upload cycle.
//!
//! A cycle samples every channel over the observation window, measures
//! ambient noise, assembles the snapshot, resolves the identity, and
//! uploads. Sampling never fails the cycle; only identity resolution and
//! upload can, and only a scheduled cycle may ask for a retry.

use std::time::Duration;

use log::{debug, error, info};

use crate::channel::SensorChannel;
use crate::identity::resolve_identity;
use crate::noise::NoiseProbe;
use crate::sampler::sample_channels;
use crate::snapshot::{SampleSnapshot, Trigger};
use crate::state::StateStore;
use crate::upload::RecordSink;

/// Result of one cycle.
#[derive(Debug)]
pub enum CycleOutcome {
    /// Snapshot uploaded and counted.
    Success {
        record_id: String,
        snapshot: SampleSnapshot,
        sent_count: u64,
    },
    /// Scheduled cycle failed; the task runner should retry later.
    Retry { reason: String },
    /// Manual cycle failed; nothing is retried.
    Failure { reason: String },
}

/// Everything a cycle needs. Borrowed, so one set of components serves
/// any number of cycles.
pub struct CycleConfig<'a> {
    pub channels: &'a [Box<dyn SensorChannel>],
    pub noise: &'a dyn NoiseProbe,
    pub sink: &'a dyn RecordSink,
    pub state: &'a StateStore,
    pub session_uid: Option<&'a str>,
    pub window: Duration,
}

/// Run one sample-and-upload cycle.
pub fn run_cycle(cfg: &CycleConfig<'_>, trigger: Trigger) -> CycleOutcome {
    debug!("starting {trigger} cycle over {:?} window", cfg.window);

    let fields = sample_channels(cfg.channels, cfg.window);
    let noise_db = cfg.noise.measure();
    let snapshot = SampleSnapshot::assemble(&fields, noise_db, trigger);

    let identity = match resolve_identity(cfg.session_uid, cfg.state) {
        Ok(id) => id,
        Err(e) => return fail(trigger, format!("identity resolution failed: {e}")),
    };

    match cfg.sink.append(&identity, &snapshot) {
        Ok(record_id) => {
            let sent_count = match cfg.state.record_sent() {
                Ok(n) => n,
                Err(e) => {
                    // The upload went through; a counter persist failure
                    // must not turn the cycle into a retry.
                    error!("failed to persist sent count: {e}");
                    cfg.state.sent_count()
                }
            };
            info!("uploaded record {record_id} ({sent_count} total)");
            CycleOutcome::Success {
                record_id,
                snapshot,
                sent_count,
            }
        }
        Err(e) => fail(trigger, format!("upload failed: {e}")),
    }
}

fn fail(trigger: Trigger, reason: String) -> CycleOutcome {
    error!("{trigger} cycle failed: {reason}");
    match trigger {
        Trigger::Manual => CycleOutcome::Failure { reason },
        Trigger::Scheduled => CycleOutcome::Retry { reason },
    }
}
