//! `fieldpulse run`: the background agent loop.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use log::info;

use fieldpulse_core::{
    CycleConfig, CycleOutcome, ExistingTaskPolicy, Job, NoiseEstimator, RtdbSink, StateStore,
    TaskOutcome, TaskScheduler, Trigger, detect_available_channels, run_cycle,
};

use super::{load_config, make_sink, open_state};

/// Name of the recurring upload task.
const PERIODIC_TASK: &str = "SensorDataUpload";

pub fn run(config_path: Option<&Path>, interval_minutes: Option<u64>, kick: bool) {
    let config = load_config(config_path);
    let interval = interval_minutes
        .map(|m| Duration::from_secs(m * 60))
        .unwrap_or(config.interval());
    let window = config.window();
    let session_uid = config.session_uid.clone();

    let state = Arc::new(open_state(&config));
    let sink = Arc::new(make_sink(&config));

    let running = Arc::new(AtomicBool::new(true));
    let r = Arc::clone(&running);
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .expect("failed to install signal handler");

    let mut scheduler = TaskScheduler::new();
    scheduler.register_periodic(
        PERIODIC_TASK,
        interval,
        ExistingTaskPolicy::Keep,
        make_job(Arc::clone(&state), Arc::clone(&sink), session_uid.clone(), window),
    );
    if kick {
        scheduler.enqueue_one_shot(make_job(state, sink, session_uid, window));
    }

    info!(
        "agent started, scheduled cycle every {:?} (Ctrl-C to stop)",
        interval
    );
    scheduler.run(&running);
    println!("Stopped.");
}

/// Build a scheduler job that runs one scheduled cycle. Channels and the
/// noise estimator are probed fresh each run so hot-plugged hardware is
/// picked up.
fn make_job(
    state: Arc<StateStore>,
    sink: Arc<RtdbSink>,
    session_uid: Option<String>,
    window: Duration,
) -> Job {
    Box::new(move || {
        let channels = detect_available_channels();
        let noise = NoiseEstimator::new();
        let cfg = CycleConfig {
            channels: &channels,
            noise: &noise,
            sink: sink.as_ref(),
            state: state.as_ref(),
            session_uid: session_uid.as_deref(),
            window,
        };
        match run_cycle(&cfg, Trigger::Scheduled) {
            CycleOutcome::Success { .. } => TaskOutcome::Success,
            CycleOutcome::Retry { .. } => TaskOutcome::Retry,
            CycleOutcome::Failure { .. } => TaskOutcome::Failure,
        }
    })
}
