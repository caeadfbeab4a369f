//! `fieldpulse sample`: one manual cycle.

use std::path::Path;
use std::process;
use std::time::Duration;

use fieldpulse_core::{
    CycleConfig, CycleOutcome, NoiseEstimator, NoiseProbe, SampleSnapshot, Trigger,
    detect_available_channels, run_cycle, sample_channels,
};

use super::{load_config, make_sink, open_state};

pub fn run(config_path: Option<&Path>, window_ms: Option<u64>, dry_run: bool) {
    let config = load_config(config_path);
    let window = window_ms.map(Duration::from_millis).unwrap_or(config.window());

    let channels = detect_available_channels();
    if channels.is_empty() {
        eprintln!("Warning: no sensor channels available, snapshot will hold sentinel values");
    }
    let noise = NoiseEstimator::new();

    if dry_run {
        let fields = sample_channels(&channels, window);
        let snapshot = SampleSnapshot::assemble(&fields, noise.measure(), Trigger::Manual);
        match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        }
        return;
    }

    let state = open_state(&config);
    let sink = make_sink(&config);
    let cfg = CycleConfig {
        channels: &channels,
        noise: &noise,
        sink: &sink,
        state: &state,
        session_uid: config.session_uid.as_deref(),
        window,
    };

    match run_cycle(&cfg, Trigger::Manual) {
        CycleOutcome::Success {
            record_id,
            snapshot,
            sent_count,
        } => {
            println!("Uploaded record {record_id} ({sent_count} total)");
            println!(
                "  accel: [{:.3}, {:.3}, {:.3}]",
                snapshot.accel[0], snapshot.accel[1], snapshot.accel[2]
            );
            println!("  heart rate: {:.1}", snapshot.heart_rate);
            println!("  noise: {:.1} dB", snapshot.noise_db);
            println!("  steps: {:.0}", snapshot.steps);
        }
        CycleOutcome::Failure { reason } | CycleOutcome::Retry { reason } => {
            eprintln!("Error: {reason}");
            process::exit(1);
        }
    }
}
