//! `fieldpulse scan`: list channels and availability.

use std::path::Path;

use fieldpulse_core::{NoiseEstimator, all_channels};

pub fn run(_config_path: Option<&Path>) {
    println!("Sensor channels:\n");
    for channel in all_channels() {
        let info = channel.info();
        let mark = if channel.is_available() { "✅" } else { "—" };
        println!("  {mark} {:<14} [{}] {}", info.name, info.platform, info.description);
    }

    let noise = NoiseEstimator::new();
    let mark = if noise.is_available() { "✅" } else { "—" };
    println!("\n  {mark} {:<14} [any] peak microphone level via ffmpeg capture", "noise");

    if !noise.is_available() {
        println!("\nInstall ffmpeg to enable noise estimation.");
    }
}
