//! Subcommand implementations.

pub mod clear;
pub mod run;
pub mod sample;
pub mod scan;
pub mod status;

use std::path::Path;
use std::process;

use fieldpulse_core::{Config, RtdbSink, StateStore};

/// Load config or exit with a message.
pub fn load_config(path: Option<&Path>) -> Config {
    match Config::load(path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

/// Open the state store or exit with a message.
pub fn open_state(config: &Config) -> StateStore {
    match StateStore::open(config.state_path()) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

/// Build the upload sink or exit if no base URL is configured.
pub fn make_sink(config: &Config) -> RtdbSink {
    match config.require_base_url() {
        Ok(base_url) => RtdbSink::new(base_url, config.auth_token.clone()),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
