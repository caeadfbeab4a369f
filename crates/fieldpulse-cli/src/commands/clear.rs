//! `fieldpulse clear`: delete remote records and reset the counter.

use std::path::Path;
use std::process;

use fieldpulse_core::{RecordSink, resolve_identity};

use super::{load_config, make_sink, open_state};

pub fn run(config_path: Option<&Path>) {
    let config = load_config(config_path);
    let state = open_state(&config);
    let sink = make_sink(&config);

    let identity = match resolve_identity(config.session_uid.as_deref(), &state) {
        Ok(id) => id,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = sink.delete_all(&identity) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
    if let Err(e) = state.reset_sent_count() {
        eprintln!("Error: {e}");
        process::exit(1);
    }

    println!("Deleted all records for {identity} and reset the upload counter.");
}
