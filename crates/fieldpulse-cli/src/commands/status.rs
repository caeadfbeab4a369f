//! `fieldpulse status`: show identity and upload counter.

use std::path::Path;
use std::process;

use fieldpulse_core::resolve_identity;

use super::{load_config, open_state};

pub fn run(config_path: Option<&Path>) {
    let config = load_config(config_path);
    let state = open_state(&config);

    let identity = match resolve_identity(config.session_uid.as_deref(), &state) {
        Ok(id) => id,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    println!("Identity:   {identity}");
    println!("Uploads:    {}", state.sent_count());
    println!("State file: {}", state.path().display());
}
