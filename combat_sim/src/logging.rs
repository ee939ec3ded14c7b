//! Tracing subscriber setup
//!
//! Logs go to stderr so `--json` event lines on stdout stay machine readable.
//! `RUST_LOG` overrides the level given on the command line.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static TRACING_INIT: Once = Once::new();

/// Filter string for a default level, with the engine's chatty tick
/// tracing kept one notch quieter
fn filter_for(level: &str) -> String {
    match level {
        "trace" => "trace".to_string(),
        _ => format!("{level},combat_core::status::tick=warn"),
    }
}

/// Install the global subscriber (idempotent, first call wins)
pub fn init_tracing(level: &str) {
    let filter_str = filter_for(level);
    TRACING_INIT.call_once(move || {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(false)
            .compact();

        let _ = subscriber.try_init();
    });
}
