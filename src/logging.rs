//! Diagnostic logging for simulation runs.
//!
//! Engine, statistics and experiment code emit `tracing` events: `info` for
//! experiment progress, `debug` for per-run and per-scenario summaries,
//! `trace` for every timeline step and admission decision. Output goes to
//! stderr so report formats on stdout stay machine readable.
//!
//! `RUST_LOG` takes precedence over the level passed in, e.g.
//! `RUST_LOG=queue_sim::engine=trace queue-sim run`.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global subscriber. Later calls are ignored.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("{}={}", env!("CARGO_CRATE_NAME"), level).into());

    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true),
        )
        .with(filter)
        .try_init();
}
