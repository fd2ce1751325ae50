//! Severance Driver Binary
//!
//! Plays one game over stdin/stdout: reads the level setup, then answers every
//! agent position with the link to cut.
//!
//! ## Configuration
//!
//! Environment variables:
//! - `RUST_LOG`: Log level filter (default: info)
//! - `LOG_FORMAT`: "json" for structured logs, "pretty" for development (default: pretty)
//! - `SEVER_FALLBACK`: "lowest" or "highest" neighbor label when no exit is adjacent (default: lowest)
//!
//! Logs go to stderr; stdout carries only the answers.
//!
//! ## Usage
//!
//! ```bash
//! SEVER_FALLBACK=lowest cargo run --bin severance_driver < level.txt
//! ```

use std::io::{self, BufWriter};

use tracing::{info, warn};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use severance_kernel::{run, FallbackChoice, SeverPolicyV1};

/// Initialize the tracing subscriber with JSON or pretty format
fn init_tracing() {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "severance_driver=info,severance_kernel=info".into());

    if log_format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_writer(io::stderr)
                    .with_target(true)
                    .with_current_span(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .flatten_event(true),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(io::stderr)
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .init();
    }
}

/// Read the fallback choice from `SEVER_FALLBACK`.
fn fallback_from_env() -> FallbackChoice {
    match std::env::var("SEVER_FALLBACK") {
        Ok(value) => FallbackChoice::from_str(&value).unwrap_or_else(|| {
            warn!(value = %value, "unknown SEVER_FALLBACK, using default");
            FallbackChoice::default()
        }),
        Err(_) => FallbackChoice::default(),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let policy = SeverPolicyV1::new(fallback_from_env());
    info!(
        version = env!("CARGO_PKG_VERSION"),
        policy = %policy.policy_id(),
        fallback = %policy.fallback,
        "Starting severance driver"
    );

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = BufWriter::new(io::stdout().lock());

    run(&mut input, &mut output, policy)?;

    Ok(())
}
