//! Diagnostics for the station.
//!
//! Stdout belongs to the operator (prompts, confirmations, audit verdicts),
//! so every tracing event goes to stderr. `--log-format json` switches the
//! stderr stream to one JSON object per event for anything collecting
//! station logs.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    /// `"json"` in any case selects [`LogFormat::Json`]; anything else falls
    /// back to [`LogFormat::Pretty`] rather than refusing to start.
    pub fn from_str_lossy(s: &str) -> Self {
        if s.eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

/// Install the process-wide subscriber. Panics if one is already set, so
/// `main` calls it once before any subcommand runs.
///
/// `directives` applies only when `RUST_LOG` is unset or unparsable; e.g.
/// `RUST_LOG=rollcall_ledger=debug` shows every append and export.
pub fn init_logging(directives: &str, format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Pretty => registry
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr).with_target(true))
            .init(),
    }

    tracing::debug!(?format, "station logging ready");
}
