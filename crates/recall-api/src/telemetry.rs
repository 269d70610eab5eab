//! Tracing subscriber initialization.
//!
//! `RUST_LOG` takes precedence when set; otherwise the verbosity flags pick
//! the filter.

use anyhow::Context;
use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

/// Output format of the fmt layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Filter directive for the given verbosity flags.
pub fn filter_directive(verbose: u8, quiet: bool) -> &'static str {
    match verbose {
        0 if quiet => "error",
        0 => "warn,recall_api=info,recall_infra=info",
        1 => "info,recall_api=debug,recall_core=debug,recall_infra=debug,tower_http=debug",
        _ => "trace",
    }
}

/// Install the global subscriber.
pub fn init_tracing(verbose: u8, quiet: bool, format: LogFormat) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(verbose, quiet)));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Text => builder.with_target(false).try_init(),
        LogFormat::Json => builder.json().with_current_span(true).try_init(),
    }
    .map_err(|e| anyhow::anyhow!(e))
    .context("Failed to install tracing subscriber")
}
