//! Logging setup for the binary.

use clap::ValueEnum;
use serde::Deserialize;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Default filter directives when `RUST_LOG` is not set.
pub const DEFAULT_DIRECTIVES: &str = "info,trackpack=debug";

/// How log lines are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogOutputFormat {
    /// One JSON object per event.
    Json,
    /// Human readable lines.
    #[default]
    Pretty,
}

/// Installs the global subscriber. `RUST_LOG` takes precedence over
/// `directives`. Logs go to stderr, leaving stdout for command output.
pub fn setup_logging(directives: &str, format: LogOutputFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));

    match format {
        LogOutputFormat::Json => {
            let main_layer = tracing_subscriber::fmt::layer()
                .json()
                .flatten_event(true)
                .with_target(false)
                .with_current_span(true)
                .with_span_list(true)
                .with_line_number(true)
                .with_file(true)
                .with_timer(UtcTime::rfc_3339())
                .with_writer(std::io::stderr);

            tracing_subscriber::registry().with(filter).with(main_layer).init()
        }
        LogOutputFormat::Pretty => {
            let main_layer = tracing_subscriber::fmt::layer()
                .compact()
                .with_target(true)
                .with_timer(UtcTime::rfc_3339())
                .with_writer(std::io::stderr);

            tracing_subscriber::registry().with(filter).with(main_layer).init()
        }
    }
}
