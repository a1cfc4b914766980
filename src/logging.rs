//! Structured logging setup

use std::env;
use std::io;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
  Pretty,
  Compact,
  Json,
}

impl LogFormat {
  /// Unknown values fall back to pretty output
  pub fn parse(value: &str) -> Self {
    match value.trim().to_lowercase().as_str() {
      "json" => LogFormat::Json,
      "compact" => LogFormat::Compact,
      _ => LogFormat::Pretty,
    }
  }
}

/// Install the global subscriber. `RUST_LOG` overrides the default `info`
/// level. Calling this twice returns an error from the second call.
pub fn init(format: LogFormat) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
  let filter = env::var("RUST_LOG")
    .map_or_else(|_| EnvFilter::new("info"), EnvFilter::new)
    .add_directive(
      "sqlx=warn"
        .parse()
        .unwrap_or_else(|_| tracing::Level::WARN.into()),
    );

  let registry = tracing_subscriber::registry().with(filter);

  match format {
    LogFormat::Json => registry
      .with(fmt::layer().json().with_target(true).with_writer(io::stdout))
      .try_init()?,
    LogFormat::Pretty => registry
      .with(fmt::layer().with_target(true).with_writer(io::stdout))
      .try_init()?,
    LogFormat::Compact => registry
      .with(fmt::layer().compact().with_target(false).with_writer(io::stdout))
      .try_init()?,
  }

  Ok(())
}
