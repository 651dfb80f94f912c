//! # Structured Logging
//!
//! The library itself only emits `tracing` events: `debug` when it signs,
//! estimates or generates a transaction, `warn` when a decode fails. Keys
//! never appear in any event.
//!
//! Binaries and test harnesses that embed the SDK can call [`init_logging`]
//! to get a subscriber. Output goes to stderr so stdout stays free for
//! transaction bytes or JSON piped elsewhere.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::Error;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable output for local development.
    Pretty,
    /// JSON lines for log aggregation.
    Json,
}

impl LogFormat {
    /// Accepts "json" or "pretty" (case-insensitive). Anything else is
    /// `Pretty`.
    pub fn from_str_lossy(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Installs the global tracing subscriber.
///
/// `default_level` applies when `RUST_LOG` is unset, e.g. `"info"` or
/// `"nova_sdk=debug"`. `RUST_LOG` takes the usual `EnvFilter` directives:
///
/// ```text
/// RUST_LOG=nova_sdk=debug
/// ```
///
/// A second call returns [`Error::Logging`] instead of panicking, so tests
/// can call it freely.
pub fn init_logging(default_level: &str, format: LogFormat) -> Result<(), Error> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let installed = match format {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .try_init(),
    };
    installed.map_err(|e| Error::Logging(e.to_string()))?;

    tracing::info!("logging initialized (format={:?})", format);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_parsing() {
        assert_eq!(LogFormat::from_str_lossy("json"), LogFormat::Json);
        assert_eq!(LogFormat::from_str_lossy("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::from_str_lossy("pretty"), LogFormat::Pretty);
        assert_eq!(LogFormat::from_str_lossy("anything"), LogFormat::Pretty);
    }

    #[test]
    fn second_init_is_an_error_not_a_panic() {
        // The first call may or may not win, depending on test order.
        let _ = init_logging("warn", LogFormat::Pretty);
        assert!(matches!(
            init_logging("warn", LogFormat::Json),
            Err(Error::Logging(_))
        ));
    }
}
