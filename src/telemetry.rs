//! Tracing/logging initialization.
//!
//! Everything goes to stderr so the menu on stdout stays readable.

use crate::config::{Config, LogFormat};
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

const FALLBACK_FILTER: &str = "warn";

/// Initialize tracing for the process.
///
/// `RUST_LOG` wins over the configured level when set. An unparsable
/// configured level falls back to `warn` and is reported once logging is up.
/// Safe to call more than once; later calls are no-ops.
pub fn init(config: &Config) {
    let mut rejected = None;
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match configured_filter(&config.log_level) {
            Ok(filter) => filter,
            Err(err) => {
                rejected = Some(err);
                EnvFilter::new(FALLBACK_FILTER)
            }
        },
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = match config.log_format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };

    if let Some(err) = rejected {
        tracing::warn!(
            filter = %config.log_level,
            error = %err,
            fallback = FALLBACK_FILTER,
            "invalid log filter rejected"
        );
    }
}

/// Parse the `--log-level` / `BRAYMATCH_LOG` value
pub fn configured_filter(level: &str) -> Result<EnvFilter, ParseError> {
    EnvFilter::try_new(level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_filter() {
        assert!(configured_filter("info").is_ok());
        assert!(configured_filter("braymatch=debug,warn").is_ok());
        assert!(configured_filter("braymatch=loudest").is_err());
    }
}
