//! Logging setup
//!
//! Logs always go to stderr; stdout may carry G-code.

use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Selects `json`, `pretty` or the default compact format
pub const LOG_FORMAT_ENV: &str = "ESTIMATE_LOG_FORMAT";

/// Initialize the global subscriber
///
/// `RUST_LOG` wins when set; otherwise `estimate=info`, or `estimate=debug`
/// with `--verbose`.
pub fn init_logging(verbose: bool) -> Result<()> {
    let log_format = std::env::var(LOG_FORMAT_ENV).unwrap_or_else(|_| "compact".to_string());

    let default_directive = if verbose {
        "estimate=debug"
    } else {
        "estimate=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_directive))?;

    let registry = tracing_subscriber::registry().with(env_filter);

    match log_format.as_str() {
        "json" => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?,
        "pretty" => registry
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init()?,
        _ => registry
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .try_init()?,
    }

    Ok(())
}
