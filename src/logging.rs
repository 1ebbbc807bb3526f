//! Logging setup using `tracing` + `tracing-subscriber`.
//!
//! The filter comes from, in order:
//! 1. the `--log-level` flag,
//! 2. the `MINMIN_LOG` environment variable, either a bare level
//!    (`debug`) or `EnvFilter` directives (`minmin_schedule::scheduler=trace`),
//! 3. `info`.
//!
//! Output goes to stderr; stdout is reserved for JSON documents.

use anyhow::Result;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::LogLevel;

pub const LOG_ENV_VAR: &str = "MINMIN_LOG";

const DEFAULT_DIRECTIVES: &str = "info";

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

/// Installs the global subscriber. Call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env = std::env::var(LOG_ENV_VAR).ok();
    let filter = EnvFilter::try_new(filter_directives(cli_level, env.as_deref()))?;

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))?;

    Ok(())
}

/// Filter directives for the given flag and environment value.
///
/// Unparseable environment values fall back to the default.
fn filter_directives(cli_level: Option<LogLevel>, env: Option<&str>) -> String {
    if let Some(level) = cli_level {
        return LevelFilter::from(level).to_string();
    }
    let Some(raw) = env.map(str::trim).filter(|s| !s.is_empty()) else {
        return DEFAULT_DIRECTIVES.to_string();
    };
    if let Ok(level) = raw.parse::<LogLevel>() {
        return LevelFilter::from(level).to_string();
    }
    if raw.contains('=') && EnvFilter::try_new(raw).is_ok() {
        return raw.to_string();
    }
    DEFAULT_DIRECTIVES.to_string()
}
