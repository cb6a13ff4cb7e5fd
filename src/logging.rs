//! Diagnostic output for the catlens binary and embedding applications.
//!
//! The library only emits `tracing` events. Nothing is printed until one of
//! the functions here installs a subscriber, which writes to stderr so the
//! analysis report on stdout stays clean.

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable that overrides the configured level or filter
pub const LOG_ENV_VAR: &str = "CATLENS_LOG";

/// Verbosity of catlens diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Error,
    /// Failed analyses only
    #[default]
    Warn,
    /// One line per analysis with the outcome
    Info,
    /// Adds model, endpoint and payload sizes
    Debug,
    /// Adds the raw response text
    Trace,
}

impl LogLevel {
    fn as_level(self) -> Level {
        match self {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }

    /// Filter directive enabling this level for catlens targets only.
    pub fn directive(self) -> String {
        format!("catlens={}", self.as_level())
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(format!("unknown log level `{other}`")),
        }
    }
}

/// Pick the directives to install: a usable `CATLENS_LOG` value wins,
/// anything else falls back to the level's own directive.
fn resolve_directives(level: LogLevel, env_value: Option<String>) -> String {
    env_value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty() && EnvFilter::try_new(value).is_ok())
        .unwrap_or_else(|| level.directive())
}

fn install(directives: &str) {
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(EnvFilter::new(directives))
        .init();
}

/// Install a stderr subscriber at `level`, unless `CATLENS_LOG` is set.
///
/// Must be called at most once per process.
///
/// ```no_run
/// use catlens::logging::{init_logging, LogLevel};
///
/// init_logging(LogLevel::Info);
/// ```
///
/// ```bash
/// CATLENS_LOG=catlens::backend=trace catlens cat.jpg
/// ```
pub fn init_logging(level: LogLevel) {
    let directives = resolve_directives(level, std::env::var(LOG_ENV_VAR).ok());
    install(&directives);
    tracing::debug!(%directives, "catlens logging initialized");
}

/// Install a stderr subscriber with explicit `EnvFilter` directives.
///
/// An unparseable filter is reported on stderr and replaced by the `warn`
/// default.
pub fn init_logging_with_filter(filter: &str) {
    let directives = if EnvFilter::try_new(filter).is_ok() {
        filter.to_string()
    } else {
        eprintln!("invalid log filter `{filter}`, using {}", LogLevel::default().directive());
        LogLevel::default().directive()
    };
    install(&directives);
    tracing::debug!(%directives, "catlens logging initialized");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!("INFO".parse::<LogLevel>(), Ok(LogLevel::Info));
        assert_eq!("warning".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_directive() {
        assert_eq!(LogLevel::Debug.directive(), "catlens=DEBUG");
    }

    #[test]
    fn test_env_override_wins() {
        assert_eq!(
            resolve_directives(LogLevel::Warn, Some("catlens::backend=trace".into())),
            "catlens::backend=trace"
        );
    }

    #[test]
    fn test_unusable_override_falls_back() {
        assert_eq!(resolve_directives(LogLevel::Info, None), "catlens=INFO");
        assert_eq!(resolve_directives(LogLevel::Info, Some("  ".into())), "catlens=INFO");
        assert_eq!(
            resolve_directives(LogLevel::Info, Some("catlens=loud".into())),
            "catlens=INFO"
        );
    }
}
