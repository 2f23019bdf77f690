use cat_config::{LogConfig, LogFormat};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

const FALLBACK_LOG_FILTER: &str = "warn";

/// Installs logging from the `log` group alone.
///
/// Call this before the global configuration is first read so that warnings about unparsable environment
/// values in the other groups reach the subscriber.
pub fn init_logging_from_env() -> bool {
    let mut config = LogConfig::default();
    config.apply_env_overrides();
    init_logging(&config)
}

/// Installs the global tracing subscriber.  Logs always go to stderr; stdout carries only data.
///
/// `RUST_LOG` takes precedence over `log.level`.  Returns false if a subscriber was already installed.
pub fn init_logging(config: &LogConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new(FALLBACK_LOG_FILTER));

    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
            .is_ok(),
        LogFormat::Compact => registry
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .try_init()
            .is_ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscriber_installed_once() {
        let _ = init_logging_from_env();
        assert!(!init_logging(&LogConfig::default()));
    }
}
