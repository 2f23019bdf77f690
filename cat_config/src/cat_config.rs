use crate::groups;

lazy_static::lazy_static! {
    static ref CAT_CONFIG: CatConfig = CatConfig::new();
}

/// The process-wide configuration, read from the environment on first use.
pub fn cat_config() -> &'static CatConfig {
    &CAT_CONFIG
}

/// Primary configuration struct containing all config sections
#[derive(Debug, Clone, Default)]
pub struct CatConfig {
    pub fetch: groups::fetch::ConfigValues,
    pub log: groups::log::ConfigValues,
}

impl CatConfig {
    /// Create a new CatConfig instance with default values and apply environment variable overrides.
    /// This is equivalent to `CatConfig::default().with_env_overrides()`.
    pub fn new() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply environment variable overrides to all configuration sections.
    /// Environment variables follow the pattern: CATFILES_{GROUP_NAME}_{FIELD_NAME}
    pub fn with_env_overrides(mut self) -> Self {
        self.fetch.apply_env_overrides();
        self.log.apply_env_overrides();
        self
    }
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    use super::*;
    use crate::{HttpStatusPolicy, LogFormat};

    #[test]
    fn test_defaults() {
        let config = CatConfig::default();
        assert_eq!(config.fetch.max_concurrent_fetches, 0);
        assert_eq!(config.fetch.http_error_status_policy, HttpStatusPolicy::Content);
        assert!(!config.fetch.allow_unsupported_schemes);
        assert!(config.fetch.user_agent.starts_with("catfiles/"));
        assert_eq!(config.log.level, "warn");
        assert_eq!(config.log.format, LogFormat::Compact);
    }

    // The only test in this crate that touches the process environment.
    #[test]
    #[traced_test]
    fn test_env_overrides() {
        unsafe {
            std::env::set_var("CATFILES_FETCH_MAX_CONCURRENT_FETCHES", "3");
            std::env::set_var("CATFILES_FETCH_HTTP_ERROR_STATUS_POLICY", "error");
            std::env::set_var("CATFILES_LOG_FORMAT", "json");
            std::env::set_var("CATFILES_FETCH_ALLOW_UNSUPPORTED_SCHEMES", "not-a-bool");
        }

        let config = CatConfig::default().with_env_overrides();

        unsafe {
            std::env::remove_var("CATFILES_FETCH_MAX_CONCURRENT_FETCHES");
            std::env::remove_var("CATFILES_FETCH_HTTP_ERROR_STATUS_POLICY");
            std::env::remove_var("CATFILES_LOG_FORMAT");
            std::env::remove_var("CATFILES_FETCH_ALLOW_UNSUPPORTED_SCHEMES");
        }

        assert_eq!(config.fetch.max_concurrent_fetches, 3);
        assert_eq!(config.fetch.http_error_status_policy, HttpStatusPolicy::Error);
        assert_eq!(config.log.format, LogFormat::Json);
        assert!(!config.fetch.allow_unsupported_schemes);
        assert!(logs_contain("CATFILES_FETCH_ALLOW_UNSUPPORTED_SCHEMES could not be parsed"));
        assert_eq!(config.log.level, "warn");
    }
}
