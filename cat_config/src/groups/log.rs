use crate::LogFormat;

crate::config_group!({

    /// The default log filter, used when RUST_LOG is not set.
    ///
    /// The default value is "warn".
    ///
    /// Use the environment variable `CATFILES_LOG_LEVEL` to set this value.
    ref level: String = "warn".to_string();

    /// The log output format, either "compact" or "json".  Logs are always written to stderr.
    ///
    /// The default value is "compact".
    ///
    /// Use the environment variable `CATFILES_LOG_FORMAT` to set this value.
    ref format: LogFormat = LogFormat::Compact;
});
