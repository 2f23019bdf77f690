/// Macro to create a configuration value group struct.
///
/// Usage:
/// ```ignore
/// mod fetch {
///     cat_config::config_group!({
///         ref max_items: usize = 42;
///         ref label: String = "default".to_string();
///     });
/// }
/// ```
///
/// This creates a `ConfigValueGroup` struct with the specified fields, a `Default` implementation holding the
/// declared values, and `apply_env_overrides()`, which reads `CATFILES_{GROUP}_{FIELD}` for every field.  The
/// group name is the last segment of the module path the macro is invoked in.
#[macro_export]
macro_rules! config_group {
    ({
        $(
            $(#[$meta:meta])*
            ref $name:ident : $type:ty = $value:expr;
        )+
    }) => {
        #[allow(unused_imports)]
        use $crate::ParsableConfigValue;

        /// ConfigValueGroup struct containing all configurable values
        #[derive(Debug, Clone)]
        pub struct ConfigValueGroup {
            $(
                $(#[$meta])*
                #[allow(non_snake_case)]
                pub $name: $type,
            )+
        }

        impl Default for ConfigValueGroup {
            /// Create a new instance with default values only (no environment variable overrides).
            fn default() -> Self {
                Self {
                    $(
                        $name: {
                            let v: $type = $value;
                            v
                        },
                    )+
                }
            }
        }

        impl AsRef<ConfigValueGroup> for ConfigValueGroup {
            fn as_ref(&self) -> &ConfigValueGroup {
                self
            }
        }

        impl ConfigValueGroup {
            /// Create a new instance with default values only (no environment variable overrides).
            pub fn new() -> Self {
                Self::default()
            }

            /// Apply environment variable overrides to this configuration group.
            ///
            /// For example, in module `cat_config::groups::fetch`, the env var for `max_concurrent_fetches`
            /// is `CATFILES_FETCH_MAX_CONCURRENT_FETCHES`.
            pub fn apply_env_overrides(&mut self) {
                $(
                    {
                        const ENV_VAR_NAME: &str = const_str::concat!(
                            "CATFILES_",
                            const_str::convert_ascii_case!(upper, konst::string::rsplit_once(module_path!(), "::").unwrap().1),
                            "_",
                            const_str::convert_ascii_case!(upper, stringify!($name)));

                        let maybe_env_value = std::env::var(ENV_VAR_NAME).ok();
                        let default_value: $type = $value;
                        self.$name = <$type>::parse(ENV_VAR_NAME, maybe_env_value, default_value);
                    }
                )+
            }
        }

        /// Type alias for easier reference in config aggregation
        pub(crate) type ConfigValues = ConfigValueGroup;
    };
}
