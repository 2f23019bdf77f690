pub mod macros;
mod cat_config;

pub mod groups;
mod log_format;
mod status_policy;

// Re-exported for use by the config_group macro
pub use utils::configuration_utils::ParsableConfigValue;
pub use cat_config::{CatConfig, cat_config};
pub use log_format::LogFormat;
pub use status_policy::HttpStatusPolicy;

pub type FetchConfig = groups::fetch::ConfigValues;
pub type LogConfig = groups::log::ConfigValues;
