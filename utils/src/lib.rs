pub mod configuration_utils;
pub use configuration_utils::ParsableConfigValue;

mod unique_id;
pub use unique_id::UniqueId;
