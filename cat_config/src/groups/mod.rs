pub mod fetch;
pub mod log;
