mod cat;
pub mod cli;
pub mod logging;

pub use cat::{cat, cat_with_config};
