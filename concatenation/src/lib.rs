mod concatenator;
mod error;
mod fetch_limiter;
mod slots;

pub use concatenator::Concatenator;
pub use error::{ConcatError, ErrorState, Result};
pub use fetch_limiter::{FetchLimiter, FetchPermit};
pub use slots::SlotTable;
