use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-unique identifier, used to correlate log events belonging to one request.
#[derive(PartialEq, Eq, Clone, Copy, Hash)]
pub struct UniqueId(u64);

impl Default for UniqueId {
    fn default() -> Self {
        Self::new()
    }
}

impl UniqueId {
    pub fn new() -> Self {
        static UNIQUE_COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(UNIQUE_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for UniqueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for UniqueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UniqueId({})", self.0)
    }
}
