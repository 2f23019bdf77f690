use bytes::Bytes;

use crate::error::Result;
use crate::source::Source;

/// Retrieves the full content of a classified source.
///
/// Implementations must not block the calling task while waiting on I/O; many fetches are expected to be
/// in flight at once.
#[async_trait::async_trait]
pub trait SourceClient: Send + Sync {
    async fn fetch(&self, source: &Source) -> Result<Bytes>;
}
