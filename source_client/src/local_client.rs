use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, event};

use crate::INFORMATION_LOG_LEVEL;
use crate::error::{Result, SourceClientError};

/// Reads inputs from the local filesystem.
#[derive(Debug, Default)]
pub struct LocalClient {}

impl LocalClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {})
    }

    /// Reads the whole file at `path`.
    ///
    /// Errors carry the path as displayed to the user, e.g. `"missing.txt: No such file or directory (os error 2)"`.
    pub async fn read_file(&self, path: &Path) -> Result<Bytes> {
        debug!(path = %path.display(), "Reading local file");

        let data = tokio::fs::read(path)
            .await
            .map_err(|e| SourceClientError::local_read(path.display().to_string(), e))?;

        event!(INFORMATION_LOG_LEVEL, path = %path.display(), len = data.len(), "Completed local file read");

        Ok(Bytes::from(data))
    }
}
