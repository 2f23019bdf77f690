use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::error::Result;

/// Caps the number of fetches of one request that run at the same time.  A limit of 0 means unbounded.
#[derive(Clone, Debug)]
pub struct FetchLimiter {
    semaphore: Option<Arc<Semaphore>>,
    limit: usize,
}

/// Admission to start one fetch.  Holds the semaphore permit, if any, until dropped.
#[derive(Debug)]
pub struct FetchPermit {
    _permit: Option<OwnedSemaphorePermit>,
    waited: bool,
}

impl FetchPermit {
    /// True if the fetch was queued behind the limit before being admitted.
    pub fn waited(&self) -> bool {
        self.waited
    }
}

impl FetchLimiter {
    pub fn new(limit: usize) -> Self {
        Self {
            semaphore: (limit > 0).then(|| Arc::new(Semaphore::new(limit))),
            limit,
        }
    }

    pub fn limit(&self) -> Option<usize> {
        self.semaphore.as_ref().map(|_| self.limit)
    }

    /// Waits for a slot.  The returned permit must be held for the duration of the fetch.
    pub async fn acquire(&self) -> Result<FetchPermit> {
        let Some(semaphore) = &self.semaphore else {
            return Ok(FetchPermit {
                _permit: None,
                waited: false,
            });
        };

        match semaphore.clone().try_acquire_owned() {
            Ok(permit) => Ok(FetchPermit {
                _permit: Some(permit),
                waited: false,
            }),
            Err(_) => Ok(FetchPermit {
                _permit: Some(semaphore.clone().acquire_owned().await?),
                waited: true,
            }),
        }
    }
}
