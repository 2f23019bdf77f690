use std::sync::Arc;

use bytes::Bytes;
use cat_config::{FetchConfig, cat_config};
use source_client::{INFORMATION_LOG_LEVEL, SchemePolicy, Source, SourceClient};
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, event, info, instrument, warn};
use utils::UniqueId;

use crate::error::{ConcatError, ErrorState, Result};
use crate::fetch_limiter::FetchLimiter;
use crate::slots::SlotTable;

/// Concatenates the contents of an ordered list of local paths and URLs.
///
/// Every input is fetched concurrently as its own task; the results are placed into slots by original
/// position and merged once all of them have arrived.  The first failure ends the request.  Fetches that are
/// still running at that point are left to finish on their own and their results are discarded.
#[derive(Clone)]
pub struct Concatenator {
    client: Arc<dyn SourceClient>,
    config: Arc<FetchConfig>,
}

impl Concatenator {
    pub fn new(client: &Arc<dyn SourceClient>) -> Self {
        Self {
            client: client.clone(),
            config: Arc::new(cat_config().fetch.clone()),
        }
    }

    pub fn with_config(self, config: impl AsRef<FetchConfig>) -> Self {
        Self {
            config: Arc::new(config.as_ref().clone()),
            ..self
        }
    }

    /// Caps the number of fetches in flight at once; 0 removes the cap.
    pub fn with_max_concurrent_fetches(self, max_concurrent_fetches: usize) -> Self {
        let mut config = (*self.config).clone();
        config.max_concurrent_fetches = max_concurrent_fetches;
        Self {
            config: Arc::new(config),
            ..self
        }
    }

    fn scheme_policy(&self) -> SchemePolicy {
        SchemePolicy::from_allow_unsupported(self.config.allow_unsupported_schemes)
    }

    /// Fetches every input and returns their contents joined in input order, or the first error observed.
    ///
    /// All inputs are classified before anything is fetched, so an unusable identifier fails the request
    /// without starting any retrieval.  An empty input list yields an empty buffer.
    #[instrument(skip_all, name = "Concatenator::run", fields(n_inputs = inputs.len()))]
    pub async fn run<S: AsRef<str>>(&self, inputs: &[S]) -> Result<Bytes> {
        let call_id = UniqueId::new().as_u64();

        let sources = Source::classify_all(inputs, self.scheme_policy())?;
        if sources.is_empty() {
            debug!(call_id, "No inputs; returning empty buffer");
            return Ok(Bytes::new());
        }

        let count = sources.len();
        let limiter = FetchLimiter::new(self.config.max_concurrent_fetches);
        let error_state = Arc::new(ErrorState::new());
        let mut slots = SlotTable::new(count);
        let mut running_fetches = JoinSet::<Result<(usize, Bytes)>>::new();

        event!(INFORMATION_LOG_LEVEL, call_id, count, limit = ?limiter.limit(), "Dispatching fetches");

        for (index, source) in sources.into_iter().enumerate() {
            let client = self.client.clone();
            let limiter = limiter.clone();
            let error_state = error_state.clone();

            debug!(call_id, index, input = source.input(), remote = source.is_remote(), "Spawning fetch task");

            running_fetches.spawn(async move {
                let permit = limiter.acquire().await?;

                // A fetch that was queued behind the limit when the request failed is never started.
                if permit.waited() {
                    error_state.check()?;
                }

                let result = client.fetch(&source).await.map_err(ConcatError::from);
                if let Err(e) = &result {
                    error_state.set(e.clone());
                }
                drop(permit);

                result.map(|data| (index, data))
            });
        }

        while let Some(joined) = running_fetches.join_next().await {
            match joined.map_err(ConcatError::from).and_then(|r| r) {
                Ok((index, data)) => {
                    event!(INFORMATION_LOG_LEVEL, call_id, index, len = data.len(), "Fetch completed");
                    slots.fill(index, data)?;
                },
                Err(e) => {
                    // The task that failed first recorded its error before releasing its permit.
                    error_state.set(e);
                    let err = match error_state.check() {
                        Err(first) => first,
                        Ok(()) => ConcatError::InternalError("Fetch failed without a recorded error".to_string()),
                    };

                    warn!(call_id, error = %err, pending = running_fetches.len(), "Fetch failed; abandoning request");
                    running_fetches.detach_all();
                    return Err(err);
                },
            }
        }

        let merged = slots.merge()?;
        info!(call_id, count, len = merged.len(), "Concatenation complete");

        Ok(merged)
    }

    /// Starts a concatenation in the background and returns immediately.
    ///
    /// `callback` receives either the merged buffer or the first error, and is invoked exactly once.
    pub fn concatenate<F>(&self, inputs: Vec<String>, callback: F) -> JoinHandle<()>
    where
        F: FnOnce(Result<Bytes>) + Send + 'static,
    {
        let this = self.clone();
        tokio::spawn(async move {
            let result = this.run(&inputs).await;
            callback(result);
        })
    }
}
