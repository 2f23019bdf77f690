use std::sync::Arc;

use bytes::Bytes;
use cat_config::{FetchConfig, cat_config};
use concatenation::{ConcatError, Concatenator};
use source_client::{RoutingClient, SourceClient};
use tokio::task::JoinHandle;

/// Concatenates `inputs` using the process-wide configuration.
///
/// Returns immediately; `callback` is invoked exactly once with the merged bytes or the first error.
/// Must be called from within a tokio runtime.
pub fn cat<F>(inputs: Vec<String>, callback: F) -> JoinHandle<()>
where
    F: FnOnce(concatenation::Result<Bytes>) + Send + 'static,
{
    cat_with_config(inputs, &cat_config().fetch, callback)
}

/// Like [`cat`], with an explicit fetch configuration.
pub fn cat_with_config<F>(inputs: Vec<String>, config: &FetchConfig, callback: F) -> JoinHandle<()>
where
    F: FnOnce(concatenation::Result<Bytes>) + Send + 'static,
{
    match RoutingClient::from_config(config) {
        Ok(client) => {
            let client: Arc<dyn SourceClient> = client;
            Concatenator::new(&client).with_config(config).concatenate(inputs, callback)
        },
        Err(e) => {
            let err = ConcatError::from(e);
            tokio::spawn(async move { callback(Err(err)) })
        },
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use tempfile::TempDir;

    use super::*;

    #[tokio::test]
    async fn test_cat_invokes_callback_once() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        std::fs::write(&a, "AB").unwrap();
        std::fs::write(&b, "").unwrap();

        let results = Arc::new(Mutex::new(Vec::new()));
        let results_ = results.clone();
        let inputs = vec![a.to_str().unwrap().to_owned(), b.to_str().unwrap().to_owned()];
        cat_with_config(inputs, &FetchConfig::default(), move |r| results_.lock().unwrap().push(r))
            .await
            .unwrap();

        let results = results.lock().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].as_ref().unwrap(), &Bytes::from_static(b"AB"));
    }
}
