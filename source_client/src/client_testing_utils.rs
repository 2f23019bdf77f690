use std::collections::HashMap;
use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use bytes::Bytes;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::error::{Result, SourceClientError};
use crate::interface::SourceClient;
use crate::source::Source;

#[derive(Clone, Debug)]
enum ScriptedOutcome {
    Content(Bytes),
    Failure(String),
}

#[derive(Clone, Debug)]
struct ScriptedFetch {
    outcome: ScriptedOutcome,
    delay: Duration,
}

/// A `SourceClient` whose answers are scripted per input identifier.
///
/// Each input resolves after its own delay, which lets tests force any completion order.  Inputs that were
/// never scripted fail like a missing local file.
#[derive(Default)]
pub struct MockSourceClient {
    scripted: HashMap<String, ScriptedFetch>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    started: AtomicUsize,
    completed: AtomicUsize,
}

impl MockSourceClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(mut self, input: &str, content: impl Into<Bytes>, delay: Duration) -> Self {
        self.scripted.insert(
            input.to_owned(),
            ScriptedFetch {
                outcome: ScriptedOutcome::Content(content.into()),
                delay,
            },
        );
        self
    }

    /// The fetch fails with the message `"<input>: <message>"`.
    pub fn with_failure(mut self, input: &str, message: &str, delay: Duration) -> Self {
        self.scripted.insert(
            input.to_owned(),
            ScriptedFetch {
                outcome: ScriptedOutcome::Failure(message.to_owned()),
                delay,
            },
        );
        self
    }

    /// The largest number of fetches that were running at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn started_count(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    /// Number of fetches that ran to the end, successfully or not.
    pub fn completed_count(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl SourceClient for MockSourceClient {
    async fn fetch(&self, source: &Source) -> Result<Bytes> {
        self.started.fetch_add(1, Ordering::SeqCst);
        let now_in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now_in_flight, Ordering::SeqCst);

        let scripted = self.scripted.get(source.input()).cloned();

        let result = match scripted {
            Some(ScriptedFetch { outcome, delay }) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                match outcome {
                    ScriptedOutcome::Content(data) => Ok(data),
                    ScriptedOutcome::Failure(message) => {
                        Err(SourceClientError::local_read(source.input(), io::Error::other(message)))
                    },
                }
            },
            None => Err(SourceClientError::local_read(
                source.input(),
                io::Error::new(io::ErrorKind::NotFound, "no such file"),
            )),
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.completed.fetch_add(1, Ordering::SeqCst);
        result
    }
}

/// Creates or overwrites a file with `size` bytes of deterministic random data and returns the data written.
/// Panics on any I/O error; intended for test-only use.
pub fn create_random_file(path: impl AsRef<Path>, size: usize, seed: u64) -> Vec<u8> {
    let path = path.as_ref();
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).unwrap();
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut buffer = vec![0_u8; size];
    rng.fill_bytes(&mut buffer);

    std::fs::write(path, &buffer).unwrap();
    buffer
}
