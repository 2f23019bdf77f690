//! Local HTTP test server
//!
//! `LocalTestServer` serves a set of registered resources over plain HTTP on an ephemeral localhost port.
//! Each resource has a body, a status code, an optional delay before the response starts, and an optional
//! chunk size that makes the body arrive as a stream of separate frames.
//!
//! # Example
//!
//! ```no_run
//! use source_client::local_server::{LocalTestServer, TestResource};
//!
//! # async fn demo() {
//! let server = LocalTestServer::start().await;
//! server.add("remote.txt", TestResource::new("CD"));
//! let url = server.url("remote.txt"); // e.g. "http://127.0.0.1:41234/remote.txt"
//! # }
//! ```

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use bytes::Bytes;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::debug;

/// A resource served by `LocalTestServer`.
#[derive(Clone, Debug)]
pub struct TestResource {
    body: Bytes,
    status: StatusCode,
    delay: Duration,
    chunk_size: Option<usize>,
}

impl TestResource {
    pub fn new(body: impl Into<Bytes>) -> Self {
        Self {
            body: body.into(),
            status: StatusCode::OK,
            delay: Duration::ZERO,
            chunk_size: None,
        }
    }

    pub fn with_status(self, status: StatusCode) -> Self {
        Self { status, ..self }
    }

    /// Waits this long before sending the response headers.
    pub fn with_delay(self, delay: Duration) -> Self {
        Self { delay, ..self }
    }

    /// Streams the body in frames of at most `chunk_size` bytes.
    pub fn with_chunk_size(self, chunk_size: usize) -> Self {
        Self {
            chunk_size: Some(chunk_size.max(1)),
            ..self
        }
    }
}

#[derive(Default)]
struct ServerState {
    resources: RwLock<HashMap<String, TestResource>>,
    request_count: AtomicUsize,
}

async fn serve_resource(State(state): State<Arc<ServerState>>, Path(path): Path<String>) -> Response {
    state.request_count.fetch_add(1, Ordering::Relaxed);

    let resource = state
        .resources
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&path)
        .cloned();

    let Some(resource) = resource else {
        debug!(path, "No resource registered");
        return StatusCode::NOT_FOUND.into_response();
    };

    if !resource.delay.is_zero() {
        tokio::time::sleep(resource.delay).await;
    }

    let body = match resource.chunk_size {
        Some(chunk_size) => {
            let frames: Vec<Result<Bytes, std::io::Error>> = resource
                .body
                .chunks(chunk_size)
                .map(|c| Ok(Bytes::copy_from_slice(c)))
                .collect();
            Body::from_stream(futures::stream::iter(frames))
        },
        None => Body::from(resource.body),
    };

    (resource.status, body).into_response()
}

/// A test server running as a spawned tokio task; it shuts down when dropped.
pub struct LocalTestServer {
    endpoint: String,
    state: Arc<ServerState>,
    server_shutdown_tx: Option<oneshot::Sender<()>>,
}

impl LocalTestServer {
    /// Starts a server on a randomly assigned available port on localhost.
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr: SocketAddr = listener.local_addr().unwrap();
        let endpoint = format!("http://{addr}");

        let state = Arc::new(ServerState::default());
        let router = Router::new()
            .route("/{*path}", get(serve_resource))
            .with_state(state.clone());

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            let _ = axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await;
        });

        tracing::info!("Local test server listening on {}", endpoint);

        Self {
            endpoint,
            state,
            server_shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Registers (or replaces) the resource served at `/{path}`.
    pub fn add(&self, path: &str, resource: TestResource) {
        self.state
            .resources
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.trim_start_matches('/').to_owned(), resource);
    }


    /// Returns the full URL of the resource at `path`.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.endpoint, path.trim_start_matches('/'))
    }

    /// Number of requests received so far, including ones for unregistered paths.
    pub fn request_count(&self) -> usize {
        self.state.request_count.load(Ordering::Relaxed)
    }
}

impl Drop for LocalTestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.server_shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_serves_registered_resources() {
        let server = LocalTestServer::start().await;
        server.add("/nested/a.txt", TestResource::new("hello"));

        let response = reqwest::get(server.url("nested/a.txt")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.bytes().await.unwrap(), Bytes::from_static(b"hello"));

        let response = reqwest::get(server.url("missing")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        assert_eq!(server.request_count(), 2);
    }
}
