use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use bytes::{Bytes, BytesMut};
use cat_config::{FetchConfig, HttpStatusPolicy};
use reqwest::{Client, Url};
use tracing::{event, instrument, warn};

use crate::INFORMATION_LOG_LEVEL;
use crate::error::{Result, SourceClientError};
use crate::http_client::build_http_client;
use crate::source::Transport;

static FN_CALL_ID: AtomicU64 = AtomicU64::new(1);

/// Upper bound on the buffer reserved up front from a response's Content-Length.
const MAX_BODY_PREALLOCATION: u64 = 64 * 1024 * 1024;

/// Fetches remote inputs over HTTP or HTTPS.
///
/// One reqwest client is kept per transport so that connections are pooled across fetches.
pub struct RemoteClient {
    plain_http_client: Client,
    secure_http_client: Client,
    status_policy: HttpStatusPolicy,
}

impl RemoteClient {
    pub fn new(user_agent: &str, status_policy: HttpStatusPolicy) -> Result<Arc<Self>> {
        Ok(Arc::new(Self {
            plain_http_client: build_http_client(Transport::Plain, user_agent)?,
            secure_http_client: build_http_client(Transport::Secure, user_agent)?,
            status_policy,
        }))
    }

    pub fn from_config(config: &FetchConfig) -> Result<Arc<Self>> {
        Self::new(&config.user_agent, config.http_error_status_policy)
    }

    fn http_client(&self, transport: Transport) -> &Client {
        match transport {
            Transport::Plain => &self.plain_http_client,
            Transport::Secure => &self.secure_http_client,
        }
    }

    /// Issues a GET for `url` and accumulates the body as it streams in.
    ///
    /// `display_url` is the identifier used in error messages; it is the input as the user wrote it.
    #[instrument(skip_all, name = "RemoteClient::get", fields(url = display_url, ?transport))]
    pub async fn get(&self, url: &Url, transport: Transport, display_url: &str) -> Result<Bytes> {
        let call_id = FN_CALL_ID.fetch_add(1, Ordering::Relaxed);
        event!(INFORMATION_LOG_LEVEL, call_id, url = display_url, "Starting remote GET");

        let response = self
            .http_client(transport)
            .get(url.clone())
            .send()
            .await
            .map_err(|e| SourceClientError::remote_transport(display_url, e))?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            match self.status_policy {
                HttpStatusPolicy::Error => {
                    warn!(call_id, url = display_url, %status, "Remote GET returned an error status");
                    return Err(SourceClientError::RemoteStatusError {
                        url: display_url.to_owned(),
                        status,
                    });
                },
                HttpStatusPolicy::Content => {
                    warn!(call_id, url = display_url, %status, "Remote GET returned an error status; keeping body as content");
                },
            }
        }

        let initial_capacity = response.content_length().unwrap_or(0).min(MAX_BODY_PREALLOCATION) as usize;
        let mut body = BytesMut::with_capacity(initial_capacity);
        let mut response = response;
        let mut n_chunks = 0usize;

        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| SourceClientError::remote_transport(display_url, e))?
        {
            body.extend_from_slice(&chunk);
            n_chunks += 1;
        }

        event!(
            INFORMATION_LOG_LEVEL,
            call_id,
            url = display_url,
            %status,
            len = body.len(),
            n_chunks,
            "Completed remote GET"
        );

        Ok(body.freeze())
    }
}
