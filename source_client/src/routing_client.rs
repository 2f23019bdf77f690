use std::sync::Arc;

use bytes::Bytes;
use cat_config::FetchConfig;

use crate::error::Result;
use crate::interface::SourceClient;
use crate::local_client::LocalClient;
use crate::remote_client::RemoteClient;
use crate::source::{Source, SourceKind};

/// Sends local sources to a `LocalClient` and remote sources to a `RemoteClient`.
pub struct RoutingClient {
    local_client: Arc<LocalClient>,
    remote_client: Arc<RemoteClient>,
}

impl RoutingClient {
    pub fn new(local_client: Arc<LocalClient>, remote_client: Arc<RemoteClient>) -> Arc<Self> {
        Arc::new(Self {
            local_client,
            remote_client,
        })
    }

    pub fn from_config(config: &FetchConfig) -> Result<Arc<Self>> {
        Ok(Self::new(LocalClient::new(), RemoteClient::from_config(config)?))
    }
}

#[async_trait::async_trait]
impl SourceClient for RoutingClient {
    async fn fetch(&self, source: &Source) -> Result<Bytes> {
        match source.kind() {
            SourceKind::Local(path) => self.local_client.read_file(path).await,
            SourceKind::Remote { url, transport } => self.remote_client.get(url, *transport, source.input()).await,
        }
    }
}
