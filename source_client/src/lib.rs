pub use error::{Result, SourceClientError};
pub use http_client::build_http_client;
pub use interface::SourceClient;
pub use local_client::LocalClient;
pub use remote_client::RemoteClient;
pub use routing_client::RoutingClient;
pub use source::{SCHEME_SEPARATOR, SchemePolicy, Source, SourceKind, Transport};
use tracing::Level;

mod error;
mod http_client;
mod interface;
mod local_client;
pub mod local_server;
mod remote_client;
mod routing_client;
mod source;

pub mod client_testing_utils;

#[cfg(not(feature = "elevated_information_level"))]
pub const INFORMATION_LOG_LEVEL: Level = Level::DEBUG;

#[cfg(feature = "elevated_information_level")]
pub const INFORMATION_LOG_LEVEL: Level = Level::INFO;
