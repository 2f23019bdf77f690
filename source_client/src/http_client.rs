use reqwest::Client;

use crate::error::{Result, SourceClientError};
use crate::source::Transport;

/// Builds the reqwest client used for a transport.
///
/// Redirects follow reqwest's default policy. The secure client refuses plain-HTTP URLs, including redirect
/// targets.
pub fn build_http_client(transport: Transport, user_agent: &str) -> Result<Client> {
    let builder = Client::builder().user_agent(user_agent);

    let builder = match transport {
        Transport::Plain => builder,
        Transport::Secure => builder.https_only(true),
    };

    builder.build().map_err(SourceClientError::ClientBuildError)
}
