use reqwest::StatusCode;
use thiserror::Error;

/// Errors produced while classifying or retrieving a single input.
///
/// Every message starts with the offending identifier, exactly as the user supplied it.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum SourceClientError {
    #[error("{path}: {source}")]
    LocalReadError { path: String, source: std::io::Error },

    #[error("{url}: {}", display_chain(.source))]
    RemoteTransportError { url: String, source: reqwest::Error },

    #[error("{url}: HTTP status {status}")]
    RemoteStatusError { url: String, status: StatusCode },

    #[error("{input}: unsupported URL scheme \"{scheme}\"")]
    UnsupportedScheme { input: String, scheme: String },

    #[error("{input}: invalid URL: {source}")]
    InvalidUrl { input: String, source: url::ParseError },

    #[error("empty input identifier")]
    EmptyInput,

    #[error("HTTP client configuration error: {}", display_chain(.0))]
    ClientBuildError(reqwest::Error),
}

pub type Result<T> = std::result::Result<T, SourceClientError>;

impl SourceClientError {
    pub fn local_read(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::LocalReadError {
            path: path.into(),
            source,
        }
    }

    /// The url is already the prefix of the message, so it is stripped from the reqwest error.
    pub fn remote_transport(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::RemoteTransportError {
            url: url.into(),
            source: source.without_url(),
        }
    }
}

/// Formats an error followed by each of its causes, separated by ": ".
///
/// reqwest and hyper keep the actual failure (connection refused, DNS lookup, TLS) in the source chain only.
fn display_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut message = error.to_string();
    let mut cause = error.source();
    while let Some(err) = cause {
        let text = err.to_string();
        if !message.ends_with(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        cause = err.source();
    }
    message
}
