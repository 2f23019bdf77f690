use std::fmt;
use std::path::{Path, PathBuf};

use tracing::warn;
use url::Url;

use crate::error::{Result, SourceClientError};

/// Separator whose presence marks an input as a remote address rather than a local path.
pub const SCHEME_SEPARATOR: &str = "://";

/// The HTTP client a remote source is fetched with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transport {
    /// Plain HTTP.
    Plain,
    /// HTTPS only; the client refuses to talk to non-TLS endpoints.
    Secure,
}

/// What to do with a URL whose scheme is neither `http` nor `https`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemePolicy {
    /// Reject the input with `SourceClientError::UnsupportedScheme`.
    #[default]
    Reject,
    /// Fetch it with the plain transport anyway.
    FallbackToPlain,
}

impl SchemePolicy {
    pub fn from_allow_unsupported(allow: bool) -> Self {
        if allow { Self::FallbackToPlain } else { Self::Reject }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    Local(PathBuf),
    Remote { url: Url, transport: Transport },
}

/// A classified input: the identifier as given, plus where its content lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    input: String,
    kind: SourceKind,
}

impl Source {
    /// Classifies a single input identifier.
    ///
    /// Inputs without `"://"` are local paths.  Everything else is parsed as a URL and routed by scheme.
    pub fn classify(input: &str, scheme_policy: SchemePolicy) -> Result<Self> {
        if input.is_empty() {
            return Err(SourceClientError::EmptyInput);
        }

        if !input.contains(SCHEME_SEPARATOR) {
            return Ok(Self {
                input: input.to_owned(),
                kind: SourceKind::Local(PathBuf::from(input)),
            });
        }

        let url = Url::parse(input).map_err(|source| SourceClientError::InvalidUrl {
            input: input.to_owned(),
            source,
        })?;

        let transport = match url.scheme() {
            "https" => Transport::Secure,
            "http" => Transport::Plain,
            scheme => match scheme_policy {
                SchemePolicy::FallbackToPlain => {
                    warn!(input, scheme, "Unsupported URL scheme, falling back to plain HTTP transport");
                    Transport::Plain
                },
                SchemePolicy::Reject => {
                    return Err(SourceClientError::UnsupportedScheme {
                        input: input.to_owned(),
                        scheme: scheme.to_owned(),
                    });
                },
            },
        };

        Ok(Self {
            input: input.to_owned(),
            kind: SourceKind::Remote { url, transport },
        })
    }

    /// Classifies every input in order, stopping at the first one that is rejected.
    pub fn classify_all<S: AsRef<str>>(inputs: &[S], scheme_policy: SchemePolicy) -> Result<Vec<Self>> {
        inputs.iter().map(|i| Self::classify(i.as_ref(), scheme_policy)).collect()
    }

    /// The identifier exactly as supplied by the caller.
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn kind(&self) -> &SourceKind {
        &self.kind
    }

    pub fn is_remote(&self) -> bool {
        matches!(self.kind, SourceKind::Remote { .. })
    }

    pub fn local_path(&self) -> Option<&Path> {
        match &self.kind {
            SourceKind::Local(path) => Some(path),
            SourceKind::Remote { .. } => None,
        }
    }

    pub fn transport(&self) -> Option<Transport> {
        match &self.kind {
            SourceKind::Local(_) => None,
            SourceKind::Remote { transport, .. } => Some(*transport),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.input)
    }
}
