use std::fmt;
use std::str::FromStr;

use crate::ParsableConfigValue;

/// How a remote response carrying an HTTP error status (4xx/5xx) is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpStatusPolicy {
    /// The response body is merged like any other content.
    #[default]
    Content,
    /// The fetch fails with the status code.
    Error,
}

impl FromStr for HttpStatusPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "content" | "treat-as-content" => Ok(Self::Content),
            "error" | "treat-as-error" => Ok(Self::Error),
            other => Err(format!("unknown HTTP status policy {other:?}, expected \"content\" or \"error\"")),
        }
    }
}

impl fmt::Display for HttpStatusPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Content => write!(f, "content"),
            Self::Error => write!(f, "error"),
        }
    }
}

impl ParsableConfigValue for HttpStatusPolicy {
    fn parse_user_value(value: &str) -> Option<Self> {
        value.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_policy() {
        assert_eq!("content".parse::<HttpStatusPolicy>().unwrap(), HttpStatusPolicy::Content);
        assert_eq!("ERROR".parse::<HttpStatusPolicy>().unwrap(), HttpStatusPolicy::Error);
        assert!("strict".parse::<HttpStatusPolicy>().is_err());
        assert_eq!(
            HttpStatusPolicy::parse("X", Some("bogus".to_string()), HttpStatusPolicy::Error),
            HttpStatusPolicy::Error
        );
    }
}
