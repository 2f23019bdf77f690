use std::io::Write;

use bytes::Bytes;
use cat_config::{CatConfig, HttpStatusPolicy};
use clap::{Args, Parser};
use concatenation::ConcatError;
use tokio::sync::oneshot;
use tracing::debug;

use crate::cat::cat_with_config;

/// Printed to stdout when no inputs are given.
pub const USAGE_LINES: [&str; 2] = [
    "USAGE: catfiles FILENAME1 FILENAME2 ...",
    "Display the contents of the files one after another.",
];

#[derive(Parser, Debug)]
#[clap(name = "catfiles", version, about = "Display the contents of the files one after another.")]
pub struct CatCommand {
    #[clap(flatten)]
    pub overrides: CliOverrides,

    /// Local file paths or http(s) URLs, concatenated in the order given.
    pub inputs: Vec<String>,
}

#[derive(Args, Debug, Default)]
pub struct CliOverrides {
    /// Maximum number of inputs fetched at the same time; 0 means no limit.
    #[clap(long)]
    pub max_concurrent_fetches: Option<usize>,
    /// Fail when a URL answers with an HTTP 4xx/5xx status instead of printing the response body.
    #[clap(long)]
    pub fail_on_http_error: bool,
    /// Fetch URLs whose scheme is not http or https over plain HTTP instead of rejecting them.
    #[clap(long)]
    pub allow_unsupported_schemes: bool,
}

impl CliOverrides {
    /// Applies the flags that were given on top of `config`.
    pub fn apply(&self, mut config: CatConfig) -> CatConfig {
        if let Some(n) = self.max_concurrent_fetches {
            config.fetch.max_concurrent_fetches = n;
        }
        if self.fail_on_http_error {
            config.fetch.http_error_status_policy = HttpStatusPolicy::Error;
        }
        if self.allow_unsupported_schemes {
            config.fetch.allow_unsupported_schemes = true;
        }
        config
    }
}

impl CatCommand {
    /// Runs the concatenation and waits for its completion callback.
    pub async fn run(self, config: &CatConfig) -> concatenation::Result<Bytes> {
        debug!(
            n_inputs = self.inputs.len(),
            max_concurrent_fetches = config.fetch.max_concurrent_fetches,
            http_error_status_policy = %config.fetch.http_error_status_policy,
            "Starting catfiles"
        );

        let (tx, rx) = oneshot::channel();

        cat_with_config(self.inputs, &config.fetch, move |result| {
            let _ = tx.send(result);
        });

        rx.await
            .map_err(|_| ConcatError::InternalError("Completion callback dropped without a result".to_string()))?
    }
}

pub fn print_usage(out: &mut impl Write) -> std::io::Result<()> {
    for line in USAGE_LINES {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_inputs_in_order() {
        let cmd = CatCommand::try_parse_from(["catfiles", "b.txt", "http://h/a", "b.txt"]).unwrap();
        assert_eq!(cmd.inputs, ["b.txt", "http://h/a", "b.txt"]);
        assert!(!cmd.overrides.fail_on_http_error);
    }

    #[test]
    fn test_no_inputs_parses_to_empty_list() {
        let cmd = CatCommand::try_parse_from(["catfiles"]).unwrap();
        assert!(cmd.inputs.is_empty());
    }

    #[test]
    fn test_overrides_apply() {
        let cmd = CatCommand::try_parse_from([
            "catfiles",
            "--max-concurrent-fetches",
            "4",
            "--fail-on-http-error",
            "--allow-unsupported-schemes",
            "a.txt",
        ])
        .unwrap();

        let config = cmd.overrides.apply(CatConfig::default());
        assert_eq!(config.fetch.max_concurrent_fetches, 4);
        assert_eq!(config.fetch.http_error_status_policy, HttpStatusPolicy::Error);
        assert!(config.fetch.allow_unsupported_schemes);

        let untouched = CliOverrides::default().apply(CatConfig::default());
        assert_eq!(untouched.fetch.max_concurrent_fetches, 0);
        assert_eq!(untouched.fetch.http_error_status_policy, HttpStatusPolicy::Content);
    }

    #[test]
    fn test_usage_lines() {
        let mut out = Vec::new();
        print_usage(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "USAGE: catfiles FILENAME1 FILENAME2 ...\nDisplay the contents of the files one after another.\n"
        );
    }
}
