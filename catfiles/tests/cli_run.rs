//! Drives the command-line layer without spawning a process.

use bytes::Bytes;
use cat_config::CatConfig;
use catfiles::cli::CatCommand;
use clap::Parser;
use source_client::local_server::{LocalTestServer, TestResource};
use tempfile::TempDir;

#[tokio::test]
async fn test_run_mixed_inputs() {
    let server = LocalTestServer::start().await;
    server.add("remote.txt", TestResource::new("CD"));

    let dir = TempDir::new().unwrap();
    let local = dir.path().join("local.txt");
    std::fs::write(&local, "AB").unwrap();

    let remote = server.url("remote.txt");
    let cmd = CatCommand::try_parse_from(["catfiles", local.to_str().unwrap(), remote.as_str()]).unwrap();
    let config = cmd.overrides.apply(CatConfig::default());

    assert_eq!(cmd.run(&config).await.unwrap(), Bytes::from_static(b"ABCD"));
}

#[tokio::test]
async fn test_run_reports_first_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.txt");
    let missing = missing.to_str().unwrap();

    let cmd = CatCommand::try_parse_from(["catfiles", missing]).unwrap();
    let config = cmd.overrides.apply(CatConfig::default());

    let err = cmd.run(&config).await.unwrap_err();
    assert!(err.to_string().starts_with(&format!("{missing}: ")));
}

#[tokio::test]
async fn test_fail_on_http_error_flag() {
    let server = LocalTestServer::start().await;
    server.add("gone.txt", TestResource::new("gone").with_status(axum::http::StatusCode::GONE));
    let url = server.url("gone.txt");

    let lenient = CatCommand::try_parse_from(["catfiles", url.as_str()]).unwrap();
    let config = lenient.overrides.apply(CatConfig::default());
    assert_eq!(lenient.run(&config).await.unwrap(), Bytes::from_static(b"gone"));

    let strict = CatCommand::try_parse_from(["catfiles", "--fail-on-http-error", url.as_str()]).unwrap();
    let config = strict.overrides.apply(CatConfig::default());
    let err = strict.run(&config).await.unwrap_err();
    assert_eq!(err.to_string(), format!("{url}: HTTP status 410 Gone"));
}

#[tokio::test]
async fn test_unsupported_scheme_flag() {
    let rejected = CatCommand::try_parse_from(["catfiles", "ftp://127.0.0.1:1/a.txt"]).unwrap();
    let config = rejected.overrides.apply(CatConfig::default());
    let err = rejected.run(&config).await.unwrap_err();
    assert_eq!(err.to_string(), "ftp://127.0.0.1:1/a.txt: unsupported URL scheme \"ftp\"");

    // With the fallback the plain HTTP client is used, and reqwest itself refuses the scheme.
    let allowed =
        CatCommand::try_parse_from(["catfiles", "--allow-unsupported-schemes", "ftp://127.0.0.1:1/a.txt"]).unwrap();
    let config = allowed.overrides.apply(CatConfig::default());
    let err = allowed.run(&config).await.unwrap_err();
    assert!(err.to_string().starts_with("ftp://127.0.0.1:1/a.txt: "));
    assert!(!err.to_string().contains("unsupported URL scheme"));
}
