//! Integration tests for the rfetch CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::time::{Duration, Instant};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// An address nothing listens on
const DEAD_URL: &str = "http://127.0.0.1:1/";

fn rfetch() -> Command {
    let mut cmd = Command::cargo_bin("rfetch").unwrap();
    cmd.env_remove("RFETCH_TIMEOUT").env_remove("RFETCH_RETRY");
    cmd
}

// ==================== help / version / usage errors ====================

#[test]
fn test_help() {
    for flag in ["--help", "-h"] {
        rfetch()
            .arg(flag)
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage"))
            .stdout(predicate::str::contains("--url"))
            .stdout(predicate::str::contains("--for"));
    }
}

#[test]
fn test_version() {
    for flag in ["--version", "-v"] {
        rfetch()
            .arg(flag)
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }
}

#[test]
fn test_missing_url() {
    rfetch()
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("URL is required"))
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_empty_url() {
    rfetch()
        .args(["-u", ""])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("URL is required"))
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_invalid_url() {
    rfetch()
        .args(["--url", "exa mple.com"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid URL"))
        .stderr(predicate::str::contains("Usage"));
}

#[tokio::test]
async fn test_stray_bracket_is_usage_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let port = mock_server.address().port();
    for url in [
        format!("http://[::1:{}", port),
        format!("http://127.0.0.1:{}/a]b", port),
        "exa[mple.com".to_string(),
    ] {
        rfetch()
            .args(["-u", &url, "-r", "3"])
            .assert()
            .code(1)
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("invalid URL"))
            .stderr(predicate::str::contains("Usage"))
            .stderr(predicate::str::contains("retrying").not());
    }
}

#[test]
fn test_bad_timeout_exits_one() {
    rfetch()
        .args(["-u", "example.com", "-t", "soon"])
        .assert()
        .code(1);
}

#[test]
fn test_zero_repeat_rejected() {
    rfetch()
        .args(["-u", "example.com", "-f", "0"])
        .assert()
        .code(1);
}

// ==================== fetching ====================

#[tokio::test]
async fn test_stdout_gets_body_and_newline() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
        .expect(1)
        .mount(&mock_server)
        .await;

    // No scheme: http:// is added. A bare "127.0.0.1:port" would read as a
    // relative path with a colon, so use a host name.
    let bare = format!("localhost:{}", mock_server.address().port());

    rfetch()
        .args(["-u", &bare, "-t", "30", "-r", "3"])
        .assert()
        .success()
        .stdout("hello\n");
}

#[tokio::test]
async fn test_output_file_gets_exact_bytes() {
    let mock_server = MockServer::start().await;

    let payload = vec![0u8, 1, 2, 253, 254, 255];
    Mock::given(method("GET"))
        .and(path("/out.bin"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(payload.clone()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out.bin");
    let url = format!("{}/out.bin", mock_server.uri());

    rfetch()
        .args(["-u", &url, "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(std::fs::read(&out).unwrap(), payload);
}

#[tokio::test]
async fn test_error_status_body_is_printed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such page"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = format!("{}/missing", mock_server.uri());

    rfetch()
        .args(["-u", &url])
        .assert()
        .success()
        .stdout("no such page\n");
}

#[tokio::test]
async fn test_retries_until_success() {
    let mock_server = MockServer::start().await;

    // First two attempts time out, the third gets an answer
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .up_to_n_times(2)
        .with_priority(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_string("third time"))
        .expect(1)
        .with_priority(2)
        .mount(&mock_server)
        .await;

    let url = format!("{}/flaky", mock_server.uri());
    let start = Instant::now();

    rfetch()
        .args(["-u", &url, "-t", "1", "-r", "3"])
        .assert()
        .success()
        .stdout("third time\n")
        .stderr(predicate::str::contains("attempt 1/3 failed"))
        .stderr(predicate::str::contains("attempt 2/3 failed"));

    // Two timeouts plus two one-second pauses
    assert!(start.elapsed() >= Duration::from_secs(4));
}

#[test]
fn test_exhausted_retries() {
    let start = Instant::now();

    rfetch()
        .args(["-u", DEAD_URL, "-r", "2"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("attempt 1/2 failed"))
        .stderr(predicate::str::contains("attempt 2/2").not())
        .stderr(predicate::str::contains("GET http://127.0.0.1:1/ failed"))
        .stderr(predicate::str::contains("Usage").not());

    assert!(start.elapsed() >= Duration::from_secs(1));
}

#[test]
fn test_retry_from_environment() {
    rfetch()
        .env("RFETCH_RETRY", "1")
        .args(["-u", DEAD_URL])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("retrying").not());
}

#[test]
fn test_quiet_hides_retry_warnings() {
    rfetch()
        .args(["-u", DEAD_URL, "-r", "2", "-q"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("retrying").not())
        .stderr(predicate::str::contains("failed"));
}

#[tokio::test]
async fn test_repeat_fetches_each_time() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tick"))
        .respond_with(ResponseTemplate::new(200).set_body_string("tick"))
        .expect(3)
        .mount(&mock_server)
        .await;

    let url = format!("{}/tick", mock_server.uri());

    rfetch()
        .args(["-u", &url, "--for", "3", "-q"])
        .assert()
        .success()
        .stdout("tick\ntick\ntick\n");
}

#[tokio::test]
async fn test_output_to_directory_fails() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("body"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();

    rfetch()
        .args(["-u", &mock_server.uri(), "-o"])
        .arg(dir.path())
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("cannot write"));
}
