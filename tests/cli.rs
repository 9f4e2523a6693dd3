#![cfg(feature = "tracing")]

use std::process::{Command, Output};

use b12_apply::application::{PLACEHOLDER_RUN_LINK, SIGNATURE_HEADER};
use httpmock::Mock;
use httpmock::prelude::*;
use serde_json::json;

const PATH: &str = "/apply/submission";

/// The binary with a clean environment holding only the applicant and secret.
fn submit_application(endpoint: &str) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_submit-application"));
    command
        .env_clear()
        .env("B12_NAME", "Ada Lovelace")
        .env("B12_EMAIL", "ada@example.com")
        .env("B12_RESUME_LINK", "https://example.com/ada.pdf")
        .env("B12_REPOSITORY_LINK", "https://github.com/ada")
        .env("B12_SIGNING_SECRET", "hello-there-from-b12")
        .env("B12_ENDPOINT", endpoint);
    command
}

fn exit_status(output: &Output) -> Option<i32> {
    output.status.code()
}

fn describe(output: &Output) -> String {
    format!(
        "stdout:\n{}\nstderr:\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}

/// Accepts only submissions carrying `run_link`.
fn expect_run_link<'a>(server: &'a MockServer, run_link: &str) -> Mock<'a> {
    let expected = format!(r#""action_run_link":"{run_link}""#);
    server.mock(|when, then| {
        when.method(POST)
            .path(PATH)
            .header_exists(SIGNATURE_HEADER)
            .body_includes(expected);
        then.status(200)
            .json_body(json!({ "success": true, "receipt": "R123" }));
    })
}

#[test]
fn receipt_goes_to_github_output_with_placeholder_run_link() {
    let server = MockServer::start();
    let mock = expect_run_link(&server, PLACEHOLDER_RUN_LINK);
    let dir = tempfile::tempdir().expect("tempdir");
    let github_output = dir.path().join("github_output");

    let output = submit_application(&server.url(PATH))
        .env("GITHUB_OUTPUT", &github_output)
        .output()
        .expect("binary runs");

    assert_eq!(exit_status(&output), Some(0), "{}", describe(&output));
    mock.assert();
    assert_eq!(
        std::fs::read_to_string(&github_output).expect("output written"),
        "receipt=R123\n"
    );
}

#[test]
fn github_run_url_replaces_placeholder() {
    let run_link = "https://github.com/acme/apply/actions/runs/42";
    let server = MockServer::start();
    let mock = expect_run_link(&server, run_link);

    let output = submit_application(&server.url(PATH))
        .env("GITHUB_RUN_URL", run_link)
        .output()
        .expect("binary runs");

    assert_eq!(exit_status(&output), Some(0), "{}", describe(&output));
    mock.assert();
}

#[test]
fn server_error_exits_one_without_output() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path(PATH);
        then.status(500).body("internal failure");
    });
    let dir = tempfile::tempdir().expect("tempdir");
    let github_output = dir.path().join("github_output");

    let output = submit_application(&server.url(PATH))
        .env("GITHUB_OUTPUT", &github_output)
        .output()
        .expect("binary runs");

    assert_eq!(exit_status(&output), Some(1), "{}", describe(&output));
    mock.assert_calls(1);
    assert!(!github_output.exists(), "no receipt line on failure");
}

#[test]
fn missing_secret_exits_one_without_request() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path(PATH);
        then.status(200)
            .json_body(json!({ "success": true, "receipt": "R123" }));
    });

    let output = submit_application(&server.url(PATH))
        .env_remove("B12_SIGNING_SECRET")
        .output()
        .expect("binary runs");

    assert_eq!(exit_status(&output), Some(1), "{}", describe(&output));
    assert!(
        String::from_utf8_lossy(&output.stderr).contains("--signing-secret"),
        "{}",
        describe(&output)
    );
    mock.assert_calls(0);
}

#[test]
fn invalid_timeout_exits_one() {
    let output = submit_application("http://127.0.0.1:9/apply/submission")
        .args(["--timeout-secs", "abc"])
        .output()
        .expect("binary runs");

    assert_eq!(exit_status(&output), Some(1), "{}", describe(&output));
}

#[test]
fn invalid_endpoint_exits_one() {
    let output = submit_application("not a url").output().expect("binary runs");

    assert_eq!(exit_status(&output), Some(1), "{}", describe(&output));
}

#[test]
fn help_exits_zero() {
    let output = Command::new(env!("CARGO_BIN_EXE_submit-application"))
        .env_clear()
        .arg("--help")
        .output()
        .expect("binary runs");

    assert_eq!(exit_status(&output), Some(0), "{}", describe(&output));
    assert!(
        String::from_utf8_lossy(&output.stdout).contains("--run-link"),
        "{}",
        describe(&output)
    );
}

#[test]
fn version_exits_zero_without_submitting() {
    let dir = tempfile::tempdir().expect("tempdir");
    let github_output = dir.path().join("github_output");

    let output = submit_application("http://127.0.0.1:9/apply/submission")
        .env("GITHUB_OUTPUT", &github_output)
        .arg("--version")
        .output()
        .expect("binary runs");

    assert_eq!(exit_status(&output), Some(0), "{}", describe(&output));
    assert!(!github_output.exists(), "version does not submit");
}
