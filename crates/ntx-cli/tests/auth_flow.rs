//! Integration tests for register/login/logout against a mock service.

use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test(flavor = "multi_thread")]
async fn test_login_persists_session() {
    let dir = tempdir().unwrap();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/token"))
        .and(body_string_contains("username=alice%40example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "tok-abcdefghijklmnopqrstuvwxyz",
            "token_type": "bearer"
        })))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("ntx")
        .env("NTX_HOME", dir.path())
        .env("NTX_PASSWORD", "hunter2")
        .args(["--base-url", &server.uri(), "login", "alice@example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed in as alice@example.com"));

    let session = fs::read_to_string(dir.path().join("session.json")).unwrap();
    assert!(session.contains("tok-abcdefghijklmnopqrstuvwxyz"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_register_then_auto_login() {
    let dir = tempdir().unwrap();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": 1,
            "email": "bob@example.com"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "tok-registered-0123456789",
            "token_type": "bearer"
        })))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("ntx")
        .env("NTX_HOME", dir.path())
        .env("NTX_PASSWORD", "hunter2")
        .args(["--base-url", &server.uri(), "register", "bob@example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Registered bob@example.com"))
        .stdout(predicate::str::contains("Signed in as bob@example.com"));

    assert!(dir.path().join("session.json").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_failure_surfaces_detail() {
    let dir = tempdir().unwrap();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "detail": "Incorrect email or password"
        })))
        .mount(&server)
        .await;

    cargo_bin_cmd!("ntx")
        .env("NTX_HOME", dir.path())
        .env("NTX_PASSWORD", "wrong")
        .args(["--base-url", &server.uri(), "login", "alice@example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Incorrect email or password"));

    assert!(!dir.path().join("session.json").exists());
}

#[test]
fn test_logout_when_not_signed_in() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("ntx")
        .env("NTX_HOME", dir.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not signed in."));
}

#[test]
fn test_logout_removes_session_file() {
    let dir = tempdir().unwrap();
    let session_path = dir.path().join("session.json");
    fs::write(&session_path, r#"{"token":"tok-old"}"#).unwrap();

    cargo_bin_cmd!("ntx")
        .env("NTX_HOME", dir.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed out."));

    assert!(!session_path.exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_whoami_shows_account_and_masked_token() {
    let dir = tempdir().unwrap();
    let server = MockServer::start().await;

    fs::write(
        dir.path().join("session.json"),
        r#"{"token":"tok-abcdefghijklmnopqrstuvwxyz"}"#,
    )
    .unwrap();

    Mock::given(method("GET"))
        .and(path("/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 1,
            "email": "alice@example.com"
        })))
        .mount(&server)
        .await;

    cargo_bin_cmd!("ntx")
        .env("NTX_HOME", dir.path())
        .args(["--base-url", &server.uri(), "whoami"])
        .assert()
        .success()
        .stdout(predicate::str::contains("alice@example.com"))
        .stdout(predicate::str::contains("tok-abcdefgh..."))
        .stdout(predicate::str::contains("tok-abcdefghijklmnopqrstuvwxyz").not());
}

#[test]
fn test_whoami_without_session() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("ntx")
        .env("NTX_HOME", dir.path())
        .arg("whoami")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not signed in"));
}
