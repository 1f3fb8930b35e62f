//! Full-binary runs against a mock chat endpoint and a scratch repository.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::cargo;
use serde_json::json;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

fn git_available() -> bool {
    Command::new("git").arg("--version").output().is_ok()
}

fn run_git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .current_dir(dir)
        .args(args)
        .status()
        .expect("failed to run git");
    assert!(status.success(), "git {args:?} failed");
}

#[tokio::test]
async fn staged_change_ends_up_in_the_commit_box() {
    if !git_available() {
        eprintln!("skipping: git not available");
        return;
    }

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"content": "添加文件内容"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api_url = format!("{}/v1/chat/completions", server.uri());
    tokio::task::spawn_blocking(move || {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path();
        run_git(dir, &["init", "-q"]);
        fs::write(dir.join("x"), "hello\n").unwrap();
        run_git(dir, &["add", "x"]);

        let mut cmd = cargo::cargo_bin_cmd!();
        cmd.current_dir(dir)
            // Point HOME at the scratch dir so no user config or log state
            // leaks into the run.
            .env("HOME", dir)
            .env("COMMITGEN_API_URL", &api_url)
            .env("OPENAI_API_KEY", "sk-test")
            .env("COMMITGEN_LANGUAGE", "Chinese")
            .assert()
            .success()
            .stdout(predicates::str::contains("添加文件内容"));

        let written = fs::read_to_string(dir.join(".git").join("COMMIT_EDITMSG")).unwrap();
        assert_eq!(written, "添加文件内容");
    })
    .await
    .unwrap();

    server.verify().await;
}

#[tokio::test]
async fn clean_repository_makes_no_network_call() {
    if !git_available() {
        eprintln!("skipping: git not available");
        return;
    }

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let api_url = format!("{}/v1/chat/completions", server.uri());
    tokio::task::spawn_blocking(move || {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path();
        run_git(dir, &["init", "-q"]);

        let mut cmd = cargo::cargo_bin_cmd!();
        cmd.current_dir(dir)
            .env("HOME", dir)
            .env("COMMITGEN_API_URL", &api_url)
            .env("OPENAI_API_KEY", "sk-test")
            .assert()
            .success()
            .stdout(predicates::str::contains("No changes detected"));

        assert!(!dir.join(".git").join("COMMIT_EDITMSG").exists());
    })
    .await
    .unwrap();

    server.verify().await;
}
