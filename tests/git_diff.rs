//! Diff collection and commit-box writes against real scratch repositories.

use std::fs;
use std::path::Path;
use std::process::Command;

use commitgen::commit_box::{GitCliStore, RepositoryStore};
use commitgen::error::GitError;
use commitgen::git;

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

/// Fresh repo with an initial commit of `file.txt`.
fn init_repo(dir: &Path) {
    run_git(dir, &["init", "-q"]);
    fs::write(dir.join("file.txt"), "original\n").unwrap();
    run_git(dir, &["add", "file.txt"]);
    run_git(
        dir,
        &[
            "-c",
            "user.name=Test",
            "-c",
            "user.email=test@example.com",
            "commit",
            "-q",
            "-m",
            "initial",
        ],
    );
}

#[test]
fn staged_diff_wins_over_working_tree_diff() {
    if !git_available() {
        eprintln!("skipping: git not available");
        return;
    }

    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path();
    init_repo(dir);

    // Clean repo: both diffs empty.
    let diff = git::collect_diff(dir).unwrap();
    assert!(diff.trim().is_empty());

    // Unstaged change only: working-tree diff comes back.
    fs::write(dir.join("file.txt"), "original\nworking change\n").unwrap();
    let diff = git::collect_diff(dir).unwrap();
    assert!(diff.contains("+working change"));

    // Stage it, then add a different unstaged edit: only the staged diff
    // should be returned.
    run_git(dir, &["add", "file.txt"]);
    fs::write(
        dir.join("file.txt"),
        "original\nworking change\nunstaged extra\n",
    )
    .unwrap();
    let diff = git::collect_diff(dir).unwrap();
    assert!(diff.contains("+working change"));
    assert!(!diff.contains("unstaged extra"));
    assert_eq!(diff, git::staged_diff(dir).unwrap());
}

#[test]
fn commit_box_write_replaces_editmsg() {
    if !git_available() {
        eprintln!("skipping: git not available");
        return;
    }

    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path();
    init_repo(dir);

    let store = GitCliStore::new(dir);
    let repo = store.first_repository().unwrap();
    repo.set_pending_message("fix: everything").unwrap();
    repo.set_pending_message("添加文件内容").unwrap();

    let written = fs::read_to_string(dir.join(".git").join("COMMIT_EDITMSG")).unwrap();
    assert_eq!(written, "添加文件内容");
}

#[test]
fn non_repository_is_reported_as_such() {
    if !git_available() {
        eprintln!("skipping: git not available");
        return;
    }

    // Temp dirs live outside any repository.
    let tmp = tempfile::tempdir().unwrap();

    let err = git::git_dir(tmp.path()).unwrap_err();
    assert!(matches!(err, GitError::NotARepository(_)), "got {err:?}");
}
