use std::path::{Path, PathBuf};
use std::process::Command as GitCommand;

use crate::error::GitError;

/// Run a git command in `root` and capture stdout as String.
pub fn git_output(root: &Path, args: &[&str]) -> Result<String, GitError> {
    let output = GitCommand::new("git")
        .current_dir(root)
        .args(args)
        .output()
        .map_err(GitError::Spawn)?;

    if !output.status.success() {
        return Err(GitError::CommandFailed {
            args: args.iter().map(|a| a.to_string()).collect(),
            exit_code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// Get the path to the Git directory (e.g. .git), resolved against `root`
/// since git prints it relative to its working directory.
pub fn git_dir(root: &Path) -> Result<PathBuf, GitError> {
    let output = GitCommand::new("git")
        .current_dir(root)
        .args(["rev-parse", "--git-dir"])
        .output()
        .map_err(GitError::Spawn)?;

    if !output.status.success() {
        return Err(GitError::NotARepository(
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ));
    }

    let dir = String::from_utf8_lossy(&output.stdout).trim().to_string();
    Ok(root.join(dir))
}

/// Get the full staged diff.
pub fn staged_diff(root: &Path) -> Result<String, GitError> {
    git_output(root, &["diff", "--cached"])
}

/// Get the working-tree diff (unstaged changes).
pub fn working_tree_diff(root: &Path) -> Result<String, GitError> {
    git_output(root, &["diff"])
}

/// The diff to summarize: staged changes if any, otherwise working-tree
/// changes. The staged diff is returned exactly as git printed it; trimming
/// only decides emptiness.
pub fn collect_diff(root: &Path) -> Result<String, GitError> {
    let staged = staged_diff(root)?;
    if !staged.trim().is_empty() {
        log::debug!("Using staged diff ({} bytes)", staged.len());
        return Ok(staged);
    }

    log::debug!("No staged changes, falling back to working-tree diff");
    working_tree_diff(root)
}
