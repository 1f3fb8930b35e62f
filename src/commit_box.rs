//! The "commit box" is the pending commit message the next `git commit` will
//! open in the editor. For a CLI that means `.git/COMMIT_EDITMSG`; tests swap
//! in an in-memory store.

use std::fs;
use std::path::PathBuf;

use crate::error::GitError;
use crate::git;

/// A repository whose pending commit message can be replaced wholesale.
pub trait Repository {
    fn set_pending_message(&self, text: &str) -> Result<(), GitError>;
}

/// Locates the repository to write into.
pub trait RepositoryStore {
    fn first_repository(&self) -> Result<Box<dyn Repository>, GitError>;
}

/// Real adapter: discovers the git dir under the given root.
pub struct GitCliStore {
    root: PathBuf,
}

impl GitCliStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        GitCliStore { root: root.into() }
    }
}

impl RepositoryStore for GitCliStore {
    fn first_repository(&self) -> Result<Box<dyn Repository>, GitError> {
        let git_dir = git::git_dir(&self.root)?;
        Ok(Box::new(EditmsgRepository {
            path: git_dir.join("COMMIT_EDITMSG"),
        }))
    }
}

/// Writes the message into COMMIT_EDITMSG so the next `git commit` picks it
/// up as the default editor content.
struct EditmsgRepository {
    path: PathBuf,
}

impl Repository for EditmsgRepository {
    fn set_pending_message(&self, text: &str) -> Result<(), GitError> {
        fs::write(&self.path, text).map_err(|source| GitError::WriteFailed {
            path: self.path.display().to_string(),
            source,
        })?;
        log::info!("Wrote commit message to {}", self.path.display());
        Ok(())
    }
}
