//! The generate flow: collect diff, build prompt, call the model, write the
//! commit box. Stages run strictly in sequence; the progress bar milestones
//! are feedback only.

use anyhow::{Context, Result};
use indicatif::ProgressBar;

use crate::commit_box::RepositoryStore;
use crate::error::GitError;
use crate::git;
use crate::llm::{ChatBackend, prompt_builder};

/// Where the diff comes from. The real source shells out to git.
pub trait DiffSource {
    fn collect_diff(&self) -> Result<String, GitError>;
}

pub struct GitCliDiff {
    root: std::path::PathBuf,
}

impl GitCliDiff {
    pub fn new(root: impl Into<std::path::PathBuf>) -> Self {
        GitCliDiff { root: root.into() }
    }
}

impl DiffSource for GitCliDiff {
    fn collect_diff(&self) -> Result<String, GitError> {
        git::collect_diff(&self.root)
    }
}

/// How a generate run ended, short of an error.
#[derive(Debug)]
pub enum Outcome {
    Generated(String),
    NoChanges,
}

pub fn run(
    diff_source: &dyn DiffSource,
    backend: &dyn ChatBackend,
    store: &dyn RepositoryStore,
    language: &str,
    progress: &ProgressBar,
) -> Result<Outcome> {
    progress.set_message("Collecting changes");
    progress.set_position(25);
    let diff = diff_source
        .collect_diff()
        .context("could not collect a diff from git")?;

    if diff.trim().is_empty() {
        progress.finish_and_clear();
        log::info!("No staged or working-tree changes found");
        return Ok(Outcome::NoChanges);
    }

    let prompt = prompt_builder::commit_message_prompt(language, &diff);

    progress.set_message("Waiting for the model");
    progress.set_position(50);
    let message = backend
        .generate_commit_message(&prompt)
        .context("commit message generation failed")?;

    progress.set_message("Writing commit message");
    progress.set_position(75);
    let repo = store
        .first_repository()
        .context("could not find a git repository to write into")?;
    repo.set_pending_message(&message)
        .context("could not write the commit message")?;

    progress.set_position(100);
    progress.finish_and_clear();

    Ok(Outcome::Generated(message))
}
