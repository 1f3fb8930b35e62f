//! commitgen: generates Git commit messages from your diff with an
//! OpenAI-compatible chat API.

pub mod cli_args;
pub mod commit_box;
pub mod config;
pub mod error;
pub mod git;
pub mod llm;
pub mod logging;
pub mod pipeline;
