pub mod openai;
pub mod prompt_builder;
pub mod prompts;

use crate::error::ApiError;

/// Trait for talking to a chat-completion backend (real or fake).
pub trait ChatBackend {
    /// Generate commit-message text for the given prompt.
    fn generate_commit_message(&self, prompt: &str) -> Result<String, ApiError>;
}
