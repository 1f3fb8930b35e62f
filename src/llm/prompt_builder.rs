use crate::llm::prompts;

/// Build the full prompt: shared rules, the language clause, then the diff
/// spliced in verbatim.
pub fn commit_message_prompt(language: &str, diff: &str) -> String {
    format!(
        "{rules}\n{clause}\n\nDiff:\n```diff\n{diff}\n```",
        rules = prompts::COMMIT_RULES,
        clause = prompts::language_clause(language),
        diff = diff
    )
}
