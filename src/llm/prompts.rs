//! Per-language instruction templates for commit-message generation.
//!
//! Every template shares the same rules; only the output-language clause
//! differs. Unknown language keys fall back to English.

pub const FALLBACK_LANGUAGE: &str = "English";

pub const COMMIT_RULES: &str = r#"You are a Git commit message assistant.
Write a commit message for the diff below.
Rules:
- Use the standard commit message format: a short summary line, then details.
- Be concise and describe the main changes.
- If there are multiple distinct changes, list them as a numbered list (1. 2. 3.).
- Return only the commit message itself, with no surrounding commentary."#;

/// Language key -> clause appended to the shared rules. The clause is written
/// in the target language so smaller models actually follow it.
const LANGUAGE_CLAUSES: &[(&str, &str)] = &[
    ("English", "Write the commit message in English."),
    ("Chinese", "请用简体中文编写提交信息。"),
    ("Japanese", "コミットメッセージは日本語で書いてください。"),
    ("Korean", "커밋 메시지는 한국어로 작성하세요."),
    ("French", "Rédige le message de commit en français."),
    ("German", "Schreibe die Commit-Nachricht auf Deutsch."),
    ("Spanish", "Escribe el mensaje de commit en español."),
    ("Portuguese", "Escreva a mensagem de commit em português."),
    ("Russian", "Напишите сообщение коммита на русском языке."),
    ("Italian", "Scrivi il messaggio di commit in italiano."),
];

/// Supported language keys, for help text and config validation messages.
pub fn supported_languages() -> Vec<&'static str> {
    LANGUAGE_CLAUSES.iter().map(|(key, _)| *key).collect()
}

/// The output-language clause for a key, falling back to English for keys not
/// in the table.
pub fn language_clause(key: &str) -> &'static str {
    LANGUAGE_CLAUSES
        .iter()
        .find(|(k, _)| *k == key)
        .or_else(|| LANGUAGE_CLAUSES.iter().find(|(k, _)| *k == FALLBACK_LANGUAGE))
        .map(|(_, clause)| *clause)
        .unwrap_or_default()
}

/// Sanity-check the template table once at startup: the shared rules and
/// every declared language clause must be non-empty, and the fallback key
/// must exist.
pub fn validate_templates() -> anyhow::Result<()> {
    anyhow::ensure!(!COMMIT_RULES.trim().is_empty(), "commit rules template is empty");
    anyhow::ensure!(
        LANGUAGE_CLAUSES.iter().any(|(k, _)| *k == FALLBACK_LANGUAGE),
        "fallback language {FALLBACK_LANGUAGE:?} is not in the template table"
    );
    for (key, clause) in LANGUAGE_CLAUSES {
        anyhow::ensure!(
            !clause.trim().is_empty(),
            "language {key:?} has an empty template clause"
        );
    }
    Ok(())
}
