use thiserror::Error;

/// Errors from git subprocess invocations and the commit-box adapter.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("failed to run git (is it installed and on PATH?): {0}")]
    Spawn(#[source] std::io::Error),

    #[error("git {args:?} exited with {code}: {stderr}", code = exit_code.map_or("unknown status".to_string(), |c| format!("code {c}")))]
    CommandFailed {
        args: Vec<String>,
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("not inside a git repository: {0}")]
    NotARepository(String),

    #[error("failed to write commit message to {path}: {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from the chat-completions and model-listing endpoints.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("no API key configured. Set OPENAI_API_KEY, pass --api-key, or add api_key to the config file")]
    MissingApiKey,

    #[error("no API URL configured. Pass --api-url or add api_url to the config file")]
    MissingApiUrl,

    #[error("failed to reach {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("API returned HTTP {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("unexpected response from API: {0}")]
    MalformedResponse(String),

    #[error("the models endpoint returned no models (looked under 'data' and 'models' keys)")]
    NoModels,
}
