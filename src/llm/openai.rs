use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ChatBackend;
use crate::config::Config;
use crate::error::ApiError;

/// Minimal request/response structs for the Chat Completions API.
#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: Option<ChatMessageResponse>,
}

#[derive(Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

const MAX_TOKENS: u32 = 100;
const TEMPERATURE: f32 = 0.7;

/// Client for any OpenAI-compatible chat endpoint. Credentials are checked
/// per call so a missing key fails before any network I/O.
pub struct OpenAiClient {
    client: Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(cfg: &Config) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(90))
            .build()
            .expect("failed to build HTTP client");

        OpenAiClient {
            client,
            api_url: cfg.api_url.clone(),
            api_key: cfg.api_key.clone().unwrap_or_default(),
            model: cfg.model.clone(),
        }
    }

    fn credentials(&self) -> Result<(&str, &str), ApiError> {
        if self.api_url.trim().is_empty() {
            return Err(ApiError::MissingApiUrl);
        }
        if self.api_key.trim().is_empty() {
            return Err(ApiError::MissingApiKey);
        }
        Ok((&self.api_url, &self.api_key))
    }

    /// List model identifiers from the endpoint next to the chat endpoint.
    pub fn list_models(&self) -> Result<Vec<String>, ApiError> {
        let (api_url, api_key) = self.credentials()?;
        let url = models_url(api_url);

        log::info!("Fetching model list from {url}");

        let resp = self
            .client
            .get(&url)
            .bearer_auth(api_key)
            .send()
            .map_err(|source| ApiError::Transport { url: url.clone(), source })?;

        let status = resp.status();
        let text = resp.text().unwrap_or_default();
        if !status.is_success() {
            return Err(ApiError::Upstream {
                status: status.as_u16(),
                body: text,
            });
        }

        let body: Value = serde_json::from_str(&text)
            .map_err(|e| ApiError::MalformedResponse(format!("invalid JSON from models endpoint: {e}")))?;

        let models = extract_model_ids(&body);
        if models.is_empty() {
            return Err(ApiError::NoModels);
        }

        log::debug!("Models endpoint returned {} model(s)", models.len());
        Ok(models)
    }
}

impl ChatBackend for OpenAiClient {
    fn generate_commit_message(&self, prompt: &str) -> Result<String, ApiError> {
        let (api_url, api_key) = self.credentials()?;

        let req = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".into(),
                content: prompt.to_string(),
            }],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        log::info!("Calling model {:?} at {api_url}", self.model);
        log::trace!("Prompt:\n{}", truncate(prompt, 3000));

        let resp = self
            .client
            .post(api_url)
            .bearer_auth(api_key)
            .json(&req)
            .send()
            .map_err(|source| ApiError::Transport {
                url: api_url.to_string(),
                source,
            })?;

        let status = resp.status();
        let text = resp.text().unwrap_or_default();
        if !status.is_success() {
            return Err(ApiError::Upstream {
                status: status.as_u16(),
                body: text,
            });
        }

        parse_chat_body(&text)
    }
}

/// Extract `choices[0].message.content`, trimmed. Anything missing or empty
/// is a malformed response.
fn parse_chat_body(text: &str) -> Result<String, ApiError> {
    let parsed: ChatResponse = serde_json::from_str(text)
        .map_err(|e| ApiError::MalformedResponse(format!("invalid JSON: {e}")))?;

    let content = parsed
        .choices
        .first()
        .and_then(|c| c.message.as_ref())
        .and_then(|m| m.content.as_deref())
        .map(str::trim)
        .unwrap_or_default();

    if content.is_empty() {
        return Err(ApiError::MalformedResponse(
            "no message content in choices[0]".to_string(),
        ));
    }

    Ok(content.to_string())
}

/// Derive the models-listing URL from the chat endpoint by swapping the
/// chat-completions path segment, handling both versioned and unversioned
/// forms.
fn models_url(api_url: &str) -> String {
    let trimmed = api_url.trim_end_matches('/');
    if let Some(base) = trimmed.strip_suffix("/v1/chat/completions") {
        format!("{base}/v1/models")
    } else if let Some(base) = trimmed.strip_suffix("/chat/completions") {
        format!("{base}/models")
    } else {
        format!("{trimmed}/models")
    }
}

/// Pull identifiers out of a models-listing body. The list lives under
/// `data` or `models` (whichever is present and non-empty); each entry is
/// identified by `id`, else `name`, else the raw string value. Entries that
/// reduce to nothing are dropped.
fn extract_model_ids(body: &Value) -> Vec<String> {
    let entries = ["data", "models"]
        .iter()
        .find_map(|key| {
            body.get(*key)
                .and_then(Value::as_array)
                .filter(|list| !list.is_empty())
        })
        .cloned()
        .unwrap_or_default();

    entries
        .iter()
        .filter_map(|entry| {
            entry
                .get("id")
                .and_then(Value::as_str)
                .or_else(|| entry.get("name").and_then(Value::as_str))
                .or_else(|| entry.as_str())
                .map(str::to_string)
        })
        .filter(|id| !id.is_empty())
        .collect()
}

/// Truncate long strings for debug logging.
fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...\n[truncated {} chars]", &s[..max_len], s.len() - max_len)
    }
}
