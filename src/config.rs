use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli_args::Cli;

pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_LANGUAGE: &str = "English";
pub const DEFAULT_LOG_LEVEL: &str = "INFO";

/// Final resolved configuration for one invocation.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub commit_language: String,
    pub log_level: String,
}

impl Config {
    /// Build the final config from CLI flags, environment, TOML file, and
    /// defaults, in that order. Environment variables arrive through clap's
    /// `env` attributes, so "CLI" here already covers them.
    ///
    /// Resolved fresh on every invocation; nothing is cached across runs.
    pub fn from_sources(cli: &Cli) -> Self {
        let file_cfg = load_file_config().unwrap_or_default();

        Config {
            api_url: cli
                .api_url
                .clone()
                .or(file_cfg.api_url)
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            api_key: cli.api_key.clone().or(file_cfg.api_key),
            model: cli
                .model
                .clone()
                .or(file_cfg.model)
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            commit_language: cli
                .language
                .clone()
                .or(file_cfg.commit_language)
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            log_level: cli
                .log_level
                .clone()
                .or(file_cfg.log_level)
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct FileConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    api_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    commit_language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_level: Option<String>,
}

/// Return `~/.config/commitgen.toml`
fn config_path() -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    Some(home.join(".config").join("commitgen.toml"))
}

fn load_file_config() -> Option<FileConfig> {
    let path = config_path()?;
    if !path.exists() {
        return None;
    }

    let data = fs::read_to_string(&path).ok()?;
    match toml::from_str::<FileConfig>(&data) {
        Ok(cfg) => Some(cfg),
        Err(err) => {
            log::warn!("Ignoring unparseable config file {path:?}: {err}");
            None
        }
    }
}

/// Persist a model selection into the user config file, keeping the other
/// keys it holds.
pub fn save_model(model: &str) -> Result<()> {
    let path = config_path().context("could not determine the user config directory")?;
    write_model_to(&path, model)
}

fn write_model_to(path: &Path, model: &str) -> Result<()> {
    let mut file_cfg = path
        .exists()
        .then(|| fs::read_to_string(path).ok())
        .flatten()
        .and_then(|data| toml::from_str::<FileConfig>(&data).ok())
        .unwrap_or_default();

    file_cfg.model = Some(model.to_string());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {parent:?}"))?;
    }

    let data = toml::to_string_pretty(&file_cfg).context("failed to serialize config")?;
    fs::write(path, data).with_context(|| format!("failed to write {path:?}"))?;

    log::info!("Saved model {model:?} to {path:?}");
    Ok(())
}
