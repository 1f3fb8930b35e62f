use clap::{Parser, Subcommand};

/// CLI options
#[derive(Parser, Debug)]
#[command(
    name = "commitgen",
    version,
    about = "Generate Git commit messages from your diff with an OpenAI-compatible API"
)]
pub struct Cli {
    /// Chat-completions endpoint URL
    #[arg(long, env = "COMMITGEN_API_URL", global = true)]
    pub api_url: Option<String>,

    /// API key (otherwise uses OPENAI_API_KEY or the config file)
    #[arg(long, env = "OPENAI_API_KEY", global = true)]
    pub api_key: Option<String>,

    /// Model name to use (e.g. gpt-4o-mini)
    #[arg(long, env = "COMMITGEN_MODEL", global = true)]
    pub model: Option<String>,

    /// Output language for the commit message (e.g. English, Chinese)
    #[arg(long, env = "COMMITGEN_LANGUAGE", global = true)]
    pub language: Option<String>,

    /// Log level: DEBUG, INFO, WARN, or ERROR
    #[arg(long, env = "COMMITGEN_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Subcommand; without one, generates a commit message
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the models the API offers and save your pick to the config file
    Models,

    /// Print the log file
    Logs,
}
