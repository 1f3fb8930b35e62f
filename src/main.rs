use std::fs;
use std::io::{self, Write};

use anyhow::{Result, anyhow};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use commitgen::cli_args::{Cli, Command};
use commitgen::commit_box::GitCliStore;
use commitgen::config::{self, Config};
use commitgen::llm::openai::OpenAiClient;
use commitgen::pipeline::{self, GitCliDiff, Outcome};
use commitgen::{llm, logging};

fn main() {
    let cli = Cli::parse();
    let cfg = Config::from_sources(&cli);
    logging::init_logger(&cfg.log_level);

    let result = match &cli.command {
        Some(Command::Models) => run_models(&cfg),
        Some(Command::Logs) => run_logs(),
        None => run_generate(&cfg),
    };

    if let Err(err) = result {
        log::error!("{err:#}");
        eprintln!("{} {err:#}", "error:".red().bold());
        std::process::exit(1);
    }
}

/// Generate a commit message from the current diff and stage it as the next
/// commit's default message.
fn run_generate(cfg: &Config) -> Result<()> {
    llm::prompts::validate_templates()?;

    let backend = OpenAiClient::new(cfg);
    let progress = make_progress_bar();

    let outcome = pipeline::run(
        &GitCliDiff::new("."),
        &backend,
        &GitCliStore::new("."),
        &cfg.commit_language,
        &progress,
    );
    if outcome.is_err() {
        progress.finish_and_clear();
    }

    match outcome? {
        Outcome::NoChanges => {
            println!("No changes detected; nothing to summarize.");
        }
        Outcome::Generated(message) => {
            println!();
            println!("----- Commit Message Preview -----");
            println!("{message}");
            println!("----------------------------------");
            println!("Saved as the default message for your next `git commit`.");
        }
    }

    Ok(())
}

/// Fetch the model list, let the user pick one, persist the pick.
fn run_models(cfg: &Config) -> Result<()> {
    let client = OpenAiClient::new(cfg);
    let models = client.list_models()?;

    println!("Available models:");
    for (idx, model) in models.iter().enumerate() {
        let marker = if *model == cfg.model { "*" } else { " " };
        println!("{marker} {n}) {model}", n = idx + 1);
    }

    let answer = prompt_input(&format!(
        "Select a model [1-{}] (enter to cancel): ",
        models.len()
    ))?;

    // Cancelling the picker is not an error.
    if answer.is_empty() {
        log::info!("Model selection cancelled");
        return Ok(());
    }

    let choice: usize = answer
        .parse()
        .ok()
        .filter(|n| (1..=models.len()).contains(n))
        .ok_or_else(|| {
            anyhow!(
                "invalid selection {answer:?}; expected a number between 1 and {}",
                models.len()
            )
        })?;

    let selected = &models[choice - 1];
    config::save_model(selected)?;
    println!("Default model set to {selected}");

    Ok(())
}

/// Print the log file.
fn run_logs() -> Result<()> {
    let Some(path) = logging::log_file_path() else {
        println!("No log directory available on this system.");
        return Ok(());
    };

    if !path.exists() {
        println!("No logs yet ({} does not exist).", path.display());
        return Ok(());
    }

    let contents = fs::read_to_string(&path)?;
    println!("{}", path.display());
    print!("{contents}");

    Ok(())
}

/// Ask the user a question and return a trimmed input line.
fn prompt_input(prompt: &str) -> Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut buf = String::new();
    io::stdin().read_line(&mut buf)?;
    Ok(buf.trim().to_string())
}

fn make_progress_bar() -> ProgressBar {
    let bar = ProgressBar::new(100);
    bar.set_style(
        ProgressStyle::with_template("{bar:30.cyan/blue} {percent:>3}% {msg}")
            .expect("valid progress template"),
    );
    bar
}
