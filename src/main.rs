//! ArchLens CLI - project architecture and Next.js trend digests from Gemini
//!
//! The application logic is contained in lib.rs, and this file is responsible
//! for parsing arguments, rendering results and handling top-level errors.

use anyhow::{anyhow, bail, Context};
use archlens::{AgentError, ArchLens, ArchitectureSpec, Config, ErrorKind, TrendDigest};
use clap::{CommandFactory, Parser, Subcommand};
use colored::Colorize;
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "archlens")]
#[command(author, version, about = "Project architecture and ecosystem trends from Gemini", long_about = None)]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
    /// Config file to use instead of archlens.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Design a project architecture for an app description
    Architect {
        /// What the app should do; asked for interactively when omitted
        prompt: Option<String>,
    },
    /// Show current ecosystem trends with their sources
    Trends,
    /// Generate shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Architect { prompt } => {
            let prompt = match prompt {
                Some(prompt) => prompt,
                None => dialoguer::Input::<String>::new()
                    .with_prompt("Describe your app")
                    .interact_text()?,
            };
            let prompt = prompt.trim();
            if prompt.is_empty() {
                bail!("prompt must not be empty");
            }

            let config = load_config(cli.config.as_ref())?;
            let deadline = config.cli.request_timeout_secs;
            let lens = ArchLens::from_config(config)?;

            if !cli.json {
                eprintln!("Designing architecture for: {}", prompt);
            }
            let spec = with_deadline(deadline, lens.generate_architecture(prompt))
                .await?
                .map_err(report)?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&spec)?);
            } else {
                print_architecture(&spec);
            }
        }
        Commands::Trends => {
            let config = load_config(cli.config.as_ref())?;
            let deadline = config.cli.request_timeout_secs;
            let lens = ArchLens::from_config(config)?;

            let digest = with_deadline(deadline, lens.fetch_trends())
                .await?
                .map_err(report)?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&digest)?);
            } else {
                print_trends(&digest);
            }
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "archlens", &mut std::io::stdout());
        }
    }

    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load()?,
    };
    if config.api_key().is_empty() {
        tracing::warn!("{} is not set; Gemini will reject the request", archlens::config::API_KEY_VAR);
    }
    Ok(config)
}

/// Bound a call by the configured deadline, if any
async fn with_deadline<F: Future>(secs: Option<u64>, call: F) -> anyhow::Result<F::Output> {
    match secs {
        Some(secs) => tokio::time::timeout(Duration::from_secs(secs), call)
            .await
            .map_err(|_| anyhow!("no reply from Gemini within {}s", secs)),
        None => Ok(call.await),
    }
}

/// Attach a user-facing hint matching the failure category
fn report(err: AgentError) -> anyhow::Error {
    let hint = match err.kind() {
        ErrorKind::TransportFailure => "request to Gemini failed, check GEMINI_API_KEY and connectivity",
        ErrorKind::ResultMalformed => "Gemini replied, but not with a usable architecture; try again",
    };
    anyhow::Error::new(err).context(hint)
}

fn print_architecture(spec: &ArchitectureSpec) {
    println!("\n=== {} ===\n", spec.project_name.bold());
    println!("{}\n", spec.description);

    println!("{}", "📁 Folder Structure:".cyan());
    for line in spec.render_tree().lines() {
        println!("  {}", line);
    }

    if !spec.tech_stack.is_empty() {
        println!("\n{}", "🧰 Tech Stack:".cyan());
        println!("  {}", spec.tech_stack.join(", "));
    }

    if !spec.key_components.is_empty() {
        println!("\n{}", "🧩 Key Components:".cyan());
        for component in &spec.key_components {
            println!("  • {}: {}", component.name.bold(), component.purpose);
        }
    }
}

fn print_trends(digest: &TrendDigest) {
    match &digest.text {
        Some(text) => println!("{}", text),
        None => println!("{}", "No trend summary returned.".yellow()),
    }

    if !digest.sources.is_empty() {
        println!("\n{}", "🔗 Sources:".cyan());
        for (idx, source) in digest.sources.iter().enumerate() {
            println!("  {}. {} ({})", idx + 1, source.title, source.uri.dimmed());
        }
    }
}
