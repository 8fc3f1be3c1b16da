mod backend;
#[cfg(test)]
mod capture;
mod commands;
mod config;
mod error;
mod github;
mod render;
mod search;
mod session;
mod types;
mod upload;

use clap::{CommandFactory, Parser, Subcommand, ValueHint};
use clap_complete::Shell;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use config::{BackendKind, Config};

#[derive(Parser)]
#[command(name = "reposearch")]
#[command(about = "Search GitHub repositories without leaving the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Override the configured search backend
    #[arg(long, global = true, value_enum)]
    backend: Option<BackendKind>,

    /// Log debug output to stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search repositories, most-starred first (top 10)
    #[command(short_flag = 's', visible_alias = "find")]
    Search {
        /// Free-text query (e.g., async runtime)
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
        /// Print results as JSON instead of cards
        #[arg(long)]
        json: bool,
    },
    /// Keep a prompt open and search as you type queries
    #[command(short_flag = 'i', visible_alias = "repl")]
    Interactive,
    /// Validate a repository CSV and send it to the ingestion service
    #[command(short_flag = 'u')]
    Upload {
        /// CSV with columns Name,Description,URL,Size,Stars,Forks,Issues,Watchers,Language,Topics
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },
    /// Check that the backend search service is up
    Health,
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Silent unless asked: failure causes only reach the terminal with `-v` or `RUST_LOG`.
fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "off"
    }
}

fn init_tracing(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(verbose))),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn display_banner() {
    println!("reposearch {}: GitHub repository search\n", env!("CARGO_PKG_VERSION"));
    let mut cmd = Cli::command();
    let _ = cmd.print_help();
    println!();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = Config::load()?;
    if let Some(backend) = cli.backend {
        config.backend = backend;
    }
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        None => display_banner(),
        Some(Commands::Search { query, json }) => {
            let backend = backend::from_config(&config)?;
            commands::search_repos(backend.as_ref(), &query.join(" "), json).await;
        }
        Some(Commands::Interactive) => {
            let backend = backend::from_config(&config)?;
            commands::interactive(backend).await;
        }
        Some(Commands::Upload { file }) => {
            commands::upload_csv(&file, config.ingest_service_url()).await;
        }
        Some(Commands::Health) => commands::health_check(config.search_service_url()).await,
        Some(Commands::Completions { shell }) => commands::generate_completions(shell),
    }

    Ok(())
}
