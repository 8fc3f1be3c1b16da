use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io;

use crate::backend::ProxyBackend;

pub fn generate_completions(shell: Shell) {
    let mut cmd = crate::Cli::command();
    generate(shell, &mut cmd, "reposearch", &mut io::stdout());

    eprintln!();
    eprintln!("Save the output to the appropriate location for your shell:");
    match shell {
        Shell::Bash => {
            eprintln!("  reposearch completions bash > ~/.local/share/bash-completion/completions/reposearch");
        }
        Shell::Zsh => {
            eprintln!("  reposearch completions zsh > ~/.zsh/completions/_reposearch");
            eprintln!("  # (Add 'fpath=(~/.zsh/completions $fpath)' before 'compinit' in .zshrc)");
        }
        Shell::Fish => {
            eprintln!("  reposearch completions fish > ~/.config/fish/completions/reposearch.fish");
        }
        _ => {}
    }
}

/// Pings the backend search service.
pub async fn health_check(search_url: &str) {
    let backend = match ProxyBackend::new(search_url) {
        Ok(backend) => backend,
        Err(e) => {
            eprintln!("Can't create HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    match backend.health().await {
        Ok(report) => {
            println!("{}: {}", search_url, report.status);
            if let Some(at) = report
                .timestamp
                .and_then(|ts| chrono::DateTime::from_timestamp(ts as i64, 0))
            {
                println!("  Reported at: {}", at.to_rfc3339());
            }
            if report.status != "healthy" {
                std::process::exit(1);
            }
        }
        Err(e) => {
            tracing::error!(url = search_url, "Health check failed: {}", e);
            eprintln!("Search service unreachable ({})", e.kind());
            std::process::exit(1);
        }
    }
}
