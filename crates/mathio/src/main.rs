// SPDX-FileCopyrightText: 2026 Mathio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mathio - a routing math assistant.
//!
//! This is the binary entry point. Per query, the engine decides whether to
//! consult the curated knowledge base, the web reference library, both, or
//! fall back to the direct solver, and records every decision for analysis.

mod app;
mod report;
mod shell;

use clap::{Parser, Subcommand};

/// Mathio - a routing math assistant.
#[derive(Parser, Debug)]
#[command(name = "mathio", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Launch an interactive REPL session.
    Shell,
    /// Answer a single query and print the response envelope as JSON.
    Query {
        /// The math question to route and answer.
        text: String,
    },
    /// Show the feedback analysis from the persisted feedback store.
    Analysis {
        /// Emit structured JSON instead of the human-readable report.
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(config: &mathio_config::MathioConfig) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.agent.log_level.clone()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match mathio_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            mathio_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config);

    let result = match cli.command {
        Some(Commands::Query { text }) => app::run_query(config, &text).await,
        Some(Commands::Analysis { json }) => report::run_analysis(config, json),
        Some(Commands::Shell) | None => shell::run_shell(config).await,
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
