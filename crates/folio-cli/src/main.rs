//! # folio CLI entry point
//!
//! Parses command-line arguments, resolves the client configuration and
//! dispatches to the subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use folio_cli::client_args::ClientArgs;
use folio_cli::contact::{run_contact, ContactArgs};
use folio_cli::projects::{run_projects, ProjectsArgs};
use folio_cli::queue::{run_drain, run_queue, DrainArgs, QueueArgs};

/// Folio command-line client.
///
/// Talks to a folio service, sends contact messages, and keeps messages that
/// could not be delivered in a local retry queue.
#[derive(Parser, Debug)]
#[command(name = "folio", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(flatten)]
    client: ClientArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the portfolio projects.
    Projects(ProjectsArgs),

    /// Retry queued messages, then send a new one.
    Contact(ContactArgs),

    /// Retry queued messages.
    Drain(DrainArgs),

    /// Show messages waiting for a retry.
    Queue(QueueArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = match cli.client.resolve() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(2);
        }
    };
    tracing::debug!(?config, "resolved client configuration");

    let result = match &cli.command {
        Commands::Projects(args) => run_projects(args, &config).await,
        Commands::Contact(args) => run_contact(args, &config).await,
        Commands::Drain(args) => run_drain(args, &config).await,
        Commands::Queue(args) => run_queue(args, &config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
