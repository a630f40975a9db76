//! Paperhound CLI — the main entry point.
//!
//! Commands:
//! - `ask`         — Run one message through the assistant
//! - `sessions`    — List stored sessions
//! - `export-logs` — Export a session's tool log

use clap::{Parser, Subcommand};

mod commands;
mod demo;

#[derive(Parser)]
#[command(
    name = "paperhound",
    about = "Paperhound — an LLM-driven document assistant",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Send one message to the assistant and print the outcome as JSON
    Ask {
        /// The message to process
        message: String,

        /// Resume an existing session
        #[arg(short, long)]
        session: Option<String>,

        /// User id recorded on the session
        #[arg(short, long, default_value = "default")]
        user: String,
    },

    /// List stored sessions with their turn counts
    Sessions,

    /// Export a session's tool log to a file
    ExportLogs {
        /// The session whose log to export
        #[arg(short, long)]
        session: String,

        /// Destination path
        path: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Ask {
            message,
            session,
            user,
        } => commands::ask::run(&message, session.as_deref(), &user).await?,
        Commands::Sessions => commands::sessions::run().await?,
        Commands::ExportLogs { session, path } => {
            commands::export_logs::run(&session, &path).await?
        }
    }

    Ok(())
}
