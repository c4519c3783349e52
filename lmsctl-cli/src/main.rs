//! lmsctl CLI - LMS account self-service in your terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;
mod terminal;

use commands::{config, delete, logs, session, update};

/// lmsctl - manage your LMS account from the terminal
#[derive(Parser)]
#[command(name = "lmsctl", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Update your display name and password
    Update {
        /// New display name (prompted if omitted)
        #[arg(long)]
        name: Option<String>,
        /// Current password (prompted if omitted)
        #[arg(long, env = "LMSCTL_OLD_PASSWORD", hide_env_values = true)]
        old_password: Option<String>,
        /// New password (prompted if omitted)
        #[arg(long, env = "LMSCTL_NEW_PASSWORD", hide_env_values = true)]
        new_password: Option<String>,
        /// New password again (prompted if omitted)
        #[arg(long)]
        confirm_password: Option<String>,
    },

    /// Permanently delete your account and the courses you created
    Delete {
        /// Answer the confirmation with "Yes" without prompting
        #[arg(long, short)]
        yes: bool,
    },

    /// Manage the stored sign-in session
    Session {
        #[command(subcommand)]
        command: session::SessionCommands,
    },

    /// Show or change client settings
    Config {
        #[command(subcommand)]
        command: config::ConfigCommands,
    },

    /// View and manage the local event log
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Update {
            name,
            old_password,
            new_password,
            confirm_password,
        } => {
            update::run(update::UpdateArgs {
                name,
                old_password,
                new_password,
                confirm_password,
            })
            .await
        }
        Commands::Delete { yes } => delete::run(yes).await,
        Commands::Session { command } => session::run(command).map(|()| ExitCode::SUCCESS),
        Commands::Config { command } => config::run(command).map(|()| ExitCode::SUCCESS),
        Commands::Logs { command } => logs::run(command).map(|()| ExitCode::SUCCESS),
    }
}
