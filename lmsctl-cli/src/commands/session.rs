//! Session command - store, inspect and forget the sign-in token

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use dialoguer::Password;

use lmsctl_core::adapters::credential_file::FileCredentialStore;
use lmsctl_core::ports::CredentialStore;
use lmsctl_core::SessionCredential;

use super::{get_context, get_lmsctl_dir, get_logger, log_command};
use crate::output;

#[derive(Subcommand)]
pub enum SessionCommands {
    /// Save the token issued at sign-in
    Login {
        /// Token value (prompted if omitted)
        token: Option<String>,
    },
    /// Forget the stored token
    Logout,
    /// Show whether a token is stored
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(command: SessionCommands) -> Result<()> {
    let logger = get_logger();

    match command {
        SessionCommands::Login { token } => {
            log_command(&logger, "session login");
            let token = match token {
                Some(t) => t,
                None => Password::new().with_prompt("Token").interact()?,
            };

            let store = store()?;
            store
                .save(&SessionCredential::new(token.trim()))
                .context("Failed to save session")?;
            output::success(&format!("Session saved to {}", store.path().display()));
        }
        SessionCommands::Logout => {
            log_command(&logger, "session logout");
            store()?.clear().context("Failed to clear session")?;
            output::success("Signed out");
        }
        SessionCommands::Status { json } => {
            let ctx = get_context()?;
            let credential = ctx
                .credential_store
                .get()
                .context("Failed to read session")?
                .filter(|c| !c.token().trim().is_empty());

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "signed_in": credential.is_some(),
                        "session_path": ctx.credential_store.path().to_string_lossy(),
                        "api_base_url": ctx.config.api_base_url,
                    }))?
                );
                return Ok(());
            }

            match credential {
                Some(c) => println!(
                    "{} {}",
                    "Signed in".green(),
                    format!("(token {})", output::mask_secret(c.token())).dimmed()
                ),
                None => println!("{}", "Not signed in".yellow()),
            }
            println!("  API: {}", ctx.config.api_base_url);
            println!("  Session file: {}", ctx.credential_store.path().display());
        }
    }

    Ok(())
}

fn store() -> Result<FileCredentialStore> {
    Ok(FileCredentialStore::new(&get_lmsctl_dir()?))
}
