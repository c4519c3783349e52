//! Delete command - permanently delete the account

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use colored::Colorize;

use lmsctl_core::ports::ConfirmationPrompt;
use lmsctl_core::{DeletionStatus, LogEvent};

use super::{exit_status, get_context, get_logger, log_command, log_event};
use crate::output;
use crate::terminal::{Activity, AutoAccept, DialoguerPrompt, TerminalNavigator, TerminalNotifier};

const DELETING: &str = "Deleting account...";

pub async fn run(yes: bool) -> Result<ExitCode> {
    let ctx = get_context()?;
    let logger = get_logger();
    log_command(&logger, "delete");

    let activity = Activity::new();
    let prompt: Arc<dyn ConfirmationPrompt> = if yes {
        AutoAccept::new(activity.clone(), DELETING)
    } else {
        println!(
            "\n{}",
            "This removes your account and every course you created. It cannot be undone."
                .yellow()
        );
        DialoguerPrompt::new(activity.clone(), DELETING)
    };

    let controller = ctx.controller(
        TerminalNotifier::new(activity.clone()),
        TerminalNavigator::new(activity.clone()),
        prompt,
    );

    let result = controller.request_deletion().await;
    activity.stop();
    let status = result.context("Could not ask for confirmation")?;

    log_event(&logger, LogEvent::from_deletion(&status).with_command("delete"));

    let ok = match status {
        DeletionStatus::Declined => {
            println!("{}\n", "Cancelled".dimmed());
            true
        }
        DeletionStatus::Deleted { credential_cleared } => {
            if !credential_cleared {
                output::warning(&format!(
                    "The saved session at {} could not be removed. Run 'lmsctl session logout'.",
                    ctx.credential_store.path().display()
                ));
            }
            true
        }
        DeletionStatus::Busy | DeletionStatus::GatePending => {
            output::warning("A deletion is already in progress");
            false
        }
        DeletionStatus::Unauthenticated | DeletionStatus::Failed(_) => false,
    };

    Ok(exit_status(ok))
}
