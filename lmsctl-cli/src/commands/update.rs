//! Update command - change display name and password

use std::process::ExitCode;

use anyhow::Result;
use dialoguer::{Input, Password};

use lmsctl_core::{
    DraftField, LogEvent, MutationOutcome, ProfileForm, ProfileUpdateDraft, UpdateStatus,
};

use super::{exit_status, get_context, get_logger, log_command, log_event};
use crate::output;
use crate::terminal::{Activity, DialoguerPrompt, TerminalNavigator, TerminalNotifier};

pub struct UpdateArgs {
    pub name: Option<String>,
    pub old_password: Option<String>,
    pub new_password: Option<String>,
    pub confirm_password: Option<String>,
}

pub async fn run(args: UpdateArgs) -> Result<ExitCode> {
    let ctx = get_context()?;
    let logger = get_logger();
    log_command(&logger, "update");

    let mut form = ProfileForm::new(read_draft(args)?);

    let activity = Activity::new();
    let controller = ctx.controller(
        TerminalNotifier::new(activity.clone()),
        TerminalNavigator::new(activity.clone()),
        DialoguerPrompt::new(activity.clone(), "Updating profile..."),
    );

    activity.start("Updating profile...");
    let status = controller.submit_update(&mut form).await;
    activity.stop();

    if let Some(hint) = retry_hint(&form) {
        output::hint(&hint);
    }
    log_event(&logger, LogEvent::from_update(&status).with_command("update"));

    Ok(exit_status(matches!(
        status,
        UpdateStatus::Completed(MutationOutcome::Success(_))
    )))
}

/// What to do after the server rejected the form
fn retry_hint(form: &ProfileForm) -> Option<String> {
    form.error().map(|message| {
        format!(
            "Not saved: {}. Correct the values and run 'lmsctl update' again.",
            message
        )
    })
}

/// Fill the draft from flags, prompting for anything missing
fn read_draft(args: UpdateArgs) -> Result<ProfileUpdateDraft> {
    let name = match args.name {
        Some(n) => n,
        None => Input::new().with_prompt("Name").interact_text()?,
    };
    let old_password = match args.old_password {
        Some(p) => p,
        None => Password::new().with_prompt("Current password").interact()?,
    };
    let new_password = match args.new_password {
        Some(p) => p,
        None => Password::new().with_prompt("New password").interact()?,
    };
    let confirm_password = match args.confirm_password {
        Some(p) => p,
        None => Password::new().with_prompt("Confirm new password").interact()?,
    };

    let mut draft = ProfileUpdateDraft::new();
    draft.set(DraftField::Name, name);
    draft.set(DraftField::OldPassword, old_password);
    draft.set(DraftField::NewPassword, new_password);
    draft.set(DraftField::ConfirmPassword, confirm_password);
    Ok(draft)
}
