//! Terminal implementations of the UI ports

use std::sync::{Arc, Mutex};
use std::time::Duration;

use colored::Colorize;
use dialoguer::Select;
use indicatif::{ProgressBar, ProgressStyle};

use lmsctl_core::ports::{ConfirmationPrompt, Navigator, Notifier};
use lmsctl_core::{ConfirmationRequest, CoreResult, Destination, Error, GateChoice};

use crate::output;

/// Spinner shown while a request is in flight
///
/// Every port clears it before writing to the terminal.
#[derive(Default)]
pub struct Activity {
    bar: Mutex<Option<ProgressBar>>,
}

impl Activity {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn start(&self, message: &str) {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));

        if let Ok(mut slot) = self.bar.lock() {
            if let Some(previous) = slot.replace(bar) {
                previous.finish_and_clear();
            }
        }
    }

    pub fn stop(&self) {
        if let Ok(mut slot) = self.bar.lock() {
            if let Some(bar) = slot.take() {
                bar.finish_and_clear();
            }
        }
    }
}

/// Colored success/error lines
pub struct TerminalNotifier {
    activity: Arc<Activity>,
}

impl TerminalNotifier {
    pub fn new(activity: Arc<Activity>) -> Arc<Self> {
        Arc::new(Self { activity })
    }
}

impl Notifier for TerminalNotifier {
    fn success(&self, message: &str) {
        self.activity.stop();
        output::success(message);
    }

    fn error(&self, message: &str) {
        self.activity.stop();
        output::error(message);
    }
}

/// There are no pages to move to in a terminal; print what to do next instead
pub struct TerminalNavigator {
    activity: Arc<Activity>,
}

impl TerminalNavigator {
    pub fn new(activity: Arc<Activity>) -> Arc<Self> {
        Arc::new(Self { activity })
    }
}

impl Navigator for TerminalNavigator {
    fn go_to(&self, destination: Destination) {
        self.activity.stop();
        output::hint(destination_hint(destination));
    }
}

fn destination_hint(destination: Destination) -> &'static str {
    match destination {
        Destination::Profile => "Your profile is up to date. Run 'lmsctl update' to change it again.",
        Destination::SignIn => {
            "Sign in to the LMS again, then run 'lmsctl session login' with the new token."
        }
        Destination::SignUp => "You have been signed out. Create a new account to use the LMS again.",
    }
}

/// Interactive two-choice prompt; Esc or q counts as declining
pub struct DialoguerPrompt {
    activity: Arc<Activity>,
    on_accept: String,
}

impl DialoguerPrompt {
    /// `on_accept` is the spinner message shown once the user accepts
    pub fn new(activity: Arc<Activity>, on_accept: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            activity,
            on_accept: on_accept.into(),
        })
    }
}

impl ConfirmationPrompt for DialoguerPrompt {
    fn confirm(&self, request: &ConfirmationRequest) -> CoreResult<GateChoice> {
        self.activity.stop();
        println!("\n{}", request.title.yellow().bold());

        let items = [request.accept_label.as_str(), request.decline_label.as_str()];
        let selection = Select::new()
            .with_prompt(&request.message)
            .items(&items)
            .default(1)
            .interact_opt()
            .map_err(|e| Error::prompt(e.to_string()))?;

        if selection == Some(0) {
            self.activity.start(&self.on_accept);
            Ok(GateChoice::Accept)
        } else {
            Ok(GateChoice::Decline)
        }
    }
}

/// Answers every confirmation with its accept action (`--yes`)
pub struct AutoAccept {
    activity: Arc<Activity>,
    on_accept: String,
}

impl AutoAccept {
    pub fn new(activity: Arc<Activity>, on_accept: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            activity,
            on_accept: on_accept.into(),
        })
    }
}

impl ConfirmationPrompt for AutoAccept {
    fn confirm(&self, request: &ConfirmationRequest) -> CoreResult<GateChoice> {
        output::hint(&format!(
            "{} {} (--yes)",
            request.message, request.accept_label
        ));
        self.activity.start(&self.on_accept);
        Ok(GateChoice::Accept)
    }
}
