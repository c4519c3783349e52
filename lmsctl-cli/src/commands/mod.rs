//! CLI command implementations

pub mod config;
pub mod delete;
pub mod logs;
pub mod session;
pub mod update;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use lmsctl_core::config::Config;
use lmsctl_core::{LmsContext, LogEvent, LoggingService};

/// Get the logging service for CLI operations
///
/// Returns None if logging fails to initialize (shouldn't block operations)
pub fn get_logger() -> Option<LoggingService> {
    let lmsctl_dir = get_lmsctl_dir().ok()?;
    std::fs::create_dir_all(&lmsctl_dir).ok()?;
    LoggingService::new(&lmsctl_dir, env!("CARGO_PKG_VERSION")).ok()
}

/// Log an event, ignoring any errors (logging should never break the app)
pub fn log_event(logger: &Option<LoggingService>, event: LogEvent) {
    if let Some(l) = logger {
        let _ = l.log(event);
    }
}

/// Record that a command ran, ignoring any errors
pub fn log_command(logger: &Option<LoggingService>, command: &str) {
    if let Some(l) = logger {
        let _ = l.log_command(command);
    }
}

/// Get the lmsctl directory from environment or default
pub fn get_lmsctl_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("LMSCTL_DIR") {
        return Ok(PathBuf::from(dir));
    }
    let home = dirs::home_dir().context("Could not find home directory")?;
    Ok(home.join(".lmsctl"))
}

/// Get or create lmsctl context
pub fn get_context() -> Result<LmsContext> {
    let lmsctl_dir = get_lmsctl_dir()?;

    std::fs::create_dir_all(&lmsctl_dir)
        .with_context(|| format!("Failed to create lmsctl directory: {:?}", lmsctl_dir))?;

    let ctx = LmsContext::new(&lmsctl_dir).context("Failed to initialize lmsctl context")?;
    warn_rejected_url(&ctx.config);
    Ok(ctx)
}

/// Tell the user when a stored API URL was ignored
pub fn warn_rejected_url(config: &Config) {
    if let Some(url) = &config.rejected_base_url {
        let message = format!(
            "Ignoring invalid API base URL '{}' in settings.json, using {}. Fix it with 'lmsctl config set-api-url'.",
            url, config.api_base_url
        );
        eprintln!("{}", message.yellow());
    }
}

/// Zero when the flow reached its intended end, one otherwise
pub fn exit_status(ok: bool) -> ExitCode {
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
