//! Event log - structured account events stored in logs.duckdb
//!
//! Records what happened to each account flow (updated, rejected, deleted,
//! declined, ...) for troubleshooting. Names, passwords and tokens are never
//! written; error messages are the user-facing notification text.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Result};
use duckdb::Connection;
use serde::{Deserialize, Serialize};

use crate::domain::{Destination, MutationOutcome};
use crate::log_migrations::LOG_MIGRATIONS;
use crate::services::account::{messages, DeletionStatus, UpdateStatus};
use crate::services::session::NO_TOKEN_MESSAGE;

static ID_COUNTER: AtomicU64 = AtomicU64::new(0);

fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default()
}

/// Millisecond timestamp in the high bits, a rolling counter in the low 16
fn generate_id() -> u64 {
    let counter = ID_COUNTER.fetch_add(1, Ordering::Relaxed) & 0xFFFF;
    ((now_ms() as u64) << 16) | counter
}

fn detect_platform() -> &'static str {
    if cfg!(target_os = "macos") {
        "macos"
    } else if cfg!(target_os = "windows") {
        "windows"
    } else if cfg!(target_os = "linux") {
        "linux"
    } else {
        "unknown"
    }
}

/// An event to record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEvent {
    pub event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl LogEvent {
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            command: None,
            destination: None,
            error_message: None,
        }
    }

    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    /// Where the flow navigated to
    pub fn with_destination(mut self, destination: Destination) -> Self {
        self.destination = Some(destination.path().to_string());
        self
    }

    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    /// Event describing how an update attempt ended
    pub fn from_update(status: &UpdateStatus) -> Self {
        match status {
            UpdateStatus::Busy => Self::new("profile_update_busy"),
            UpdateStatus::PasswordMismatch => {
                Self::new("profile_update_mismatch").with_error(messages::PASSWORD_MISMATCH)
            }
            UpdateStatus::Unauthenticated => Self::new("session_missing")
                .with_destination(Destination::SignIn)
                .with_error(NO_TOKEN_MESSAGE),
            UpdateStatus::Completed(outcome) => match outcome {
                MutationOutcome::Success(_) => {
                    Self::new("profile_update_succeeded").with_destination(Destination::Profile)
                }
                MutationOutcome::ApplicationRejected(message) => {
                    Self::new("profile_update_rejected").with_error(message.clone())
                }
                MutationOutcome::Unauthorized => Self::new("profile_update_unauthorized")
                    .with_destination(Destination::SignIn)
                    .with_error(messages::SESSION_EXPIRED),
                MutationOutcome::TransportFailure => {
                    Self::new("profile_update_failed").with_error(messages::UPDATE_FAILED)
                }
            },
        }
    }

    /// Event describing how a deletion attempt ended
    pub fn from_deletion(status: &DeletionStatus) -> Self {
        match status {
            DeletionStatus::Busy | DeletionStatus::GatePending => {
                Self::new("account_deletion_busy")
            }
            DeletionStatus::Declined => Self::new("account_deletion_declined"),
            DeletionStatus::Unauthenticated => Self::new("session_missing")
                .with_destination(Destination::SignIn)
                .with_error(NO_TOKEN_MESSAGE),
            DeletionStatus::Deleted { credential_cleared } => {
                let event = Self::new("account_deleted").with_destination(Destination::SignUp);
                if *credential_cleared {
                    event
                } else {
                    event.with_error("Stored session could not be cleared")
                }
            }
            DeletionStatus::Failed(_) => {
                Self::new("account_deletion_failed").with_error(messages::DELETE_FAILED)
            }
        }
    }
}

/// A stored log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: u64,
    pub timestamp: i64,
    pub app_version: String,
    pub platform: String,
    pub event: String,
    pub command: Option<String>,
    pub destination: Option<String>,
    pub error_message: Option<String>,
}

const SELECT_COLUMNS: &str = "SELECT id, timestamp, app_version, platform, event, command, destination, error_message FROM sys_logs";

/// Service for structured event logging
pub struct LoggingService {
    conn: Mutex<Connection>,
    db_path: PathBuf,
    app_version: String,
    platform: &'static str,
}

impl LoggingService {
    /// Open (or create) logs.duckdb in the lmsctl directory and apply
    /// pending migrations
    pub fn new(lmsctl_dir: &Path, app_version: impl Into<String>) -> Result<Self> {
        let db_path = lmsctl_dir.join("logs.duckdb");
        let conn = Connection::open(&db_path)?;

        let service = Self {
            conn: Mutex::new(conn),
            db_path,
            app_version: app_version.into(),
            platform: detect_platform(),
        };
        service.run_migrations()?;

        Ok(service)
    }

    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn.lock().map_err(|e| anyhow!("Lock poisoned: {}", e))?;

        let bootstrapped: bool = conn
            .query_row(
                "SELECT COUNT(*) > 0 FROM information_schema.tables WHERE table_name = 'sys_migrations'",
                [],
                |row| row.get(0),
            )
            .unwrap_or(false);

        let applied: Vec<String> = if bootstrapped {
            let mut stmt = conn.prepare("SELECT migration_name FROM sys_migrations")?;
            let names: Vec<String> = stmt
                .query_map([], |row| row.get(0))?
                .filter_map(|r| r.ok())
                .collect();
            names
        } else {
            Vec::new()
        };

        for (name, sql) in LOG_MIGRATIONS {
            if applied.iter().any(|a| a.as_str() == *name) {
                continue;
            }
            conn.execute_batch(sql)?;
            conn.execute(
                "INSERT INTO sys_migrations (migration_name) VALUES (?)",
                [name],
            )?;
        }

        Ok(())
    }

    /// Record an event; version and platform are filled in by the service
    pub fn log(&self, event: LogEvent) -> Result<()> {
        let conn = self.conn.lock().map_err(|e| anyhow!("Lock poisoned: {}", e))?;

        conn.execute(
            r#"
            INSERT INTO sys_logs (
                id, timestamp, app_version, platform,
                event, command, destination, error_message
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            duckdb::params![
                generate_id(),
                now_ms(),
                &self.app_version,
                self.platform,
                &event.event,
                &event.command,
                &event.destination,
                &event.error_message,
            ],
        )?;

        Ok(())
    }

    pub fn log_command(&self, command: &str) -> Result<()> {
        self.log(LogEvent::new("command_executed").with_command(command))
    }

    /// Most recent entries first
    pub fn get_recent(&self, limit: usize) -> Result<Vec<LogEntry>> {
        self.query(&format!("{SELECT_COLUMNS} ORDER BY timestamp DESC, id DESC LIMIT ?"), limit)
    }

    /// Most recent entries that carry an error message
    pub fn get_errors(&self, limit: usize) -> Result<Vec<LogEntry>> {
        self.query(
            &format!(
                "{SELECT_COLUMNS} WHERE error_message IS NOT NULL ORDER BY timestamp DESC, id DESC LIMIT ?"
            ),
            limit,
        )
    }

    fn query(&self, sql: &str, limit: usize) -> Result<Vec<LogEntry>> {
        let conn = self.conn.lock().map_err(|e| anyhow!("Lock poisoned: {}", e))?;
        let mut stmt = conn.prepare(sql)?;

        let entries = stmt
            .query_map([limit as i64], |row| {
                Ok(LogEntry {
                    id: row.get(0)?,
                    timestamp: row.get(1)?,
                    app_version: row.get(2)?,
                    platform: row.get(3)?,
                    event: row.get(4)?,
                    command: row.get(5)?,
                    destination: row.get(6)?,
                    error_message: row.get(7)?,
                })
            })?
            .filter_map(|r| r.ok())
            .collect();

        Ok(entries)
    }

    pub fn count(&self) -> Result<u64> {
        let conn = self.conn.lock().map_err(|e| anyhow!("Lock poisoned: {}", e))?;
        let count: u64 = conn.query_row("SELECT COUNT(*) FROM sys_logs", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Delete entries older than `timestamp_ms` (unix millis)
    pub fn delete_before(&self, timestamp_ms: i64) -> Result<u64> {
        let conn = self.conn.lock().map_err(|e| anyhow!("Lock poisoned: {}", e))?;
        let deleted = conn.execute("DELETE FROM sys_logs WHERE timestamp < ?", [timestamp_ms])?;
        Ok(deleted as u64)
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MutationResponse;
    use tempfile::tempdir;

    #[test]
    fn test_creates_database() {
        let dir = tempdir().unwrap();
        let service = LoggingService::new(dir.path(), "1.0.0").unwrap();
        assert!(service.db_path().exists());
    }

    #[test]
    fn test_reopen_skips_applied_migrations() {
        let dir = tempdir().unwrap();
        {
            let service = LoggingService::new(dir.path(), "1.0.0").unwrap();
            service.log(LogEvent::new("first")).unwrap();
        }
        let service = LoggingService::new(dir.path(), "1.0.0").unwrap();
        assert_eq!(service.count().unwrap(), 1);
    }

    #[test]
    fn test_log_command() {
        let dir = tempdir().unwrap();
        let service = LoggingService::new(dir.path(), "1.2.3").unwrap();

        service.log_command("update").unwrap();

        let entries = service.get_recent(10).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].event, "command_executed");
        assert_eq!(entries[0].command.as_deref(), Some("update"));
        assert_eq!(entries[0].app_version, "1.2.3");
    }

    #[test]
    fn test_errors_filter() {
        let dir = tempdir().unwrap();
        let service = LoggingService::new(dir.path(), "1.0.0").unwrap();

        service.log(LogEvent::new("account_deletion_declined")).unwrap();
        service
            .log(LogEvent::new("account_deletion_failed").with_error(messages::DELETE_FAILED))
            .unwrap();

        let errors = service.get_errors(10).unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].event, "account_deletion_failed");
        assert_eq!(errors[0].error_message.as_deref(), Some(messages::DELETE_FAILED));
    }

    #[test]
    fn test_count_and_delete() {
        let dir = tempdir().unwrap();
        let service = LoggingService::new(dir.path(), "1.0.0").unwrap();

        service.log(LogEvent::new("a")).unwrap();
        service.log(LogEvent::new("b")).unwrap();
        assert_eq!(service.count().unwrap(), 2);

        let deleted = service.delete_before(now_ms() + 1000).unwrap();
        assert_eq!(deleted, 2);
        assert_eq!(service.count().unwrap(), 0);
    }

    #[test]
    fn test_event_from_update_status() {
        let ok = LogEvent::from_update(&UpdateStatus::Completed(MutationOutcome::Success(
            MutationResponse::ok(),
        )));
        assert_eq!(ok.event, "profile_update_succeeded");
        assert_eq!(ok.destination.as_deref(), Some("/instructorpage/profile"));
        assert!(ok.error_message.is_none());

        let rejected = LogEvent::from_update(&UpdateStatus::Completed(
            MutationOutcome::ApplicationRejected("Old password is incorrect".to_string()),
        ));
        assert_eq!(rejected.event, "profile_update_rejected");
        assert_eq!(rejected.error_message.as_deref(), Some("Old password is incorrect"));
    }

    #[test]
    fn test_event_from_deletion_status() {
        let deleted = LogEvent::from_deletion(&DeletionStatus::Deleted {
            credential_cleared: true,
        });
        assert_eq!(deleted.event, "account_deleted");
        assert_eq!(deleted.destination.as_deref(), Some("/signup"));

        let declined = LogEvent::from_deletion(&DeletionStatus::Declined);
        assert_eq!(declined.event, "account_deletion_declined");
        assert!(declined.error_message.is_none());
    }
}
