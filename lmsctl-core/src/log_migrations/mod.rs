//! Event log migrations - SQL embedded at compile time
//!
//! Each entry is (name, sql). Entries are applied in order and recorded in
//! `sys_migrations`; add new files at the end with the next NNN_ prefix.

pub const LOG_MIGRATIONS: &[(&str, &str)] = &[
    ("000_migrations.sql", include_str!("000_migrations.sql")),
    (
        "001_account_events.sql",
        include_str!("001_account_events.sql"),
    ),
];
