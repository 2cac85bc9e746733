//! Audit log — SQLite-based operation history.
//!
//! Stores a record of every vault operation (add, update, remove,
//! collection changes) in a local SQLite database at
//! `<audit_dir>/audit.db`.  Only item names are recorded, never
//! passwords or other credential fields.
//!
//! Designed for graceful degradation: if the database can't be opened
//! or written to, operations silently continue without logging.

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::Connection;

use crate::config::Settings;
use crate::errors::{PassVaultError, Result};

/// A single audit log entry.
#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub operation: String,
    pub item: Option<String>,
    pub details: Option<String>,
}

/// SQLite-backed audit log.
pub struct AuditLog {
    conn: Connection,
}

impl AuditLog {
    /// Open (or create) the audit database at `<dir>/audit.db`.
    ///
    /// Returns `None` if the database can't be opened — callers should
    /// treat this as "audit logging unavailable" and continue normally.
    pub fn open(dir: &Path) -> Option<Self> {
        std::fs::create_dir_all(dir).ok()?;
        let db_path = dir.join("audit.db");
        let conn = Connection::open(&db_path).ok()?;

        // Restrictive permissions on the audit database (owner-only).
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            let _ = std::fs::set_permissions(&db_path, perms);
        }

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS audit_log (
                id        INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp TEXT NOT NULL,
                operation TEXT NOT NULL,
                item      TEXT,
                details   TEXT
            );",
        )
        .ok()?;

        Some(Self { conn })
    }

    /// Record an operation. Fire-and-forget — errors are silently
    /// ignored.
    pub fn log(&self, operation: &str, item: Option<&str>, details: Option<&str>) {
        let now = Utc::now().to_rfc3339();
        let _ = self.conn.execute(
            "INSERT INTO audit_log (timestamp, operation, item, details)
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![now, operation, item, details],
        );
    }

    /// The most recent `limit` entries, newest first.
    pub fn recent(&self, limit: usize) -> Result<Vec<AuditEntry>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, timestamp, operation, item, details
                 FROM audit_log ORDER BY id DESC LIMIT ?1",
            )
            .map_err(|e| PassVaultError::CommandFailed(format!("audit query: {e}")))?;

        let rows = stmt
            .query_map([limit as i64], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, Option<String>>(3)?,
                    row.get::<_, Option<String>>(4)?,
                ))
            })
            .map_err(|e| PassVaultError::CommandFailed(format!("audit query: {e}")))?;

        let mut entries = Vec::new();
        for row in rows {
            let (id, timestamp, operation, item, details) =
                row.map_err(|e| PassVaultError::CommandFailed(format!("audit row: {e}")))?;
            let timestamp = DateTime::parse_from_rfc3339(&timestamp)
                .map_err(|e| PassVaultError::CommandFailed(format!("audit timestamp: {e}")))?
                .with_timezone(&Utc);
            entries.push(AuditEntry {
                id,
                timestamp,
                operation,
                item,
                details,
            });
        }
        Ok(entries)
    }
}

/// Record an operation against the configured audit database.
/// Fire-and-forget: unavailability never fails the caller.
pub fn record(settings: &Settings, operation: &str, item: Option<&str>, details: Option<&str>) {
    if let Some(log) = AuditLog::open(&settings.audit_dir()) {
        log.log(operation, item, details);
    }
}
