//! Audit log — SQLite-based operation history.
//!
//! Stores a record of vault operations (setup, failed unlocks, add,
//! delete) in a local SQLite database at `<vault_dir>/audit.db`.
//! Only service names are recorded, never usernames or passwords.
//!
//! Designed for graceful degradation: if the database can't be opened or
//! written to, operations silently continue without logging.  Without
//! the `audit-log` feature, `log_audit` is a no-op.

use std::path::Path;

#[cfg(feature = "audit-log")]
pub use sqlite::{AuditEntry, AuditLog};

/// Convenience helper: log an audit event for the vault in `vault_dir`.
///
/// Opens the audit database, logs the event, and ignores any errors.
/// This is safe to call from any command — it never fails the parent operation.
pub fn log_audit(vault_dir: &Path, op: &str, service: Option<&str>, details: Option<&str>) {
    #[cfg(feature = "audit-log")]
    {
        if let Some(audit) = AuditLog::open(vault_dir) {
            audit.log(op, service, details);
        } else {
            tracing::debug!(dir = %vault_dir.display(), "audit log unavailable");
        }
    }

    #[cfg(not(feature = "audit-log"))]
    let _ = (vault_dir, op, service, details);
}

#[cfg(feature = "audit-log")]
mod sqlite {
    use std::path::{Path, PathBuf};

    use chrono::{DateTime, Utc};
    use rusqlite::Connection;

    use crate::errors::{PassVaultError, Result};

    /// A single audit log entry.
    #[derive(Debug, Clone)]
    pub struct AuditEntry {
        pub id: i64,
        pub timestamp: DateTime<Utc>,
        pub operation: String,
        pub service: Option<String>,
        pub details: Option<String>,
    }

    /// SQLite-backed audit log.
    pub struct AuditLog {
        conn: Connection,
    }

    impl AuditLog {
        /// Open (or create) the audit database at `<vault_dir>/audit.db`.
        ///
        /// Returns `None` if the database can't be opened — callers should
        /// treat this as "audit logging unavailable" and continue normally.
        pub fn open(vault_dir: &Path) -> Option<Self> {
            let db_path = Self::db_path(vault_dir);
            let conn = Connection::open(&db_path).ok()?;

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let perms = std::fs::Permissions::from_mode(0o600);
                let _ = std::fs::set_permissions(&db_path, perms);
            }

            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS audit_log (
                    id          INTEGER PRIMARY KEY AUTOINCREMENT,
                    timestamp   TEXT NOT NULL,
                    operation   TEXT NOT NULL,
                    service     TEXT,
                    details     TEXT
                );",
            )
            .ok()?;

            Some(Self { conn })
        }

        /// Record an operation. Fire-and-forget — errors are ignored.
        pub fn log(&self, operation: &str, service: Option<&str>, details: Option<&str>) {
            let now = Utc::now().to_rfc3339();
            let _ = self.conn.execute(
                "INSERT INTO audit_log (timestamp, operation, service, details)
                 VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![now, operation, service, details],
            );
        }

        /// Query recent audit entries, most recent first.
        ///
        /// - `limit`: maximum number of entries to return.
        /// - `since`: if provided, only return entries at or after this time.
        pub fn query(&self, limit: usize, since: Option<DateTime<Utc>>) -> Result<Vec<AuditEntry>> {
            let limit_i64 = i64::try_from(limit).unwrap_or(i64::MAX);
            // RFC 3339 strings from `to_rfc3339` sort chronologically.
            let since_str = since
                .map(|ts| ts.to_rfc3339())
                .unwrap_or_default();

            let mut stmt = self
                .conn
                .prepare(
                    "SELECT id, timestamp, operation, service, details
                     FROM audit_log
                     WHERE timestamp >= ?1
                     ORDER BY id DESC
                     LIMIT ?2",
                )
                .map_err(|e| PassVaultError::AuditError(format!("query prepare: {e}")))?;

            let rows = stmt
                .query_map(rusqlite::params![since_str, limit_i64], |row| {
                    let ts_str: String = row.get(1)?;
                    let timestamp = DateTime::parse_from_rfc3339(&ts_str)
                        .map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc));

                    Ok(AuditEntry {
                        id: row.get(0)?,
                        timestamp,
                        operation: row.get(2)?,
                        service: row.get(3)?,
                        details: row.get(4)?,
                    })
                })
                .map_err(|e| PassVaultError::AuditError(format!("query exec: {e}")))?;

            rows.collect::<rusqlite::Result<Vec<_>>>()
                .map_err(|e| PassVaultError::AuditError(format!("row parse: {e}")))
        }

        /// Path to the audit database inside `vault_dir`.
        pub fn db_path(vault_dir: &Path) -> PathBuf {
            vault_dir.join("audit.db")
        }
    }

}
