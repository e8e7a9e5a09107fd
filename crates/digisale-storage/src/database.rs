// SPDX-FileCopyrightText: 2026 Digisale Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All access goes through tokio-rusqlite's single background thread: the
//! [`Database`] struct IS the single writer. Query modules accept `&Database`
//! and run exactly one statement per `call`, so every connection use is scoped
//! and released on all paths, including query errors. Do NOT create additional
//! Connection instances for writes.

use digisale_core::DigisaleError;
use tokio_rusqlite::Connection;
use tracing::debug;

use crate::migrations;

/// Handle to the SQLite database.
#[derive(Debug)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database at `path`, apply pragmas, and run all
    /// pending migrations.
    pub async fn open(path: &str) -> Result<Self, DigisaleError> {
        let conn = Connection::open(path.to_owned())
            .await
            .map_err(|e| DigisaleError::Storage {
                source: Box::new(e),
            })?;

        conn.call(|conn| {
            conn.execute_batch(
                "PRAGMA journal_mode = WAL;
                 PRAGMA foreign_keys = ON;
                 PRAGMA busy_timeout = 5000;",
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        conn.call(|conn| migrations::run_migrations(conn))
            .await
            .map_err(|e| DigisaleError::Storage {
                source: Box::new(e),
            })?;

        debug!(path, "database opened");
        Ok(Self { conn })
    }

    /// Returns the underlying tokio-rusqlite connection for query modules.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Checkpoint the WAL and close the connection.
    pub async fn close(self) -> Result<(), DigisaleError> {
        self.conn
            .call(|conn| {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        self.conn
            .close()
            .await
            .map_err(|e| DigisaleError::Storage {
                source: Box::new(e),
            })?;
        debug!("database closed");
        Ok(())
    }
}

/// Map a tokio-rusqlite error into the workspace error type.
///
/// Fixing the closure error type to `rusqlite::Error` here also pins the
/// inference for every query closure that ends in a bare `Ok(..)`.
pub(crate) fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> DigisaleError {
    DigisaleError::Storage {
        source: Box::new(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn open_runs_migrations_and_close_works() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();

        // All five tables from the migrations must exist.
        let count: i64 = db
            .connection()
            .call(|conn| {
                let n = conn.query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'
                     AND name IN ('product_list', 'wc_product_list', 'product_sold',
                                  'wc_product_sold', 'sales_summary_log')",
                    [],
                    |row| row.get(0),
                )?;
                Ok::<_, rusqlite::Error>(n)
            })
            .await
            .unwrap();
        assert_eq!(count, 5);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn open_failure_maps_to_storage_error() {
        let err = Database::open("/nonexistent-dir/test.db").await.unwrap_err();
        assert!(matches!(err, DigisaleError::Storage { .. }));
    }

    #[tokio::test]
    async fn reopen_is_idempotent() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        db.close().await.unwrap();
        // Migrations have already been applied; reopening must not fail.
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        db.close().await.unwrap();
    }
}
