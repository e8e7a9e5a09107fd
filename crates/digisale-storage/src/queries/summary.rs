// SPDX-FileCopyrightText: 2026 Digisale Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Daily digest log operations. Append-only; one row per digest run.

use chrono::NaiveDate;
use digisale_core::DigisaleError;
use rusqlite::params;

use crate::database::{Database, map_tr_err};

/// Append a generated digest for the given date.
pub async fn insert_summary(
    db: &Database,
    date: NaiveDate,
    text: &str,
) -> Result<(), DigisaleError> {
    let text = text.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO sales_summary_log (summary_date, summary_text)
                 VALUES (?1, ?2)",
                params![date, text],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Fetch the most recent digest text for a date, if any.
pub async fn latest_summary(
    db: &Database,
    date: NaiveDate,
) -> Result<Option<String>, DigisaleError> {
    db.connection()
        .call(move |conn| {
            let result = conn.query_row(
                "SELECT summary_text FROM sales_summary_log
                 WHERE summary_date = ?1 ORDER BY id DESC LIMIT 1",
                params![date],
                |row| row.get(0),
            );
            match result {
                Ok(text) => Ok(Some(text)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(map_tr_err)
}
