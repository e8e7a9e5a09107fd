// SPDX-FileCopyrightText: 2026 Digisale Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `digisale import` command implementation.
//!
//! One-off loader for historical retail sales exported as CSV. Null-like
//! tokens (`""`, `nan` in any case) are normalized to absent before
//! insertion; numeric fields parse leniently and fall back to absent with a
//! warning rather than aborting the whole file. Dates are passed through
//! verbatim.

use std::path::Path;

use digisale_config::DigisaleConfig;
use digisale_core::{DigisaleError, ImportedRetailRow};
use digisale_storage::{Database, queries};
use serde::Deserialize;
use tracing::{info, warn};

/// Raw CSV record, everything optional text until cleaned.
#[derive(Debug, Deserialize)]
struct RawRecord {
    product_id: Option<String>,
    product_name: Option<String>,
    duration: Option<String>,
    customer: Option<String>,
    gmail: Option<String>,
    price: Option<String>,
    profit: Option<String>,
    purchase_date: Option<String>,
    end_date: Option<String>,
    seller: Option<String>,
    note: Option<String>,
}

/// Normalize a null-like token to `None`.
fn clean_token(value: Option<String>) -> Option<String> {
    let value = value?;
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parse a cleaned token leniently; unparsable values become absent.
fn lenient_parse<T: std::str::FromStr>(
    value: Option<String>,
    field: &str,
    line: u64,
) -> Option<T> {
    let value = clean_token(value)?;
    match value.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!(line, field, value = %value, "unparsable value, importing as absent");
            None
        }
    }
}

fn to_row(record: RawRecord, line: u64) -> ImportedRetailRow {
    ImportedRetailRow {
        product_id: lenient_parse(record.product_id, "product_id", line),
        product_name: clean_token(record.product_name),
        duration_months: lenient_parse(record.duration, "duration", line),
        customer: clean_token(record.customer),
        contact: clean_token(record.gmail),
        price: lenient_parse(record.price, "price", line),
        profit: lenient_parse(record.profit, "profit", line),
        purchase_date: clean_token(record.purchase_date),
        end_date: clean_token(record.end_date),
        seller: clean_token(record.seller),
        note: clean_token(record.note),
    }
}

/// Runs the `digisale import` command.
pub async fn run_import(config: &DigisaleConfig, file: &Path) -> Result<(), DigisaleError> {
    let mut reader = csv::Reader::from_path(file)
        .map_err(|e| DigisaleError::Import(format!("cannot read {}: {e}", file.display())))?;

    let db = Database::open(&config.storage.database_path).await?;

    let mut inserted = 0u64;
    for (index, result) in reader.deserialize::<RawRecord>().enumerate() {
        let line = index as u64 + 2; // header is line 1
        let record =
            result.map_err(|e| DigisaleError::Import(format!("line {line}: {e}")))?;
        let row = to_row(record, line);
        queries::sales::insert_imported_retail(&db, &row).await?;
        inserted += 1;
    }

    db.close().await?;
    info!(inserted, file = %file.display(), "import complete");
    println!("{inserted} rows inserted.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn null_like_tokens_become_absent() {
        assert_eq!(clean_token(None), None);
        assert_eq!(clean_token(Some("".into())), None);
        assert_eq!(clean_token(Some("   ".into())), None);
        assert_eq!(clean_token(Some("nan".into())), None);
        assert_eq!(clean_token(Some("NaN".into())), None);
        assert_eq!(clean_token(Some("NAN".into())), None);
        assert_eq!(clean_token(Some(" Mg Mg ".into())), Some("Mg Mg".into()));
    }

    #[test]
    fn numeric_fields_parse_leniently() {
        let record = RawRecord {
            product_id: Some("7.0".into()), // pandas float formatting
            product_name: Some("Netflix".into()),
            duration: Some("1".into()),
            customer: Some("Mg Mg".into()),
            gmail: Some("nan".into()),
            price: Some("5000".into()),
            profit: Some("not-a-number".into()),
            purchase_date: Some("2026-03-15".into()),
            end_date: Some("nan".into()),
            seller: None,
            note: Some("".into()),
        };
        let row = to_row(record, 2);
        // "7.0" is not an integer; imported as absent rather than failing.
        assert_eq!(row.product_id, None);
        assert_eq!(row.product_name.as_deref(), Some("Netflix"));
        assert_eq!(row.duration_months, Some(1));
        assert_eq!(row.contact, None);
        assert_eq!(row.price, Some(5000.0));
        assert_eq!(row.profit, None);
        assert_eq!(row.purchase_date.as_deref(), Some("2026-03-15"));
        assert_eq!(row.end_date, None);
        assert_eq!(row.note, None);
    }

    #[tokio::test]
    async fn import_inserts_all_rows() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("sales.csv");
        let mut file = std::fs::File::create(&csv_path).unwrap();
        writeln!(
            file,
            "product_id,product_name,duration,customer,gmail,price,profit,purchase_date,end_date,seller,note"
        )
        .unwrap();
        writeln!(
            file,
            "7,Netflix,1,Mg Mg,mgmg@gmail.com,5000,2000,2026-03-15,2026-04-14,seller1,"
        )
        .unwrap();
        writeln!(file, "nan,Spotify,3,Su Su,nan,4500,1500,2026-03-14,nan,seller2,vip").unwrap();
        drop(file);

        let mut config = DigisaleConfig::default();
        config.storage.database_path = dir
            .path()
            .join("import.db")
            .to_string_lossy()
            .into_owned();

        run_import(&config, &csv_path).await.unwrap();

        let db = Database::open(&config.storage.database_path).await.unwrap();
        let window = queries::sales::retail_sales_on(
            &db,
            chrono::NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            chrono::NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
        )
        .await
        .unwrap();
        assert_eq!(window.len(), 2);
        assert_eq!(window[0].customer, "Su Su");
        assert_eq!(window[0].end_date, None);
        assert_eq!(window[1].customer, "Mg Mg");
        assert_eq!(window[1].profit, 2000.0);
        db.close().await.unwrap();
    }
}
