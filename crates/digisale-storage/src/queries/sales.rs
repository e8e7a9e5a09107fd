// SPDX-FileCopyrightText: 2026 Digisale Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sale record operations: inserts, the same-day aggregate, and the two-day
//! digest window.
//!
//! Profit arrives precomputed on the record; nothing here rederives it.

use chrono::NaiveDate;
use digisale_core::{DailyTotals, DigisaleError, ImportedRetailRow, RetailSaleRecord, Sale};
use rusqlite::params;

use crate::database::{Database, map_tr_err};

/// Insert one finished sale record into the table for its category.
pub async fn insert_sale(db: &Database, sale: &Sale) -> Result<(), DigisaleError> {
    let sale = sale.clone();
    db.connection()
        .call(move |conn| {
            match sale {
                Sale::Retail(s) => {
                    conn.execute(
                        "INSERT INTO product_sold
                         (product_id, product_name, duration, customer, gmail, price, profit,
                          purchase_date, end_date, seller, note)
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                        params![
                            s.product_id,
                            s.product_name,
                            s.duration_months,
                            s.customer,
                            s.contact,
                            s.price,
                            s.profit,
                            s.purchase_date,
                            s.end_date,
                            s.seller,
                            s.note,
                        ],
                    )?;
                }
                Sale::Wholesale(s) => {
                    conn.execute(
                        "INSERT INTO wc_product_sold
                         (product_id, product_name, customer, email, quantity, price, profit,
                          seller, note, date)
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                        params![
                            s.product_id,
                            s.product_name,
                            s.customer,
                            s.contact,
                            s.quantity,
                            s.price,
                            s.profit,
                            s.seller,
                            s.note,
                            s.sale_date,
                        ],
                    )?;
                }
            }
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Insert one batch-imported retail row. Absent fields stay NULL and date
/// text is stored verbatim.
pub async fn insert_imported_retail(
    db: &Database,
    row: &ImportedRetailRow,
) -> Result<(), DigisaleError> {
    let row = row.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO product_sold
                 (product_id, product_name, duration, customer, gmail, price, profit,
                  purchase_date, end_date, seller, note)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                params![
                    row.product_id,
                    row.product_name,
                    row.duration_months,
                    row.customer,
                    row.contact,
                    row.price,
                    row.profit,
                    row.purchase_date,
                    row.end_date,
                    row.seller,
                    row.note,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Sum sales and profit for one calendar date across both sale tables.
///
/// Wholesale sales count as price times quantity. A day with no rows returns
/// zeros; a query failure surfaces as `Err`, never as zeros.
pub async fn daily_totals(db: &Database, date: NaiveDate) -> Result<DailyTotals, DigisaleError> {
    db.connection()
        .call(move |conn| {
            let totals = conn.query_row(
                "SELECT
                   (SELECT COALESCE(SUM(price), 0) FROM product_sold
                      WHERE purchase_date = ?1)
                 + (SELECT COALESCE(SUM(price * quantity), 0) FROM wc_product_sold
                      WHERE date = ?1),
                   (SELECT COALESCE(SUM(profit), 0) FROM product_sold
                      WHERE purchase_date = ?1)
                 + (SELECT COALESCE(SUM(profit), 0) FROM wc_product_sold
                      WHERE date = ?1)",
                params![date],
                |row| {
                    Ok(DailyTotals {
                        sales: row.get(0)?,
                        profit: row.get(1)?,
                    })
                },
            )?;
            Ok(totals)
        })
        .await
        .map_err(map_tr_err)
}

/// Fetch retail sales whose purchase date is one of the two given dates.
///
/// Imported rows may hold NULLs or non-ISO date text; those fields are read
/// leniently instead of failing the whole window.
pub async fn retail_sales_on(
    db: &Database,
    first: NaiveDate,
    second: NaiveDate,
) -> Result<Vec<RetailSaleRecord>, DigisaleError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT product_name, customer, seller, price, profit,
                        purchase_date, end_date, note
                 FROM product_sold
                 WHERE purchase_date IN (?1, ?2)
                 ORDER BY purchase_date, id",
            )?;
            let rows = stmt.query_map(params![first, second], |row| {
                let purchase_date: NaiveDate = row.get(5)?;
                let end_date = row
                    .get::<_, Option<String>>(6)?
                    .and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok());
                Ok(RetailSaleRecord {
                    product_name: row.get::<_, Option<String>>(0)?.unwrap_or_default(),
                    customer: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                    seller: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                    price: row.get::<_, Option<f64>>(3)?.unwrap_or_default(),
                    profit: row.get::<_, Option<f64>>(4)?.unwrap_or_default(),
                    purchase_date,
                    end_date,
                    note: row.get(7)?,
                })
            })?;
            let mut records = Vec::new();
            for row in rows {
                records.push(row?);
            }
            Ok(records)
        })
        .await
        .map_err(map_tr_err)
}
