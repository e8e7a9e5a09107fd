// SPDX-FileCopyrightText: 2026 Digisale Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Product catalog operations.
//!
//! Each category has its own catalog table; the category argument picks the
//! table, values are always bound as parameters.

use digisale_core::{Category, DigisaleError, Product};
use rusqlite::params;

use crate::database::{Database, map_tr_err};

/// Catalog table for a category.
fn catalog_table(category: Category) -> &'static str {
    match category {
        Category::Retail => "product_list",
        Category::Wholesale => "wc_product_list",
    }
}

/// Insert a catalog entry. Returns the assigned product id.
pub async fn insert_product(db: &Database, product: &Product) -> Result<i64, DigisaleError> {
    let table = catalog_table(product.category);
    let product = product.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                &format!(
                    "INSERT INTO {table} (product_name, duration, wc_price, retail_price)
                     VALUES (?1, ?2, ?3, ?4)"
                ),
                params![
                    product.name,
                    product.duration_months,
                    product.wholesale_price,
                    product.retail_price,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(map_tr_err)
}

/// List product names for a category, ordered by name.
pub async fn list_product_names(
    db: &Database,
    category: Category,
) -> Result<Vec<String>, DigisaleError> {
    let table = catalog_table(category);
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT product_name FROM {table} ORDER BY product_name"
            ))?;
            let rows = stmt.query_map([], |row| row.get(0))?;
            let mut names = Vec::new();
            for row in rows {
                names.push(row?);
            }
            Ok(names)
        })
        .await
        .map_err(map_tr_err)
}

/// Fetch a full product record by name within a category.
///
/// "Not found" is a distinct outcome (`Ok(None)`) from a query failure.
pub async fn get_product(
    db: &Database,
    name: &str,
    category: Category,
) -> Result<Option<Product>, DigisaleError> {
    let table = catalog_table(category);
    let name = name.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT product_id, product_name, duration, wc_price, retail_price
                 FROM {table} WHERE product_name = ?1"
            ))?;
            let result = stmt.query_row(params![name], |row| {
                Ok(Product {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    category,
                    duration_months: row.get(2)?,
                    wholesale_price: row.get(3)?,
                    retail_price: row.get(4)?,
                })
            });
            match result {
                Ok(product) => Ok(Some(product)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(map_tr_err)
}
