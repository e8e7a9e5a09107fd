// SPDX-FileCopyrightText: 2026 Digisale Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain model for products and sale records.
//!
//! The two sale flows (retail and wholesale) are unified behind the [`Sale`]
//! enum so that persistence and reporting have a single entry point with
//! category-specific field sets underneath.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Product catalog category. Doubles as the wire string in callback data.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Retail,
    Wholesale,
}

/// Immutable catalog entry, looked up by name within a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub category: Category,
    /// Subscription length in months; one month counts as 30 days for expiry.
    pub duration_months: i64,
    pub wholesale_price: f64,
    pub retail_price: f64,
}

/// A completed single-unit subscription sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetailSale {
    pub product_id: i64,
    pub product_name: String,
    pub duration_months: i64,
    pub customer: String,
    pub contact: String,
    pub price: f64,
    pub profit: f64,
    pub purchase_date: NaiveDate,
    pub end_date: NaiveDate,
    pub seller: String,
    pub note: String,
}

/// A completed quantity-based sale. No expiry tracking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WholesaleSale {
    pub product_id: i64,
    pub product_name: String,
    pub customer: String,
    pub contact: String,
    pub quantity: i64,
    pub price: f64,
    pub profit: f64,
    pub sale_date: NaiveDate,
    pub seller: String,
    pub note: String,
}

/// A finished sale record of either category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Sale {
    Retail(RetailSale),
    Wholesale(WholesaleSale),
}

impl Sale {
    pub fn category(&self) -> Category {
        match self {
            Sale::Retail(_) => Category::Retail,
            Sale::Wholesale(_) => Category::Wholesale,
        }
    }

    pub fn product_name(&self) -> &str {
        match self {
            Sale::Retail(s) => &s.product_name,
            Sale::Wholesale(s) => &s.product_name,
        }
    }

    /// Unit price of the sale (per item for wholesale).
    pub fn price(&self) -> f64 {
        match self {
            Sale::Retail(s) => s.price,
            Sale::Wholesale(s) => s.price,
        }
    }

    /// Total amount charged: price, scaled by quantity for wholesale.
    pub fn total(&self) -> f64 {
        match self {
            Sale::Retail(s) => s.price,
            Sale::Wholesale(s) => s.price * s.quantity as f64,
        }
    }

    pub fn profit(&self) -> f64 {
        match self {
            Sale::Retail(s) => s.profit,
            Sale::Wholesale(s) => s.profit,
        }
    }
}

/// Read-side retail sale row for the digest window.
///
/// Imported rows may carry NULL fields or dates in formats the importer passed
/// through verbatim, so everything beyond the purchase date is lenient.
#[derive(Debug, Clone, PartialEq)]
pub struct RetailSaleRecord {
    pub product_name: String,
    pub customer: String,
    pub seller: String,
    pub price: f64,
    pub profit: f64,
    pub purchase_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub note: Option<String>,
}

/// One row of the batch-import file with null-like tokens already normalized
/// to `None`. Dates stay raw text, exactly as they appear in the file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportedRetailRow {
    pub product_id: Option<i64>,
    pub product_name: Option<String>,
    pub duration_months: Option<i64>,
    pub customer: Option<String>,
    pub contact: Option<String>,
    pub price: Option<f64>,
    pub profit: Option<f64>,
    pub purchase_date: Option<String>,
    pub end_date: Option<String>,
    pub seller: Option<String>,
    pub note: Option<String>,
}

/// Same-day totals across both sale tables.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DailyTotals {
    pub sales: f64,
    pub profit: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn category_wire_strings_round_trip() {
        assert_eq!(Category::Retail.to_string(), "retail");
        assert_eq!(Category::Wholesale.to_string(), "wholesale");
        assert_eq!(Category::from_str("retail").unwrap(), Category::Retail);
        assert_eq!(
            Category::from_str("wholesale").unwrap(),
            Category::Wholesale
        );
        assert!(Category::from_str("wc").is_err());
    }

    #[test]
    fn sale_total_scales_by_quantity() {
        let sale = Sale::Wholesale(WholesaleSale {
            product_id: 1,
            product_name: "Spotify".into(),
            customer: "Aye Aye".into(),
            contact: "aye@gmail.com".into(),
            quantity: 4,
            price: 2500.0,
            profit: 2000.0,
            sale_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            seller: "mm_seller".into(),
            note: String::new(),
        });
        assert_eq!(sale.total(), 10_000.0);
        assert_eq!(sale.price(), 2500.0);
        assert_eq!(sale.category(), Category::Wholesale);
    }

    #[test]
    fn category_serde_uses_lowercase() {
        let json = serde_json::to_string(&Category::Retail).unwrap();
        assert_eq!(json, "\"retail\"");
        let back: Category = serde_json::from_str("\"wholesale\"").unwrap();
        assert_eq!(back, Category::Wholesale);
    }
}
