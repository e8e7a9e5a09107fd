// SPDX-FileCopyrightText: 2026 Digisale Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Free-text sale form parsing and sale record construction.
//!
//! Dialog input is newline-separated and order-sensitive:
//!
//! - retail: customer, contact, \[price override\]
//! - wholesale: customer, contact, quantity, \[price override\]
//!
//! When no override is given the price defaults to the product's retail price.
//! Profit is always derived here and nowhere else: `price - wholesale_price`,
//! scaled by quantity for wholesale. Retail expiry is the purchase date plus
//! 30 days per subscription month.

use chrono::{Duration, NaiveDate};
use thiserror::Error;

use crate::types::{Category, Product, RetailSale, Sale, WholesaleSale};

/// Days per subscription month when computing retail expiry.
const DAYS_PER_MONTH: i64 = 30;

/// Input-format errors. Surfaced directly to the user; never fatal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("invalid input format: expected at least {expected} lines, got {got}")]
    TooFewLines { expected: usize, got: usize },

    #[error("invalid {field}: `{value}` is not a number")]
    InvalidNumber { field: &'static str, value: String },

    #[error("invalid quantity: must be at least 1")]
    NonPositiveQuantity,
}

/// A parsed sale form, before prices and profit are resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum SaleInput {
    Retail {
        customer: String,
        contact: String,
        price_override: Option<f64>,
    },
    Wholesale {
        customer: String,
        contact: String,
        quantity: i64,
        price_override: Option<f64>,
    },
}

/// Splits a message into trimmed, non-empty lines.
fn split_lines(text: &str) -> Vec<&str> {
    text.lines().map(str::trim).filter(|l| !l.is_empty()).collect()
}

fn parse_price(value: &str) -> Result<f64, FormError> {
    value.parse::<f64>().map_err(|_| FormError::InvalidNumber {
        field: "price",
        value: value.to_string(),
    })
}

/// Parses newline-separated dialog input for the given category.
pub fn parse_sale(category: Category, text: &str) -> Result<SaleInput, FormError> {
    let lines = split_lines(text);
    match category {
        Category::Retail => {
            if lines.len() < 2 {
                return Err(FormError::TooFewLines {
                    expected: 2,
                    got: lines.len(),
                });
            }
            let price_override = lines.get(2).map(|l| parse_price(l)).transpose()?;
            Ok(SaleInput::Retail {
                customer: lines[0].to_string(),
                contact: lines[1].to_string(),
                price_override,
            })
        }
        Category::Wholesale => {
            if lines.len() < 3 {
                return Err(FormError::TooFewLines {
                    expected: 3,
                    got: lines.len(),
                });
            }
            let quantity = lines[2].parse::<i64>().map_err(|_| FormError::InvalidNumber {
                field: "quantity",
                value: lines[2].to_string(),
            })?;
            if quantity < 1 {
                return Err(FormError::NonPositiveQuantity);
            }
            let price_override = lines.get(3).map(|l| parse_price(l)).transpose()?;
            Ok(SaleInput::Wholesale {
                customer: lines[0].to_string(),
                contact: lines[1].to_string(),
                quantity,
                price_override,
            })
        }
    }
}

impl Sale {
    /// Builds a finished sale record from a parsed form and the selected
    /// product snapshot. This is the only place profit and expiry are derived.
    pub fn from_input(product: &Product, input: SaleInput, seller: &str, today: NaiveDate) -> Sale {
        match input {
            SaleInput::Retail {
                customer,
                contact,
                price_override,
            } => {
                let price = price_override.unwrap_or(product.retail_price);
                let end_date = today + Duration::days(DAYS_PER_MONTH * product.duration_months);
                Sale::Retail(RetailSale {
                    product_id: product.id,
                    product_name: product.name.clone(),
                    duration_months: product.duration_months,
                    customer,
                    contact,
                    price,
                    profit: price - product.wholesale_price,
                    purchase_date: today,
                    end_date,
                    seller: seller.to_string(),
                    note: String::new(),
                })
            }
            SaleInput::Wholesale {
                customer,
                contact,
                quantity,
                price_override,
            } => {
                let price = price_override.unwrap_or(product.retail_price);
                Sale::Wholesale(WholesaleSale {
                    product_id: product.id,
                    product_name: product.name.clone(),
                    customer,
                    contact,
                    quantity,
                    price,
                    profit: (price - product.wholesale_price) * quantity as f64,
                    sale_date: today,
                    seller: seller.to_string(),
                    note: String::new(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn netflix() -> Product {
        Product {
            id: 7,
            name: "Netflix".into(),
            category: Category::Retail,
            duration_months: 1,
            wholesale_price: 3000.0,
            retail_price: 5000.0,
        }
    }

    fn canva() -> Product {
        Product {
            id: 3,
            name: "Canva".into(),
            category: Category::Wholesale,
            duration_months: 12,
            wholesale_price: 1000.0,
            retail_price: 1500.0,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()
    }

    #[test]
    fn retail_defaults_price_and_derives_profit_and_expiry() {
        let input = parse_sale(Category::Retail, "Mg Mg\nmgmg@gmail.com").unwrap();
        let sale = Sale::from_input(&netflix(), input, "seller1", today());
        let Sale::Retail(s) = sale else { panic!("expected retail") };
        assert_eq!(s.price, 5000.0);
        assert_eq!(s.profit, 2000.0);
        assert_eq!(s.purchase_date, today());
        assert_eq!(s.end_date, NaiveDate::from_ymd_opt(2026, 4, 14).unwrap());
        assert_eq!(s.customer, "Mg Mg");
        assert_eq!(s.contact, "mgmg@gmail.com");
        assert_eq!(s.note, "");
    }

    #[test]
    fn retail_override_price_changes_profit() {
        let input = parse_sale(Category::Retail, "Mg Mg\nmgmg@gmail.com\n4500").unwrap();
        let sale = Sale::from_input(&netflix(), input, "seller1", today());
        let Sale::Retail(s) = sale else { panic!("expected retail") };
        assert_eq!(s.price, 4500.0);
        assert_eq!(s.profit, 1500.0);
    }

    #[test]
    fn retail_expiry_scales_with_duration() {
        let mut product = netflix();
        product.duration_months = 3;
        let input = parse_sale(Category::Retail, "Su Su\nsusu@gmail.com").unwrap();
        let sale = Sale::from_input(&product, input, "seller1", today());
        let Sale::Retail(s) = sale else { panic!("expected retail") };
        assert_eq!(s.end_date, today() + Duration::days(90));
    }

    #[test]
    fn wholesale_profit_scales_by_quantity() {
        let input = parse_sale(Category::Wholesale, "Ko Ko\nkoko@gmail.com\n10\n1400").unwrap();
        let sale = Sale::from_input(&canva(), input, "seller2", today());
        let Sale::Wholesale(s) = sale else { panic!("expected wholesale") };
        assert_eq!(s.quantity, 10);
        assert_eq!(s.price, 1400.0);
        assert_eq!(s.profit, 4000.0);
        assert_eq!(s.sale_date, today());
    }

    #[test]
    fn wholesale_defaults_price_to_retail() {
        let input = parse_sale(Category::Wholesale, "Ko Ko\nkoko@gmail.com\n2").unwrap();
        let sale = Sale::from_input(&canva(), input, "seller2", today());
        let Sale::Wholesale(s) = sale else { panic!("expected wholesale") };
        assert_eq!(s.price, 1500.0);
        assert_eq!(s.profit, 1000.0);
    }

    #[test]
    fn too_few_lines_is_rejected() {
        assert_eq!(
            parse_sale(Category::Retail, "only-one-line"),
            Err(FormError::TooFewLines { expected: 2, got: 1 })
        );
        assert_eq!(
            parse_sale(Category::Wholesale, "name\ncontact"),
            Err(FormError::TooFewLines { expected: 3, got: 2 })
        );
        assert_eq!(
            parse_sale(Category::Retail, "\n\n  \n"),
            Err(FormError::TooFewLines { expected: 2, got: 0 })
        );
    }

    #[test]
    fn non_numeric_fields_are_rejected_not_crashed() {
        let err = parse_sale(Category::Retail, "Mg Mg\nmgmg@gmail.com\nfive thousand")
            .unwrap_err();
        assert!(matches!(err, FormError::InvalidNumber { field: "price", .. }));

        let err = parse_sale(Category::Wholesale, "Ko Ko\nkoko@gmail.com\nten").unwrap_err();
        assert!(matches!(err, FormError::InvalidNumber { field: "quantity", .. }));

        assert_eq!(
            parse_sale(Category::Wholesale, "Ko Ko\nkoko@gmail.com\n0"),
            Err(FormError::NonPositiveQuantity)
        );
    }

    #[test]
    fn blank_lines_are_skipped() {
        let input = parse_sale(Category::Retail, "\n  Mg Mg  \n\nmgmg@gmail.com\n").unwrap();
        let SaleInput::Retail { customer, contact, price_override } = input else {
            panic!("expected retail input");
        };
        assert_eq!(customer, "Mg Mg");
        assert_eq!(contact, "mgmg@gmail.com");
        assert_eq!(price_override, None);
    }
}
