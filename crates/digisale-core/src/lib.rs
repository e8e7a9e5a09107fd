// SPDX-FileCopyrightText: 2026 Digisale Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Digisale sales bot.
//!
//! Defines the error type, the product/sale domain model, and the
//! newline-separated form parsing that turns free-text dialog input into
//! finished sale records. Everything here is transport- and storage-agnostic.

pub mod error;
pub mod form;
pub mod types;

pub use error::DigisaleError;
pub use form::{FormError, SaleInput};
pub use types::{
    Category, DailyTotals, ImportedRetailRow, Product, RetailSale, RetailSaleRecord, Sale,
    WholesaleSale,
};
