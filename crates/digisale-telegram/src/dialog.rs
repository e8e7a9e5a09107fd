// SPDX-FileCopyrightText: 2026 Digisale Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dialog flow logic, kept free of transport concerns so the conversation
//! rules are testable without a bot token.
//!
//! The flow per chat is strictly linear: category button, product button,
//! one free-text submission, then back to idle.

use chrono::NaiveDate;
use digisale_core::{Category, DailyTotals, FormError, Product, Sale, form};

use crate::markdown;

/// Reply for any submission that fails form parsing.
pub const INVALID_INPUT: &str = "Invalid input format.";

/// Reply when a selected product no longer exists in the catalog.
pub const PRODUCT_NOT_FOUND: &str = "Product not found.";

/// Reply when a chat presses a product button while a pending entry exists.
pub const PENDING_ENTRY: &str =
    "You already have an entry in progress. Send the details or /cancel it first.";

/// Free-text prompt shown after product selection.
pub fn prompt_for(category: Category) -> &'static str {
    match category {
        Category::Retail => "Enter customer name, contact, [optional price] (one per line):",
        Category::Wholesale => {
            "Enter customer name, contact, quantity, [optional price] (one per line):"
        }
    }
}

/// Parse one text submission and build the finished sale record.
pub fn handle_submission(
    product: &Product,
    category: Category,
    text: &str,
    seller: &str,
    today: NaiveDate,
) -> Result<Sale, FormError> {
    let input = form::parse_sale(category, text)?;
    Ok(Sale::from_input(product, input, seller, today))
}

/// Confirmation reply after a persisted sale.
pub fn confirmation(sale: &Sale, currency: &str) -> String {
    format!(
        "Order saved: {} for {:.2} {currency} (profit {:.2} {currency}).",
        sale.product_name(),
        sale.total(),
        sale.profit(),
    )
}

/// Resolve the `/summary` date argument.
///
/// An empty argument means today; anything else must be a real calendar date
/// in `YYYY-MM-DD` form. Runs before any storage access.
pub fn resolve_summary_date(arg: &str, today: NaiveDate) -> Result<NaiveDate, chrono::ParseError> {
    let arg = arg.trim();
    if arg.is_empty() {
        Ok(today)
    } else {
        NaiveDate::parse_from_str(arg, "%Y-%m-%d")
    }
}

/// MarkdownV2 summary reply.
pub fn format_summary_markdown(date: NaiveDate, totals: DailyTotals, currency: &str) -> String {
    format!(
        "*Summary for {}*\n\nTotal Sales: {} {}\nTotal Profit: {} {}",
        markdown::escape(&date.to_string()),
        markdown::escape(&format!("{:.2}", totals.sales)),
        markdown::escape(currency),
        markdown::escape(&format!("{:.2}", totals.profit)),
        markdown::escape(currency),
    )
}

/// Plain-text fallback when MarkdownV2 delivery fails.
pub fn format_summary_plain(date: NaiveDate, totals: DailyTotals, currency: &str) -> String {
    format!(
        "Summary for {date}\n\nTotal Sales: {:.2} {currency}\nTotal Profit: {:.2} {currency}",
        totals.sales, totals.profit,
    )
}
