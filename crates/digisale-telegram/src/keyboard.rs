// SPDX-FileCopyrightText: 2026 Digisale Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inline keyboard construction and the callback-data codec.
//!
//! Callback identifiers are category-prefixed: `cat:<category>` selects a
//! category, `prod:<category>:<name>` selects a product. Product buttons are
//! paired two per row.

use std::str::FromStr;

use digisale_core::Category;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

/// A decoded button press.
#[derive(Debug, Clone, PartialEq)]
pub enum CallbackAction {
    Category(Category),
    Product { category: Category, name: String },
}

/// Encode a category button identifier.
pub fn category_data(category: Category) -> String {
    format!("cat:{category}")
}

/// Encode a product button identifier.
pub fn product_data(category: Category, name: &str) -> String {
    format!("prod:{category}:{name}")
}

/// Decode callback data back into an action. Unknown data yields `None`.
pub fn parse_callback(data: &str) -> Option<CallbackAction> {
    if let Some(rest) = data.strip_prefix("cat:") {
        return Category::from_str(rest).ok().map(CallbackAction::Category);
    }
    if let Some(rest) = data.strip_prefix("prod:") {
        let (category, name) = rest.split_once(':')?;
        let category = Category::from_str(category).ok()?;
        if name.is_empty() {
            return None;
        }
        return Some(CallbackAction::Product {
            category,
            name: name.to_string(),
        });
    }
    None
}

/// The two-button category chooser shown by `/start`.
pub fn category_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback(
            "Retail",
            category_data(Category::Retail),
        )],
        vec![InlineKeyboardButton::callback(
            "Wholesale",
            category_data(Category::Wholesale),
        )],
    ])
}

/// Product chooser for a category, two buttons per row.
pub fn product_keyboard(category: Category, names: &[String]) -> InlineKeyboardMarkup {
    let rows = names
        .chunks(2)
        .map(|pair| {
            pair.iter()
                .map(|name| {
                    InlineKeyboardButton::callback(name.clone(), product_data(category, name))
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    InlineKeyboardMarkup::new(rows)
}
