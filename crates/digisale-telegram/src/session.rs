// SPDX-FileCopyrightText: 2026 Digisale Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-chat dialog session store.
//!
//! A session entry exists only while the dialog is awaiting free-text input
//! for a selected product. It is created on product selection and removed
//! unconditionally by [`SessionStore::take`] when text arrives, so every
//! submission (valid or not) returns the chat to the idle state.

use std::sync::Arc;

use dashmap::DashMap;
use digisale_core::{Category, Product};

/// The product snapshot a chat is currently entering a sale for.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSale {
    pub category: Category,
    pub product: Product,
}

/// In-memory session store keyed by chat id, injected into the dialog
/// handlers rather than held as a global.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<DashMap<i64, PendingSale>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start awaiting input for a chat, replacing nothing: callers must check
    /// [`is_awaiting`](Self::is_awaiting) first to enforce the no-re-entry rule.
    pub fn begin(&self, chat_id: i64, pending: PendingSale) {
        self.inner.insert(chat_id, pending);
    }

    /// True while the chat has a pending entry awaiting text.
    pub fn is_awaiting(&self, chat_id: i64) -> bool {
        self.inner.contains_key(&chat_id)
    }

    /// Remove and return the pending entry. Always clears, success or failure
    /// of whatever the caller does next.
    pub fn take(&self, chat_id: i64) -> Option<PendingSale> {
        self.inner.remove(&chat_id).map(|(_, pending)| pending)
    }

    /// Drop the pending entry, if any. Returns whether one existed.
    pub fn clear(&self, chat_id: i64) -> bool {
        self.inner.remove(&chat_id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending() -> PendingSale {
        PendingSale {
            category: Category::Retail,
            product: Product {
                id: 1,
                name: "Netflix".into(),
                category: Category::Retail,
                duration_months: 1,
                wholesale_price: 3000.0,
                retail_price: 5000.0,
            },
        }
    }

    #[test]
    fn take_clears_the_session() {
        let store = SessionStore::new();
        store.begin(42, pending());
        assert!(store.is_awaiting(42));

        let taken = store.take(42).unwrap();
        assert_eq!(taken.product.name, "Netflix");

        // Second take: nothing left, dialog restarts from category choice.
        assert!(!store.is_awaiting(42));
        assert!(store.take(42).is_none());
    }

    #[test]
    fn sessions_are_per_chat() {
        let store = SessionStore::new();
        store.begin(1, pending());
        assert!(store.is_awaiting(1));
        assert!(!store.is_awaiting(2));
        assert!(store.take(2).is_none());
        assert!(store.is_awaiting(1));
    }

    #[test]
    fn clear_reports_whether_anything_was_pending() {
        let store = SessionStore::new();
        assert!(!store.clear(7));
        store.begin(7, pending());
        assert!(store.clear(7));
        assert!(!store.is_awaiting(7));
    }
}
