// SPDX-FileCopyrightText: 2026 Digisale Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for the Digisale sales bot.
//!
//! Provides WAL-mode SQLite storage with embedded migrations, a single-writer
//! concurrency model via `tokio-rusqlite`, and typed operations for the
//! product catalogs, the two sale-record tables, and the digest log. Every
//! operation runs exactly one parameterized statement.

pub mod database;
pub mod migrations;
pub mod queries;

pub use database::Database;
