// SPDX-FileCopyrightText: 2026 Digisale Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `digisale serve` command implementation.
//!
//! Opens storage, then runs the Telegram bot until shutdown.

use std::sync::Arc;

use digisale_config::DigisaleConfig;
use digisale_core::DigisaleError;
use digisale_storage::Database;
use digisale_telegram::SalesBot;
use tracing::info;

/// Runs the `digisale serve` command.
pub async fn run_serve(config: DigisaleConfig) -> Result<(), DigisaleError> {
    info!(bot = %config.bot.name, "starting digisale serve");

    let db = Arc::new(Database::open(&config.storage.database_path).await?);
    info!(path = %config.storage.database_path, "storage initialized");

    let bot = SalesBot::new(&config.telegram, db, &config.bot.currency)?;
    bot.run().await
}
