// SPDX-FileCopyrightText: 2026 Digisale Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types shared across the Digisale workspace.

use thiserror::Error;

/// The primary error type used across storage, channel, and provider code.
#[derive(Debug, Error)]
pub enum DigisaleError {
    /// Configuration errors (invalid TOML, missing required fields).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database open, query failure).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Telegram channel errors (connection failure, send failure).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Generative-text provider errors (API failure, malformed response).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// CSV import errors (unreadable file, malformed records).
    #[error("import error: {0}")]
    Import(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
