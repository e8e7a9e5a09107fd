// SPDX-FileCopyrightText: 2026 Digisale Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so misspelled keys are
//! rejected at startup with an actionable diagnostic.

use serde::{Deserialize, Serialize};

/// Top-level Digisale configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with `DIGISALE_*`
/// environment variable overrides. All sections default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DigisaleConfig {
    /// Bot identity and behavior settings.
    #[serde(default)]
    pub bot: BotConfig,

    /// Telegram integration settings.
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Gemini digest settings.
    #[serde(default)]
    pub gemini: GeminiConfig,
}

/// Bot identity and behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BotConfig {
    /// Display name of the bot.
    #[serde(default = "default_bot_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Currency suffix used in summary replies.
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: default_bot_name(),
            log_level: default_log_level(),
            currency: default_currency(),
        }
    }
}

fn default_bot_name() -> String {
    "digisale".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_currency() -> String {
    "Ks".to_string()
}

/// Telegram integration configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TelegramConfig {
    /// Bot API token. Required to run `digisale serve`.
    #[serde(default)]
    pub bot_token: Option<String>,
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    "digisale.db".to_string()
}

/// Gemini digest configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeminiConfig {
    /// API key. Required to run `digisale digest`.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model identifier used for the daily digest.
    #[serde(default = "default_gemini_model")]
    pub model: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_gemini_model(),
        }
    }
}

fn default_gemini_model() -> String {
    "gemini-1.5-flash-latest".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = DigisaleConfig::default();
        assert_eq!(config.bot.name, "digisale");
        assert_eq!(config.bot.log_level, "info");
        assert_eq!(config.bot.currency, "Ks");
        assert_eq!(config.storage.database_path, "digisale.db");
        assert_eq!(config.gemini.model, "gemini-1.5-flash-latest");
        assert!(config.telegram.bot_token.is_none());
        assert!(config.gemini.api_key.is_none());
    }
}
