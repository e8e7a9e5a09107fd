// SPDX-FileCopyrightText: 2026 Digisale Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that serde attributes cannot express.

use crate::diagnostic::ConfigError;
use crate::model::DigisaleConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects all validation errors rather than failing fast.
pub fn validate_config(config: &DigisaleConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if !LOG_LEVELS.contains(&config.bot.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "bot.log_level must be one of {}, got `{}`",
                LOG_LEVELS.join(", "),
                config.bot.log_level
            ),
        });
    }

    if config.bot.currency.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "bot.currency must not be empty".to_string(),
        });
    }

    if config.gemini.model.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "gemini.model must not be empty".to_string(),
        });
    }

    if let Some(token) = &config.telegram.bot_token
        && token.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "telegram.bot_token must not be empty when set".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&DigisaleConfig::default()).is_ok());
    }

    #[test]
    fn bad_log_level_is_rejected() {
        let mut config = DigisaleConfig::default();
        config.bot.log_level = "verbose".into();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("bot.log_level"));
    }

    #[test]
    fn all_errors_are_collected() {
        let mut config = DigisaleConfig::default();
        config.storage.database_path = "  ".into();
        config.bot.currency = String::new();
        config.telegram.bot_token = Some(String::new());
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
