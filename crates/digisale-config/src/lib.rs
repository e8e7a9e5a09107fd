// SPDX-FileCopyrightText: 2026 Digisale Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Digisale sales bot.
//!
//! Provides TOML configuration parsing with strict validation
//! (`deny_unknown_fields`), XDG file hierarchy lookup, environment variable
//! overrides, and miette diagnostics with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use digisale_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("bot name: {}", config.bot.name);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::DigisaleConfig;

/// Load configuration from the XDG hierarchy and validate it.
///
/// Returns either a valid [`DigisaleConfig`] or a list of diagnostic errors
/// suitable for [`render_errors`].
pub fn load_and_validate() -> Result<DigisaleConfig, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err)),
    }
}

/// Load configuration from a specific TOML file and validate it.
pub fn load_and_validate_path(path: &Path) -> Result<DigisaleConfig, Vec<ConfigError>> {
    match loader::load_config_from_path(path) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err)),
    }
}

/// Load configuration from a TOML string and validate it.
///
/// Useful for testing and explicit configuration.
pub fn load_and_validate_str(toml_content: &str) -> Result<DigisaleConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_toml_passes_end_to_end() {
        let config = load_and_validate_str(
            r#"
            [telegram]
            bot_token = "123:abc"

            [gemini]
            api_key = "gm"
            "#,
        )
        .unwrap();
        assert_eq!(config.telegram.bot_token.as_deref(), Some("123:abc"));
    }

    #[test]
    fn invalid_value_fails_validation() {
        let errors = load_and_validate_str(
            r#"
            [bot]
            log_level = "shouting"
            "#,
        )
        .unwrap_err();
        assert!(matches!(errors[0], ConfigError::Validation { .. }));
    }
}
