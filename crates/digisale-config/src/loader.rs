// SPDX-FileCopyrightText: 2026 Digisale Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./digisale.toml` > `~/.config/digisale/digisale.toml`
//! > `/etc/digisale/digisale.toml` with environment variable overrides via the
//! `DIGISALE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::DigisaleConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/digisale/digisale.toml` (system-wide)
/// 3. `~/.config/digisale/digisale.toml` (user XDG config)
/// 4. `./digisale.toml` (local directory)
/// 5. `DIGISALE_*` environment variables
pub fn load_config() -> Result<DigisaleConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(DigisaleConfig::default()))
        .merge(Toml::file("/etc/digisale/digisale.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("digisale/digisale.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("digisale.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and for callers that carry their own config text.
pub fn load_config_from_str(toml_content: &str) -> Result<DigisaleConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(DigisaleConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<DigisaleConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(DigisaleConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider.
///
/// Uses `Env::map()` rather than `Env::split("_")` so underscore-containing
/// key names stay unambiguous: `DIGISALE_TELEGRAM_BOT_TOKEN` must map to
/// `telegram.bot_token`, not `telegram.bot.token`. Keys arrive upper-cased
/// from the environment, and section names are only recognized at the start
/// of the key so an embedded `bot_` (as in `telegram_bot_token`) is never
/// mistaken for the `bot` section.
fn env_provider() -> Env {
    const SECTIONS: [&str; 4] = ["bot_", "telegram_", "storage_", "gemini_"];

    Env::prefixed("DIGISALE_").map(|key| {
        let lower = key.as_str().to_ascii_lowercase();
        for section in SECTIONS {
            if let Some(rest) = lower.strip_prefix(section) {
                let name = &section[..section.len() - 1];
                return format!("{name}.{rest}").into();
            }
        }
        lower.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn toml_string_overrides_defaults() {
        let config = load_config_from_str(
            r#"
            [bot]
            log_level = "debug"
            currency = "MMK"

            [storage]
            database_path = "/var/lib/digisale/sales.db"
            "#,
        )
        .unwrap();
        assert_eq!(config.bot.log_level, "debug");
        assert_eq!(config.bot.currency, "MMK");
        assert_eq!(config.storage.database_path, "/var/lib/digisale/sales.db");
        // Untouched sections keep their defaults.
        assert_eq!(config.gemini.model, "gemini-1.5-flash-latest");
    }

    #[test]
    fn unknown_key_is_rejected() {
        let result = load_config_from_str(
            r#"
            [bot]
            naem = "typo"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn env_var_maps_to_nested_key() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("DIGISALE_TELEGRAM_BOT_TOKEN", "123:abc");
            jail.set_env("DIGISALE_GEMINI_API_KEY", "gm-key");
            let config: DigisaleConfig = Figment::new()
                .merge(Serialized::defaults(DigisaleConfig::default()))
                .merge(env_provider())
                .extract()?;
            assert_eq!(config.telegram.bot_token.as_deref(), Some("123:abc"));
            assert_eq!(config.gemini.api_key.as_deref(), Some("gm-key"));
            Ok(())
        });
    }

    #[test]
    #[serial]
    fn env_vars_cover_every_section() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("DIGISALE_BOT_CURRENCY", "MMK");
            jail.set_env("DIGISALE_BOT_LOG_LEVEL", "debug");
            jail.set_env("DIGISALE_STORAGE_DATABASE_PATH", "/tmp/env.db");
            // Embedded `bot_` must not shadow the `telegram` section.
            jail.set_env("DIGISALE_TELEGRAM_BOT_TOKEN", "456:def");
            let config: DigisaleConfig = Figment::new()
                .merge(Serialized::defaults(DigisaleConfig::default()))
                .merge(env_provider())
                .extract()?;
            assert_eq!(config.bot.currency, "MMK");
            assert_eq!(config.bot.log_level, "debug");
            assert_eq!(config.storage.database_path, "/tmp/env.db");
            assert_eq!(config.telegram.bot_token.as_deref(), Some("456:def"));
            Ok(())
        });
    }
}
