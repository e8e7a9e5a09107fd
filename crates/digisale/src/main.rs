// SPDX-FileCopyrightText: 2026 Digisale Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Digisale - a Telegram sales-recording bot.
//!
//! Binary entry point: `serve` runs the bot, `import` loads a historical
//! sales CSV, `digest` generates and stores the AI daily summary.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::error;

mod digest;
mod import;
mod serve;

/// Digisale - a Telegram sales-recording bot.
#[derive(Parser, Debug)]
#[command(name = "digisale", version, about, long_about = None)]
struct Cli {
    /// Path to a config file (defaults to the XDG hierarchy).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the Telegram bot.
    Serve,
    /// Import historical retail sales from a CSV file.
    Import {
        /// CSV file with the product_sold column set.
        file: PathBuf,
    },
    /// Generate and store the AI daily sales digest.
    Digest,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => digisale_config::load_and_validate_path(path),
        None => digisale_config::load_and_validate(),
    };
    let config = match config {
        Ok(config) => config,
        Err(errors) => {
            digisale_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.bot.log_level);

    let result = match cli.command {
        Commands::Serve => serve::run_serve(config).await,
        Commands::Import { file } => import::run_import(&config, &file).await,
        Commands::Digest => digest::run_digest(&config).await,
    };

    if let Err(e) = result {
        error!(error = %e, "command failed");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("digisale={log_level},warn")));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[cfg(test)]
mod tests {
    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        // Verify jemalloc is the global allocator by advancing the epoch.
        // Only jemalloc supports this -- the system allocator would fail.
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn binary_loads_config_defaults() {
        let config = digisale_config::load_and_validate_str("")
            .expect("default config should be valid");
        assert_eq!(config.bot.name, "digisale");
    }
}
