//! Official daily exchange rates of the National Bank of Georgia.
//!
//! [`RateRepository`] resolves a date (and language) to a [`CurrencySnapshot`],
//! caching each successful resolution in memory.

pub mod cli;
pub mod core;
pub mod providers;

pub use crate::core::{CurrencyRecord, CurrencySnapshot, DateQuery, RateError};
pub use crate::providers::{HttpTransport, RateRepository, Transport};

use crate::core::config::AppConfig;
use anyhow::{Context, Result};
use tracing::{debug, info};

pub enum AppCommand {
    Rate { code: String, date: Option<String> },
    Show { code: String, date: Option<String> },
    List { date: Option<String>, all: bool },
    History { code: String, days: u32 },
}

pub async fn run_command(
    command: AppCommand,
    config_path: Option<&str>,
    language: Option<&str>,
) -> Result<()> {
    info!("nbg-rates starting...");

    let mut config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    if let Some(language) = language {
        config.language = language.to_string();
    }
    debug!("Loaded config: {config:#?}");

    let repository =
        RateRepository::from_config(&config).context("Failed to create HTTP client")?;

    match command {
        AppCommand::Rate { code, date } => cli::rate::run_rate(&repository, &code, date.into()).await,
        AppCommand::Show { code, date } => cli::rate::run_show(&repository, &code, date.into()).await,
        AppCommand::List { date, all } => {
            cli::list::run(&repository, date.into(), &config.currencies, all).await
        }
        AppCommand::History { code, days } => cli::history::run(&repository, &code, days).await,
    }
}
