pub mod add;
pub mod check;
pub mod config;
pub mod formats;
pub mod interactive;
pub mod output;

use std::io::Read;

use clap::{Parser, Subcommand};
use tracing_subscriber::filter::LevelFilter;

use crate::error::{Result, TallyError};
use crate::fmt::{currency_by_key, Currency};
use crate::parser::{get_by_key, LineFormat};
use crate::settings::load_settings;

#[derive(Parser)]
#[command(
    name = "tally",
    about = "Paste expense lines, get a numbered list and a running total."
)]
pub struct Cli {
    /// Line format: strict ('25,000/- CASH 29/08/2024') or loose ('Groceries 50.00')
    #[arg(long, global = true)]
    pub format: Option<String>,
    /// Currency: rupee or dollar
    #[arg(long, global = true)]
    pub currency: Option<String>,
    /// Log level: off, error, warn, info, debug, trace (RUST_LOG takes precedence)
    #[arg(long = "log-level", global = true, default_value_t = LevelFilter::WARN)]
    pub log_level: LevelFilter,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse expense text from files or stdin and print the list and total.
    Add {
        /// Files to read, one batch each ('-' or none for stdin)
        files: Vec<String>,
        /// Output: table, csv, json
        #[arg(long, default_value = "table")]
        output: String,
    },
    /// Show which lines parse and why the others are skipped.
    Check {
        /// File to read ('-' or none for stdin)
        file: Option<String>,
    },
    /// Show settings, or save --format/--currency as the new defaults.
    Config,
    /// List the supported line formats.
    Formats,
}

/// Per-run `--format`/`--currency` values layered over the saved settings.
pub struct Overrides {
    pub format: Option<String>,
    pub currency: Option<String>,
}

impl Overrides {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format.clone(),
            currency: cli.currency.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.format.is_none() && self.currency.is_none()
    }

    pub fn resolve(&self) -> Result<(LineFormat, Currency)> {
        let settings = load_settings();
        let format = resolve_format(self.format.as_deref().unwrap_or(&settings.format))?;
        let currency = resolve_currency(self.currency.as_deref().unwrap_or(&settings.currency))?;
        Ok((format, currency))
    }
}

pub(crate) fn resolve_format(key: &str) -> Result<LineFormat> {
    get_by_key(key).ok_or_else(|| TallyError::UnknownFormat(key.to_string()))
}

pub(crate) fn resolve_currency(key: &str) -> Result<Currency> {
    currency_by_key(key).ok_or_else(|| TallyError::UnknownCurrency(key.to_string()))
}

/// Read a whole file, or stdin for `-`.
pub(crate) fn read_source(source: &str) -> Result<String> {
    if source == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }
    std::fs::read_to_string(source)
        .map_err(|e| TallyError::Other(format!("Cannot read {source}: {e}")))
}

pub(crate) fn source_label(source: &str) -> &str {
    if source == "-" {
        "stdin"
    } else {
        source
    }
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max - 1).collect();
        format!("{truncated}\u{2026}")
    }
}
