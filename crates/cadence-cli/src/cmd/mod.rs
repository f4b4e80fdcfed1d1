pub mod account;
pub mod config;
pub mod contact;
pub mod dashboard;
pub mod init;
pub mod opportunity;
pub mod outreach;
pub mod prompt;
pub mod today;

use anyhow::Context;
use cadence_core::{calendar, config::Config};
use chrono::NaiveDate;
use std::path::Path;

/// Load the config, failing with the "run cadence init" hint when the store
/// does not exist yet.
pub(crate) fn require_init(root: &Path) -> anyhow::Result<Config> {
    Config::load(root).with_context(|| format!("no CRM store at {}", root.display()))
}

/// clap value parser for `YYYY-MM-DD` arguments, limited to the years the
/// calendar supports.
pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, String> {
    let date: NaiveDate = s.parse().map_err(|e| format!("{e}"))?;
    calendar::check_date(date).map_err(|e| e.to_string())
}
