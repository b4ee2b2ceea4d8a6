// src/fetch/mod.rs

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use std::time::Duration;

use crate::config::Config;

/// Locating the workbook link on the publication page
pub mod links;

/// Downloading the workbook itself
pub mod download;

pub use download::download;
pub use links::{resolve_xls_link, select_xls_link};

/// Sent only with the publication page request; the site rejects the
/// default client string there.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/114.0.5735.110 Safari/537.36";

/// Blocking client shared by every request of one run.
pub fn build_client(config: &Config) -> Result<Client> {
    let mut builder = Client::builder();
    if let Some(secs) = config.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder.build().context("building HTTP client")
}
