// src/pipeline.rs

use anyhow::Result;
use reqwest::blocking::Client;
use std::fmt;
use tracing::{info, instrument, warn};

use crate::{
    config::Config,
    extract,
    fetch::{download, resolve_xls_link},
    observation::Observation,
    workbook,
};

/// Where the workbook that got extracted came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// The configured direct URL.
    Primary(String),
    /// A link found on the fallback publication page.
    Fallback(String),
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Primary(u) => write!(f, "primary {}", u),
            Source::Fallback(u) => write!(f, "fallback {}", u),
        }
    }
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Extracted {
        source: Source,
        observations: Vec<Observation>,
    },
    /// The direct URL failed and the fallback page had no workbook link.
    NoFallbackLink,
    /// A fallback link was found but what it served is not a workbook.
    InvalidContent { url: String },
}

fn fetch_valid(client: &Client, url: &str) -> Option<Vec<u8>> {
    let bytes = download(client, url)?;
    if workbook::is_valid(&bytes) {
        Some(bytes)
    } else {
        warn!(url, size = bytes.len(), "downloaded content is not a workbook");
        None
    }
}

/// Primary URL, then at most one fallback link.
fn acquire(client: &Client, config: &Config) -> std::result::Result<(Source, Vec<u8>), Outcome> {
    if let Some(bytes) = fetch_valid(client, &config.file_url) {
        return Ok((Source::Primary(config.file_url.clone()), bytes));
    }

    info!(page = %config.fallback_url, "primary failed; searching fallback page");
    let url = resolve_xls_link(client, &config.fallback_url, config.reference_text())
        .ok_or(Outcome::NoFallbackLink)?;

    match fetch_valid(client, &url) {
        Some(bytes) => Ok((Source::Fallback(url), bytes)),
        None => Err(Outcome::InvalidContent { url }),
    }
}

/// Fetch the workbook (direct URL first, publication page second) and
/// extract the configured sheet.
///
/// Network and content failures are reported through [`Outcome`]; `Err`
/// means a workbook that validated could not be read.
#[instrument(level = "info", skip_all, fields(file_url = %config.file_url))]
pub fn run(client: &Client, config: &Config) -> Result<Outcome> {
    let (source, bytes) = match acquire(client, config) {
        Ok(found) => found,
        Err(outcome) => {
            info!(?outcome, "no workbook to extract");
            return Ok(outcome);
        }
    };

    info!(%source, size = bytes.len(), "extracting");
    let observations = extract::extract(&bytes, &config.sheet_name)?;
    Ok(Outcome::Extracted {
        source,
        observations,
    })
}
