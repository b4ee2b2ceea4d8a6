// src/config.rs

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};
use tracing::debug;

const DEFAULT_FILE_URL: &str =
    "https://www.indec.gob.ar/ftp/cuadros/economia/sh_ipc_precios_promedio.xls";
const DEFAULT_FALLBACK_URL: &str = "https://www.indec.gob.ar/Nivel4/Tema/3/5/31";
const DEFAULT_REFERENCE_TEXT: &str = "Índice de precios al consumidor";
const DEFAULT_SHEET: &str = "Nacional";

/// Output sinks for the extracted table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Parquet,
    Json,
}

impl Format {
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Parquet => "parquet",
            Format::Json => "json",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "parquet" => Ok(Format::Parquet),
            "json" => Ok(Format::Json),
            other => bail!("unknown output format {:?}", other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Direct workbook URL tried first.
    pub file_url: String,
    /// Publication page searched for a workbook link when the direct URL fails.
    pub fallback_url: String,
    /// Anchor text preferred on the publication page; empty means none.
    pub reference_text: String,
    pub sheet_name: String,
    pub output_dir: PathBuf,
    pub formats: Vec<Format>,
    /// Request timeout; transport default when unset.
    pub timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file_url: DEFAULT_FILE_URL.to_string(),
            fallback_url: DEFAULT_FALLBACK_URL.to_string(),
            reference_text: DEFAULT_REFERENCE_TEXT.to_string(),
            sheet_name: DEFAULT_SHEET.to_string(),
            output_dir: PathBuf::from("output"),
            formats: vec![Format::Parquet, Format::Json],
            timeout_secs: None,
        }
    }
}

impl Config {
    /// Defaults, then the YAML file named by `IPC_CONFIG`, then `IPC_*` env vars.
    pub fn load() -> Result<Self> {
        let mut config = match env::var("IPC_CONFIG") {
            Ok(path) => Self::from_yaml_file(&path)?,
            Err(_) => Self::default(),
        };
        config.apply_overrides(|key| env::var(key).ok())?;
        debug!(?config, "configuration loaded");
        Ok(config)
    }

    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let text = fs::read_to_string(path).with_context(|| format!("reading config {}", path))?;
        Self::from_yaml(&text).with_context(|| format!("parsing config {}", path))
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Apply `IPC_*` overrides looked up through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("IPC_FILE_URL") {
            self.file_url = v;
        }
        if let Some(v) = lookup("IPC_FALLBACK_URL") {
            self.fallback_url = v;
        }
        if let Some(v) = lookup("IPC_REFERENCE_TEXT") {
            self.reference_text = v;
        }
        if let Some(v) = lookup("IPC_SHEET") {
            self.sheet_name = v;
        }
        if let Some(v) = lookup("IPC_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup("IPC_FORMATS") {
            self.formats = v
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .map(Format::parse)
                .collect::<Result<_>>()?;
        }
        if let Some(v) = lookup("IPC_TIMEOUT_SECS") {
            let secs = v
                .trim()
                .parse::<u64>()
                .with_context(|| format!("IPC_TIMEOUT_SECS={:?} is not a number", v))?;
            self.timeout_secs = Some(secs);
        }
        Ok(())
    }

    pub fn reference_text(&self) -> Option<&str> {
        Some(self.reference_text.as_str()).filter(|s| !s.is_empty())
    }
}
