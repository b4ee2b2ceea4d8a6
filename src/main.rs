use anyhow::Result;
use ipcscraper::{
    config::Config,
    fetch, output,
    pipeline::{self, Outcome},
};
use std::env;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()))
    });
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    // ─── 2) configuration & client ───────────────────────────────────
    let config = Config::load()?;
    let client = fetch::build_client(&config)?;

    // ─── 3) fetch & extract ──────────────────────────────────────────
    match pipeline::run(&client, &config)? {
        Outcome::Extracted {
            source,
            observations,
        } => {
            info!(%source, rows = observations.len(), "extraction finished");
            // ─── 4) export ───────────────────────────────────────────
            let written = output::export(&observations, &config.output_dir, &config.formats)?;
            info!("wrote {} file(s) to {}", written.len(), config.output_dir.display());
        }
        Outcome::NoFallbackLink => {
            info!(page = %config.fallback_url, "no workbook link found; nothing to do");
        }
        Outcome::InvalidContent { url } => {
            info!(%url, "fallback link did not serve a workbook");
            eprintln!("The downloaded content is not a valid Excel file.");
        }
    }

    info!("all done");
    Ok(())
}
