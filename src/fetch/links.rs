// src/fetch/links.rs

use anyhow::{Context, Result};
use reqwest::{blocking::Client, header::USER_AGENT};
use scraper::{Html, Selector};
use tracing::{debug, info, instrument, trace, warn};
use url::Url;

use super::BROWSER_USER_AGENT;

fn get_page(client: &Client, page_url: &str) -> Result<String> {
    client
        .get(page_url)
        .header(USER_AGENT, BROWSER_USER_AGENT)
        .send()
        .with_context(|| format!("GET {}", page_url))?
        .error_for_status()
        .with_context(|| format!("Non-success status {}", page_url))?
        .text()
        .with_context(|| format!("Reading text from {}", page_url))
}

/// Fetch `page_url` and pick the `.xls` link it publishes.
///
/// See [`select_xls_link`] for the selection rules. Any network or HTTP
/// failure is logged and yields `None`.
#[instrument(level = "info", skip(client))]
pub fn resolve_xls_link(
    client: &Client,
    page_url: &str,
    reference_text: Option<&str>,
) -> Option<String> {
    let html = match get_page(client, page_url) {
        Ok(html) => html,
        Err(e) => {
            warn!(error = %e, "could not load fallback page");
            return None;
        }
    };
    let link = select_xls_link(&html, page_url, reference_text);
    match &link {
        Some(url) => info!(%url, "resolved workbook link"),
        None => info!("no workbook link on page"),
    }
    link
}

/// Choose among the anchors whose `href` ends in `.xls`.
///
/// - With `reference_text`, the first anchor (document order) whose text
///   contains it, ignoring case; otherwise the last anchor.
/// - Without it, the last anchor.
///
/// Relative hrefs are resolved against the scheme and host of `page_url`.
pub fn select_xls_link(html: &str, page_url: &str, reference_text: Option<&str>) -> Option<String> {
    let selector = Selector::parse(r#"a[href$=".xls"]"#).expect("selector should parse");
    let document = Html::parse_document(html);

    let anchors: Vec<(&str, String)> = document
        .select(&selector)
        .filter_map(|el| {
            let href = el.value().attr("href")?;
            let text = el.text().collect::<String>();
            trace!(href, text = %text.trim(), "xls anchor");
            Some((href, text))
        })
        .collect();
    debug!(count = anchors.len(), "xls anchors found");

    let reference = reference_text
        .filter(|r| !r.is_empty())
        .map(str::to_lowercase);

    let chosen = match reference {
        Some(reference) => anchors
            .iter()
            .find(|(_, text)| text.to_lowercase().contains(&reference))
            .or_else(|| anchors.last()),
        None => anchors.last(),
    };
    let (href, _) = chosen?;

    absolutize(href, page_url)
}

fn absolutize(href: &str, page_url: &str) -> Option<String> {
    if let Ok(url) = Url::parse(href) {
        return Some(url.to_string());
    }
    let page = match Url::parse(page_url) {
        Ok(u) => u,
        Err(e) => {
            warn!(page_url, error = %e, "page URL does not parse");
            return None;
        }
    };
    let origin = page.origin().ascii_serialization();
    Url::parse(&origin)
        .and_then(|base| base.join(href))
        .map(|u| u.to_string())
        .map_err(|e| warn!(href, error = %e, "could not resolve link"))
        .ok()
}
