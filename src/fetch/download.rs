// src/fetch/download.rs

use anyhow::Result;
use reqwest::blocking::Client;
use tracing::{info, instrument, warn};

fn get_bytes(client: &Client, url: &str) -> Result<Vec<u8>> {
    let resp = client.get(url).send()?.error_for_status()?;
    Ok(resp.bytes()?.to_vec())
}

/// GET `url` and return the body. Connection failures and non-2xx
/// statuses are logged and yield `None`.
#[instrument(level = "info", skip(client))]
pub fn download(client: &Client, url: &str) -> Option<Vec<u8>> {
    match get_bytes(client, url) {
        Ok(bytes) => {
            info!(size = bytes.len(), "downloaded");
            Some(bytes)
        }
        Err(e) => {
            warn!(error = %e, "download failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn download_blocking(url: String) -> Option<Vec<u8>> {
        tokio::task::spawn_blocking(move || download(&Client::new(), &url))
            .await
            .expect("download task panicked")
    }

    #[tokio::test]
    async fn returns_body_on_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ftp/precios.xls"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1u8, 2, 3]))
            .mount(&server)
            .await;

        let body = download_blocking(format!("{}/ftp/precios.xls", server.uri())).await;
        assert_eq!(body, Some(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn error_status_yields_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        assert_eq!(
            download_blocking(format!("{}/missing.xls", server.uri())).await,
            None
        );
    }

    #[tokio::test]
    async fn connection_failure_yields_none() {
        // nothing listens on port 9 locally
        assert_eq!(
            download_blocking("http://127.0.0.1:9/precios.xls".to_string()).await,
            None
        );
    }
}
