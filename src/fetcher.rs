use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::StatusCode;
use thiserror::Error;
use tracing::info;

const USER_AGENT: &str = concat!("wordfreq/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport failure: bad URL, unreachable host, broken body.
    #[error("request to {url} failed")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// Server answered with a 4xx/5xx status.
    #[error("{status} for url: {url}")]
    HttpStatus { url: String, status: StatusCode },
}

/// Raw response body of a single fetch.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub url: String,
    pub text: String,
}

/// Fetch `url` with one GET. No retries, no caching, default timeouts.
pub async fn fetch(client: &reqwest::Client, url: &str) -> Result<RawDocument, FetchError> {
    let network = |source| FetchError::Network {
        url: url.to_string(),
        source,
    };

    let start = Instant::now();
    let response = client.get(url).send().await.map_err(network)?;
    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        return Err(FetchError::HttpStatus {
            url: url.to_string(),
            status,
        });
    }

    let text = response.text().await.map_err(network)?;
    info!(
        url,
        status = status.as_u16(),
        bytes = text.len(),
        latency_ms = start.elapsed().as_millis() as u64,
        "Fetched document"
    );

    Ok(RawDocument {
        url: url.to_string(),
        text,
    })
}

pub fn client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder().user_agent(USER_AGENT).build()
}

/// [`fetch`] with a spinner on stderr while the request is in flight.
pub async fn fetch_with_spinner(
    client: &reqwest::Client,
    url: &str,
) -> Result<RawDocument, FetchError> {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg} [{elapsed}]") {
        pb.set_style(style);
    }
    pb.set_message(format!("Fetching {}", url));
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = fetch(client, url).await;
    pb.finish_and_clear();
    result
}

// ── Tests ──
