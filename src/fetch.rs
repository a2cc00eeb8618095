// src/fetch.rs

use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;
use tokio::fs;
use tokio::time::sleep;
use url::Url;

const MAX_RETRIES: usize = 3;
const RETRY_DELAY: Duration = Duration::from_secs(1);

/// Where a document comes from: a local file or an http(s) URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Path(PathBuf),
    Url(Url),
}

impl Input {
    /// Classify a command-line argument. Anything that parses as an http(s)
    /// URL is fetched; everything else is treated as a path.
    pub fn parse(arg: &str) -> Self {
        match Url::parse(arg) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Input::Url(url),
            _ => Input::Path(PathBuf::from(arg)),
        }
    }

    /// Short name for the document, used for logging and output file names.
    pub fn name(&self) -> String {
        match self {
            Input::Path(path) => path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            Input::Url(url) => url
                .path_segments()
                .and_then(|segments| segments.last())
                .filter(|segment| !segment.is_empty())
                .map(|segment| segment.trim_end_matches(".html").to_string())
                .or_else(|| url.host_str().map(str::to_string))
                .unwrap_or_else(|| "document".to_string()),
        }
    }
}

/// Load the document's HTML text from disk or over HTTP.
pub async fn load_document(client: &Client, input: &Input) -> Result<String> {
    match input {
        Input::Path(path) => fs::read_to_string(path)
            .await
            .with_context(|| format!("reading {}", path.display())),
        Input::Url(url) => fetch_html(client, url)
            .await
            .with_context(|| format!("fetching {}", url)),
    }
}

async fn fetch_html(client: &Client, url: &Url) -> Result<String> {
    let mut attempt = 0;

    // retry loop: transport errors get retried, bad statuses are fatal
    loop {
        attempt += 1;

        match client.get(url.as_str()).send().await {
            Ok(resp) if resp.status().is_success() => match resp.text().await {
                Ok(body) => return Ok(body),
                Err(_) if attempt < MAX_RETRIES => {
                    sleep(RETRY_DELAY).await;
                    continue;
                }
                Err(e) => return Err(e.into()),
            },
            Err(_) if attempt < MAX_RETRIES => {
                sleep(RETRY_DELAY).await;
                continue;
            }
            Ok(resp) => return Err(anyhow!("HTTP error: {}", resp.status())),
            Err(e) => return Err(e.into()),
        }
    }
}
