use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::warn;

use super::ReadAt;
use crate::error::T64Error;
use anyhow::{Result, anyhow, bail};

const MAX_RETRY: u32 = 10;

/// HTTP Range reader for remote tape images and containers
pub struct HttpRangeReader {
    client: Client,
    url: String,
    size: u64,
}

impl HttpRangeReader {
    /// Ask `url` with a HEAD request for Range support and size.
    ///
    /// A 404 is reported as `SourceNotFound`.
    pub async fn new(url: String) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        let resp = client.head(&url).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Err(T64Error::SourceNotFound(url).into());
        }
        if !resp.status().is_success() {
            bail!("HTTP request failed with status: {}", resp.status());
        }

        let accept_ranges = resp
            .headers()
            .get("accept-ranges")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("none");
        if !accept_ranges.contains("bytes") {
            bail!("Remote server does not support Range requests");
        }

        let size = resp
            .headers()
            .get("content-length")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| anyhow!("Remote server did not return Content-Length"))?;

        Ok(Self { client, url, size })
    }
}

#[async_trait]
impl ReadAt for HttpRangeReader {
    async fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        if offset + buf.len() as u64 > self.size {
            bail!(
                "Read of {} bytes at {} is past the end of {}",
                buf.len(),
                offset,
                self.url
            );
        }

        let end = offset + buf.len() as u64 - 1;
        let mut received = 0;
        let mut retry_count = 0;

        while received < buf.len() {
            let range = format!("bytes={}-{}", offset + received as u64, end);
            let result = self
                .client
                .get(&self.url)
                .header("Range", &range)
                .send()
                .await;

            match result {
                Ok(resp) => {
                    if resp.status() != StatusCode::PARTIAL_CONTENT {
                        bail!("HTTP request failed with status: {}", resp.status());
                    }
                    let bytes = resp.bytes().await?;
                    if bytes.is_empty() {
                        bail!("Empty range response from {}", self.url);
                    }
                    let chunk_len = bytes.len().min(buf.len() - received);
                    buf[received..received + chunk_len].copy_from_slice(&bytes[..chunk_len]);
                    received += chunk_len;
                }
                Err(e) if e.is_timeout() || e.is_connect() => {
                    retry_count += 1;
                    if retry_count >= MAX_RETRY {
                        bail!("Max retries exceeded for {}", self.url);
                    }
                    warn!(
                        retry = retry_count,
                        max = MAX_RETRY,
                        error = %e,
                        "connection error, retrying"
                    );
                    tokio::time::sleep(Duration::from_millis(500 * retry_count as u64)).await;
                }
                Err(e) => return Err(e.into()),
            }
        }

        Ok(received)
    }

    fn size(&self) -> u64 {
        self.size
    }
}
