//! EOP download from CelesTrak

use anyhow::{Context, Result};
use chrono::Utc;
use std::thread;
use std::time::Duration;
use tracing::{info, warn};

use super::cache::{CachedEop, EopCache};
use super::parser::parse_celestrak_csv;
use super::types::EopTable;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Download and parse an EOP table.
pub async fn fetch_eop(client: &reqwest::Client, url: &str) -> Result<EopTable> {
    let resp = client
        .get(url)
        .header("accept", "text/csv")
        .send()
        .await
        .with_context(|| format!("request {}", url))?;
    let status = resp.status();
    if !status.is_success() {
        anyhow::bail!("http {} for {}", status, url);
    }
    let body = resp.text().await?;
    info!(url, bytes = body.len(), "fetched EOP data");
    parse_celestrak_csv(&body)
}

/// [`fetch_eop`] on a private tokio runtime, for synchronous callers.
///
/// The runtime lives on its own worker thread, so this may also be called
/// from inside another tokio runtime (it blocks that thread until done).
pub fn fetch_eop_blocking(url: &str) -> Result<EopTable> {
    let url = url.to_string();
    let worker = thread::spawn(move || -> Result<EopTable> {
        let rt = tokio::runtime::Runtime::new().context("tokio runtime")?;
        rt.block_on(async move {
            let client = reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .context("http client")?;
            fetch_eop(&client, &url).await
        })
    });
    worker
        .join()
        .map_err(|_| anyhow::anyhow!("EOP download worker panicked"))?
}

/// Return the cached table while it is fresh, otherwise download and
/// refresh the cache. A stale cache is still used if the download fails.
pub fn load_or_refresh(cache: &EopCache, url: &str) -> Result<EopTable> {
    let cached = match cache.read() {
        Ok(entry) => entry,
        Err(e) => {
            warn!("ignoring unreadable EOP cache: {}", e);
            None
        }
    };

    if let Some(entry) = &cached {
        if cache.is_valid(entry) && entry.source_url == url {
            return Ok(entry.table.clone());
        }
    }

    match fetch_eop_blocking(url) {
        Ok(table) => {
            let entry = CachedEop {
                source_url: url.to_string(),
                fetched_at: Utc::now(),
                table,
            };
            if let Err(e) = cache.write(&entry) {
                warn!("failed to write EOP cache: {}", e);
            }
            Ok(entry.table)
        }
        Err(e) => match cached {
            Some(stale) => {
                warn!("EOP download failed, using stale cache: {}", e);
                Ok(stale.table)
            }
            None => Err(e),
        },
    }
}
