use anyhow::{Context, Result, bail};
use std::time::Duration;
use tracing::{info, warn};

use crate::config::FetchConfig;

const USER_AGENT: &str = concat!("stormcheck/", env!("CARGO_PKG_VERSION"));

/// Whether a response status is worth retrying
fn is_retriable(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// Seconds to wait before `attempt` (0-based)
fn backoff_secs(attempt: u32, base: u64) -> u64 {
    base.saturating_mul(attempt as u64)
}

/// Download an outlook KML document
///
/// Retries on 429 and 5xx responses with a linear back-off; any other
/// non-success status fails at once.
pub fn fetch_kml(url: &str, config: &FetchConfig) -> Result<String> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .context("Failed to create HTTP client")?;

    let max_retries = config.max_retries.max(1);
    let mut last_error = None;

    for attempt in 0..max_retries {
        if attempt > 0 {
            let wait_secs = backoff_secs(attempt, config.retry_delay_secs);
            warn!(
                "Outlook download failed, retrying in {} seconds (attempt {}/{})",
                wait_secs,
                attempt + 1,
                max_retries
            );
            std::thread::sleep(Duration::from_secs(wait_secs));
        }

        let response = client
            .get(url)
            .send()
            .with_context(|| format!("Failed to send request to {}", url))?;

        let status = response.status();
        if status.is_success() {
            let body = response
                .text()
                .context("Failed to read outlook response body")?;
            info!("Downloaded {} bytes from {}", body.len(), url);
            return Ok(body);
        }

        if is_retriable(status.as_u16()) {
            last_error = Some(format!("{} returned status {} (attempt {})", url, status, attempt + 1));
            continue;
        }

        bail!("{} returned error status: {}", url, status);
    }

    bail!(
        "Outlook download failed after {} attempts: {}",
        max_retries,
        last_error.unwrap_or_else(|| "Unknown error".to_string())
    )
}
