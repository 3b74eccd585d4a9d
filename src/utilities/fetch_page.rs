use anyhow::{Context, Result};
use colored::Colorize;
use rand::seq::SliceRandom;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::{Client, StatusCode};
use tokio::time::{sleep, Duration};

use crate::config::config::HttpConfig;

/// Builds the shared HTTP client with the configured per-request timeout.
pub fn build_client(http: &HttpConfig) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(http.timeout_secs))
        .build()
        .context("Failed to build HTTP client")
}

/// GETs `url`, retrying up to `http.retries` times with a random user agent
/// per attempt. Only a 200 response is returned; anything else means the
/// page is unavailable.
pub async fn fetch_page(client: &Client, url: &str, http: &HttpConfig) -> Result<String> {
    let attempts = http.retries.max(1);
    let mut last_status: Option<StatusCode> = None;

    for attempt in 1..=attempts {
        let mut request = client
            .get(url)
            .header(ACCEPT, &http.accept)
            .header(ACCEPT_LANGUAGE, &http.accept_language);

        if let Some(user_agent) = http.user_agents.choose(&mut rand::thread_rng()) {
            request = request.header(USER_AGENT, user_agent);
        }

        match request.send().await {
            Ok(response) if response.status() == StatusCode::OK => {
                return response
                    .text()
                    .await
                    .with_context(|| format!("Failed to read response body for {}", url));
            }
            Ok(response) => {
                last_status = Some(response.status());
                eprintln!(
                    "{}",
                    format!("GET status {} (attempt {}) for {}", response.status(), attempt, url)
                        .yellow()
                );
            }
            Err(e) => {
                eprintln!("{}", format!("GET error (attempt {}): {}", attempt, e).yellow());
            }
        }

        sleep(Duration::from_millis(500 * u64::from(attempt))).await;
    }

    match last_status {
        Some(status) => anyhow::bail!("Page unavailable after {} attempts (status {}): {}", attempts, status, url),
        None => anyhow::bail!("Page unavailable after {} attempts: {}", attempts, url),
    }
}
