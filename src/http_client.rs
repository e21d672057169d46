use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use log::debug;
use once_cell::sync::OnceCell;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, USER_AGENT};

static CLIENT: OnceCell<Client> = OnceCell::new();

/// Process-wide client. The timeout of the first call sticks.
pub fn http_client(timeout_secs: u64) -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build http client")
    })
}

pub fn get_text(client: &Client, url: &str) -> Result<String> {
    debug!("GET {url}");
    let resp = client
        .get(url)
        .header(USER_AGENT, concat!("sleeper_report/", env!("CARGO_PKG_VERSION")))
        .header(ACCEPT, "application/json")
        .send()
        .with_context(|| format!("request failed: {url}"))?;
    let status = resp.status();
    let body = resp.text().context("failed reading body")?;
    if !status.is_success() {
        return Err(anyhow!("http {} from {}: {}", status, url, body));
    }
    Ok(body)
}
