//! Where fresh match data comes from

use anyhow::{Context, Result};
use std::time::Duration;
use tracing::info;

use crate::types::Matches;

/// Published feed of upcoming fixtures
pub const MATCHES_URL: &str =
    "https://raw.githubusercontent.com/tanzhijian/score-simulator-data/release/matches.json";

const REQUEST_TIMEOUT_SECS: u64 = 30;

pub trait MatchSource {
    fn fetch(&self) -> Result<Matches>;
}

/// Blocking HTTP fetch of the feed (no retries, no proxy)
pub struct HttpSource {
    url: String,
    client: reqwest::blocking::Client,
}

impl HttpSource {
    pub fn new() -> Result<Self> {
        Self::with_url(MATCHES_URL)
    }

    pub fn with_url(url: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { url: url.into(), client })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl MatchSource for HttpSource {
    fn fetch(&self) -> Result<Matches> {
        info!(url = %self.url, "fetching matches");
        let matches = self
            .client
            .get(&self.url)
            .send()
            .with_context(|| format!("Failed to request {}", self.url))?
            .error_for_status()
            .with_context(|| format!("Bad response from {}", self.url))?
            .json::<Matches>()
            .context("Failed to parse matches JSON")?;
        Ok(matches)
    }
}

/// Fixed in-memory data, for offline runs and tests
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    matches: Matches,
}

impl MemorySource {
    pub fn new(matches: Matches) -> Self {
        Self { matches }
    }
}

impl MatchSource for MemorySource {
    fn fetch(&self) -> Result<Matches> {
        Ok(self.matches.clone())
    }
}
