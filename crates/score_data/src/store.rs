//! Local JSON cache of the match feed
//!
//! The cache lives at `<directory>/matches.json`. The directory is taken from
//! `SCORE_SIMULATOR_DATA`, else `$HOME/score-simulator-data`.
//!
//! Cache rule: the cached data is used as long as its latest date key is
//! today; otherwise (stale or unreadable) the feed is fetched again and the
//! cache overwritten.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::source::MatchSource;
use crate::types::{MatchRecord, Matches};

pub const DATA_DIR_ENV: &str = "SCORE_SIMULATOR_DATA";
pub const DEFAULT_DIR_NAME: &str = "score-simulator-data";
pub const MATCHES_FILE: &str = "matches.json";

/// Date key format of the feed
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn home_dir() -> PathBuf {
    env::var_os("HOME")
        .or_else(|| env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

#[derive(Debug, Clone, Default)]
pub struct MatchStore {
    path: Option<PathBuf>,
}

impl MatchStore {
    /// Store rooted at `SCORE_SIMULATOR_DATA` if set, else the default directory.
    pub fn new() -> Self {
        let path = env::var(DATA_DIR_ENV)
            .ok()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);
        Self { path }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: Some(path.into()) }
    }

    /// Explicit data directory, if configured.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn directory(&self) -> PathBuf {
        match &self.path {
            Some(path) => path.clone(),
            None => home_dir().join(DEFAULT_DIR_NAME),
        }
    }

    pub fn file(&self) -> PathBuf {
        self.directory().join(MATCHES_FILE)
    }

    pub fn mkdir(&self) -> Result<()> {
        let dir = self.directory();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create data directory: {}", dir.display()))
    }

    pub fn read(&self) -> Result<Matches> {
        let file = self.file();
        let json = fs::read_to_string(&file)
            .with_context(|| format!("Failed to read matches file: {}", file.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse matches file: {}", file.display()))
    }

    pub fn save(&self, matches: &Matches) -> Result<()> {
        self.mkdir()?;
        let file = self.file();
        let json = serde_json::to_string_pretty(matches).context("Failed to serialize matches")?;
        fs::write(&file, json)
            .with_context(|| format!("Failed to write matches file: {}", file.display()))?;
        debug!(file = %file.display(), dates = matches.len(), "matches saved");
        Ok(())
    }

    /// Fetch from `source` and overwrite the cache.
    pub fn fetch(&self, source: &dyn MatchSource) -> Result<Matches> {
        let matches = source.fetch()?;
        self.save(&matches)?;
        Ok(matches)
    }

    /// True if the latest date in `matches` is `today`.
    pub fn is_current(matches: &Matches, today: NaiveDate) -> bool {
        matches.keys().next_back() == Some(&date_key(today))
    }

    /// Cached data if it is current, otherwise a fresh fetch.
    pub fn get(&self, source: &dyn MatchSource, today: NaiveDate) -> Result<Matches> {
        if self.file().exists() {
            match self.read() {
                Ok(cached) if Self::is_current(&cached, today) => {
                    debug!(file = %self.file().display(), "using cached matches");
                    return Ok(cached);
                }
                Ok(_) => info!("cached matches are stale, refreshing"),
                Err(e) => {
                    warn!(error = %format!("{e:#}"), "cached matches unreadable, refreshing")
                }
            }
        } else {
            info!("no cached matches, fetching");
        }
        self.fetch(source)
    }

    /// Fixtures of `date`; empty if the date is not in the data.
    pub fn select<'a>(date: &str, matches: &'a Matches) -> &'a [MatchRecord] {
        matches.get(date).map(Vec::as_slice).unwrap_or(&[])
    }
}
