//! Match data store for the score simulator
//!
//! Feed JSON → local cache (`matches.json`) → per-date fixture selection →
//! `score_core` simulation.

pub mod source;
pub mod store;
pub mod types;

use anyhow::Result;
use score_core::{MatchResult, MatchSimulator, SimConfig};

pub use source::{HttpSource, MatchSource, MemorySource, MATCHES_URL};
pub use store::{date_key, MatchStore, DATA_DIR_ENV};
pub use types::{Competition, MatchRecord, Matches, TeamRecord};

/// Simulate one fixture with `config`.
pub fn play_match(record: &MatchRecord, config: &SimConfig) -> Result<MatchResult> {
    let input = record.to_input()?;
    let result = MatchSimulator::with_config(input, config.clone())?.simulate()?;
    Ok(result)
}

/// Simulate every fixture; a bad record fails only its own entry.
pub fn play_matches(records: &[MatchRecord], config: &SimConfig) -> Vec<Result<MatchResult>> {
    records.iter().map(|record| play_match(record, config)).collect()
}
