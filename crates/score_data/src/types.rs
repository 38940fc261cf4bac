//! Match records as published by the data feed
//!
//! The feed is a JSON object keyed by date (`YYYY-MM-DD`), each date holding
//! the fixtures of that day with both teams' season shot/xG totals.

use anyhow::{Context, Result};
use score_core::{MatchInput, TeamInput};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Competition {
    pub name: String,
    #[serde(default)]
    pub logo: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub name: String,
    #[serde(default)]
    pub logo: String,
    pub shots: u32,
    pub xg: f64,
    /// Real score once the match is finished
    #[serde(default)]
    pub score: Option<u32>,
    pub played: u32,
}

impl From<&TeamRecord> for TeamInput {
    fn from(team: &TeamRecord) -> Self {
        TeamInput::new(team.name.clone(), team.shots, team.xg, team.played)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub utc_time: String,
    #[serde(default)]
    pub finished: bool,
    pub competition: Competition,
    pub home: TeamRecord,
    pub away: TeamRecord,
}

impl MatchRecord {
    /// Convert to the engine input, rejecting zero shots / zero played / bad xG.
    pub fn to_input(&self) -> Result<MatchInput> {
        let input = MatchInput::new(
            self.competition.name.clone(),
            TeamInput::from(&self.home),
            TeamInput::from(&self.away),
        );
        input
            .validate()
            .with_context(|| format!("Invalid match record: {} vs {}", self.home.name, self.away.name))?;
        Ok(input)
    }

    /// Real final score, if the match has been played.
    pub fn real_score(&self) -> Option<(u32, u32)> {
        match (self.finished, self.home.score, self.away.score) {
            (true, Some(home), Some(away)) => Some((home, away)),
            _ => None,
        }
    }
}

/// Fixtures keyed by date, ordered so the last key is the latest date
pub type Matches = BTreeMap<String, Vec<MatchRecord>>;
