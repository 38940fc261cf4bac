//! Match input records
//!
//! A `MatchInput` is the season-level shot/xG summary of both teams that the
//! attack model is derived from. It is built once per fixture and never mutated.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, SimError};

/// Home or away
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Home => "home",
            Side::Away => "away",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-team season totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamInput {
    pub name: String,
    /// Total shots over `played` games (must be >= 1)
    pub shots: u32,
    /// Cumulative expected goals over `played` games
    pub xg: f64,
    /// Games played (must be >= 1)
    pub played: u32,
}

impl TeamInput {
    pub fn new(name: impl Into<String>, shots: u32, xg: f64, played: u32) -> Self {
        Self { name: name.into(), shots, xg, played }
    }

    /// Mean xG of a single shot.
    pub fn xg_per_shot(&self) -> f64 {
        self.xg / self.shots as f64
    }

    fn validate(&self, side: Side) -> Result<()> {
        if self.shots == 0 {
            return Err(SimError::ZeroShots { side });
        }
        if self.played == 0 {
            return Err(SimError::ZeroPlayed { side });
        }
        if !self.xg.is_finite() || self.xg < 0.0 {
            return Err(SimError::InvalidInput(format!(
                "{} xg must be a non-negative number, got {}",
                side, self.xg
            )));
        }
        Ok(())
    }
}

/// One fixture to simulate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchInput {
    pub competition: String,
    pub home: TeamInput,
    pub away: TeamInput,
}

impl MatchInput {
    pub fn new(competition: impl Into<String>, home: TeamInput, away: TeamInput) -> Self {
        Self { competition: competition.into(), home, away }
    }

    pub fn team(&self, side: Side) -> &TeamInput {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    /// Check the preconditions the attack model divides by.
    pub fn validate(&self) -> Result<()> {
        self.home.validate(Side::Home)?;
        self.away.validate(Side::Away)?;
        Ok(())
    }
}
