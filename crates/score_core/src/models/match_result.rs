//! Match Result Data Structures
//!
//! `MatchResult` is the sink of a simulation run. A single `play` fills it
//! minute by minute from `Frame`s; `play_n` combines many of them with
//! `merge_results` / `average_results` (see `engine::simulator`).
//!
//! Display statistics (progress bars, goal logs) are derived on read and are
//! never stored.

use serde::{Deserialize, Serialize};

use super::{Frame, MatchInput, Side, TeamInput};
use crate::engine::stats::{build_progress_bar, goal_log, share_percent};

/// Accumulated totals of one team
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultTeam {
    pub name: String,
    pub shots: u32,
    pub score: u32,
    pub xg: f64,
    /// Minute of each goal, chronological
    pub goal_minutes: Vec<u32>,
}

impl ResultTeam {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Default::default() }
    }

    /// Goal minutes rendered as `"12', 57', "`.
    pub fn goal_log(&self) -> String {
        goal_log(&self.goal_minutes)
    }
}

impl From<&TeamInput> for ResultTeam {
    fn from(team: &TeamInput) -> Self {
        ResultTeam::new(team.name.clone())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub home: ResultTeam,
    pub away: ResultTeam,
    pub competition: String,
    /// Minutes simulated so far
    pub timing: u32,
    pub played: bool,
}

impl MatchResult {
    /// Empty result for the fixture, nothing played yet.
    pub fn new(input: &MatchInput) -> Self {
        Self {
            home: ResultTeam::from(&input.home),
            away: ResultTeam::from(&input.away),
            competition: input.competition.clone(),
            timing: 0,
            played: false,
        }
    }

    pub fn team(&self, side: Side) -> &ResultTeam {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    pub fn team_mut(&mut self, side: Side) -> &mut ResultTeam {
        match side {
            Side::Home => &mut self.home,
            Side::Away => &mut self.away,
        }
    }

    /// Fold one minute into the running totals.
    pub fn record_frame(&mut self, minute: u32, frame: &Frame) {
        for side in [Side::Home, Side::Away] {
            let fs = frame.side(side);
            let team = self.team_mut(side);
            if fs.shot {
                team.shots += 1;
            }
            team.xg += fs.xg;
        }

        if let Some(side) = frame.scorer() {
            let team = self.team_mut(side);
            team.score += 1;
            team.goal_minutes.push(minute);
        }

        self.timing = minute + 1;
    }

    pub fn finish(&mut self, fulltime: u32) {
        self.timing = fulltime;
        self.played = true;
    }

    pub fn shots_share(&self) -> f64 {
        share_percent(self.home.shots as f64, self.away.shots as f64)
    }

    pub fn xg_share(&self) -> f64 {
        share_percent(self.home.xg, self.away.xg)
    }

    pub fn shots_progress_bar(&self) -> String {
        build_progress_bar(self.shots_share())
    }

    pub fn xg_progress_bar(&self) -> String {
        build_progress_bar(self.xg_share())
    }

    /// `"<competition> - <home> <hs> : <as> <away>"`
    pub fn headline(&self) -> String {
        format!(
            "{} - {} {} : {} {}",
            self.competition, self.home.name, self.home.score, self.away.score, self.away.name
        )
    }
}
