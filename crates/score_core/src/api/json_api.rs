use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::engine::simulator::resolve_seed;
use crate::engine::{MatchSimulator, SimConfig};
use crate::error::{Result, SimError};
use crate::models::{MatchInput, MatchResult, ResultTeam};

pub const REQUEST_SCHEMA_VERSION: u8 = 1;

#[derive(Debug, Deserialize)]
pub struct SimulationRequest {
    pub schema_version: u8,
    #[serde(rename = "match")]
    pub match_input: MatchInput,
    /// Runs to average; 1 returns a raw single match
    #[serde(default)]
    pub runs: Option<usize>,
    #[serde(default)]
    pub fulltime: Option<u32>,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamResponse {
    pub name: String,
    pub shots: u32,
    pub score: u32,
    pub xg: f64,
    pub goal_minutes: Vec<u32>,
    pub goal_log: String,
}

impl From<&ResultTeam> for TeamResponse {
    fn from(team: &ResultTeam) -> Self {
        Self {
            name: team.name.clone(),
            shots: team.shots,
            score: team.score,
            xg: team.xg,
            goal_minutes: team.goal_minutes.clone(),
            goal_log: team.goal_log(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResponse {
    pub schema_version: u8,
    pub competition: String,
    pub headline: String,
    pub home: TeamResponse,
    pub away: TeamResponse,
    pub shots_progress_bar: String,
    pub xg_progress_bar: String,
    pub timing: u32,
    pub played: bool,
    pub runs: usize,
    /// Seed actually used, for replaying the same outcome
    pub seed: u64,
}

impl SimulationResponse {
    pub fn from_result(result: &MatchResult, runs: usize, seed: u64) -> Self {
        Self {
            schema_version: REQUEST_SCHEMA_VERSION,
            competition: result.competition.clone(),
            headline: result.headline(),
            home: TeamResponse::from(&result.home),
            away: TeamResponse::from(&result.away),
            shots_progress_bar: result.shots_progress_bar(),
            xg_progress_bar: result.xg_progress_bar(),
            timing: result.timing,
            played: result.played,
            runs,
            seed,
        }
    }
}

/// Simulate a match from a JSON request, returning the JSON response.
///
/// Request fields not given fall back to `SimConfig::default()`.
pub fn simulate_match_json(request_json: &str) -> Result<String> {
    let response = simulate_match_request(request_json)?;
    Ok(serde_json::to_string(&response)?)
}

pub fn simulate_match_request(request_json: &str) -> Result<SimulationResponse> {
    let request: SimulationRequest = serde_json::from_str(request_json)?;

    if request.schema_version != REQUEST_SCHEMA_VERSION {
        warn!(schema_version = request.schema_version, "rejected simulation request");
        return Err(SimError::InvalidRequest(format!(
            "Unsupported schema version: {}",
            request.schema_version
        )));
    }

    let defaults = SimConfig::default();
    let mut config = SimConfig {
        fulltime: request.fulltime.unwrap_or(defaults.fulltime),
        runs: request.runs.unwrap_or(defaults.runs),
        seed: request.seed,
        ..defaults
    };
    let seed = resolve_seed(&config);
    config.seed = Some(seed);

    info!(
        home = %request.match_input.home.name,
        away = %request.match_input.away.name,
        runs = config.runs,
        seed,
        "processing simulation request"
    );

    let runs = config.runs;
    let simulator = MatchSimulator::with_config(request.match_input, config)?;
    let result = simulator.simulate()?;

    Ok(SimulationResponse::from_result(&result, runs, seed))
}
