//! # score_core - Football Score Simulation Engine
//!
//! Simulates a match minute by minute from each team's season shot and
//! expected-goals (xG) totals.
//!
//! ## Features
//! - Per-minute stochastic attack model (one shot at most per minute)
//! - Monte Carlo averaging of repeated matches (`play_n`), parallel on rayon
//! - Seeded, reproducible runs (same seed = same result)
//! - Derived display statistics: shot/xG progress bars, goal logs
//! - JSON API for easy integration

pub mod api;
pub mod engine;
pub mod error;
pub mod models;

pub use api::{simulate_match_json, SimulationRequest, SimulationResponse};
pub use engine::{
    average_results, merge_results, AttackModel, MatchSimulator, SimConfig,
};
pub use error::{Result, SimError};
pub use models::{Frame, FrameSide, MatchInput, MatchResult, ResultTeam, Side, TeamInput};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
