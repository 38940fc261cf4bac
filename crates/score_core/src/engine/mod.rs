//! Simulation engine: attack model, match simulator, derived statistics.

pub mod attack;
pub mod config;
pub mod simulator;
pub mod stats;

pub use attack::{generate_xg, xg_from_uniforms, AttackModel, DEFAULT_XG_SIGMA};
pub use config::SimConfig;
pub use simulator::{average_results, merge_results, resolve_seed, run_rng, MatchSimulator};
pub use stats::{build_progress_bar, goal_log, share_percent, top_goal_periods};
