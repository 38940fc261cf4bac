use thiserror::Error;

use crate::models::Side;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Division by zero: {side} team has no recorded shots")]
    ZeroShots { side: Side },

    #[error("Division by zero: {side} team has no games played")]
    ZeroPlayed { side: Side },

    #[error("Division by zero: cannot average over zero runs")]
    ZeroRuns,

    #[error("Invalid match input: {0}")]
    InvalidInput(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SimError {
    /// True for the division-by-zero class of failures (bad shot/played counts, zero runs).
    pub fn is_division_by_zero(&self) -> bool {
        matches!(
            self,
            SimError::ZeroShots { .. } | SimError::ZeroPlayed { .. } | SimError::ZeroRuns
        )
    }
}

pub type Result<T> = std::result::Result<T, SimError>;
