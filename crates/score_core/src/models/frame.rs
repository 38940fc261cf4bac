use serde::{Deserialize, Serialize};

use super::Side;

/// What one side did in a single simulated minute
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameSide {
    pub shot: bool,
    pub scored: bool,
    /// xG of the shot taken this minute, 0 if none
    pub xg: f64,
}

/// Outcome of one simulated minute
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub home: FrameSide,
    pub away: FrameSide,
}

impl Frame {
    pub fn side(&self, side: Side) -> &FrameSide {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    pub fn side_mut(&mut self, side: Side) -> &mut FrameSide {
        match side {
            Side::Home => &mut self.home,
            Side::Away => &mut self.away,
        }
    }

    /// Side credited with a goal this minute. Home wins if both are marked.
    pub fn scorer(&self) -> Option<Side> {
        if self.home.scored {
            Some(Side::Home)
        } else if self.away.scored {
            Some(Side::Away)
        } else {
            None
        }
    }
}
