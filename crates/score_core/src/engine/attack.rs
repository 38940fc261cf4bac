//! Attack Model
//!
//! Turns season totals into per-minute probabilities and draws one `Frame`
//! per simulated minute.
//!
//! ## Model
//! - At most one shot per minute, by either side.
//! - The shooter is home with probability `home_shot_share`.
//! - The shot is a goal with probability equal to the shooter's mean xG per
//!   shot. The per-shot xG shown on the frame is sampled around that mean
//!   and is purely cosmetic.

use rand::distributions::Open01;
use rand::Rng;
use tracing::debug;

use crate::error::Result;
use crate::models::{Frame, MatchInput, Side};

/// Minutes in a regulation match, used to turn per-match rates into per-minute ones
pub const MINUTES_PER_MATCH: f64 = 90.0;

/// Default standard deviation of the per-shot xG sample
pub const DEFAULT_XG_SIGMA: f64 = 0.1;

/// Per-shot xG floor when the sample is not positive
pub const XG_FLOOR: f64 = 0.01;
/// Per-shot xG ceiling when the sample exceeds 1
pub const XG_CEILING: f64 = 0.99;

/// Derived per-match parameters of the attack model
#[derive(Debug, Clone, PartialEq)]
pub struct AttackModel {
    pub home_xg_per_shot: f64,
    pub away_xg_per_shot: f64,
    /// Probability that a shot belongs to the home side
    pub home_shot_share: f64,
    /// Probability that any shot happens in a given minute
    pub shot_prob_per_minute: f64,
    pub xg_sigma: f64,
}

impl AttackModel {
    pub fn new(input: &MatchInput) -> Result<Self> {
        Self::with_sigma(input, DEFAULT_XG_SIGMA)
    }

    /// Fails with a division-by-zero error when either side has zero shots or
    /// zero games played.
    pub fn with_sigma(input: &MatchInput, xg_sigma: f64) -> Result<Self> {
        input.validate()?;

        let home = &input.home;
        let away = &input.away;
        let total_shots = (home.shots + away.shots) as f64;
        let avg_played = (home.played + away.played) as f64 / 2.0;

        let model = Self {
            home_xg_per_shot: home.xg_per_shot(),
            away_xg_per_shot: away.xg_per_shot(),
            home_shot_share: home.shots as f64 / total_shots,
            shot_prob_per_minute: total_shots / avg_played / MINUTES_PER_MATCH,
            xg_sigma,
        };

        debug!(
            home_xg_per_shot = model.home_xg_per_shot,
            away_xg_per_shot = model.away_xg_per_shot,
            home_shot_share = model.home_shot_share,
            shot_prob_per_minute = model.shot_prob_per_minute,
            "attack model derived"
        );

        Ok(model)
    }

    pub fn xg_per_shot(&self, side: Side) -> f64 {
        match side {
            Side::Home => self.home_xg_per_shot,
            Side::Away => self.away_xg_per_shot,
        }
    }

    /// Draw the frame of one minute.
    pub fn attack<R: Rng + ?Sized>(&self, rng: &mut R) -> Frame {
        let mut frame = Frame::default();

        if rng.gen::<f64>() >= self.shot_prob_per_minute {
            return frame;
        }

        let side = if rng.gen::<f64>() < self.home_shot_share {
            Side::Home
        } else {
            Side::Away
        };

        let mean = self.xg_per_shot(side);
        let shot = frame.side_mut(side);
        shot.shot = true;
        shot.xg = generate_xg(rng, mean, self.xg_sigma);

        // goal draw uses the mean, not the sampled value
        if rng.gen::<f64>() < mean {
            shot.scored = true;
        }

        frame
    }
}

/// Sample a per-shot xG around `mu` (Box–Muller), clamped into `(0, 1)`.
pub fn generate_xg<R: Rng + ?Sized>(rng: &mut R, mu: f64, sigma: f64) -> f64 {
    let u: f64 = rng.sample(Open01);
    let v: f64 = rng.sample(Open01);
    xg_from_uniforms(mu, sigma, u, v)
}

/// Box–Muller transform of two uniforms in `(0, 1)`, then clamped.
pub fn xg_from_uniforms(mu: f64, sigma: f64, u: f64, v: f64) -> f64 {
    let z = (-2.0 * u.ln()).sqrt() * (2.0 * std::f64::consts::PI * v).cos();
    let xg = mu + sigma * z;

    if xg <= 0.0 {
        XG_FLOOR
    } else if xg > 1.0 {
        XG_CEILING
    } else {
        xg
    }
}
