//! Match Simulator
//!
//! Drives the `AttackModel` over `fulltime` minutes (`play`) and averages many
//! independent plays into one representative result (`play_n`).
//!
//! ## Randomness
//!
//! Every run owns its own `ChaCha8Rng`: the resolved seed plus
//! `set_stream(run_index)`. Runs share no generator state, so `play_n` can fan
//! out on rayon. Runs are collected in index order and folded sequentially,
//! so the aggregate for a seed does not depend on the thread count.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::{debug, info};

use super::attack::AttackModel;
use super::config::SimConfig;
use super::stats::top_goal_periods;
use crate::error::{Result, SimError};
use crate::models::{MatchInput, MatchResult, ResultTeam};

/// Seed from the config, or a fresh one from the thread RNG.
pub fn resolve_seed(config: &SimConfig) -> u64 {
    match config.seed {
        Some(seed) => seed,
        None => {
            let seed: u64 = rand::thread_rng().gen();
            debug!(seed, "no seed configured, drew one");
            seed
        }
    }
}

/// Independent generator for run `run` of a seeded batch.
pub fn run_rng(seed: u64, run: usize) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(run as u64);
    rng
}

pub struct MatchSimulator {
    input: MatchInput,
    model: AttackModel,
    config: SimConfig,
}

impl MatchSimulator {
    pub fn new(input: MatchInput) -> Result<Self> {
        Self::with_config(input, SimConfig::default())
    }

    /// Fails before any minute is played if the input would divide by zero.
    pub fn with_config(input: MatchInput, config: SimConfig) -> Result<Self> {
        config.validate()?;
        let model = AttackModel::with_sigma(&input, config.xg_sigma)?;
        Ok(Self { input, model, config })
    }

    pub fn input(&self) -> &MatchInput {
        &self.input
    }

    pub fn model(&self) -> &AttackModel {
        &self.model
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// One match with the given generator.
    pub fn play_with_rng<R: Rng + ?Sized>(&self, fulltime: u32, rng: &mut R) -> MatchResult {
        let mut result = MatchResult::new(&self.input);

        for minute in 0..fulltime {
            let frame = self.model.attack(rng);
            result.record_frame(minute, &frame);
        }

        result.finish(fulltime);
        result
    }

    /// One match, seeded from the config (fresh randomness if unseeded).
    pub fn play(&self, fulltime: u32) -> MatchResult {
        let seed = resolve_seed(&self.config);
        self.play_with_rng(fulltime, &mut run_rng(seed, 0))
    }

    /// Average of `n` independent matches.
    pub fn play_n(&self, fulltime: u32, n: usize) -> Result<MatchResult> {
        let seed = resolve_seed(&self.config);
        self.play_n_seeded(fulltime, n, seed)
    }

    pub fn play_n_seeded(&self, fulltime: u32, n: usize, seed: u64) -> Result<MatchResult> {
        if n == 0 {
            return Err(SimError::ZeroRuns);
        }

        info!(
            competition = %self.input.competition,
            home = %self.input.home.name,
            away = %self.input.away.name,
            runs = n,
            fulltime,
            "simulating match"
        );

        let play_run = |run: usize| self.play_with_rng(fulltime, &mut run_rng(seed, run));

        let runs: Vec<MatchResult> = if self.config.parallel {
            (0..n).into_par_iter().map(play_run).collect()
        } else {
            (0..n).map(play_run).collect()
        };

        // fixed fold order keeps the float sums bit-identical across modes
        let total = runs
            .iter()
            .skip(1)
            .fold(runs[0].clone(), |acc, run| merge_results(&acc, run));
        let mut result = average_results(&total, n)?;
        result.finish(fulltime);

        info!(
            headline = %result.headline(),
            "simulation finished"
        );

        Ok(result)
    }

    /// `play_n` with the config's fulltime and run count.
    pub fn simulate(&self) -> Result<MatchResult> {
        self.play_n(self.config.fulltime, self.config.runs)
    }
}

fn merge_team(a: &ResultTeam, b: &ResultTeam) -> ResultTeam {
    let mut goal_minutes = Vec::with_capacity(a.goal_minutes.len() + b.goal_minutes.len());
    goal_minutes.extend_from_slice(&a.goal_minutes);
    goal_minutes.extend_from_slice(&b.goal_minutes);

    ResultTeam {
        name: a.name.clone(),
        shots: a.shots + b.shots,
        score: a.score + b.score,
        xg: a.xg + b.xg,
        goal_minutes,
    }
}

/// Element-wise sum of two results; goal minutes concatenate, `a` first.
pub fn merge_results(a: &MatchResult, b: &MatchResult) -> MatchResult {
    MatchResult {
        home: merge_team(&a.home, &b.home),
        away: merge_team(&a.away, &b.away),
        competition: a.competition.clone(),
        timing: a.timing.max(b.timing),
        played: a.played && b.played,
    }
}

fn average_team(team: &ResultTeam, n: usize) -> ResultTeam {
    let score = (team.score as usize / n) as u32;

    ResultTeam {
        name: team.name.clone(),
        shots: (team.shots as usize / n) as u32,
        score,
        xg: team.xg / n as f64,
        goal_minutes: top_goal_periods(&team.goal_minutes, score as usize),
    }
}

/// Divide a summed result by `n`.
///
/// Shots and score floor-divide, xG divides exactly. Goal minutes shrink to
/// the `score` most frequent minutes, sorted.
pub fn average_results(result: &MatchResult, n: usize) -> Result<MatchResult> {
    if n == 0 {
        return Err(SimError::ZeroRuns);
    }

    Ok(MatchResult {
        home: average_team(&result.home, n),
        away: average_team(&result.away, n),
        competition: result.competition.clone(),
        timing: result.timing,
        played: result.played,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Side, TeamInput};

    fn reference_input() -> MatchInput {
        MatchInput::new(
            "Serie A",
            TeamInput::new("Juventus", 195, 22.7, 15),
            TeamInput::new("Napoli", 242, 25.6, 15),
        )
    }

    fn seeded(seed: u64) -> MatchSimulator {
        MatchSimulator::with_config(reference_input(), SimConfig::default().with_seed(seed))
            .unwrap()
    }

    fn team(name: &str, shots: u32, score: u32, xg: f64, goal_minutes: Vec<u32>) -> ResultTeam {
        ResultTeam { name: name.to_string(), shots, score, xg, goal_minutes }
    }

    fn result(home: ResultTeam, away: ResultTeam) -> MatchResult {
        MatchResult {
            home,
            away,
            competition: "Serie A".to_string(),
            timing: 90,
            played: true,
        }
    }

    #[test]
    fn test_play_full_match() {
        let sim = seeded(42);
        let result = sim.play(90);

        assert_eq!(result.timing, 90);
        assert!(result.played);
        assert_eq!(result.home.goal_minutes.len(), result.home.score as usize);
        assert_eq!(result.away.goal_minutes.len(), result.away.score as usize);
        assert!(result.home.score <= result.home.shots);
        assert!(result.away.score <= result.away.shots);
        assert!(result.home.goal_minutes.windows(2).all(|w| w[0] < w[1]));
        assert!(result.home.goal_minutes.iter().all(|&m| m < 90));
        assert_eq!(result.competition, "Serie A");
        assert_eq!(result.home.name, "Juventus");
    }

    #[test]
    fn test_play_is_deterministic_for_seed() {
        assert_eq!(seeded(9).play(90), seeded(9).play(90));
    }

    #[test]
    fn test_play_custom_length() {
        let result = seeded(1).play(45);
        assert_eq!(result.timing, 45);
        assert!(result.home.goal_minutes.iter().all(|&m| m < 45));

        let empty = seeded(1).play(0);
        assert_eq!(empty.timing, 0);
        assert!(empty.played);
        assert_eq!(empty.home.shots + empty.away.shots, 0);
    }

    #[test]
    fn test_reference_scores_stay_realistic() {
        let sim = seeded(2024);
        let mut rng = run_rng(2024, 0);
        let mut total_goals = 0;
        for _ in 0..500 {
            let r = sim.play_with_rng(90, &mut rng);
            assert!(r.home.score <= 10 && r.away.score <= 10);
            total_goals += r.home.score + r.away.score;
        }
        // expected ~ 90 * 0.3237 * ~0.11 = ~3.2 goals per match
        let mean = total_goals as f64 / 500.0;
        assert!(mean > 2.0 && mean < 4.5, "mean goals = {mean}");
    }

    #[test]
    fn test_play_n_finalizes() {
        let result = seeded(5).play_n(90, 20).unwrap();
        assert_eq!(result.timing, 90);
        assert!(result.played);
        assert!(result.home.goal_minutes.len() <= result.home.score as usize);
        assert!(result.home.goal_minutes.windows(2).all(|w| w[0] < w[1]));
        assert!(result.home.shots > 0 && result.away.shots > 0);
    }

    #[test]
    fn test_play_n_parallel_matches_sequential() {
        let parallel = seeded(77).play_n(90, 50).unwrap();

        let config = SimConfig { parallel: false, ..SimConfig::default().with_seed(77) };
        let sequential = MatchSimulator::with_config(reference_input(), config)
            .unwrap()
            .play_n(90, 50)
            .unwrap();

        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_play_n_single_run_equals_play() {
        let sim = seeded(31);
        assert_eq!(sim.play_n(90, 1).unwrap(), sim.play(90));
    }

    #[test]
    fn test_play_n_zero_runs() {
        let err = seeded(1).play_n(90, 0).unwrap_err();
        assert!(matches!(err, SimError::ZeroRuns));
        assert!(err.is_division_by_zero());
    }

    #[test]
    fn test_invalid_input_aborts_before_play() {
        let mut input = reference_input();
        input.away.shots = 0;
        assert!(matches!(
            MatchSimulator::new(input),
            Err(SimError::ZeroShots { side: Side::Away })
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SimConfig { fulltime: 0, ..SimConfig::default() };
        assert!(matches!(
            MatchSimulator::with_config(reference_input(), config),
            Err(SimError::InvalidConfig(_))
        ));

        let config = SimConfig { runs: 0, ..SimConfig::default() };
        let err = MatchSimulator::with_config(reference_input(), config).err().unwrap();
        assert!(matches!(err, SimError::ZeroRuns));
        assert!(err.is_division_by_zero());
    }

    #[test]
    fn test_accessors_expose_validated_setup() {
        let config = SimConfig { fulltime: 60, ..SimConfig::quick().with_seed(4) };
        let sim = MatchSimulator::with_config(reference_input(), config.clone()).unwrap();

        assert_eq!(sim.input(), &reference_input());
        assert_eq!(sim.config(), &config);
        let model = AttackModel::with_sigma(&reference_input(), config.xg_sigma).unwrap();
        assert_eq!(sim.model(), &model);
        // (195 + 242) shots over 15 games of 90 minutes
        assert!((sim.model().shot_prob_per_minute - 437.0 / 1350.0).abs() < 1e-12);
        assert!((sim.model().home_shot_share - 195.0 / 437.0).abs() < 1e-12);
    }

    #[test]
    fn test_simulate_uses_config() {
        let config = SimConfig { fulltime: 60, runs: 3, ..SimConfig::default().with_seed(8) };
        let result = MatchSimulator::with_config(reference_input(), config)
            .unwrap()
            .simulate()
            .unwrap();
        assert_eq!(result.timing, 60);
    }

    #[test]
    fn test_merge_results_sums_and_concatenates() {
        let a = result(team("H", 10, 2, 1.5, vec![12, 70]), team("A", 8, 1, 0.9, vec![33]));
        let b = result(team("H", 12, 1, 1.1, vec![5]), team("A", 9, 0, 1.0, vec![]));

        let merged = merge_results(&a, &b);
        assert_eq!(merged.home.shots, 22);
        assert_eq!(merged.home.score, 3);
        assert!((merged.home.xg - 2.6).abs() < 1e-12);
        assert_eq!(merged.home.goal_minutes, vec![12, 70, 5]);
        assert_eq!(merged.away.goal_minutes, vec![33]);
        assert_eq!(merged.home.name, "H");
        assert_eq!(merged.competition, "Serie A");
    }

    #[test]
    fn test_average_results() {
        let total = result(
            team("H", 25, 7, 3.0, vec![20, 20, 89, 89, 47, 47, 8, 78]),
            team("A", 31, 2, 2.0, vec![60, 61]),
        );
        let avg = average_results(&total, 2).unwrap();

        assert_eq!(avg.home.shots, 12);
        assert_eq!(avg.home.score, 3);
        assert!((avg.home.xg - 1.5).abs() < 1e-12);
        assert_eq!(avg.home.goal_minutes, vec![20, 47, 89]);
        assert_eq!(avg.away.shots, 15);
        assert_eq!(avg.away.score, 1);
        assert_eq!(avg.away.goal_minutes, vec![60]);
    }

    #[test]
    fn test_average_by_one_is_identity() {
        let raw = seeded(12).play(90);
        let avg = average_results(&raw, 1).unwrap();
        assert_eq!(avg, raw);
    }

    #[test]
    fn test_average_by_zero() {
        let raw = seeded(12).play(90);
        assert!(matches!(average_results(&raw, 0), Err(SimError::ZeroRuns)));
    }

    #[test]
    fn test_run_streams_are_independent() {
        let a: u64 = run_rng(1, 0).gen();
        let b: u64 = run_rng(1, 1).gen();
        let c: u64 = run_rng(1, 0).gen();
        assert_ne!(a, b);
        assert_eq!(a, c);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_team() -> impl Strategy<Value = ResultTeam> {
            (0u32..200, 0u32..20, 0.0f64..30.0, prop::collection::vec(0u32..90, 0..20)).prop_map(
                |(shots, score, xg, goal_minutes)| ResultTeam {
                    name: "T".to_string(),
                    shots,
                    score,
                    xg,
                    goal_minutes,
                },
            )
        }

        fn arb_result() -> impl Strategy<Value = MatchResult> {
            (arb_team(), arb_team()).prop_map(|(home, away)| result(home, away))
        }

        fn sorted(mut v: Vec<u32>) -> Vec<u32> {
            v.sort_unstable();
            v
        }

        proptest! {
            /// Property: merge is associative on sums and order-exact on goal minutes
            #[test]
            fn prop_merge_associative(a in arb_result(), b in arb_result(), c in arb_result()) {
                let left = merge_results(&merge_results(&a, &b), &c);
                let right = merge_results(&a, &merge_results(&b, &c));
                prop_assert_eq!(left.home.shots, right.home.shots);
                prop_assert_eq!(left.away.score, right.away.score);
                prop_assert!((left.home.xg - right.home.xg).abs() < 1e-9);
                prop_assert_eq!(&left.home.goal_minutes, &right.home.goal_minutes);
            }

            /// Property: merge is commutative on sums and on the goal-minute multiset
            #[test]
            fn prop_merge_commutative(a in arb_result(), b in arb_result()) {
                let ab = merge_results(&a, &b);
                let ba = merge_results(&b, &a);
                prop_assert_eq!(ab.home.shots, ba.home.shots);
                prop_assert_eq!(ab.home.score, ba.home.score);
                prop_assert!((ab.away.xg - ba.away.xg).abs() < 1e-9);
                prop_assert_eq!(sorted(ab.away.goal_minutes.clone()), sorted(ba.away.goal_minutes.clone()));

                let mut union = a.home.goal_minutes.clone();
                union.extend_from_slice(&b.home.goal_minutes);
                prop_assert_eq!(sorted(ab.home.goal_minutes), sorted(union));
            }

            /// Property: averaged goal minutes never exceed the averaged score
            #[test]
            fn prop_average_goal_minutes_bounded(r in arb_result(), n in 1usize..10) {
                let avg = average_results(&r, n).unwrap();
                prop_assert_eq!(avg.home.score, r.home.score / n as u32);
                prop_assert!(avg.home.goal_minutes.len() <= avg.home.score as usize);
                prop_assert!(avg.home.goal_minutes.windows(2).all(|w| w[0] < w[1]));
            }
        }
    }
}
