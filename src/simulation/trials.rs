//! Repeated play: many games per organism, many organisms in parallel.
//!
//! Each trial owns one organism, seeded from the trial index, so trials are
//! independent and can run on any thread without changing their results.

use crate::error::PlanningError;
use crate::simulation::config::PlannerConfig;
use crate::simulation::environment::Environment;
use crate::simulation::organism::{Organism, StoreSizeWatch};
use crate::simulation::vectors::ActuatorVector;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

/// Mixed into a trial's seed to seed its organism, so the game stream and
/// the planning stream differ.
const ORGANISM_SEED_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// Seeds of the game stream and of the organism for one trial.
#[must_use]
pub const fn trial_seeds(base_seed: u64, trial: usize) -> (u64, u64) {
    let game_seed = base_seed.wrapping_add(trial as u64);
    (game_seed, game_seed ^ ORGANISM_SEED_MIX)
}

/// How the organism picks its actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Policy {
    /// Plan with the experience store
    Planner,
    /// Uniformly random single commands, as a baseline
    Random,
}

/// Shape of an experiment.
#[derive(Clone, Debug)]
pub struct TrialConfig {
    pub trials: usize,
    /// Games played by each organism
    pub runs: usize,
    pub base_seed: u64,
    pub policy: Policy,
}

/// Turns needed to finish each game, per trial.
#[derive(Clone, Debug, PartialEq)]
pub struct TrialReport {
    pub turns: Vec<Vec<u32>>,
}

impl TrialReport {
    /// Turn counts of every game, across all trials.
    pub fn all_turns(&self) -> impl Iterator<Item = u32> + '_ {
        self.turns.iter().flatten().copied()
    }

    /// Mean and population standard deviation of turns per game.
    #[must_use]
    pub fn summary(&self) -> (f64, f64) {
        mean_stdev(self.all_turns().map(f64::from))
    }

    /// Mean turns of the `run`-th game across trials, showing learning over time.
    #[must_use]
    pub fn mean_by_run(&self) -> Vec<f64> {
        let runs = self.turns.iter().map(Vec::len).max().unwrap_or(0);
        (0..runs)
            .map(|run| {
                mean_stdev(
                    self.turns
                        .iter()
                        .filter_map(|trial| trial.get(run))
                        .map(|&t| f64::from(t)),
                )
                .0
            })
            .collect()
    }
}

/// Mean and population standard deviation. `(0, 0)` for no samples.
#[must_use]
pub fn mean_stdev(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let values: Vec<f64> = values.collect();
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

/// Plays one game to the end. Returns the number of turns taken.
///
/// # Errors
///
/// Propagates planning errors.
pub fn play_game<E: Environment>(
    organism: &mut Organism,
    game: &mut E,
    policy: Policy,
    rng: &mut StdRng,
) -> Result<u32, PlanningError> {
    let n_actuators = organism.config().n_actuators;
    organism.reset_state();

    while !game.eof() {
        organism.handle_sensor_input(game.sensors())?;
        let forced = match policy {
            Policy::Planner => None,
            Policy::Random => Some(ActuatorVector::one_hot(
                n_actuators,
                rng.random_range(0..n_actuators),
            )),
        };
        let action = organism.choose_action(forced)?;
        game.act(&action.actuators);
    }

    organism.handle_sensor_input(game.sensors())?;
    organism.maintenance();
    Ok(game.turn())
}

/// Runs `config.trials` independent organisms in parallel, each playing
/// `config.runs` fresh games produced by `new_game`.
///
/// # Errors
///
/// Returns the first planning error from any trial.
pub fn run_trials<E, F>(
    config: &TrialConfig,
    planner: &PlannerConfig,
    new_game: F,
) -> Result<TrialReport, PlanningError>
where
    E: Environment,
    F: Fn(&mut StdRng) -> E + Sync,
{
    let turns = (0..config.trials)
        .into_par_iter()
        .map(|trial| -> Result<Vec<u32>, PlanningError> {
            let (game_seed, organism_seed) = trial_seeds(config.base_seed, trial);
            let mut rng = StdRng::seed_from_u64(game_seed);
            let mut organism = Organism::configure(planner.clone().with_seed(organism_seed))?
                .with_maintenance(StoreSizeWatch::default());

            let mut trial_turns = Vec::with_capacity(config.runs);
            for run in 0..config.runs {
                let mut game = new_game(&mut rng);
                let turns = play_game(&mut organism, &mut game, config.policy, &mut rng)?;
                info!(
                    "trial {:4} run {:4}: {} in {turns} turns ({} records)",
                    trial + 1,
                    run + 1,
                    game.title(),
                    organism.experience().len()
                );
                trial_turns.push(turns);
            }
            Ok(trial_turns)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TrialReport { turns })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    #[test]
    fn test_mean_stdev() {
        let (mean, stdev) = mean_stdev([2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0].into_iter());
        assert!((mean - 5.0).abs() < 1e-12);
        assert!((stdev - 2.0).abs() < 1e-12);
        assert_eq!(mean_stdev(std::iter::empty()), (0.0, 0.0));
    }

    #[test]
    fn test_game_and_organism_streams_differ() {
        for trial in 0..8 {
            let (game_seed, organism_seed) = trial_seeds(40, trial);
            assert_eq!(game_seed, 40 + trial as u64);
            assert_ne!(game_seed, organism_seed);

            let mut game_rng = StdRng::seed_from_u64(game_seed);
            let mut organism_rng = StdRng::seed_from_u64(organism_seed);
            let game_draws: Vec<u64> = (0..4).map(|_| game_rng.random()).collect();
            let organism_draws: Vec<u64> = (0..4).map(|_| organism_rng.random()).collect();
            assert_ne!(game_draws, organism_draws);
        }
    }

    #[test]
    fn test_invalid_planner_config_fails_trials() {
        let mut planner = PlannerConfig::for_player(&crate::simulation::environment::PlayerConfig {
            n_sensors: 5,
            n_actuators: 4,
            utility_index: 4,
        });
        planner.outcomes.num_keep = 0;
        let config = TrialConfig {
            trials: 2,
            runs: 1,
            base_seed: 0,
            policy: Policy::Random,
        };

        let result = run_trials(&config, &planner, |_| {
            crate::simulation::environment::TeeMazeGame::new(1, 1)
        });
        assert!(matches!(
            result,
            Err(PlanningError::Config(ConfigError::ZeroKeep { .. }))
        ));
    }

    #[test]
    fn test_report_mean_by_run() {
        let report = TrialReport {
            turns: vec![vec![10, 6], vec![20, 8]],
        };
        assert_eq!(report.mean_by_run(), vec![15.0, 7.0]);
        let (mean, _) = report.summary();
        assert!((mean - 11.0).abs() < 1e-12);
    }
}
