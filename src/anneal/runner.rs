//! Generational annealing loop.
//!
//! [`AnnealRunner`] orchestrates the run:
//! initialize → sort → mutate/accept every individual → cool → repeat.

use super::acceptance::{anneal_step, StepKind};
use super::config::{AnnealConfig, ExhaustionPolicy};
use super::types::{GenerationObserver, GenerationReport, NoopObserver};
use crate::error::AnnealError;
use crate::tsp::{Fitness, Individual, Tour, TspInstance};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Result of an annealing run.
#[derive(Debug, Clone)]
pub struct AnnealResult {
    /// Population after the last executed generation, in positional order.
    pub population: Vec<Individual>,

    /// Best individual seen at any point, including the initial population.
    pub best: Individual,

    /// Same as `best.fitness()`.
    pub best_fitness: Fitness,

    /// Number of generations executed.
    pub generations: usize,

    /// Temperature after the last cooling step.
    pub final_temperature: f64,

    /// Temperature each executed generation ran at.
    pub temperature_history: Vec<f64>,

    /// Best fitness so far: initial population, then after each generation.
    pub fitness_history: Vec<Fitness>,

    /// Candidates accepted because they were no worse.
    pub better_or_equal_moves: usize,

    /// Worse candidates accepted by the acceptance rule.
    pub accepted_worse_moves: usize,

    /// Candidates rejected.
    pub rejected_moves: usize,

    /// Individuals kept unchanged because the retry budget ran out.
    pub exhausted_steps: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Seed the random source was created from.
    pub seed: u64,
}

/// Executes the generational annealing loop.
///
/// # Usage
///
/// ```
/// use tsp_anneal::anneal::{AnnealConfig, AnnealRunner};
/// use tsp_anneal::tsp::TspInstance;
///
/// let instance = TspInstance::reference();
/// let config = AnnealConfig::default().with_seed(42);
/// let result = AnnealRunner::run(&instance, &config).unwrap();
/// assert_eq!(result.population.len(), 10);
/// println!("best: {}", result.best);
/// ```
pub struct AnnealRunner;

impl AnnealRunner {
    /// Runs the annealer without observing intermediate generations.
    pub fn run(instance: &TspInstance, config: &AnnealConfig) -> Result<AnnealResult, AnnealError> {
        Self::run_with(instance, config, &mut NoopObserver, None)
    }

    /// Runs the annealer, reporting every generation to `observer`.
    pub fn run_with_observer<O: GenerationObserver>(
        instance: &TspInstance,
        config: &AnnealConfig,
        observer: &mut O,
    ) -> Result<AnnealResult, AnnealError> {
        Self::run_with(instance, config, observer, None)
    }

    /// Runs the annealer with an optional cancellation token.
    ///
    /// If the flag is set, the run stops before the next generation and
    /// returns the population and best individual reached so far.
    pub fn run_with_cancel(
        instance: &TspInstance,
        config: &AnnealConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<AnnealResult, AnnealError> {
        Self::run_with(instance, config, &mut NoopObserver, cancel)
    }

    /// Runs the annealer with an observer and an optional cancellation token.
    ///
    /// # Errors
    /// - [`AnnealError::Config`] if `config` fails validation.
    /// - [`AnnealError::RetriesExhausted`] if an individual exhausts its
    ///   retry budget under [`ExhaustionPolicy::Fail`].
    pub fn run_with<O: GenerationObserver>(
        instance: &TspInstance,
        config: &AnnealConfig,
        observer: &mut O,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<AnnealResult, AnnealError> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);

        info!(
            event = "run_start",
            cities = instance.cities(),
            population_size = config.population_size,
            max_generations = config.max_generations,
            initial_temperature = config.initial_temperature,
            min_temperature = config.min_temperature,
            seed,
        );

        // 1. Initialize population
        let mut population: Vec<Individual> = (0..config.population_size)
            .map(|_| Individual::new(Tour::random(instance, &mut rng), instance))
            .collect();

        let mut best = find_best(&population).clone();
        let mut temperature = config.initial_temperature;

        observer.on_generation(&GenerationReport {
            generation: 0,
            temperature,
            population: &population,
            best: &best,
        });

        let mut temperature_history = Vec::with_capacity(config.max_generations);
        let mut fitness_history = Vec::with_capacity(config.max_generations + 1);
        fitness_history.push(best.fitness());

        let mut better_or_equal_moves = 0usize;
        let mut accepted_worse_moves = 0usize;
        let mut rejected_moves = 0usize;
        let mut exhausted_steps = 0usize;
        let mut generation = 0usize;
        let mut cancelled = false;

        // 2. Generational loop
        while temperature > config.min_temperature && generation < config.max_generations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            // Stable: equal fitness keeps its relative order
            population.sort_by_key(Individual::fitness);

            let mut next_gen = Vec::with_capacity(population.len());
            let mut gen_accepted_worse = 0usize;
            for (index, current) in population.iter().enumerate() {
                let step = anneal_step(current, instance, temperature, config, &mut rng);
                match step.kind {
                    StepKind::BetterOrEqual => {
                        better_or_equal_moves += 1;
                        rejected_moves += step.attempts - 1;
                    }
                    StepKind::AcceptedWorse => {
                        accepted_worse_moves += 1;
                        gen_accepted_worse += 1;
                        rejected_moves += step.attempts - 1;
                    }
                    StepKind::Exhausted => {
                        exhausted_steps += 1;
                        rejected_moves += step.attempts;
                        if config.on_exhausted == ExhaustionPolicy::Fail {
                            return Err(AnnealError::RetriesExhausted {
                                generation: generation + 1,
                                index,
                                attempts: step.attempts,
                            });
                        }
                        warn!(
                            generation = generation + 1,
                            index,
                            attempts = step.attempts,
                            "retry budget exhausted, keeping current individual"
                        );
                    }
                }
                next_gen.push(step.individual);
            }

            population = next_gen;
            generation += 1;

            let gen_best = find_best(&population);
            if gen_best.fitness() < best.fitness() {
                best = gen_best.clone();
            }

            temperature_history.push(temperature);
            fitness_history.push(best.fitness());

            observer.on_generation(&GenerationReport {
                generation,
                temperature,
                population: &population,
                best: &best,
            });

            debug!(
                event = "generation_end",
                generation,
                temperature,
                generation_best = %gen_best.fitness(),
                best = %best.fitness(),
                accepted_worse = gen_accepted_worse,
            );

            // 3. Cool down
            temperature = config.cool(temperature);
        }

        info!(
            event = "run_end",
            generations = generation,
            final_temperature = temperature,
            best = %best.fitness(),
            tour = %best.tour(),
            cancelled,
        );

        Ok(AnnealResult {
            population,
            best_fitness: best.fitness(),
            best,
            generations: generation,
            final_temperature: temperature,
            temperature_history,
            fitness_history,
            better_or_equal_moves,
            accepted_worse_moves,
            rejected_moves,
            exhausted_steps,
            cancelled,
            seed,
        })
    }
}

/// Find the individual with the best (lowest) fitness; the first one on ties.
///
/// The population is never empty: `population_size >= 1` is validated.
fn find_best(population: &[Individual]) -> &Individual {
    population
        .iter()
        .min_by_key(|ind| ind.fitness())
        .expect("population must not be empty")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anneal::AcceptanceRule;
    use crate::error::ConfigError;
    use crate::tsp::DistanceMatrix;

    /// 3 cities: 0-1-2-0 costs 3, 0-2-1-0 costs 3000.
    fn lopsided() -> TspInstance {
        let m = DistanceMatrix::from_rows(&[[0u32, 1, 1000], [1000, 0, 1], [1, 1000, 0]]).unwrap();
        TspInstance::new(m, 0).unwrap()
    }

    #[test]
    fn test_reference_run_stops_at_temperature_floor() {
        let config = AnnealConfig::default().with_seed(42);
        let result = AnnealRunner::run(&TspInstance::reference(), &config).unwrap();

        // 10000 * 0.9^k (truncated) drops to 981 after 22 coolings
        assert_eq!(result.generations, 22);
        assert_eq!(result.temperature_history.len(), 22);
        assert_eq!(result.temperature_history[0], 10_000.0);
        assert_eq!(result.temperature_history[21], 1_090.0);
        assert_eq!(result.final_temperature, 981.0);
        assert!(!result.cancelled);
    }

    #[test]
    fn test_generation_cap() {
        let config = AnnealConfig::default()
            .with_max_generations(5)
            .with_seed(42);
        let result = AnnealRunner::run(&TspInstance::reference(), &config).unwrap();

        assert_eq!(result.generations, 5);
        assert_eq!(
            result.temperature_history,
            vec![10_000.0, 9_000.0, 8_100.0, 7_290.0, 6_561.0]
        );
        assert_eq!(result.final_temperature, 5_904.0);
    }

    #[test]
    fn test_temperature_strictly_decreasing() {
        let config = AnnealConfig::default()
            .with_max_generations(1000)
            .with_min_temperature(0.0)
            .with_initial_temperature(500.0)
            .with_seed(3);
        let result = AnnealRunner::run(&TspInstance::reference(), &config).unwrap();

        for w in result.temperature_history.windows(2) {
            assert!(w[1] < w[0], "temperature did not decrease: {} -> {}", w[0], w[1]);
        }
        assert_eq!(result.final_temperature, 0.0);
    }

    #[test]
    fn test_best_is_tracked_across_generations() {
        let mut best_per_report = Vec::new();
        let mut pop_min = Vec::new();
        let mut observer = |r: &GenerationReport<'_>| {
            best_per_report.push(r.best.fitness());
            pop_min.push(r.population.iter().map(Individual::fitness).min().unwrap());
        };
        let config = AnnealConfig::default().with_seed(11);
        let result =
            AnnealRunner::run_with_observer(&TspInstance::reference(), &config, &mut observer)
                .unwrap();

        for w in result.fitness_history.windows(2) {
            assert!(w[1] <= w[0], "best fitness got worse: {:?} -> {:?}", w[0], w[1]);
        }
        for (best, min) in best_per_report.iter().zip(&pop_min) {
            assert!(best <= min);
        }
        assert_eq!(result.best_fitness, *best_per_report.last().unwrap());
        assert_eq!(result.best.fitness(), result.best_fitness);
    }

    #[test]
    fn test_same_seed_same_run() {
        let config = AnnealConfig::default().with_seed(99);
        let a = AnnealRunner::run(&TspInstance::reference(), &config).unwrap();
        let b = AnnealRunner::run(&TspInstance::reference(), &config).unwrap();
        assert_eq!(a.population, b.population);
        assert_eq!(a.best, b.best);
        assert_eq!(a.seed, 99);
    }

    #[test]
    fn test_population_of_one() {
        let config = AnnealConfig::default().with_population_size(1).with_seed(5);
        let result = AnnealRunner::run(&TspInstance::reference(), &config).unwrap();
        assert_eq!(result.population.len(), 1);
        assert_eq!(result.generations, 22);
    }

    #[test]
    fn test_uniform_matrix_never_draws_probability() {
        let inst = TspInstance::new(DistanceMatrix::uniform(8, 10), 0).unwrap();
        let config = AnnealConfig::default()
            .with_acceptance(AcceptanceRule::Metropolis)
            .with_seed(8);
        let result = AnnealRunner::run(&inst, &config).unwrap();

        assert_eq!(result.better_or_equal_moves, 10 * result.generations);
        assert_eq!(result.accepted_worse_moves, 0);
        assert_eq!(result.rejected_moves, 0);
        assert!(result
            .population
            .iter()
            .all(|ind| ind.fitness() == Fitness::Cost(80)));
    }

    #[test]
    fn test_exhaustion_keeps_current() {
        let config = AnnealConfig::default()
            .with_initial_temperature(10.0)
            .with_min_temperature(1.0)
            .with_max_generations(4)
            .with_max_attempts(20)
            .with_seed(42);
        let result = AnnealRunner::run(&lopsided(), &config).unwrap();

        // once an individual reaches the cost-3 tour it can never leave it
        assert!(result.exhausted_steps > 0);
        assert_eq!(result.best_fitness, Fitness::Cost(3));
        assert!(result
            .population
            .iter()
            .all(|ind| ind.fitness() == Fitness::Cost(3)));
    }

    #[test]
    fn test_exhaustion_fail_policy() {
        let config = AnnealConfig::default()
            .with_initial_temperature(10.0)
            .with_min_temperature(1.0)
            .with_max_generations(4)
            .with_max_attempts(20)
            .with_on_exhausted(ExhaustionPolicy::Fail)
            .with_seed(42);
        let err = AnnealRunner::run(&lopsided(), &config).unwrap_err();
        assert!(
            matches!(err, AnnealError::RetriesExhausted { attempts: 20, .. }),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn test_invalid_config() {
        let config = AnnealConfig::default().with_population_size(0);
        let err = AnnealRunner::run(&TspInstance::reference(), &config).unwrap_err();
        assert!(matches!(err, AnnealError::Config(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_floor_at_initial_temperature_runs_no_generations() {
        let config = AnnealConfig::default()
            .with_initial_temperature(1_000.0)
            .with_min_temperature(1_000.0)
            .with_seed(7);
        let result = AnnealRunner::run(&TspInstance::reference(), &config).unwrap();

        assert_eq!(result.generations, 0);
        assert_eq!(result.population.len(), 10);
        assert!(result.temperature_history.is_empty());
        assert_eq!(result.fitness_history.len(), 1);
        assert_eq!(result.final_temperature, 1_000.0);
        assert!(!result.cancelled);
    }

    #[test]
    fn test_cancellation() {
        // Set cancel flag before running for deterministic cancellation.
        let cancel = Arc::new(AtomicBool::new(true));
        let config = AnnealConfig::default().with_seed(42);
        let result =
            AnnealRunner::run_with_cancel(&TspInstance::reference(), &config, Some(cancel))
                .unwrap();

        assert!(result.cancelled);
        assert_eq!(result.generations, 0);
        assert_eq!(result.population.len(), 10);
        assert_eq!(result.fitness_history.len(), 1);
    }
}
