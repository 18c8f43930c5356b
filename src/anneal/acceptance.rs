//! Annealing acceptance: one replacement per individual per generation.

use super::config::{AcceptanceRule, AnnealConfig};
use crate::tsp::{Fitness, Individual, TspInstance};
use rand::Rng;
use tracing::trace;

/// Verdict on a single candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Candidate is no worse than the current individual.
    BetterOrEqual,
    /// Candidate is worse but passed the acceptance rule.
    AcceptedWorse,
    /// Candidate is worse and failed the acceptance rule.
    Rejected,
}

/// How an [`anneal_step`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    BetterOrEqual,
    AcceptedWorse,
    /// The retry budget ran out; the current individual was kept.
    Exhausted,
}

/// Result of an [`anneal_step`].
#[derive(Debug, Clone)]
pub struct StepOutcome {
    /// The replacement individual.
    pub individual: Individual,
    /// Candidates drawn, including the accepted one.
    pub attempts: usize,
    pub kind: StepKind,
}

/// `base^(-delta / temperature)`.
///
/// Returns 0 for a non-positive temperature or an infinite `delta`
/// (an infeasible candidate against a feasible one).
pub fn acceptance_probability(delta: f64, temperature: f64, base: f64) -> f64 {
    if temperature <= 0.0 {
        return 0.0;
    }
    base.powf(-delta / temperature)
}

/// Decides whether `candidate` replaces `current` at `temperature`.
///
/// A better-or-equal candidate is accepted without consulting the rule or
/// the random source.
pub fn decide<R: Rng>(
    current: Fitness,
    candidate: Fitness,
    temperature: f64,
    config: &AnnealConfig,
    rng: &mut R,
) -> Decision {
    if candidate <= current {
        return Decision::BetterOrEqual;
    }

    let p = acceptance_probability(
        candidate.delta(current),
        temperature,
        config.probability_base,
    );
    let accept = match config.acceptance {
        AcceptanceRule::FixedThreshold { threshold } => p > threshold,
        AcceptanceRule::Metropolis => rng.random_range(0.0..1.0) < p,
    };

    if accept {
        Decision::AcceptedWorse
    } else {
        Decision::Rejected
    }
}

/// Draws swap mutants of `current` until one is accepted.
///
/// Stops after [`AnnealConfig::max_attempts`] candidates (0 = never) and
/// returns a clone of `current` with [`StepKind::Exhausted`]; the caller
/// applies [`ExhaustionPolicy`](super::ExhaustionPolicy).
pub fn anneal_step<R: Rng>(
    current: &Individual,
    instance: &TspInstance,
    temperature: f64,
    config: &AnnealConfig,
    rng: &mut R,
) -> StepOutcome {
    let mut attempts = 0usize;
    loop {
        let candidate = Individual::new(current.tour().swap_mutated(rng), instance);
        attempts += 1;

        let decision = decide(
            current.fitness(),
            candidate.fitness(),
            temperature,
            config,
            rng,
        );
        trace!(
            current = %current.fitness(),
            candidate = %candidate.fitness(),
            temperature,
            ?decision,
        );

        match decision {
            Decision::BetterOrEqual => {
                return StepOutcome {
                    individual: candidate,
                    attempts,
                    kind: StepKind::BetterOrEqual,
                }
            }
            Decision::AcceptedWorse => {
                return StepOutcome {
                    individual: candidate,
                    attempts,
                    kind: StepKind::AcceptedWorse,
                }
            }
            Decision::Rejected => {}
        }

        if config.max_attempts > 0 && attempts >= config.max_attempts {
            return StepOutcome {
                individual: current.clone(),
                attempts,
                kind: StepKind::Exhausted,
            };
        }
    }
}
