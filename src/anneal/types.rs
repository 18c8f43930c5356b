//! Per-generation reporting.

use crate::tsp::Individual;

/// Snapshot of the population emitted once per generation.
///
/// Generation 0 is the freshly generated initial population; generation
/// `g >= 1` is the population produced by the `g`-th mutation pass.
#[derive(Debug, Clone, Copy)]
pub struct GenerationReport<'a> {
    /// Generation number, 0 for the initial population.
    pub generation: usize,

    /// Temperature the generation was produced at (the initial temperature
    /// for generation 0).
    pub temperature: f64,

    /// The population, in positional order.
    pub population: &'a [Individual],

    /// Best individual seen so far in the run.
    pub best: &'a Individual,
}

/// Receives a [`GenerationReport`] after every generation.
///
/// Implemented for any `FnMut(&GenerationReport)` closure:
///
/// ```
/// use tsp_anneal::anneal::{AnnealConfig, AnnealRunner, GenerationReport};
/// use tsp_anneal::tsp::TspInstance;
///
/// let mut sizes = Vec::new();
/// let mut observer = |r: &GenerationReport<'_>| sizes.push(r.population.len());
/// let config = AnnealConfig::default().with_seed(1);
/// AnnealRunner::run_with_observer(&TspInstance::reference(), &config, &mut observer).unwrap();
/// assert!(sizes.iter().all(|&n| n == 10));
/// ```
pub trait GenerationObserver {
    fn on_generation(&mut self, report: &GenerationReport<'_>);
}

impl<F> GenerationObserver for F
where
    F: FnMut(&GenerationReport<'_>),
{
    fn on_generation(&mut self, report: &GenerationReport<'_>) {
        self(report)
    }
}

/// Observer that ignores every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl GenerationObserver for NoopObserver {
    fn on_generation(&mut self, _report: &GenerationReport<'_>) {}
}
