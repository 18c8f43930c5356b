//! Tour cost evaluation.

use super::matrix::{DistanceMatrix, TspInstance};
use super::tour::Tour;
use std::fmt;

/// Total cost of a tour. Lower is better.
///
/// Every [`Cost`](Fitness::Cost) orders below [`Infeasible`](Fitness::Infeasible),
/// so sorting a population ascending puts infeasible tours last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Fitness {
    /// Sum of all edge costs.
    Cost(u64),
    /// The tour uses at least one missing edge.
    Infeasible,
}

impl Fitness {
    /// Returns `true` for [`Fitness::Infeasible`].
    pub fn is_infeasible(self) -> bool {
        matches!(self, Fitness::Infeasible)
    }

    /// The finite cost, if any.
    pub fn cost(self) -> Option<u64> {
        match self {
            Fitness::Cost(c) => Some(c),
            Fitness::Infeasible => None,
        }
    }

    /// `self - other` as `f64`, with infeasible treated as `+∞`.
    ///
    /// Two infeasible values are equal, so their difference is `0`.
    pub fn delta(self, other: Fitness) -> f64 {
        match (self, other) {
            (Fitness::Cost(a), Fitness::Cost(b)) => a as f64 - b as f64,
            (Fitness::Infeasible, Fitness::Infeasible) => 0.0,
            (Fitness::Infeasible, Fitness::Cost(_)) => f64::INFINITY,
            (Fitness::Cost(_), Fitness::Infeasible) => f64::NEG_INFINITY,
        }
    }
}

impl fmt::Display for Fitness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fitness::Cost(c) => write!(f, "{c}"),
            Fitness::Infeasible => f.write_str("infeasible"),
        }
    }
}

/// Sums the edge costs of `tour`.
///
/// Stops at the first missing edge and returns [`Fitness::Infeasible`]
/// without adding up the rest. A tour whose length does not match the
/// matrix, or that names a city outside it, is also infeasible.
pub fn evaluate(tour: &Tour, matrix: &DistanceMatrix) -> Fitness {
    if tour.len() != matrix.len() + 1 {
        return Fitness::Infeasible;
    }
    let mut total = 0u64;
    for (from, to) in tour.edges() {
        match matrix.cost(from, to) {
            Some(c) => total += u64::from(c),
            None => return Fitness::Infeasible,
        }
    }
    Fitness::Cost(total)
}

/// A tour together with its cached fitness.
///
/// The fitness is computed on construction and cannot be set separately,
/// so it always matches the tour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Individual {
    tour: Tour,
    fitness: Fitness,
}

impl Individual {
    /// Evaluates `tour` against `instance` and pairs them.
    pub fn new(tour: Tour, instance: &TspInstance) -> Self {
        let fitness = evaluate(&tour, instance.matrix());
        Self { tour, fitness }
    }

    /// The tour.
    pub fn tour(&self) -> &Tour {
        &self.tour
    }

    /// The cached fitness.
    pub fn fitness(&self) -> Fitness {
        self.fitness
    }
}

impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.tour, self.fitness)
    }
}
