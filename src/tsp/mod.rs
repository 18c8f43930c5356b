//! TSP problem data.
//!
//! - [`DistanceMatrix`] / [`TspInstance`]: the immutable input
//! - [`Tour`]: a candidate cycle, with random generation and swap mutation
//! - [`Fitness`] / [`Individual`]: tour cost and the tour-plus-cost pair
//!   the annealer works on

mod fitness;
mod matrix;
mod tour;

pub use fitness::{evaluate, Fitness, Individual};
pub use matrix::{City, DistanceMatrix, TspInstance, NO_EDGE};
pub use tour::Tour;
