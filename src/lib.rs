//! Genetic-mutation simulated annealing for the Traveling Salesman Problem.
//!
//! A population of random tours over a small, possibly asymmetric cost
//! matrix is evolved generation by generation. Each individual is replaced
//! by a swap mutant that is either no worse or passes an annealing
//! acceptance test at the current temperature; the temperature cools
//! geometrically until a floor or a generation cap is reached.
//!
//! - [`tsp`]: distance matrix, tours, fitness evaluation
//! - [`anneal`]: configuration, acceptance policy and the generational driver
//!
//! # Example
//!
//! ```
//! use tsp_anneal::anneal::{AnnealConfig, AnnealRunner};
//! use tsp_anneal::tsp::TspInstance;
//!
//! let config = AnnealConfig::default().with_seed(7);
//! let result = AnnealRunner::run(&TspInstance::reference(), &config)?;
//! assert!(result.best.tour().is_valid_for(&TspInstance::reference()));
//! # Ok::<(), tsp_anneal::AnnealError>(())
//! ```
//!
//! Runs are sequential and reproducible for a given seed: one random
//! source is created per run and threaded through tour generation,
//! mutation and acceptance.

pub mod anneal;
mod error;
pub mod tsp;

pub use error::{AnnealError, ConfigError, InstanceError};
