//! Generational simulated annealing.
//!
//! Every generation, each individual of the population is replaced by a
//! swap mutant of itself. Mutants that are no worse are taken immediately;
//! worse ones are taken when the annealing probability `base^(-Δ / T)`
//! passes the configured [`AcceptanceRule`]. The temperature `T` is cooled
//! geometrically after each generation, and the run stops at a temperature
//! floor or a generation cap.
//!
//! # Key Types
//!
//! - [`AnnealConfig`]: run parameters, TOML-loadable
//! - [`AnnealRunner`]: executes the generational loop
//! - [`AnnealResult`]: final population, best tour and statistics
//! - [`GenerationObserver`]: receives a snapshot of every generation
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"

pub mod acceptance;
mod config;
mod runner;
mod types;

pub use config::{AcceptanceRule, AnnealConfig, ExhaustionPolicy};
pub use runner::{AnnealResult, AnnealRunner};
pub use types::{GenerationObserver, GenerationReport, NoopObserver};
