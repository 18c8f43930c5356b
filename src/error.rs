//! Error types.
//!
//! Infeasible tours are not errors: they are carried as
//! [`Fitness::Infeasible`](crate::tsp::Fitness::Infeasible). The enums here
//! cover bad configuration, malformed instances and the optional hard
//! failure on an exhausted acceptance retry budget.

use thiserror::Error;

/// Configuration loading or validation error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Problem instance error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InstanceError {
    #[error("distance matrix row {row} has {len} entries, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("instance needs at least 3 cities to mutate a tour, got {0}")]
    TooFewCities(usize),

    #[error("origin {origin} is out of range for {cities} cities")]
    OriginOutOfRange { origin: usize, cities: usize },
}

/// Error returned by [`AnnealRunner`](crate::anneal::AnnealRunner).
#[derive(Debug, Error)]
pub enum AnnealError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Instance(#[from] InstanceError),

    #[error(
        "no candidate accepted for individual {index} in generation {generation} after {attempts} attempts"
    )]
    RetriesExhausted {
        generation: usize,
        index: usize,
        attempts: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = InstanceError::TooFewCities(2);
        assert_eq!(
            err.to_string(),
            "instance needs at least 3 cities to mutate a tour, got 2"
        );

        let err = AnnealError::RetriesExhausted {
            generation: 3,
            index: 7,
            attempts: 100,
        };
        assert!(err.to_string().contains("generation 3"));
    }

    #[test]
    fn test_instance_error_converts() {
        let err: AnnealError = InstanceError::OriginOutOfRange {
            origin: 9,
            cities: 8,
        }
        .into();
        assert!(matches!(err, AnnealError::Instance(_)));
    }
}
