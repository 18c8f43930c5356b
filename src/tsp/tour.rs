//! Tour representation and the permutation operators that act on it.
//!
//! A tour over `n` cities is stored as `n + 1` city ids: the origin, every
//! other city exactly once, then the origin again to close the cycle.
//! Positions `0` and `n` are fixed; only positions `1..=n-1` ever move.

use super::matrix::{City, TspInstance};
use rand::Rng;
use std::fmt;

/// A closed Hamiltonian cycle starting and ending at the origin.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tour {
    cities: Vec<City>,
}

impl Tour {
    /// Wraps an explicit city sequence, returning `None` if it is not a
    /// valid tour for `instance`.
    pub fn from_cities(instance: &TspInstance, cities: Vec<City>) -> Option<Self> {
        let tour = Self { cities };
        tour.is_valid_for(instance).then_some(tour)
    }

    /// Generates a uniformly random tour.
    ///
    /// Each step draws uniformly among the cities not yet placed, which is
    /// the same distribution as rejection sampling over all cities but
    /// always finishes in `n - 1` draws.
    ///
    /// No feasibility check against the matrix is made; a missing edge
    /// shows up in the fitness instead.
    pub fn random<R: Rng>(instance: &TspInstance, rng: &mut R) -> Self {
        let n = instance.cities();
        let origin = instance.origin();

        let mut remaining: Vec<City> = (0..n).filter(|&c| c != origin).collect();
        let mut cities = Vec::with_capacity(n + 1);
        cities.push(origin);
        while !remaining.is_empty() {
            let k = rng.random_range(0..remaining.len());
            cities.push(remaining.swap_remove(k));
        }
        cities.push(origin);

        Self { cities }
    }

    /// Returns a copy of this tour with two distinct movable positions
    /// swapped.
    ///
    /// Both positions are drawn uniformly from `1..=n-1`; the second draw
    /// skips over the first so they never coincide. `self` is left
    /// untouched.
    ///
    /// # Panics
    /// Panics if the tour has fewer than two movable positions
    /// (guaranteed not to happen for tours of a [`TspInstance`]).
    pub fn swap_mutated<R: Rng>(&self, rng: &mut R) -> Self {
        let last = self.cities.len() - 1;
        assert!(last >= 3, "swap needs at least two movable positions");

        let i = rng.random_range(1..last);
        let mut j = rng.random_range(1..last - 1);
        if j >= i {
            j += 1;
        }

        let mut cities = self.cities.clone();
        cities.swap(i, j);
        Self { cities }
    }

    /// Checks the tour invariant against `instance`: length `n + 1`, origin
    /// at both ends, every other city exactly once in between.
    pub fn is_valid_for(&self, instance: &TspInstance) -> bool {
        let n = instance.cities();
        let origin = instance.origin();
        if self.cities.len() != n + 1 {
            return false;
        }
        if self.cities[0] != origin || self.cities[n] != origin {
            return false;
        }
        let mut seen = vec![false; n];
        seen[origin] = true;
        for &c in &self.cities[1..n] {
            if c >= n || seen[c] {
                return false;
            }
            seen[c] = true;
        }
        true
    }

    /// The city sequence, origin at both ends.
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// Consecutive `(from, to)` pairs of the cycle.
    pub fn edges(&self) -> impl Iterator<Item = (City, City)> + '_ {
        self.cities.windows(2).map(|w| (w[0], w[1]))
    }

    /// Number of stored positions (`n + 1`).
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Always `false` for a constructed tour.
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

impl fmt::Display for Tour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, city) in self.cities.iter().enumerate() {
            if k > 0 {
                f.write_str("-")?;
            }
            write!(f, "{city}")?;
        }
        Ok(())
    }
}
