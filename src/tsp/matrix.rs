//! Distance matrix and problem instance.

use crate::error::InstanceError;

/// City identifier in `[0, n)`.
pub type City = usize;

/// Input sentinel for a missing edge.
///
/// Any entry equal to this value is stored as "no connection" and makes
/// every tour that traverses it infeasible.
pub const NO_EDGE: u32 = u32::MAX;

fn edge(cost: u32) -> Option<u32> {
    (cost != NO_EDGE).then_some(cost)
}

/// Immutable `n × n` table of edge costs.
///
/// Row `i`, column `j` is the cost of travelling from city `i` to city `j`.
/// The matrix may be asymmetric. Diagonal entries are never read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    n: usize,
    costs: Vec<Option<u32>>,
}

impl DistanceMatrix {
    /// Builds a matrix from rows, mapping [`NO_EDGE`] to a missing edge.
    ///
    /// # Errors
    /// Returns [`InstanceError::NotSquare`] if any row length differs from
    /// the number of rows.
    pub fn from_rows<R: AsRef<[u32]>>(rows: &[R]) -> Result<Self, InstanceError> {
        let n = rows.len();
        let mut costs = Vec::with_capacity(n * n);
        for (row, entries) in rows.iter().enumerate() {
            let entries = entries.as_ref();
            if entries.len() != n {
                return Err(InstanceError::NotSquare {
                    row,
                    len: entries.len(),
                    expected: n,
                });
            }
            costs.extend(entries.iter().map(|&c| edge(c)));
        }
        Ok(Self { n, costs })
    }

    /// Builds a matrix where every off-diagonal edge costs `cost`.
    pub fn uniform(n: usize, cost: u32) -> Self {
        let costs = (0..n * n)
            .map(|k| if k / n == k % n { Some(0) } else { Some(cost) })
            .collect();
        Self { n, costs }
    }

    /// Number of cities.
    pub fn len(&self) -> usize {
        self.n
    }

    /// Returns `true` if the matrix has no cities.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Cost of the edge `from → to`, or `None` if there is no edge or
    /// either city is out of range.
    #[inline]
    pub fn cost(&self, from: City, to: City) -> Option<u32> {
        if from >= self.n || to >= self.n {
            return None;
        }
        self.costs.get(from * self.n + to).copied().flatten()
    }
}

/// A TSP instance: distance matrix plus the fixed origin city.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TspInstance {
    matrix: DistanceMatrix,
    origin: City,
}

impl TspInstance {
    /// Creates an instance, checking that tours over it can be mutated.
    ///
    /// # Errors
    /// - [`InstanceError::TooFewCities`] if the matrix has fewer than 3
    ///   cities (a swap needs two distinct non-origin positions).
    /// - [`InstanceError::OriginOutOfRange`] if `origin >= n`.
    pub fn new(matrix: DistanceMatrix, origin: City) -> Result<Self, InstanceError> {
        let n = matrix.len();
        if n < 3 {
            return Err(InstanceError::TooFewCities(n));
        }
        if origin >= n {
            return Err(InstanceError::OriginOutOfRange { origin, cities: n });
        }
        Ok(Self { matrix, origin })
    }

    /// The 8-city reference instance with origin 0.
    ///
    /// Symmetric, with no direct edge between cities 0 and 2 or 0 and 6.
    pub fn reference() -> Self {
        const X: u32 = NO_EDGE;
        let rows: [[u32; 8]; 8] = [
            [0, 12, X, 23, 1, 5, X, 56],
            [12, 0, 9, 18, 3, 41, 45, 5],
            [X, 9, 0, 89, 56, 21, 12, 49],
            [23, 18, 89, 0, 87, 46, 75, 17],
            [1, 3, 56, 87, 0, 55, 22, 86],
            [5, 41, 21, 46, 55, 0, 21, 76],
            [X, 45, 12, 75, 22, 21, 0, 11],
            [56, 5, 49, 17, 86, 76, 11, 0],
        ];
        let matrix = DistanceMatrix {
            n: 8,
            costs: rows.iter().flatten().map(|&c| edge(c)).collect(),
        };
        Self { matrix, origin: 0 }
    }

    /// The distance matrix.
    pub fn matrix(&self) -> &DistanceMatrix {
        &self.matrix
    }

    /// The fixed origin city.
    pub fn origin(&self) -> City {
        self.origin
    }

    /// Number of cities.
    pub fn cities(&self) -> usize {
        self.matrix.len()
    }
}
