// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Seeded random instances.
//!
//! A `Scenario` places points uniformly in the unit square (plus an elevation
//! in `[0, 1)`) and derives integral travel costs from the geometry, scaled
//! by a map factor and rounded. The `Difficulty` decides how hostile the
//! resulting cost structure is:
//!
//! * `Easy`: planar Euclidean distance. Symmetric, complete.
//! * `Normal`: three dimensional distance plus a penalty for going uphill.
//!   Asymmetric, complete.
//! * `Hard`: like `Normal`, but a share of the directed edges is removed.
//!   The edges of one hidden random Hamiltonian cycle are never removed, so
//!   every generated instance has at least one tour.
//!
//! Generation is fully determined by the seed.

use crate::{
    cost::EdgeCost,
    index::PointIndex,
    oracle::{CostOracle, CostOracleError},
};
use fixedbitset::FixedBitSet;
use num_traits::{PrimInt, Signed};
use rand::{Rng, SeedableRng, seq::SliceRandom};
use rand_chacha::ChaCha8Rng;

/// Extra cost per unit of climbed elevation, relative to planar distance.
const UPHILL_PENALTY: f64 = 1.0;

/// How hostile a generated cost structure is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    /// Symmetric planar distances.
    Easy,
    /// Asymmetric costs with an uphill penalty.
    #[default]
    Normal,
    /// Asymmetric costs with missing edges.
    Hard,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Normal => write!(f, "Normal"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Location {
    x: f64,
    y: f64,
    z: f64,
}

/// A generated instance that answers cost queries from its geometry.
#[derive(Debug, Clone)]
pub struct Scenario {
    locations: Vec<Location>,
    difficulty: Difficulty,
    scale: f64,
    removed: FixedBitSet, // len = n * n
}

impl Scenario {
    /// Returns a builder with default settings.
    #[inline]
    pub fn builder() -> ScenarioBuilder {
        ScenarioBuilder::new()
    }

    /// Returns the number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Returns `true` if the scenario has no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Returns the difficulty the scenario was generated with.
    #[inline]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Returns the planar coordinates of `point` in map units.
    #[inline]
    pub fn coordinates(&self, point: PointIndex) -> (f64, f64) {
        let loc = self.locations[point.get()];
        (loc.x * self.scale, loc.y * self.scale)
    }

    /// Returns `true` if the directed edge was removed during generation.
    #[inline]
    pub fn is_removed(&self, from: PointIndex, to: PointIndex) -> bool {
        self.removed[from.get() * self.len() + to.get()]
    }

    fn raw_cost(&self, from: PointIndex, to: PointIndex) -> f64 {
        let a = self.locations[from.get()];
        let b = self.locations[to.get()];
        let (dx, dy, dz) = (b.x - a.x, b.y - a.y, b.z - a.z);
        let distance = match self.difficulty {
            Difficulty::Easy => (dx * dx + dy * dy).sqrt(),
            Difficulty::Normal | Difficulty::Hard => {
                let planar = (dx * dx + dy * dy + dz * dz).sqrt();
                if dz > 0.0 {
                    planar + UPHILL_PENALTY * dz
                } else {
                    planar
                }
            }
        };
        (distance * self.scale).round()
    }
}

impl<T> CostOracle<T> for Scenario
where
    T: PrimInt + Signed,
{
    #[inline]
    fn num_points(&self) -> usize {
        self.locations.len()
    }

    fn cost(&self, from: PointIndex, to: PointIndex) -> Result<EdgeCost<T>, CostOracleError> {
        <Self as CostOracle<T>>::check_bounds(self, from, to)?;
        if from == to || self.is_removed(from, to) {
            return Ok(EdgeCost::none());
        }

        match num_traits::cast::<f64, T>(self.raw_cost(from, to)) {
            Some(value) if value >= T::zero() => Ok(EdgeCost::from_raw(value)),
            _ => Err(CostOracleError::Unrepresentable { from, to }),
        }
    }
}

/// Builder for `Scenario`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioBuilder {
    num_points: usize,
    difficulty: Difficulty,
    seed: u64,
    scale: f64,
    removal_ratio: f64,
}

impl Default for ScenarioBuilder {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl ScenarioBuilder {
    /// Default number of points.
    pub const DEFAULT_NUM_POINTS: usize = 10;
    /// Default seed.
    pub const DEFAULT_SEED: u64 = 42;
    /// Default side length of the map.
    pub const DEFAULT_SCALE: f64 = 1000.0;
    /// Default share of directed edges removed on `Hard`.
    pub const DEFAULT_REMOVAL_RATIO: f64 = 0.2;

    #[inline]
    pub fn new() -> Self {
        Self {
            num_points: Self::DEFAULT_NUM_POINTS,
            difficulty: Difficulty::default(),
            seed: Self::DEFAULT_SEED,
            scale: Self::DEFAULT_SCALE,
            removal_ratio: Self::DEFAULT_REMOVAL_RATIO,
        }
    }

    #[inline]
    pub fn with_num_points(mut self, num_points: usize) -> Self {
        self.num_points = num_points;
        self
    }

    #[inline]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    #[inline]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the side length of the map.
    ///
    /// # Panics
    ///
    /// Panics if `scale` is not a finite, positive number.
    #[inline]
    pub fn with_scale(mut self, scale: f64) -> Self {
        assert!(
            scale.is_finite() && scale > 0.0,
            "called `ScenarioBuilder::with_scale` with invalid scale: {}",
            scale
        );
        self.scale = scale;
        self
    }

    /// Sets the share of removable edges dropped on `Hard`. Clamped to `[0, 1]`.
    #[inline]
    pub fn with_removal_ratio(mut self, removal_ratio: f64) -> Self {
        self.removal_ratio = if removal_ratio.is_nan() {
            0.0
        } else {
            removal_ratio.clamp(0.0, 1.0)
        };
        self
    }

    /// Generates the scenario.
    pub fn build(self) -> Scenario {
        let n = self.num_points;
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);

        let locations: Vec<Location> = (0..n)
            .map(|_| Location {
                x: rng.random_range(0.0..1.0),
                y: rng.random_range(0.0..1.0),
                z: rng.random_range(0.0..1.0),
            })
            .collect();

        let mut removed = FixedBitSet::with_capacity(n * n);
        if self.difficulty == Difficulty::Hard && n > 1 {
            let mut cycle: Vec<usize> = (0..n).collect();
            cycle.shuffle(&mut rng);

            let mut protected = FixedBitSet::with_capacity(n * n);
            for i in 0..n {
                protected.insert(cycle[i] * n + cycle[(i + 1) % n]);
            }

            let mut candidates: Vec<usize> = (0..n * n)
                .filter(|&e| e / n != e % n && !protected[e])
                .collect();
            candidates.shuffle(&mut rng);

            let to_remove = (self.removal_ratio * (n * (n - 1)) as f64).round() as usize;
            for &edge in candidates.iter().take(to_remove) {
                removed.insert(edge);
            }
        }

        Scenario {
            locations,
            difficulty: self.difficulty,
            scale: self.scale,
            removed,
        }
    }
}
