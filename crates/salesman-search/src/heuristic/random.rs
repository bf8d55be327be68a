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

//! Uniform random permutation search.
//!
//! Shuffles the points into a fresh random order until one of the orders
//! forms a tour of finite cost, the time allowance runs out or the optional
//! attempt cap is reached. At least one permutation is always tried. The
//! generator is reseeded on every call, so runs are reproducible.

use crate::{
    heuristic::{HeuristicOutcome, InitialTourHeuristic},
    num::SolverNumeric,
};
use rand::{SeedableRng, seq::SliceRandom};
use rand_chacha::ChaCha8Rng;
use salesman_model::{index::PointIndex, matrix::CostMatrix, solution::Solution, tour::Tour};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomPermutationHeuristic {
    seed: u64,
    max_attempts: Option<u64>,
}

impl RandomPermutationHeuristic {
    #[inline]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            max_attempts: None,
        }
    }

    /// Caps the number of permutations tried per call.
    ///
    /// # Panics
    ///
    /// Panics if `max_attempts` is zero.
    #[inline]
    pub fn with_max_attempts(mut self, max_attempts: u64) -> Self {
        assert!(
            max_attempts > 0,
            "called `RandomPermutationHeuristic::with_max_attempts` with zero attempts"
        );
        self.max_attempts = Some(max_attempts);
        self
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[inline]
    pub fn max_attempts(&self) -> Option<u64> {
        self.max_attempts
    }
}

impl Default for RandomPermutationHeuristic {
    fn default() -> Self {
        Self::new(42)
    }
}

impl<T> InitialTourHeuristic<T> for RandomPermutationHeuristic
where
    T: SolverNumeric,
{
    fn name(&self) -> &str {
        "RandomPermutationHeuristic"
    }

    fn construct(&self, matrix: &CostMatrix<T>, time_limit: Duration) -> HeuristicOutcome<T> {
        let start = Instant::now();
        let n = matrix.num_points();
        if n == 0 {
            return HeuristicOutcome::failed(0, start.elapsed());
        }

        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut order: Vec<PointIndex> = (0..n).map(PointIndex::new).collect();
        let mut attempts = 0u64;

        loop {
            order.shuffle(&mut rng);
            attempts += 1;

            let tour = Tour::new_unchecked(order.clone());
            if let Some(cost) = tour.cost(matrix) {
                return HeuristicOutcome::new(
                    Some(Solution::new(cost, tour)),
                    attempts,
                    start.elapsed(),
                );
            }

            let capped = self.max_attempts.is_some_and(|max| attempts >= max);
            if capped || start.elapsed() >= time_limit {
                return HeuristicOutcome::failed(attempts, start.elapsed());
            }
        }
    }

    fn reports_attempts(&self) -> bool {
        true
    }
}
