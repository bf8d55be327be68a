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

//! Greedy nearest neighbour construction.
//!
//! Starting at point 0, the tour repeatedly moves to the cheapest reachable
//! unvisited point, preferring the lowest index among equally cheap ones.
//! The construction fails if it reaches a point with no edge to any
//! unvisited point, or if the last point cannot return to the start. It is
//! deterministic and never backtracks.

use crate::{
    heuristic::{HeuristicOutcome, InitialTourHeuristic},
    num::SolverNumeric,
};
use fixedbitset::FixedBitSet;
use salesman_model::{index::PointIndex, matrix::CostMatrix, solution::Solution, tour::Tour};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NearestNeighborHeuristic;

impl NearestNeighborHeuristic {
    fn build<T>(matrix: &CostMatrix<T>) -> Option<Solution<T>>
    where
        T: SolverNumeric,
    {
        let n = matrix.num_points();
        if n == 0 {
            return None;
        }

        let mut visited = FixedBitSet::with_capacity(n);
        let mut path = Vec::with_capacity(n);
        let mut current = PointIndex::new(0);
        let mut total = T::zero();
        visited.insert(current.get());
        path.push(current);

        while path.len() < n {
            // strict `<` keeps the lowest index on ties
            let mut best: Option<(PointIndex, T)> = None;
            for (to, edge) in matrix.row(current).iter().enumerate() {
                if visited[to] {
                    continue;
                }
                if let Some(cost) = edge.into_option() {
                    if best.is_none_or(|(_, b)| cost < b) {
                        best = Some((PointIndex::new(to), cost));
                    }
                }
            }

            let (next, cost) = best?;
            total = total.checked_add(&cost)?;
            visited.insert(next.get());
            path.push(next);
            current = next;
        }

        let closing = matrix.edge(current, PointIndex::new(0)).into_option()?;
        total = total.checked_add(&closing)?;

        Some(Solution::new(total, Tour::new_unchecked(path)))
    }
}

impl<T> InitialTourHeuristic<T> for NearestNeighborHeuristic
where
    T: SolverNumeric,
{
    fn name(&self) -> &str {
        "NearestNeighborHeuristic"
    }

    fn construct(&self, matrix: &CostMatrix<T>, _time_limit: Duration) -> HeuristicOutcome<T> {
        let start = Instant::now();
        let solution = Self::build(matrix);
        HeuristicOutcome::new(solution, 1, start.elapsed())
    }
}
