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

//! # Initial Tour Heuristics
//!
//! Fast, proof-free tour construction. A heuristic either returns a complete
//! tour of finite cost or signals failure; it never proves anything. The
//! branch-and-bound engine uses one to seed its best solution so far, and
//! `run_baseline` exposes each of them as a standalone solve entry point.
//!
//! ## Submodules
//!
//! - `nearest`: greedy nearest neighbour construction from point 0.
//! - `random`: seeded uniform random permutations until one is feasible.
//! - `none`: always fails, so the exact search starts from an infinite bound.

pub mod nearest;
pub mod none;
pub mod random;

use crate::{
    err::{SolveError, snapshot},
    num::SolverNumeric,
    result::SolveReport,
};
use salesman_model::{matrix::CostMatrix, oracle::CostOracle, solution::Solution};
use std::time::{Duration, Instant};

/// The product of a heuristic run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeuristicOutcome<T> {
    solution: Option<Solution<T>>,
    attempts: u64,
    elapsed: Duration,
}

impl<T> HeuristicOutcome<T> {
    #[inline]
    pub fn new(solution: Option<Solution<T>>, attempts: u64, elapsed: Duration) -> Self {
        Self {
            solution,
            attempts,
            elapsed,
        }
    }

    /// A failed run.
    #[inline]
    pub fn failed(attempts: u64, elapsed: Duration) -> Self {
        Self::new(None, attempts, elapsed)
    }

    #[inline]
    pub fn solution(&self) -> Option<&Solution<T>> {
        self.solution.as_ref()
    }

    #[inline]
    pub fn into_solution(self) -> Option<Solution<T>> {
        self.solution
    }

    /// How many candidate tours the heuristic built.
    #[inline]
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

/// A capability that produces a tour or signals failure.
pub trait InitialTourHeuristic<T>
where
    T: SolverNumeric,
{
    /// Returns the name of the heuristic.
    fn name(&self) -> &str;

    /// Builds a tour on `matrix`, spending at most roughly `time_limit`.
    fn construct(&self, matrix: &CostMatrix<T>, time_limit: Duration) -> HeuristicOutcome<T>;

    /// Whether a standalone run reports its attempts as found solutions.
    fn reports_attempts(&self) -> bool {
        false
    }
}

impl<T> std::fmt::Debug for dyn InitialTourHeuristic<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "InitialTourHeuristic({})", self.name())
    }
}

impl<T, H> InitialTourHeuristic<T> for &H
where
    T: SolverNumeric,
    H: InitialTourHeuristic<T> + ?Sized,
{
    fn name(&self) -> &str {
        (**self).name()
    }

    fn construct(&self, matrix: &CostMatrix<T>, time_limit: Duration) -> HeuristicOutcome<T> {
        (**self).construct(matrix, time_limit)
    }

    fn reports_attempts(&self) -> bool {
        (**self).reports_attempts()
    }
}

/// Runs `heuristic` on its own and reports the result in the common record.
///
/// The instance is validated and snapshotted first; the time spent doing so
/// counts towards the reported elapsed time.
#[tracing::instrument(level = "info", skip(oracle, heuristic))]
pub fn run_baseline<T, O, H>(
    oracle: &O,
    heuristic: &H,
    time_limit: Duration,
) -> Result<SolveReport<T>, SolveError>
where
    T: SolverNumeric,
    O: CostOracle<T> + ?Sized,
    H: InitialTourHeuristic<T> + ?Sized,
{
    let start = Instant::now();
    let matrix = snapshot(oracle)?;
    let outcome = heuristic.construct(&matrix, time_limit.saturating_sub(start.elapsed()));

    let solutions_found = if heuristic.reports_attempts() {
        outcome.attempts()
    } else {
        0
    };
    tracing::info!(
        heuristic = heuristic.name(),
        attempts = outcome.attempts(),
        cost = ?outcome.solution().map(|s| s.objective_value()),
        "baseline finished"
    );

    Ok(SolveReport::heuristic(
        outcome.into_solution(),
        start.elapsed(),
        solutions_found,
    ))
}
