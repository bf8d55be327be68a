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

//! The best solution so far (BSSF).
//!
//! One slot per solve. Its objective is the upper bound every pruning
//! decision compares against. An empty slot has no upper bound and admits
//! every bound, `T::max_value()` included. The slot only accepts strictly
//! better solutions, so the upper bound never increases during a solve.

use salesman_model::solution::Solution;
use salesman_search::num::SolverNumeric;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Incumbent<T> {
    solution: Option<Solution<T>>,
}

impl<T> Default for Incumbent<T>
where
    T: SolverNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Incumbent<T>
where
    T: SolverNumeric,
{
    #[inline(always)]
    pub fn new() -> Self {
        Self { solution: None }
    }

    /// The objective of the current solution, if any.
    #[inline(always)]
    pub fn upper_bound(&self) -> Option<T> {
        self.solution.as_ref().map(|s| s.objective_value())
    }

    /// Returns `true` if a node or tour with the given `bound` could still
    /// strictly improve on the current solution.
    #[inline(always)]
    pub fn admits(&self, bound: T) -> bool {
        self.solution
            .as_ref()
            .is_none_or(|s| bound < s.objective_value())
    }

    #[inline(always)]
    pub fn solution(&self) -> Option<&Solution<T>> {
        self.solution.as_ref()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.solution.is_none()
    }

    /// Installs `solution` if it is strictly better than the current one.
    /// Returns `true` if it was installed.
    #[inline]
    pub fn try_install(&mut self, solution: Solution<T>) -> bool {
        if self.admits(solution.objective_value()) {
            self.solution = Some(solution);
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn into_solution(self) -> Option<Solution<T>> {
        self.solution
    }
}
