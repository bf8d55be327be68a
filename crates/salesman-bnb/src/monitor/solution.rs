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

//! Solution limit monitor for tree search
//!
//! `SolutionLimitMonitor` stops the search once the solver has found the
//! configured number of improving tours. The seed tour does not count.

use crate::{
    monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor},
    node::SearchNode,
    stats::BnbSolverStatistics,
};
use num_traits::{PrimInt, Signed};
use salesman_model::{matrix::CostMatrix, solution::Solution};
use salesman_search::monitor::command::SearchCommand;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionLimitMonitor<T> {
    solution_limit: u64,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> SolutionLimitMonitor<T> {
    /// Creates a new `SolutionLimitMonitor` with the specified solution limit.
    pub fn new(solution_limit: u64) -> Self {
        Self {
            solution_limit,
            _phantom: std::marker::PhantomData,
        }
    }

    #[inline]
    pub fn solution_limit(&self) -> u64 {
        self.solution_limit
    }
}

impl<T> TreeSearchMonitor<T> for SolutionLimitMonitor<T>
where
    T: PrimInt + Signed,
{
    fn name(&self) -> &str {
        "SolutionLimitMonitor"
    }

    fn on_enter_search(&mut self, _matrix: &CostMatrix<T>, _statistics: &BnbSolverStatistics<T>) {}

    fn on_exit_search(&mut self, _statistics: &BnbSolverStatistics<T>) {}

    fn on_step(&mut self, _frontier_len: usize, _statistics: &BnbSolverStatistics<T>) {}

    fn on_expand(&mut self, _node: &SearchNode<T>, _statistics: &BnbSolverStatistics<T>) {}

    fn on_prune(&mut self, _depth: usize, _reason: PruneReason, _statistics: &BnbSolverStatistics<T>) {}

    fn on_enqueue(&mut self, _node: &SearchNode<T>, _statistics: &BnbSolverStatistics<T>) {}

    fn on_solution_found(&mut self, _solution: &Solution<T>, _statistics: &BnbSolverStatistics<T>) {}

    fn search_command(&mut self, statistics: &BnbSolverStatistics<T>) -> SearchCommand {
        if statistics.solutions_found >= self.solution_limit {
            SearchCommand::Terminate("solution limit reached".to_string())
        } else {
            SearchCommand::Continue
        }
    }
}
