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

//! Tree search monitoring interface
//!
//! Declares the `TreeSearchMonitor` trait and `PruneReason` for observing and
//! controlling the best-first search. Callbacks track the solver lifecycle,
//! and a monitor can stop the search via `SearchCommand` (default: Continue).
//!
//! Lifecycle
//! - enter → { step → command → expand → { prune | enqueue | solution }* }* → exit
//! - `BnbSolverStatistics` is provided to every callback for telemetry.
//! - The seed tour installed before the search is not reported as a solution.

use crate::{node::SearchNode, stats::BnbSolverStatistics};
use num_traits::{PrimInt, Signed};
use salesman_model::{matrix::CostMatrix, solution::Solution};
use salesman_search::monitor::command::SearchCommand;

/// Reasons for pruning a search state.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum PruneReason {
    /// No completion of the state exists.
    Infeasible,
    /// The state's bound is not below the BSSF.
    BoundDominated,
    /// A queued state became dominated after a later BSSF improvement.
    Stale,
}

impl std::fmt::Display for PruneReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PruneReason::Infeasible => write!(f, "Infeasible"),
            PruneReason::BoundDominated => write!(f, "BoundDominated"),
            PruneReason::Stale => write!(f, "Stale"),
        }
    }
}

/// Trait for monitoring and controlling the search process of the solver.
pub trait TreeSearchMonitor<T>
where
    T: PrimInt + Signed,
{
    /// Returns the name of the monitor.
    fn name(&self) -> &str;
    /// Called once the instance is validated, before seeding.
    fn on_enter_search(&mut self, matrix: &CostMatrix<T>, statistics: &BnbSolverStatistics<T>);
    /// Called when the search ends, for any reason.
    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics<T>);
    /// Called once per iteration to determine whether to keep going.
    fn search_command(&mut self, _statistics: &BnbSolverStatistics<T>) -> SearchCommand {
        SearchCommand::Continue
    }
    /// Called at the start of each iteration with the current frontier size.
    fn on_step(&mut self, frontier_len: usize, statistics: &BnbSolverStatistics<T>);
    /// Called before a popped node is expanded.
    fn on_expand(&mut self, node: &SearchNode<T>, statistics: &BnbSolverStatistics<T>);
    /// Called when a state at `depth` is pruned.
    fn on_prune(&mut self, depth: usize, reason: PruneReason, statistics: &BnbSolverStatistics<T>);
    /// Called when a child is pushed onto the frontier.
    fn on_enqueue(&mut self, node: &SearchNode<T>, statistics: &BnbSolverStatistics<T>);
    /// Called when a complete tour improves the BSSF.
    fn on_solution_found(&mut self, solution: &Solution<T>, statistics: &BnbSolverStatistics<T>);
}

impl<T, M> TreeSearchMonitor<T> for &mut M
where
    T: PrimInt + Signed,
    M: TreeSearchMonitor<T> + ?Sized,
{
    fn name(&self) -> &str {
        (**self).name()
    }

    fn on_enter_search(&mut self, matrix: &CostMatrix<T>, statistics: &BnbSolverStatistics<T>) {
        (**self).on_enter_search(matrix, statistics)
    }

    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics<T>) {
        (**self).on_exit_search(statistics)
    }

    fn search_command(&mut self, statistics: &BnbSolverStatistics<T>) -> SearchCommand {
        (**self).search_command(statistics)
    }

    fn on_step(&mut self, frontier_len: usize, statistics: &BnbSolverStatistics<T>) {
        (**self).on_step(frontier_len, statistics)
    }

    fn on_expand(&mut self, node: &SearchNode<T>, statistics: &BnbSolverStatistics<T>) {
        (**self).on_expand(node, statistics)
    }

    fn on_prune(&mut self, depth: usize, reason: PruneReason, statistics: &BnbSolverStatistics<T>) {
        (**self).on_prune(depth, reason, statistics)
    }

    fn on_enqueue(&mut self, node: &SearchNode<T>, statistics: &BnbSolverStatistics<T>) {
        (**self).on_enqueue(node, statistics)
    }

    fn on_solution_found(&mut self, solution: &Solution<T>, statistics: &BnbSolverStatistics<T>) {
        (**self).on_solution_found(solution, statistics)
    }
}

impl<T> std::fmt::Debug for dyn TreeSearchMonitor<T>
where
    T: PrimInt + Signed,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TreeSearchMonitor({})", self.name())
    }
}

impl<T> std::fmt::Display for dyn TreeSearchMonitor<T>
where
    T: PrimInt + Signed,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TreeSearchMonitor({})", self.name())
    }
}
