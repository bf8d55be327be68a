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

//! Fan-out monitor
//!
//! `CompositeTreeSearchMonitor` owns a list of child monitors and relays
//! each search event to them in the order they were added. Stop requests
//! are the exception: the first child that answers anything but `Continue`
//! decides, and later children are not asked.

use crate::{
    monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor},
    node::SearchNode,
    stats::BnbSolverStatistics,
};
use num_traits::{PrimInt, Signed};
use salesman_model::{matrix::CostMatrix, solution::Solution};
use salesman_search::monitor::command::SearchCommand;

/// A tree search monitor that forwards events to all of its children.
pub struct CompositeTreeSearchMonitor<'a, T>
where
    T: PrimInt + Signed,
{
    monitors: Vec<Box<dyn TreeSearchMonitor<T> + 'a>>,
}

impl<'a, T> Default for CompositeTreeSearchMonitor<'a, T>
where
    T: PrimInt + Signed,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> CompositeTreeSearchMonitor<'a, T>
where
    T: PrimInt + Signed,
{
    /// Creates a new empty `CompositeTreeSearchMonitor`.
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    /// Creates a new `CompositeTreeSearchMonitor` with room for `capacity` monitors.
    #[inline(always)]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            monitors: Vec::with_capacity(capacity),
        }
    }

    /// Adds a monitor. Builder-style.
    #[inline(always)]
    pub fn with_monitor<M>(mut self, monitor: M) -> Self
    where
        M: TreeSearchMonitor<T> + 'a,
    {
        self.add_monitor(monitor);
        self
    }

    /// Adds a monitor.
    #[inline(always)]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: TreeSearchMonitor<T> + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    /// Adds a boxed monitor.
    #[inline(always)]
    pub fn add_monitor_boxed(&mut self, monitor: Box<dyn TreeSearchMonitor<T> + 'a>) {
        self.monitors.push(monitor);
    }

    /// Returns the contained monitors.
    #[inline(always)]
    pub fn monitors(&self) -> &[Box<dyn TreeSearchMonitor<T> + 'a>] {
        &self.monitors
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl<'a, T> FromIterator<Box<dyn TreeSearchMonitor<T> + 'a>> for CompositeTreeSearchMonitor<'a, T>
where
    T: PrimInt + Signed,
{
    #[inline(always)]
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn TreeSearchMonitor<T> + 'a>>,
    {
        Self {
            monitors: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> TreeSearchMonitor<T> for CompositeTreeSearchMonitor<'a, T>
where
    T: PrimInt + Signed,
{
    #[inline(always)]
    fn name(&self) -> &str {
        "CompositeTreeSearchMonitor"
    }

    #[inline(always)]
    fn on_enter_search(&mut self, matrix: &CostMatrix<T>, statistics: &BnbSolverStatistics<T>) {
        for monitor in &mut self.monitors {
            monitor.on_enter_search(matrix, statistics);
        }
    }

    #[inline(always)]
    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics<T>) {
        for monitor in &mut self.monitors {
            monitor.on_exit_search(statistics);
        }
    }

    #[inline(always)]
    fn search_command(&mut self, statistics: &BnbSolverStatistics<T>) -> SearchCommand {
        for monitor in &mut self.monitors {
            let cmd = monitor.search_command(statistics);
            if !cmd.is_continue() {
                return cmd;
            }
        }
        SearchCommand::Continue
    }

    #[inline(always)]
    fn on_step(&mut self, frontier_len: usize, statistics: &BnbSolverStatistics<T>) {
        for monitor in &mut self.monitors {
            monitor.on_step(frontier_len, statistics);
        }
    }

    #[inline(always)]
    fn on_expand(&mut self, node: &SearchNode<T>, statistics: &BnbSolverStatistics<T>) {
        for monitor in &mut self.monitors {
            monitor.on_expand(node, statistics);
        }
    }

    #[inline(always)]
    fn on_prune(&mut self, depth: usize, reason: PruneReason, statistics: &BnbSolverStatistics<T>) {
        for monitor in &mut self.monitors {
            monitor.on_prune(depth, reason, statistics);
        }
    }

    #[inline(always)]
    fn on_enqueue(&mut self, node: &SearchNode<T>, statistics: &BnbSolverStatistics<T>) {
        for monitor in &mut self.monitors {
            monitor.on_enqueue(node, statistics);
        }
    }

    #[inline(always)]
    fn on_solution_found(&mut self, solution: &Solution<T>, statistics: &BnbSolverStatistics<T>) {
        for monitor in &mut self.monitors {
            monitor.on_solution_found(solution, statistics);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::{no_op::NoOperationMonitor, solution::SolutionLimitMonitor};

    #[derive(Default)]
    struct Counting {
        steps: usize,
        prunes: usize,
    }

    impl TreeSearchMonitor<i64> for Counting {
        fn name(&self) -> &str {
            "Counting"
        }
        fn on_enter_search(&mut self, _m: &CostMatrix<i64>, _s: &BnbSolverStatistics<i64>) {}
        fn on_exit_search(&mut self, _s: &BnbSolverStatistics<i64>) {}
        fn on_step(&mut self, _len: usize, _s: &BnbSolverStatistics<i64>) {
            self.steps += 1;
        }
        fn on_expand(&mut self, _n: &SearchNode<i64>, _s: &BnbSolverStatistics<i64>) {}
        fn on_prune(&mut self, _d: usize, _r: PruneReason, _s: &BnbSolverStatistics<i64>) {
            self.prunes += 1;
        }
        fn on_enqueue(&mut self, _n: &SearchNode<i64>, _s: &BnbSolverStatistics<i64>) {}
        fn on_solution_found(&mut self, _sol: &Solution<i64>, _s: &BnbSolverStatistics<i64>) {}
    }

    #[test]
    fn test_fans_out_to_every_child() {
        let mut a = Counting::default();
        let mut b = Counting::default();
        {
            let mut composite = CompositeTreeSearchMonitor::new()
                .with_monitor(&mut a)
                .with_monitor(&mut b);
            let stats = BnbSolverStatistics::default();
            composite.on_step(3, &stats);
            composite.on_prune(2, PruneReason::Stale, &stats);
            assert_eq!(composite.len(), 2);
        }
        assert_eq!((a.steps, a.prunes), (1, 1));
        assert_eq!((b.steps, b.prunes), (1, 1));
    }

    #[test]
    fn test_first_terminate_wins() {
        let mut composite = CompositeTreeSearchMonitor::<i64>::with_capacity(3);
        composite.add_monitor(NoOperationMonitor::new());
        composite.add_monitor(SolutionLimitMonitor::new(0));
        composite.add_monitor_boxed(Box::new(SolutionLimitMonitor::new(5)));
        let cmd = composite.search_command(&BnbSolverStatistics::default());
        assert_eq!(cmd, SearchCommand::terminate("solution limit reached"));
    }

    #[test]
    fn test_empty_composite_continues() {
        let mut composite: CompositeTreeSearchMonitor<'_, i64> =
            std::iter::empty().collect();
        assert!(composite.is_empty());
        assert!(composite
            .search_command(&BnbSolverStatistics::default())
            .is_continue());
    }
}
