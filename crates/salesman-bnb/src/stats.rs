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

use std::time::Duration;

/// Statistics collected during a branch-and-bound solve.
///
/// Every created state other than the root ends up in exactly one of
/// `prunings_bound`, `prunings_infeasible`, `states_queued` or
/// `leaves_reached`. Popped nodes found stale add to `prunings_stale`
/// without creating a state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BnbSolverStatistics<T> {
    /// Complete tours that improved the BSSF. The seed tour is not counted.
    pub solutions_found: u64,
    /// The largest frontier size observed.
    pub max_queue_size: u64,
    /// States created, including the root.
    pub total_states_created: u64,
    /// All prunings: bound, infeasible and stale.
    pub pruned_count: u64,
    /// Children discarded because their bound was not below the BSSF.
    pub prunings_bound: u64,
    /// Children discarded because no completion exists.
    pub prunings_infeasible: u64,
    /// Popped nodes whose bound was no longer below the BSSF.
    pub prunings_stale: u64,
    /// Children pushed onto the frontier (the root is not counted).
    pub states_queued: u64,
    /// Complete tours of finite cost, improving or not.
    pub leaves_reached: u64,
    /// Nodes popped and expanded.
    pub nodes_expanded: u64,
    /// The deepest path length created.
    pub max_depth: u64,
    /// The bound of the root node, if the root was feasible.
    pub root_lower_bound: Option<T>,
    /// Total time spent in the solver.
    pub time_total: Duration,
}

impl<T> Default for BnbSolverStatistics<T> {
    fn default() -> Self {
        Self {
            solutions_found: 0,
            max_queue_size: 0,
            total_states_created: 0,
            pruned_count: 0,
            prunings_bound: 0,
            prunings_infeasible: 0,
            prunings_stale: 0,
            states_queued: 0,
            leaves_reached: 0,
            nodes_expanded: 0,
            max_depth: 0,
            root_lower_bound: None,
            time_total: Duration::ZERO,
        }
    }
}

impl<T> BnbSolverStatistics<T> {
    #[inline]
    pub fn on_state_created(&mut self, depth: usize) {
        self.total_states_created = self.total_states_created.saturating_add(1);
        self.max_depth = self.max_depth.max(depth as u64);
    }

    #[inline]
    pub fn on_node_expanded(&mut self) {
        self.nodes_expanded = self.nodes_expanded.saturating_add(1);
    }

    /// Records a push onto the frontier, which now holds `queue_len` nodes.
    #[inline]
    pub fn on_state_queued(&mut self, queue_len: usize) {
        self.states_queued = self.states_queued.saturating_add(1);
        self.on_queue_size(queue_len);
    }

    #[inline]
    pub fn on_queue_size(&mut self, queue_len: usize) {
        self.max_queue_size = self.max_queue_size.max(queue_len as u64);
    }

    #[inline]
    pub fn on_leaf_reached(&mut self) {
        self.leaves_reached = self.leaves_reached.saturating_add(1);
    }

    #[inline]
    pub fn on_solution_found(&mut self) {
        self.solutions_found = self.solutions_found.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning_bound(&mut self) {
        self.prunings_bound = self.prunings_bound.saturating_add(1);
        self.pruned_count = self.pruned_count.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning_infeasible(&mut self) {
        self.prunings_infeasible = self.prunings_infeasible.saturating_add(1);
        self.pruned_count = self.pruned_count.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning_stale(&mut self) {
        self.prunings_stale = self.prunings_stale.saturating_add(1);
        self.pruned_count = self.pruned_count.saturating_add(1);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }

    #[inline]
    pub fn set_root_lower_bound(&mut self, bound: T) {
        self.root_lower_bound = Some(bound);
    }

    /// Checks both accounting identities.
    pub fn is_consistent(&self) -> bool {
        let prunings = self
            .prunings_bound
            .saturating_add(self.prunings_infeasible)
            .saturating_add(self.prunings_stale);
        let settled = self
            .prunings_bound
            .saturating_add(self.prunings_infeasible)
            .saturating_add(self.states_queued)
            .saturating_add(self.leaves_reached);
        prunings == self.pruned_count && settled == self.total_states_created.saturating_sub(1)
    }
}

impl<T> std::fmt::Display for BnbSolverStatistics<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let root = self
            .root_lower_bound
            .as_ref()
            .map_or_else(|| "--".to_string(), |b| b.to_string());
        writeln!(f, "Salesman-BnB Solver Statistics:")?;
        writeln!(f, "  States created:       {}", self.total_states_created)?;
        writeln!(f, "  States queued:        {}", self.states_queued)?;
        writeln!(f, "  Max queue size:       {}", self.max_queue_size)?;
        writeln!(f, "  Nodes expanded:       {}", self.nodes_expanded)?;
        writeln!(f, "  Max depth reached:    {}", self.max_depth)?;
        writeln!(f, "  Leaves reached:       {}", self.leaves_reached)?;
        writeln!(f, "  Pruned (total):       {}", self.pruned_count)?;
        writeln!(f, "  Prunings (bound):     {}", self.prunings_bound)?;
        writeln!(f, "  Prunings (infeasible):{}", self.prunings_infeasible)?;
        writeln!(f, "  Prunings (stale):     {}", self.prunings_stale)?;
        writeln!(f, "  Solutions found:      {}", self.solutions_found)?;
        writeln!(f, "  Root Lower Bound:     {}", root)?;
        writeln!(f, "  Total time:           {:.2?}", self.time_total)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_keep_identities() {
        let mut s = BnbSolverStatistics::<i64>::default();
        s.on_state_created(1); // root
        for _ in 0..5 {
            s.on_state_created(2);
        }
        s.on_pruning_bound();
        s.on_pruning_infeasible();
        s.on_state_queued(1);
        s.on_state_queued(2);
        s.on_leaf_reached();
        s.on_pruning_stale();
        assert!(s.is_consistent());
        assert_eq!(s.pruned_count, 3);
        assert_eq!(s.max_queue_size, 2);
        assert_eq!(s.max_depth, 2);
    }

    #[test]
    fn test_inconsistency_is_detected() {
        let mut s = BnbSolverStatistics::<i64>::default();
        s.on_state_created(1);
        s.on_state_created(2);
        assert!(!s.is_consistent());
        s.on_state_queued(1);
        assert!(s.is_consistent());
    }

    #[test]
    fn test_display_mentions_root_bound() {
        let mut s = BnbSolverStatistics::<i64>::default();
        assert!(s.to_string().contains("Root Lower Bound:     --"));
        s.set_root_lower_bound(70);
        assert!(s.to_string().contains("Root Lower Bound:     70"));
    }
}
