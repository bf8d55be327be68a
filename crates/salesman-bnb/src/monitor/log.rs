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

use crate::{
    monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor},
    node::SearchNode,
    stats::BnbSolverStatistics,
};
use num_traits::{PrimInt, Signed};
use salesman_model::{matrix::CostMatrix, solution::Solution};
use std::time::{Duration, Instant};

/// Emits periodic progress rows through `tracing` at `info` level.
///
/// The clock is only read on steps where `nodes_expanded & clock_check_mask == 0`,
/// and a row is emitted at most once per `log_interval`.
#[derive(Debug, Clone)]
pub struct LogTreeSearchMonitor<T>
where
    T: std::fmt::Display + std::fmt::Debug + PrimInt + Signed,
{
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    best_objective: Option<T>,
    rows_logged: u64,
}

impl<T> LogTreeSearchMonitor<T>
where
    T: std::fmt::Display + std::fmt::Debug + PrimInt + Signed,
{
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            clock_check_mask,
            best_objective: None,
            rows_logged: 0,
        }
    }

    /// The number of progress rows emitted so far.
    #[inline]
    pub fn rows_logged(&self) -> u64 {
        self.rows_logged
    }

    /// The best objective seen by this monitor.
    #[inline]
    pub fn best_objective(&self) -> Option<T> {
        self.best_objective
    }

    #[inline(always)]
    fn log_line(&mut self, frontier_len: usize, stats: &BnbSolverStatistics<T>) {
        let now = Instant::now();
        let best = self
            .best_objective
            .map_or_else(|| "inf".to_string(), |b| b.to_string());

        tracing::info!(
            elapsed = %format!("{:.1}s", now.duration_since(self.start_time).as_secs_f32()),
            expanded = stats.nodes_expanded,
            frontier = frontier_len,
            best = %best,
            pruned = stats.pruned_count,
            "search progress"
        );

        self.last_log_time = now;
        self.rows_logged += 1;
    }
}

impl<T> Default for LogTreeSearchMonitor<T>
where
    T: std::fmt::Display + std::fmt::Debug + PrimInt + Signed,
{
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 4095)
    }
}

impl<T> std::fmt::Display for LogTreeSearchMonitor<T>
where
    T: std::fmt::Display + std::fmt::Debug + PrimInt + Signed,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogTreeSearchMonitor(log_interval: {}s, clock_check_mask: {})",
            self.log_interval.as_secs(),
            self.clock_check_mask
        )
    }
}

impl<T> TreeSearchMonitor<T> for LogTreeSearchMonitor<T>
where
    T: std::fmt::Display + std::fmt::Debug + PrimInt + Signed,
{
    fn name(&self) -> &str {
        "LogTreeSearchMonitor"
    }

    fn on_enter_search(&mut self, matrix: &CostMatrix<T>, _stats: &BnbSolverStatistics<T>) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.best_objective = None;
        self.rows_logged = 0;
        tracing::info!(num_points = matrix.num_points(), "search started");
    }

    fn on_step(&mut self, frontier_len: usize, stats: &BnbSolverStatistics<T>) {
        if (stats.nodes_expanded & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_line(frontier_len, stats);
        }
    }

    fn on_expand(&mut self, _node: &SearchNode<T>, _stats: &BnbSolverStatistics<T>) {}

    fn on_prune(&mut self, _depth: usize, _reason: PruneReason, _stats: &BnbSolverStatistics<T>) {}

    fn on_enqueue(&mut self, _node: &SearchNode<T>, _stats: &BnbSolverStatistics<T>) {}

    fn on_solution_found(&mut self, solution: &Solution<T>, _stats: &BnbSolverStatistics<T>) {
        self.best_objective = Some(solution.objective_value());
    }

    fn on_exit_search(&mut self, stats: &BnbSolverStatistics<T>) {
        tracing::info!(
            expanded = stats.nodes_expanded,
            created = stats.total_states_created,
            pruned = stats.pruned_count,
            solutions = stats.solutions_found,
            "search finished"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salesman_model::{index::PointIndex, matrix::CostMatrixBuilder, tour::Tour};

    #[test]
    fn test_logs_on_every_step_with_zero_interval() {
        let mut monitor = LogTreeSearchMonitor::<i64>::new(Duration::ZERO, 0);
        let matrix = CostMatrixBuilder::<i64>::new(2).build();
        let stats = BnbSolverStatistics::default();
        monitor.on_enter_search(&matrix, &stats);
        monitor.on_step(1, &stats);
        monitor.on_step(1, &stats);
        assert_eq!(monitor.rows_logged(), 2);
    }

    #[test]
    fn test_mask_filters_steps() {
        let mut monitor = LogTreeSearchMonitor::<i64>::new(Duration::ZERO, 1);
        let mut stats = BnbSolverStatistics::default();
        stats.on_node_expanded(); // odd count: masked out
        monitor.on_step(1, &stats);
        assert_eq!(monitor.rows_logged(), 0);
        stats.on_node_expanded();
        monitor.on_step(1, &stats);
        assert_eq!(monitor.rows_logged(), 1);
    }

    #[test]
    fn test_tracks_best_objective() {
        let mut monitor = LogTreeSearchMonitor::<i64>::default();
        let tour = Tour::new(vec![PointIndex::new(0), PointIndex::new(1)], 2).unwrap();
        monitor.on_solution_found(&Solution::new(17, tour), &BnbSolverStatistics::default());
        assert_eq!(monitor.best_objective(), Some(17));
        assert_eq!(
            monitor.to_string(),
            "LogTreeSearchMonitor(log_interval: 1s, clock_check_mask: 4095)"
        );
    }
}
