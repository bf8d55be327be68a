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

//! Best-first branch-and-bound for the travelling salesperson problem.
//!
//! `BnbSolver` snapshots the instance, seeds the best solution so far (BSSF)
//! with an `InitialTourHeuristic`, and then explores partial tours in order of
//! their reduced-cost lower bound. A run moves through three phases:
//!
//! - `Seeding`: the heuristic runs within its own share of the budget, its
//!   tour is validated against the snapshot, and the root node is reduced.
//! - `Searching`: the best node is popped, dropped if the BSSF has caught up
//!   with its bound, and otherwise expanded into one child per unvisited
//!   point.
//! - `Done`: the outcome is assembled from the BSSF and the statistics.
//!
//! The wall-clock budget is checked once per iteration, so an expansion in
//! progress always completes. Stopping on the budget or on a monitor request
//! is a normal termination: the BSSF found so far is returned.
//!
//! The solver keeps its frontier allocation between runs; everything else is
//! private to one search session.

use crate::{
    frontier::Frontier,
    incumbent::Incumbent,
    monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor},
    node::SearchNode,
    result::BnbSolverOutcome,
    stats::BnbSolverStatistics,
};
use salesman_model::{index::PointIndex, matrix::CostMatrix, oracle::CostOracle, solution::Solution};
use salesman_search::{
    err::{SolveError, snapshot},
    heuristic::InitialTourHeuristic,
    monitor::command::SearchCommand,
    num::SolverNumeric,
    result::TerminationReason,
};
use std::time::{Duration, Instant};

/// The time budget used when none is configured.
pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(60);

/// The share of the budget the seed heuristic gets when no seed limit is
/// configured.
pub const DEFAULT_SEED_TIME_DIVISOR: u32 = 10;

/// A best-first branch-and-bound solver with a wall-clock budget.
pub struct BnbSolver<T>
where
    T: SolverNumeric,
{
    frontier: Frontier<T>,
    time_limit: Duration,
    seed_time_limit: Option<Duration>,
}

impl<T> Default for BnbSolver<T>
where
    T: SolverNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for BnbSolver<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BnbSolver")
            .field("time_limit", &self.time_limit)
            .field("seed_time_limit", &self.seed_time_limit())
            .field("frontier_capacity", &self.frontier.capacity())
            .finish()
    }
}

impl<T> std::fmt::Display for BnbSolver<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BnbSolver(time_limit: {:.2?})", self.time_limit)
    }
}

impl<T> BnbSolver<T>
where
    T: SolverNumeric,
{
    /// Creates a solver with the default time limit of 60 seconds.
    #[inline]
    pub fn new() -> Self {
        Self {
            frontier: Frontier::new(),
            time_limit: DEFAULT_TIME_LIMIT,
            seed_time_limit: None,
        }
    }

    /// Creates a solver whose frontier can hold `capacity` nodes before
    /// reallocating.
    ///
    /// # Note
    ///
    /// This only moves the cost of the allocation to construction time. The
    /// frontier still grows on demand during the search.
    #[inline]
    pub fn preallocated(capacity: usize) -> Self {
        Self {
            frontier: Frontier::with_capacity(capacity),
            time_limit: DEFAULT_TIME_LIMIT,
            seed_time_limit: None,
        }
    }

    /// Sets the wall-clock budget of a solve. The budget covers validation,
    /// seeding and the search itself.
    #[inline]
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = time_limit;
        self
    }

    /// Sets the budget in seconds. Negative values are treated as zero and
    /// values too large for a `Duration` as an unlimited budget.
    #[inline]
    pub fn with_time_limit_secs(self, secs: f64) -> Self {
        let time_limit = Duration::try_from_secs_f64(secs.max(0.0)).unwrap_or(Duration::MAX);
        self.with_time_limit(time_limit)
    }

    #[inline]
    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }

    /// Caps the time the seed heuristic may spend. The heuristic never gets
    /// more than what is left of the overall budget.
    #[inline]
    pub fn with_seed_time_limit(mut self, seed_time_limit: Duration) -> Self {
        self.seed_time_limit = Some(seed_time_limit);
        self
    }

    /// The cap on the seed heuristic, a tenth of the overall budget unless
    /// configured.
    #[inline]
    pub fn seed_time_limit(&self) -> Duration {
        self.seed_time_limit
            .unwrap_or(self.time_limit / DEFAULT_SEED_TIME_DIVISOR)
    }

    /// Solves the instance given by `oracle`.
    ///
    /// The instance is validated and snapshotted before anything else
    /// happens; an invalid instance is reported as an error and no
    /// statistics are produced. Every other way the search can end,
    /// including infeasibility and an exhausted budget, is reported in the
    /// returned outcome.
    #[tracing::instrument(
        level = "info",
        skip_all,
        fields(num_points = oracle.num_points(), heuristic = heuristic.name())
    )]
    pub fn solve<O, H, S>(
        &mut self,
        oracle: &O,
        heuristic: &H,
        mut monitor: S,
    ) -> Result<BnbSolverOutcome<T>, SolveError>
    where
        O: CostOracle<T> + ?Sized,
        H: InitialTourHeuristic<T> + ?Sized,
        S: TreeSearchMonitor<T>,
    {
        let start_time = Instant::now();
        let matrix = snapshot(oracle)?;

        let session =
            BnbSolverSearchSession::new(self, &matrix, heuristic, &mut monitor, start_time);
        let outcome = session.run();

        self.reset();
        Ok(outcome)
    }

    #[inline]
    fn reset(&mut self) {
        self.frontier.clear();
    }
}

/// The phase a search session is in.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum SearchPhase {
    Seeding,
    Searching,
    Done,
}

impl std::fmt::Display for SearchPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchPhase::Seeding => write!(f, "Seeding"),
            SearchPhase::Searching => write!(f, "Searching"),
            SearchPhase::Done => write!(f, "Done"),
        }
    }
}

/// The state of a single solve.
struct BnbSolverSearchSession<'a, T, H, S>
where
    T: SolverNumeric,
    H: ?Sized,
{
    solver: &'a mut BnbSolver<T>,
    matrix: &'a CostMatrix<T>,
    heuristic: &'a H,
    monitor: &'a mut S,
    phase: SearchPhase,
    incumbent: Incumbent<T>,
    stats: BnbSolverStatistics<T>,
    start_time: Instant,
}

impl<'a, T, H, S> std::fmt::Debug for BnbSolverSearchSession<'a, T, H, S>
where
    T: SolverNumeric,
    H: ?Sized,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchSession")
            .field("phase", &self.phase)
            .field("frontier_len", &self.solver.frontier.len())
            .field("incumbent", &self.incumbent)
            .field("stats", &self.stats)
            .finish()
    }
}

impl<'a, T, H, S> BnbSolverSearchSession<'a, T, H, S>
where
    T: SolverNumeric,
    H: InitialTourHeuristic<T> + ?Sized,
    S: TreeSearchMonitor<T>,
{
    #[inline]
    fn new(
        solver: &'a mut BnbSolver<T>,
        matrix: &'a CostMatrix<T>,
        heuristic: &'a H,
        monitor: &'a mut S,
        start_time: Instant,
    ) -> Self {
        debug_assert!(
            solver.frontier.is_empty(),
            "called `BnbSolverSearchSession::new` with a non-empty frontier"
        );

        Self {
            solver,
            matrix,
            heuristic,
            monitor,
            phase: SearchPhase::Seeding,
            incumbent: Incumbent::new(),
            stats: BnbSolverStatistics::default(),
            start_time,
        }
    }

    fn run(mut self) -> BnbSolverOutcome<T> {
        self.monitor.on_enter_search(self.matrix, &self.stats);

        self.seed();
        self.transition(SearchPhase::Searching);

        let termination_reason = loop {
            if let Some(reason) = self.step() {
                break reason;
            }
        };

        self.transition(SearchPhase::Done);
        self.stats.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_search(&self.stats);

        tracing::info!(
            reason = %termination_reason,
            cost = ?self.incumbent.solution().map(|s| s.objective_value()),
            expanded = self.stats.nodes_expanded,
            created = self.stats.total_states_created,
            pruned = self.stats.pruned_count,
            elapsed = ?self.stats.time_total,
            "search terminated"
        );

        self.finalize_result(termination_reason)
    }

    #[inline]
    fn transition(&mut self, phase: SearchPhase) {
        tracing::debug!(from = %self.phase, to = %phase, "phase transition");
        self.phase = phase;
    }

    fn finalize_result(self, reason: TerminationReason) -> BnbSolverOutcome<T> {
        let solution = self.incumbent.into_solution();
        match (reason, solution) {
            (TerminationReason::OptimalityProven, Some(solution)) => {
                BnbSolverOutcome::optimal(solution, self.stats)
            }
            (TerminationReason::Aborted(msg), solution) => {
                BnbSolverOutcome::aborted(solution, msg, self.stats)
            }
            _ => BnbSolverOutcome::infeasible(self.stats),
        }
    }

    /// Installs a validated seed tour and pushes the root node.
    fn seed(&mut self) {
        let remaining = self
            .solver
            .time_limit
            .saturating_sub(self.start_time.elapsed());
        let budget = remaining.min(self.solver.seed_time_limit());
        let outcome = self.heuristic.construct(self.matrix, budget);

        match outcome.into_solution() {
            Some(solution) if self.is_valid_seed(&solution) => {
                tracing::debug!(
                    heuristic = self.heuristic.name(),
                    cost = %solution.objective_value(),
                    "seed tour installed"
                );
                self.incumbent.try_install(solution);
            }
            Some(solution) => {
                tracing::warn!(
                    heuristic = self.heuristic.name(),
                    cost = %solution.objective_value(),
                    "discarding seed tour that does not match the instance"
                );
            }
            None => {
                tracing::debug!(heuristic = self.heuristic.name(), "no seed tour");
            }
        }

        self.stats.on_state_created(1);
        match SearchNode::root(self.matrix) {
            Some(root) => {
                self.stats.set_root_lower_bound(root.bound());
                self.solver.frontier.push(root);
                self.stats.on_queue_size(self.solver.frontier.len());
            }
            None => {
                tracing::debug!("root reduction proves the instance infeasible");
            }
        }
    }

    #[inline]
    fn is_valid_seed(&self, solution: &Solution<T>) -> bool {
        solution.num_points() == self.matrix.num_points()
            && solution.tour().cost(self.matrix) == Some(solution.objective_value())
    }

    /// Runs one iteration of the search loop. Returns the termination reason
    /// once the search is over.
    fn step(&mut self) -> Option<TerminationReason> {
        if self.solver.frontier.is_empty() {
            return Some(if self.incumbent.is_empty() {
                TerminationReason::InfeasibilityProven
            } else {
                TerminationReason::OptimalityProven
            });
        }

        if self.start_time.elapsed() >= self.solver.time_limit {
            return Some(TerminationReason::Aborted("time limit reached".to_string()));
        }

        self.monitor
            .on_step(self.solver.frontier.len(), &self.stats);
        if let SearchCommand::Terminate(msg) = self.monitor.search_command(&self.stats) {
            return Some(TerminationReason::Aborted(msg));
        }

        let node = self.solver.frontier.pop()?;
        if !self.incumbent.admits(node.bound()) {
            self.stats.on_pruning_stale();
            self.monitor
                .on_prune(node.depth(), PruneReason::Stale, &self.stats);
            return None;
        }

        self.expand(node);
        None
    }

    fn expand(&mut self, node: SearchNode<T>) {
        self.stats.on_node_expanded();
        self.monitor.on_expand(&node, &self.stats);

        let child_depth = node.depth() + 1;
        let is_leaf = child_depth == self.matrix.num_points();

        for next in node.unvisited() {
            self.stats.on_state_created(child_depth);
            if is_leaf {
                self.handle_leaf(&node, next);
            } else {
                self.handle_child(&node, next);
            }
        }
    }

    #[inline]
    fn handle_child(&mut self, parent: &SearchNode<T>, next: PointIndex) {
        let depth = parent.depth() + 1;
        match parent.child(next) {
            Some(child) if self.incumbent.admits(child.bound()) => {
                self.monitor.on_enqueue(&child, &self.stats);
                self.solver.frontier.push(child);
                self.stats.on_state_queued(self.solver.frontier.len());
            }
            Some(_) => {
                self.stats.on_pruning_bound();
                self.monitor
                    .on_prune(depth, PruneReason::BoundDominated, &self.stats);
            }
            None => {
                self.stats.on_pruning_infeasible();
                self.monitor
                    .on_prune(depth, PruneReason::Infeasible, &self.stats);
            }
        }
    }

    /// Commits the last point through the final-edge path of the reduced
    /// matrix and prices the closed tour on the original costs.
    #[inline]
    fn handle_leaf(&mut self, parent: &SearchNode<T>, last: PointIndex) {
        let priced = parent
            .child(last)
            .and_then(|leaf| leaf.complete(self.matrix));
        let Some(solution) = priced else {
            self.stats.on_pruning_infeasible();
            self.monitor
                .on_prune(parent.depth() + 1, PruneReason::Infeasible, &self.stats);
            return;
        };

        self.stats.on_leaf_reached();
        if self.incumbent.admits(solution.objective_value()) {
            self.stats.on_solution_found();
            tracing::info!(
                cost = %solution.objective_value(),
                tour = %solution.tour(),
                solutions_found = self.stats.solutions_found,
                "improved best solution"
            );
            self.monitor.on_solution_found(&solution, &self.stats);
            self.incumbent.try_install(solution);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::{
        composite::CompositeTreeSearchMonitor, log::LogTreeSearchMonitor,
        no_op::NoOperationMonitor, solution::SolutionLimitMonitor,
    };
    use proptest::prelude::*;
    use salesman_model::{
        cost::EdgeCost,
        matrix::CostMatrixBuilder,
        oracle::CostOracleError,
        scenario::{Difficulty, Scenario},
        tour::Tour,
    };
    use salesman_search::{
        heuristic::{
            HeuristicOutcome, nearest::NearestNeighborHeuristic, none::NoInitialTour,
            random::RandomPermutationHeuristic,
        },
        result::{SolveReport, SolverResult},
    };

    fn square() -> CostMatrix<i64> {
        CostMatrixBuilder::from_rows(&[
            vec![0i64, 10, 15, 20],
            vec![10, 0, 35, 25],
            vec![15, 35, 0, 30],
            vec![20, 25, 30, 0],
        ])
        .build()
    }

    /// The cheapest tour that starts with `prefix`, by enumeration.
    fn cheapest_completion(matrix: &CostMatrix<i64>, prefix: &[PointIndex]) -> Option<i64> {
        fn go(
            matrix: &CostMatrix<i64>,
            path: &mut Vec<PointIndex>,
            used: &mut Vec<bool>,
            best: &mut Option<i64>,
        ) {
            let n = matrix.num_points();
            if path.len() == n {
                let tour = Tour::new_unchecked(path.clone());
                if let Some(cost) = tour.cost(matrix) {
                    if best.is_none_or(|b| cost < b) {
                        *best = Some(cost);
                    }
                }
                return;
            }
            for q in 1..n {
                if !used[q] {
                    used[q] = true;
                    path.push(PointIndex::new(q));
                    go(matrix, path, used, best);
                    path.pop();
                    used[q] = false;
                }
            }
        }

        let mut used = vec![false; matrix.num_points()];
        for p in prefix {
            used[p.get()] = true;
        }
        let mut best = None;
        go(matrix, &mut prefix.to_vec(), &mut used, &mut best);
        best
    }

    fn brute_force(matrix: &CostMatrix<i64>) -> Option<i64> {
        cheapest_completion(matrix, &[PointIndex::new(0)])
    }

    // set RUST_LOG=salesman_bnb=info to see the search log
    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn solve(matrix: &CostMatrix<i64>) -> BnbSolverOutcome<i64> {
        BnbSolver::<i64>::new()
            .solve(matrix, &NoInitialTour, NoOperationMonitor::new())
            .unwrap()
    }

    #[derive(Default)]
    struct Recording {
        improvements: Vec<i64>,
        expanded_bounds: Vec<i64>,
        entered: bool,
        exited: bool,
    }

    impl TreeSearchMonitor<i64> for Recording {
        fn name(&self) -> &str {
            "Recording"
        }
        fn on_enter_search(&mut self, _m: &CostMatrix<i64>, _s: &BnbSolverStatistics<i64>) {
            self.entered = true;
        }
        fn on_exit_search(&mut self, _s: &BnbSolverStatistics<i64>) {
            self.exited = true;
        }
        fn on_step(&mut self, _len: usize, _s: &BnbSolverStatistics<i64>) {}
        fn on_expand(&mut self, node: &SearchNode<i64>, _s: &BnbSolverStatistics<i64>) {
            self.expanded_bounds.push(node.bound());
        }
        fn on_prune(&mut self, _d: usize, _r: PruneReason, _s: &BnbSolverStatistics<i64>) {}
        fn on_enqueue(&mut self, _n: &SearchNode<i64>, _s: &BnbSolverStatistics<i64>) {}
        fn on_solution_found(&mut self, sol: &Solution<i64>, _s: &BnbSolverStatistics<i64>) {
            self.improvements.push(sol.objective_value());
        }
    }

    #[test]
    fn test_finds_optimum_without_seed() {
        let outcome = solve(&square());
        assert_eq!(outcome.cost(), Some(80));
        assert_eq!(
            outcome.termination_reason(),
            &TerminationReason::OptimalityProven
        );
        let stats = outcome.statistics();
        assert!(stats.solutions_found >= 1);
        assert!(stats.is_consistent());
        assert_eq!(stats.root_lower_bound, Some(70));
        let tour = outcome.result().solution().unwrap().tour();
        assert_eq!(tour.cost(&square()), Some(80));
    }

    #[test]
    fn test_optimal_seed_is_not_counted() {
        let outcome = BnbSolver::<i64>::new()
            .solve(&square(), &NearestNeighborHeuristic, NoOperationMonitor::new())
            .unwrap();
        assert_eq!(outcome.cost(), Some(80));
        assert!(matches!(outcome.result(), SolverResult::Optimal(_)));
        assert_eq!(outcome.statistics().solutions_found, 0);
        assert!(outcome.statistics().is_consistent());
    }

    #[test]
    fn test_two_points() {
        let m = CostMatrixBuilder::from_rows(&[vec![0i64, 3], vec![4, 0]]).build();
        let outcome = solve(&m);
        assert_eq!(outcome.cost(), Some(7));
        let stats = outcome.statistics();
        assert_eq!(stats.total_states_created, 2);
        assert_eq!(stats.leaves_reached, 1);
        assert_eq!(stats.solutions_found, 1);
        assert_eq!(stats.nodes_expanded, 1);
        assert!(stats.is_consistent());
    }

    #[test]
    fn test_root_infeasible() {
        // nothing enters point 2
        let m = CostMatrixBuilder::from_rows(&[vec![0i64, 1, -1], vec![1, 0, -1], vec![1, 1, 0]])
            .build();
        let outcome = solve(&m);
        assert_eq!(outcome.cost(), None);
        assert_eq!(
            outcome.termination_reason(),
            &TerminationReason::InfeasibilityProven
        );
        let stats = outcome.statistics();
        assert_eq!(stats.total_states_created, 1);
        assert_eq!(stats.nodes_expanded, 0);
        assert_eq!(stats.root_lower_bound, None);
        assert!(stats.is_consistent());
    }

    #[test]
    fn test_disjoint_cycles_are_infeasible() {
        let mut b = CostMatrixBuilder::<i64>::new(4);
        b.set_symmetric_cost(PointIndex::new(0), PointIndex::new(1), 5)
            .set_symmetric_cost(PointIndex::new(2), PointIndex::new(3), 7);
        let outcome = solve(&b.build());
        assert_eq!(outcome.cost(), None);
        assert!(matches!(outcome.result(), SolverResult::Infeasible));
        let stats = outcome.statistics();
        assert_eq!(stats.nodes_expanded, 1);
        assert_eq!(stats.total_states_created, 4);
        assert_eq!(stats.prunings_infeasible, 3);
        assert_eq!(stats.pruned_count, 3);
        assert!(stats.is_consistent());
    }

    #[test]
    fn test_zero_budget_returns_seed() {
        let outcome = BnbSolver::<i64>::new()
            .with_time_limit(Duration::ZERO)
            .solve(&square(), &NearestNeighborHeuristic, NoOperationMonitor::new())
            .unwrap();
        assert!(matches!(outcome.result(), SolverResult::Feasible(_)));
        assert_eq!(outcome.cost(), Some(80));
        assert_eq!(
            outcome.termination_reason(),
            &TerminationReason::Aborted("time limit reached".to_string())
        );
        assert_eq!(outcome.statistics().nodes_expanded, 0);
        assert_eq!(outcome.statistics().total_states_created, 1);
        assert_eq!(outcome.statistics().solutions_found, 0);
    }

    #[test]
    fn test_zero_budget_without_seed_is_unknown() {
        let outcome = BnbSolver::<i64>::new()
            .with_time_limit_secs(0.0)
            .solve(&square(), &NoInitialTour, NoOperationMonitor::new())
            .unwrap();
        assert!(matches!(outcome.result(), SolverResult::Unknown));
        assert_eq!(outcome.cost(), None);
        assert_eq!(outcome.statistics().nodes_expanded, 0);
    }

    #[test]
    fn test_time_limit_configuration() {
        let solver = BnbSolver::<i64>::new();
        assert_eq!(solver.time_limit(), DEFAULT_TIME_LIMIT);
        assert_eq!(
            BnbSolver::<i64>::new().with_time_limit_secs(-3.0).time_limit(),
            Duration::ZERO
        );
        assert_eq!(
            BnbSolver::<i64>::new().with_time_limit_secs(f64::INFINITY).time_limit(),
            Duration::MAX
        );
        assert_eq!(
            BnbSolver::<i64>::preallocated(16).with_time_limit_secs(1.5).time_limit(),
            Duration::from_millis(1500)
        );
        assert_eq!(solver.seed_time_limit(), Duration::from_secs(6));
        assert_eq!(
            BnbSolver::<i64>::new()
                .with_seed_time_limit(Duration::from_millis(5))
                .seed_time_limit(),
            Duration::from_millis(5)
        );
    }

    #[test]
    fn test_seed_heuristic_leaves_budget_for_the_search() {
        // a single Hamiltonian cycle that random orders practically never hit
        let n = 14;
        let mut b = CostMatrixBuilder::<i64>::new(n);
        for i in 0..n {
            b.set_cost(PointIndex::new(i), PointIndex::new((i + 1) % n), 1);
        }
        let matrix = b.build();

        let outcome = BnbSolver::<i64>::new()
            .with_time_limit(Duration::from_secs(1))
            .solve(
                &matrix,
                &RandomPermutationHeuristic::new(0),
                NoOperationMonitor::new(),
            )
            .unwrap();
        assert_eq!(outcome.cost(), Some(14));
        assert_eq!(
            outcome.termination_reason(),
            &TerminationReason::OptimalityProven
        );
        assert!(outcome.statistics().nodes_expanded > 0);
    }

    #[test]
    fn test_tour_of_maximal_cost_is_found() {
        for rows in [[[0i8, 100], [27, 0]], [[0i8, i8::MAX], [0, 0]]] {
            let matrix = CostMatrixBuilder::from_rows(&rows).build();
            let outcome = BnbSolver::<i8>::new()
                .solve(&matrix, &NoInitialTour, NoOperationMonitor::new())
                .unwrap();
            assert_eq!(outcome.cost(), Some(i8::MAX));
            assert_eq!(
                outcome.termination_reason(),
                &TerminationReason::OptimalityProven
            );
            assert_eq!(outcome.statistics().solutions_found, 1);
            assert!(outcome.statistics().is_consistent());
        }
    }

    #[test]
    fn test_invalid_input_fails_fast() {
        let single = CostMatrixBuilder::<i64>::new(1).build();
        let err = BnbSolver::<i64>::new()
            .solve(&single, &NoInitialTour, NoOperationMonitor::new())
            .unwrap_err();
        assert_eq!(err, SolveError::TooFewPoints { num_points: 1 });

        struct Broken;
        impl CostOracle<i64> for Broken {
            fn num_points(&self) -> usize {
                3
            }
            fn cost(&self, from: PointIndex, to: PointIndex) -> Result<EdgeCost<i64>, CostOracleError> {
                Err(CostOracleError::Unrepresentable { from, to })
            }
        }

        let mut monitor = Recording::default();
        let err = BnbSolver::<i64>::new()
            .solve(&Broken, &NoInitialTour, &mut monitor)
            .unwrap_err();
        assert!(matches!(err, SolveError::Oracle(_)));
        assert!(!monitor.entered);
    }

    #[test]
    fn test_mismatched_seed_is_ignored() {
        struct Lying;
        impl InitialTourHeuristic<i64> for Lying {
            fn name(&self) -> &str {
                "Lying"
            }
            fn construct(&self, matrix: &CostMatrix<i64>, _t: Duration) -> HeuristicOutcome<i64> {
                let points = (0..matrix.num_points()).map(PointIndex::new).collect();
                let tour = Tour::new(points, matrix.num_points()).unwrap();
                HeuristicOutcome::new(Some(Solution::new(1, tour)), 1, Duration::ZERO)
            }
        }

        let outcome = BnbSolver::<i64>::new()
            .solve(&square(), &Lying, NoOperationMonitor::new())
            .unwrap();
        assert_eq!(outcome.cost(), Some(80));
        assert!(outcome.statistics().solutions_found >= 1);
    }

    #[test]
    fn test_bssf_improves_monotonically() {
        init_tracing();
        let scenario = Scenario::builder()
            .with_num_points(8)
            .with_difficulty(Difficulty::Normal)
            .with_seed(7)
            .build();
        let mut monitor = Recording::default();
        let outcome = BnbSolver::<i64>::new()
            .solve(&scenario, &NoInitialTour, &mut monitor)
            .unwrap();

        assert!(monitor.entered && monitor.exited);
        assert!(!monitor.improvements.is_empty());
        assert!(monitor.improvements.windows(2).all(|w| w[1] < w[0]));
        assert_eq!(monitor.improvements.last().copied(), outcome.cost());
        assert_eq!(
            monitor.improvements.len() as u64,
            outcome.statistics().solutions_found
        );

        // best-first: no node above the optimum is ever expanded
        let optimum = outcome.cost().unwrap();
        assert!(monitor.expanded_bounds.iter().all(|&b| b <= optimum));
    }

    #[test]
    fn test_solution_limit_stops_search() {
        init_tracing();
        let scenario = Scenario::builder()
            .with_num_points(8)
            .with_difficulty(Difficulty::Easy)
            .with_seed(3)
            .build();
        let monitor = CompositeTreeSearchMonitor::new()
            .with_monitor(SolutionLimitMonitor::<i64>::new(1))
            .with_monitor(LogTreeSearchMonitor::<i64>::default());
        let outcome = BnbSolver::<i64>::new()
            .solve(&scenario, &NoInitialTour, monitor)
            .unwrap();

        assert_eq!(outcome.statistics().solutions_found, 1);
        assert!(outcome.cost().is_some());
        assert!(matches!(
            outcome.termination_reason(),
            TerminationReason::OptimalityProven | TerminationReason::Aborted(_)
        ));
        if let TerminationReason::Aborted(msg) = outcome.termination_reason() {
            assert_eq!(msg, "solution limit reached");
        }
    }

    #[test]
    fn test_matches_brute_force_on_hard_scenarios() {
        for seed in 0..4 {
            let scenario = Scenario::builder()
                .with_num_points(8)
                .with_difficulty(Difficulty::Hard)
                .with_seed(seed)
                .build();
            let matrix = CostMatrix::<i64>::from_oracle(&scenario).unwrap();
            let outcome = BnbSolver::<i64>::new()
                .solve(
                    &scenario,
                    &RandomPermutationHeuristic::new(seed).with_max_attempts(64),
                    NoOperationMonitor::new(),
                )
                .unwrap();
            assert_eq!(outcome.cost(), brute_force(&matrix));
            assert!(outcome.statistics().is_consistent());
        }
    }

    #[test]
    fn test_solver_is_reusable() {
        let mut solver = BnbSolver::<i64>::preallocated(64);
        let first = solver
            .solve(&square(), &NoInitialTour, NoOperationMonitor::new())
            .unwrap();
        let second = solver
            .solve(&square(), &NoInitialTour, NoOperationMonitor::new())
            .unwrap();
        assert_eq!(first.cost(), second.cost());
        assert_eq!(
            first.statistics().total_states_created,
            second.statistics().total_states_created
        );
    }

    #[test]
    fn test_outcome_converts_into_report() {
        let report: SolveReport<i64> = solve(&square()).into();
        assert_eq!(report.cost(), Some(80));
        assert!(report.is_optimal());
        assert!(report.max_queue_size().is_some());
        assert!(report.total_states_created().unwrap() >= 1);
        assert!(report.pruned_count().is_some());
    }

    fn matrix_strategy() -> impl Strategy<Value = CostMatrix<i64>> {
        (2usize..=8).prop_flat_map(|n| {
            proptest::collection::vec(proptest::option::weighted(0.8, 0i64..100), n * n).prop_map(
                move |cells| {
                    let mut b = CostMatrixBuilder::<i64>::new(n);
                    for from in 0..n {
                        for to in 0..n {
                            if from == to {
                                continue;
                            }
                            if let Some(c) = cells[from * n + to] {
                                b.set_cost(PointIndex::new(from), PointIndex::new(to), c);
                            }
                        }
                    }
                    b.build()
                },
            )
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(96))]

        #[test]
        fn prop_matches_brute_force(matrix in matrix_strategy()) {
            let expected = brute_force(&matrix);
            let outcome = solve(&matrix);
            prop_assert_eq!(outcome.cost(), expected);
            prop_assert!(outcome.statistics().is_consistent());
            if let Some(sol) = outcome.result().solution() {
                prop_assert_eq!(sol.tour().cost(&matrix), Some(sol.objective_value()));
            }
        }

        #[test]
        fn prop_root_bound_is_valid(matrix in matrix_strategy()) {
            let expected = brute_force(&matrix);
            match SearchNode::root(&matrix) {
                Some(root) => {
                    if let Some(opt) = expected {
                        prop_assert!(root.bound() <= opt);
                    }
                }
                None => prop_assert_eq!(expected, None),
            }
        }

        #[test]
        fn prop_every_node_bound_is_valid(matrix in matrix_strategy()) {
            let Some(root) = SearchNode::root(&matrix) else {
                prop_assert_eq!(brute_force(&matrix), None);
                return Ok(());
            };
            let mut stack = vec![root];
            while let Some(node) = stack.pop() {
                let best = cheapest_completion(&matrix, node.path());
                if let Some(best) = best {
                    prop_assert!(
                        node.bound() <= best,
                        "bound {} above cheapest completion {} at {}",
                        node.bound(),
                        best,
                        node
                    );
                }
                if node.is_leaf() {
                    let priced = node.complete(&matrix).map(|s| s.objective_value());
                    prop_assert_eq!(priced, best);
                    continue;
                }
                for next in node.unvisited() {
                    match node.child(next) {
                        Some(child) => stack.push(child),
                        None => {
                            let mut path = node.path().to_vec();
                            path.push(next);
                            prop_assert_eq!(cheapest_completion(&matrix, &path), None);
                        }
                    }
                }
            }
        }

        #[test]
        fn prop_child_bounds_never_decrease(matrix in matrix_strategy()) {
            if let Some(root) = SearchNode::root(&matrix) {
                let mut stack = vec![root];
                while let Some(node) = stack.pop() {
                    if node.is_leaf() {
                        continue;
                    }
                    for next in node.unvisited() {
                        if let Some(child) = node.child(next) {
                            prop_assert!(child.bound() >= node.bound());
                            stack.push(child);
                        }
                    }
                }
            }
        }

        #[test]
        fn prop_seeded_search_keeps_optimum(matrix in matrix_strategy(), seed in 0u64..1000) {
            let unseeded = solve(&matrix);
            let seeded = BnbSolver::<i64>::new()
                .solve(
                    &matrix,
                    &RandomPermutationHeuristic::new(seed).with_max_attempts(64),
                    NoOperationMonitor::new(),
                )
                .unwrap();
            prop_assert_eq!(seeded.cost(), unseeded.cost());
            prop_assert!(seeded.statistics().is_consistent());
        }
    }
}
