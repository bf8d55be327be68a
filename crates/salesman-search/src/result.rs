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

//! Solver results and the external result record.
//!
//! `SolverResult` and `TerminationReason` describe *what* a solver found and
//! *why* it stopped. `SolveReport` is the flat record handed to callers of
//! every entry point, exact or heuristic: cost, tour, elapsed time and the
//! effort counters. Counters that only make sense for a tree search are
//! `None` for the heuristic baselines.

use salesman_model::{solution::Solution, tour::Tour};
use num_traits::{PrimInt, Signed};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverResult<T> {
    /// We have proven that no tour of finite cost exists.
    Infeasible,
    /// We have found a tour and proven its optimality.
    Optimal(Solution<T>),
    /// We have found a tour, but not proven its optimality.
    Feasible(Solution<T>),
    /// The solver terminated without finding a tour and
    /// without proving infeasibility.
    Unknown,
}

impl<T> SolverResult<T> {
    /// Returns the solution if one was found.
    #[inline]
    pub fn solution(&self) -> Option<&Solution<T>> {
        match self {
            SolverResult::Optimal(s) | SolverResult::Feasible(s) => Some(s),
            SolverResult::Infeasible | SolverResult::Unknown => None,
        }
    }

    /// Consumes the result and returns the solution if one was found.
    #[inline]
    pub fn into_solution(self) -> Option<Solution<T>> {
        match self {
            SolverResult::Optimal(s) | SolverResult::Feasible(s) => Some(s),
            SolverResult::Infeasible | SolverResult::Unknown => None,
        }
    }
}

impl<T> std::fmt::Display for SolverResult<T>
where
    T: PrimInt + Signed + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverResult::Infeasible => write!(f, "Infeasible"),
            SolverResult::Optimal(solution) => {
                write!(f, "Optimal(objective={})", solution.objective_value())
            }
            SolverResult::Feasible(solution) => {
                write!(f, "Feasible(objective={})", solution.objective_value())
            }
            SolverResult::Unknown => write!(f, "Unknown"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// The search space was exhausted with a tour in hand.
    OptimalityProven,
    /// The search space was exhausted without finding a tour.
    InfeasibilityProven,
    /// A construction heuristic ran to completion. Nothing is proven.
    HeuristicFinished,
    /// The solver stopped early (time budget, monitor request).
    /// The string names the reason.
    Aborted(String),
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::OptimalityProven => write!(f, "Optimality Proven"),
            TerminationReason::InfeasibilityProven => write!(f, "Infeasibility Proven"),
            TerminationReason::HeuristicFinished => write!(f, "Heuristic Finished"),
            TerminationReason::Aborted(reason) => write!(f, "Aborted: {}", reason),
        }
    }
}

/// The result record returned by every solve entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveReport<T> {
    result: SolverResult<T>,
    termination_reason: TerminationReason,
    time_elapsed: Duration,
    solutions_found: u64,
    max_queue_size: Option<u64>,
    total_states_created: Option<u64>,
    pruned_count: Option<u64>,
}

impl<T> SolveReport<T>
where
    T: PrimInt + Signed,
{
    /// Creates a report for a heuristic run. The tree search counters are absent.
    #[inline]
    pub fn heuristic(
        solution: Option<Solution<T>>,
        time_elapsed: Duration,
        solutions_found: u64,
    ) -> Self {
        let result = match solution {
            Some(s) => SolverResult::Feasible(s),
            None => SolverResult::Unknown,
        };
        Self {
            result,
            termination_reason: TerminationReason::HeuristicFinished,
            time_elapsed,
            solutions_found,
            max_queue_size: None,
            total_states_created: None,
            pruned_count: None,
        }
    }

    /// Creates a report for a tree search run.
    #[inline]
    pub fn tree_search(
        result: SolverResult<T>,
        termination_reason: TerminationReason,
        time_elapsed: Duration,
        solutions_found: u64,
        max_queue_size: u64,
        total_states_created: u64,
        pruned_count: u64,
    ) -> Self {
        Self {
            result,
            termination_reason,
            time_elapsed,
            solutions_found,
            max_queue_size: Some(max_queue_size),
            total_states_created: Some(total_states_created),
            pruned_count: Some(pruned_count),
        }
    }

    /// The cost of the best tour, or `None` (infinite) if no tour was found.
    #[inline]
    pub fn cost(&self) -> Option<T> {
        self.result.solution().map(|s| s.objective_value())
    }

    /// The best tour, if any.
    #[inline]
    pub fn tour(&self) -> Option<&Tour> {
        self.result.solution().map(|s| s.tour())
    }

    #[inline]
    pub fn result(&self) -> &SolverResult<T> {
        &self.result
    }

    #[inline]
    pub fn termination_reason(&self) -> &TerminationReason {
        &self.termination_reason
    }

    #[inline]
    pub fn time_elapsed(&self) -> Duration {
        self.time_elapsed
    }

    /// Complete tours discovered. For the exact search the seed tour is not counted.
    #[inline]
    pub fn solutions_found(&self) -> u64 {
        self.solutions_found
    }

    #[inline]
    pub fn max_queue_size(&self) -> Option<u64> {
        self.max_queue_size
    }

    #[inline]
    pub fn total_states_created(&self) -> Option<u64> {
        self.total_states_created
    }

    #[inline]
    pub fn pruned_count(&self) -> Option<u64> {
        self.pruned_count
    }

    #[inline]
    pub fn is_optimal(&self) -> bool {
        matches!(self.result, SolverResult::Optimal(_))
    }

    #[inline]
    pub fn has_solution(&self) -> bool {
        self.result.solution().is_some()
    }
}

impl<T> std::fmt::Display for SolveReport<T>
where
    T: PrimInt + Signed + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn opt(v: Option<u64>) -> String {
            v.map_or_else(|| "--".to_string(), |v| v.to_string())
        }

        let cost = self
            .cost()
            .map_or_else(|| "inf".to_string(), |c| c.to_string());
        writeln!(f, "Solve Report")?;
        writeln!(f, "  Result:               {}", self.result)?;
        writeln!(f, "  Termination:          {}", self.termination_reason)?;
        writeln!(f, "  Cost:                 {}", cost)?;
        if let Some(tour) = self.tour() {
            writeln!(f, "  Tour:                 {}", tour)?;
        }
        writeln!(f, "  Time elapsed:         {:.2?}", self.time_elapsed)?;
        writeln!(f, "  Solutions found:      {}", self.solutions_found)?;
        writeln!(f, "  Max queue size:       {}", opt(self.max_queue_size))?;
        writeln!(f, "  States created:       {}", opt(self.total_states_created))?;
        writeln!(f, "  States pruned:        {}", opt(self.pruned_count))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salesman_model::index::PointIndex;

    fn solution(cost: i64) -> Solution<i64> {
        let tour = Tour::new([0, 1, 2].map(PointIndex::new).to_vec(), 3).unwrap();
        Solution::new(cost, tour)
    }

    #[test]
    fn test_heuristic_report_has_no_tree_counters() {
        let report = SolveReport::heuristic(Some(solution(12)), Duration::from_millis(3), 7);
        assert_eq!(report.cost(), Some(12));
        assert!(report.tour().is_some());
        assert_eq!(report.solutions_found(), 7);
        assert_eq!(report.max_queue_size(), None);
        assert_eq!(report.total_states_created(), None);
        assert_eq!(report.pruned_count(), None);
        assert!(matches!(report.result(), SolverResult::Feasible(_)));
        assert_eq!(
            report.termination_reason(),
            &TerminationReason::HeuristicFinished
        );
    }

    #[test]
    fn test_failed_heuristic_reports_infinite_cost() {
        let report = SolveReport::<i64>::heuristic(None, Duration::ZERO, 0);
        assert_eq!(report.cost(), None);
        assert!(report.tour().is_none());
        assert!(!report.has_solution());
        assert!(report.to_string().contains("Cost:                 inf"));
    }

    #[test]
    fn test_tree_search_report() {
        let report = SolveReport::tree_search(
            SolverResult::Optimal(solution(80)),
            TerminationReason::OptimalityProven,
            Duration::from_micros(10),
            2,
            5,
            17,
            9,
        );
        assert!(report.is_optimal());
        assert_eq!(report.cost(), Some(80));
        assert_eq!(report.max_queue_size(), Some(5));
        assert_eq!(report.total_states_created(), Some(17));
        assert_eq!(report.pruned_count(), Some(9));
        let rendered = report.to_string();
        assert!(rendered.contains("Optimal(objective=80)"));
        assert!(rendered.contains("[0 -> 1 -> 2]"));
    }

    #[test]
    fn test_into_solution() {
        assert_eq!(
            SolverResult::Feasible(solution(5)).into_solution(),
            Some(solution(5))
        );
        assert_eq!(SolverResult::<i64>::Unknown.into_solution(), None);
    }

    #[test]
    fn test_termination_reason_display() {
        assert_eq!(
            TerminationReason::Aborted("time limit".into()).to_string(),
            "Aborted: time limit"
        );
        assert_eq!(
            TerminationReason::OptimalityProven.to_string(),
            "Optimality Proven"
        );
    }
}
