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

use crate::stats::BnbSolverStatistics;
use salesman_model::solution::Solution;
use num_traits::{PrimInt, Signed};
use salesman_search::result::{SolveReport, SolverResult, TerminationReason};

/// Result of the solver after termination.
#[derive(Debug, Clone)]
pub struct BnbSolverOutcome<T> {
    result: SolverResult<T>,
    termination_reason: TerminationReason,
    statistics: BnbSolverStatistics<T>,
}

impl<T> BnbSolverOutcome<T> {
    #[inline]
    pub fn optimal(solution: Solution<T>, statistics: BnbSolverStatistics<T>) -> Self {
        Self {
            result: SolverResult::Optimal(solution),
            termination_reason: TerminationReason::OptimalityProven,
            statistics,
        }
    }

    #[inline]
    pub fn infeasible(statistics: BnbSolverStatistics<T>) -> Self {
        Self {
            result: SolverResult::Infeasible,
            termination_reason: TerminationReason::InfeasibilityProven,
            statistics,
        }
    }

    /// An early stop. Without a solution nothing is known about feasibility.
    #[inline]
    pub fn aborted<R>(
        solution: Option<Solution<T>>,
        reason: R,
        statistics: BnbSolverStatistics<T>,
    ) -> Self
    where
        R: Into<String>,
    {
        let result = match solution {
            Some(sol) => SolverResult::Feasible(sol),
            None => SolverResult::Unknown,
        };

        Self {
            result,
            termination_reason: TerminationReason::Aborted(reason.into()),
            statistics,
        }
    }

    /// Returns the solver result.
    #[inline]
    pub fn result(&self) -> &SolverResult<T> {
        &self.result
    }

    /// Returns the termination reason.
    #[inline]
    pub fn termination_reason(&self) -> &TerminationReason {
        &self.termination_reason
    }

    /// Returns the solver statistics.
    #[inline]
    pub fn statistics(&self) -> &BnbSolverStatistics<T> {
        &self.statistics
    }

    /// The best tour's cost, or `None` if no tour was found.
    #[inline]
    pub fn cost(&self) -> Option<T>
    where
        T: PrimInt + Signed,
    {
        self.result.solution().map(|s| s.objective_value())
    }
}

impl<T> From<BnbSolverOutcome<T>> for SolveReport<T>
where
    T: PrimInt + Signed,
{
    fn from(val: BnbSolverOutcome<T>) -> Self {
        let stats = val.statistics;
        SolveReport::tree_search(
            val.result,
            val.termination_reason,
            stats.time_total,
            stats.solutions_found,
            stats.max_queue_size,
            stats.total_states_created,
            stats.pruned_count,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salesman_model::{index::PointIndex, tour::Tour};
    use std::time::Duration;

    type I = i64;

    fn stats() -> BnbSolverStatistics<I> {
        BnbSolverStatistics {
            solutions_found: 2,
            max_queue_size: 4,
            total_states_created: 9,
            pruned_count: 3,
            time_total: Duration::from_millis(5),
            ..BnbSolverStatistics::default()
        }
    }

    fn solution(cost: I) -> Solution<I> {
        let tour = Tour::new([0, 2, 1].map(PointIndex::new).to_vec(), 3).unwrap();
        Solution::new(cost, tour)
    }

    #[test]
    fn test_aborted_without_solution_is_unknown() {
        let outcome = BnbSolverOutcome::<I>::aborted(None, "time limit", stats());
        assert!(matches!(outcome.result(), SolverResult::Unknown));
        assert_eq!(
            outcome.termination_reason(),
            &TerminationReason::Aborted("time limit".to_string())
        );
        assert_eq!(outcome.cost(), None);
    }

    #[test]
    fn test_aborted_with_solution_is_feasible() {
        let outcome = BnbSolverOutcome::aborted(Some(solution(9)), "time limit", stats());
        assert!(matches!(outcome.result(), SolverResult::Feasible(_)));
        assert_eq!(outcome.cost(), Some(9));
    }

    #[test]
    fn test_into_report_carries_counters() {
        let report: SolveReport<I> = BnbSolverOutcome::optimal(solution(12), stats()).into();
        assert!(report.is_optimal());
        assert_eq!(report.cost(), Some(12));
        assert_eq!(report.solutions_found(), 2);
        assert_eq!(report.max_queue_size(), Some(4));
        assert_eq!(report.total_states_created(), Some(9));
        assert_eq!(report.pruned_count(), Some(3));
        assert_eq!(report.time_elapsed(), Duration::from_millis(5));
    }

    #[test]
    fn test_infeasible_report_has_infinite_cost() {
        let report: SolveReport<I> = BnbSolverOutcome::infeasible(stats()).into();
        assert_eq!(report.cost(), None);
        assert_eq!(
            report.termination_reason(),
            &TerminationReason::InfeasibilityProven
        );
    }
}
