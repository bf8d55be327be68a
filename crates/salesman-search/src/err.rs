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

//! Input validation shared by every solve entry point.
//!
//! Invalid input is reported before any search starts, so statistics are
//! never produced for an instance that cannot be solved meaningfully.

use salesman_model::{
    matrix::CostMatrix,
    oracle::{CostOracle, CostOracleError},
};

use crate::num::SolverNumeric;

/// The error type for rejected solve requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolveError {
    /// A tour needs at least two points.
    TooFewPoints { num_points: usize },
    /// The cost oracle failed for a valid pair of points.
    Oracle(CostOracleError),
}

impl std::fmt::Display for SolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolveError::TooFewPoints { num_points } => write!(
                f,
                "At least 2 points are required to build a tour, got {}",
                num_points
            ),
            SolveError::Oracle(e) => write!(f, "Cost oracle error: {}", e),
        }
    }
}

impl std::error::Error for SolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SolveError::Oracle(e) => Some(e),
            SolveError::TooFewPoints { .. } => None,
        }
    }
}

impl From<CostOracleError> for SolveError {
    fn from(e: CostOracleError) -> Self {
        SolveError::Oracle(e)
    }
}

/// Validates the instance and takes a dense snapshot of its costs.
///
/// Every ordered pair is queried exactly once; the first failing query
/// rejects the instance.
///
/// # Examples
///
/// ```rust
/// # use salesman_search::err::{snapshot, SolveError};
/// # use salesman_model::matrix::CostMatrixBuilder;
///
/// let single = CostMatrixBuilder::<i64>::new(1).build();
/// assert_eq!(
///     snapshot(&single).unwrap_err(),
///     SolveError::TooFewPoints { num_points: 1 }
/// );
/// ```
pub fn snapshot<T, O>(oracle: &O) -> Result<CostMatrix<T>, SolveError>
where
    T: SolverNumeric,
    O: CostOracle<T> + ?Sized,
{
    let num_points = oracle.num_points();
    if num_points < 2 {
        return Err(SolveError::TooFewPoints { num_points });
    }
    Ok(CostMatrix::from_oracle(oracle)?)
}
