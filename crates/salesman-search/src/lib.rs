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

//! # Salesman Search
//!
//! Shared search vocabulary for the salesman solvers.
//!
//! Everything an engine needs to talk to its caller lives here, independent of
//! the search algorithm: the numeric bound on cost types, the solver result
//! and termination reasons, the external result record, input validation
//! errors, the command a monitor uses to stop a search, and the
//! `InitialTourHeuristic` capability together with the baseline heuristics
//! that seed an exact search.
//!
//! ## Modules
//!
//! - `num`: the `SolverNumeric` bound.
//! - `err`: `SolveError` and the shared input validation.
//! - `result`: `SolverResult`, `TerminationReason` and `SolveReport`.
//! - `monitor`: `SearchCommand`.
//! - `heuristic`: tour construction heuristics and `run_baseline`.

pub mod err;
pub mod heuristic;
pub mod monitor;
pub mod num;
pub mod result;
