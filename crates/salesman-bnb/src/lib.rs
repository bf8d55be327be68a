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

//! Salesman-BnB: best-first branch-and-bound for the travelling salesperson problem
//!
//! An exact, anytime solver over arbitrary (asymmetric, possibly incomplete)
//! integer cost matrices. Lower bounds come from reduced cost matrices, the
//! frontier is a best-first priority queue, and the best solution so far
//! (BSSF) is seeded by an `InitialTourHeuristic` and tightened whenever the
//! search completes a cheaper tour.
//!
//! Core flow
//! - Provide any `salesman_model::oracle::CostOracle<T>`.
//! - Pick a seed heuristic from `salesman_search::heuristic`.
//! - Optionally attach monitors for logging or early stopping.
//! - Run `bnb::BnbSolver::solve` under a wall-clock budget.
//!
//! Assumptions and guarantees
//! - Bounds never overestimate: every completion of a node costs at least
//!   its bound, and a child's bound is never below its parent's.
//! - With an exhausted frontier the returned tour is optimal.
//! - The BSSF never regresses within one solve.
//!
//! Module map
//! - `bnb`: the solver engine and its search session.
//! - `matrix`: reduced cost matrices and the bound arithmetic.
//! - `node`: immutable search nodes.
//! - `frontier`: the best-first queue.
//! - `monitor`: tree search monitors (log, composite, solution limit).
//! - `result`: solver outcomes with termination reasons.
//! - `stats`: counters and timing.

pub mod bnb;
pub mod frontier;
mod incumbent;
pub mod matrix;
pub mod monitor;
pub mod node;
pub mod result;
pub mod stats;
