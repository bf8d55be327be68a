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

//! # Salesman Model
//!
//! **The problem model for the salesman travelling salesperson solver.**
//!
//! This crate defines the data that every solver in the workspace consumes:
//! points, pairwise edge costs and the tours built from them. It is the
//! interchange layer between an instance (generated, loaded or supplied by
//! the caller) and the search engines in `salesman_search` and `salesman_bnb`.
//!
//! ## Architecture
//!
//! * **`index`**: the strongly typed `PointIndex`.
//! * **`cost`**: `EdgeCost<T>`, a sentinel-encoded optional edge cost.
//! * **`oracle`**: the `CostOracle` trait, the opaque source of pairwise costs.
//! * **`matrix`**: `CostMatrix` (immutable, dense) and `CostMatrixBuilder`.
//! * **`tour`**: validated Hamiltonian tours and their derived cost.
//! * **`solution`**: a tour paired with its objective value.
//! * **`scenario`**: seeded random instances with symmetric, asymmetric and sparse costs.
//! * **`loading`**: a text format loader for cost matrices.
//!
//! ## Design Philosophy
//!
//! 1.  **Missing edges are explicit**: a pair without an edge is never a
//!     large number in disguise, it is `EdgeCost::none()`.
//! 2.  **Fail-fast**: oracles are fallible and every fallible query is
//!     surfaced before a solver starts searching.
//! 3.  **Dense layout**: the matrix is a flat row-major vector, which is what
//!     the reduction loops of the branch-and-bound want.

pub mod cost;
pub mod index;
pub mod loading;
pub mod matrix;
pub mod oracle;
pub mod scenario;
pub mod solution;
pub mod tour;
