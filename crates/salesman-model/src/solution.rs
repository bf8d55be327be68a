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

use crate::{index::PointIndex, tour::Tour};
use num_traits::{PrimInt, Signed};

/// A complete tour together with its finite objective value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Solution<T> {
    /// The total cost of the tour, including the closing edge.
    objective_value: T,

    /// The visiting order.
    tour: Tour,
}

impl<T> Solution<T>
where
    T: PrimInt + Signed,
{
    /// Constructs a new `Solution`.
    #[inline]
    pub fn new(objective_value: T, tour: Tour) -> Self {
        Self {
            objective_value,
            tour,
        }
    }

    /// Returns the total objective value of this solution.
    #[inline]
    pub fn objective_value(&self) -> T {
        self.objective_value
    }

    /// Returns the tour.
    #[inline]
    pub fn tour(&self) -> &Tour {
        &self.tour
    }

    /// Returns the visiting order as a slice of point indices.
    #[inline]
    pub fn points(&self) -> &[PointIndex] {
        self.tour.points()
    }

    /// Returns the number of points visited.
    #[inline]
    pub fn num_points(&self) -> usize {
        self.tour.len()
    }

    /// Consumes the solution and returns its tour.
    #[inline]
    pub fn into_tour(self) -> Tour {
        self.tour
    }
}

impl<T> std::fmt::Display for Solution<T>
where
    T: PrimInt + Signed + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Solution Summary")?;
        writeln!(f, "   Objective Value: {}", self.objective_value)?;
        writeln!(f)?;

        if self.num_points() == 0 {
            writeln!(f, "   (Empty tour)")?;
            return Ok(());
        }

        writeln!(f, "   {:<10} | {:<10} | {:<10}", "Step", "From", "To")?;
        writeln!(f, "   {:-<10}-+-{:-<10}-+-{:-<10}", "", "", "")?;
        for (step, (from, to)) in self.tour.edges().enumerate() {
            writeln!(f, "   {:<10} | {:<10} | {:<10}", step, from.get(), to.get())?;
        }

        Ok(())
    }
}
