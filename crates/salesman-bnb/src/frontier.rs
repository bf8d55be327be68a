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

//! Best-first frontier
//!
//! A priority queue of `SearchNode`s. The node with the lowest bound comes
//! out first; among equal bounds the deeper node wins, and among equal
//! depths the node queued earlier wins, which keeps runs deterministic.
//! Queued nodes are never mutated, so a tighter upper bound does not touch
//! the heap: stale nodes are filtered when they are popped.

use crate::node::SearchNode;
use salesman_search::num::SolverNumeric;
use std::{cmp::Ordering, collections::BinaryHeap};

struct FrontierEntry<T> {
    bound: T,
    depth: usize,
    sequence: u64,
    node: SearchNode<T>,
}

impl<T> PartialEq for FrontierEntry<T>
where
    T: SolverNumeric,
{
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for FrontierEntry<T> where T: SolverNumeric {}

impl<T> PartialOrd for FrontierEntry<T>
where
    T: SolverNumeric,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for FrontierEntry<T>
where
    T: SolverNumeric,
{
    // `BinaryHeap` pops the greatest entry
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .bound
            .cmp(&self.bound)
            .then_with(|| self.depth.cmp(&other.depth))
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// The open nodes of a best-first search.
pub struct Frontier<T> {
    heap: BinaryHeap<FrontierEntry<T>>,
    next_sequence: u64,
}

impl<T> Default for Frontier<T>
where
    T: SolverNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Frontier<T>
where
    T: SolverNumeric,
{
    #[inline]
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_sequence: 0,
        }
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            next_sequence: 0,
        }
    }

    /// Queues a node.
    #[inline]
    pub fn push(&mut self, node: SearchNode<T>) {
        let entry = FrontierEntry {
            bound: node.bound(),
            depth: node.depth(),
            sequence: self.next_sequence,
            node,
        };
        self.next_sequence += 1;
        self.heap.push(entry);
    }

    /// Removes and returns the best node.
    #[inline]
    pub fn pop(&mut self) -> Option<SearchNode<T>> {
        self.heap.pop().map(|entry| entry.node)
    }

    /// Returns the bound of the best node without removing it.
    #[inline]
    pub fn peek_bound(&self) -> Option<T> {
        self.heap.peek().map(|entry| entry.bound)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.heap.capacity()
    }

    /// Drops every node but keeps the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.heap.clear();
        self.next_sequence = 0;
    }
}

impl<T> std::fmt::Debug for Frontier<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frontier")
            .field("len", &self.heap.len())
            .field("best_bound", &self.peek_bound())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salesman_model::{index::PointIndex, matrix::CostMatrixBuilder};

    fn p(i: usize) -> PointIndex {
        PointIndex::new(i)
    }

    fn root() -> SearchNode<i64> {
        let m = CostMatrixBuilder::from_rows(&[
            vec![0i64, 10, 15, 20],
            vec![10, 0, 35, 25],
            vec![15, 35, 0, 30],
            vec![20, 25, 30, 0],
        ])
        .build();
        SearchNode::root(&m).unwrap()
    }

    #[test]
    fn test_pops_lowest_bound_first() {
        let root = root();
        let mut frontier = Frontier::new();
        let children: Vec<_> = root.unvisited().filter_map(|q| root.child(q)).collect();
        let mut expected: Vec<i64> = children.iter().map(|c| c.bound()).collect();
        expected.sort();
        for c in children {
            frontier.push(c);
        }
        let popped: Vec<i64> = std::iter::from_fn(|| frontier.pop()).map(|n| n.bound()).collect();
        assert_eq!(popped, expected);
    }

    fn uniform_root() -> SearchNode<i64> {
        let m = CostMatrixBuilder::from_rows(&[
            vec![0i64, 1, 1],
            vec![1, 0, 1],
            vec![1, 1, 0],
        ])
        .build();
        SearchNode::root(&m).unwrap()
    }

    #[test]
    fn test_ties_prefer_deeper_nodes() {
        let root = uniform_root();
        let child = root.child(p(1)).unwrap();
        assert_eq!(child.bound(), root.bound());

        let mut frontier = Frontier::new();
        frontier.push(root.clone());
        frontier.push(child);
        assert_eq!(frontier.pop().unwrap().depth(), 2);
        assert_eq!(frontier.pop().unwrap().depth(), 1);
    }

    #[test]
    fn test_insertion_order_breaks_full_ties() {
        let root = uniform_root();
        let a = root.child(p(1)).unwrap();
        let b = root.child(p(2)).unwrap();
        assert_eq!(a.bound(), b.bound());

        let mut frontier = Frontier::new();
        frontier.push(b);
        frontier.push(a);
        assert_eq!(frontier.pop().unwrap().last(), p(2));
        assert_eq!(frontier.pop().unwrap().last(), p(1));
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut frontier = Frontier::with_capacity(16);
        frontier.push(root());
        assert!(!frontier.is_empty());
        frontier.clear();
        assert!(frontier.is_empty());
        assert!(frontier.capacity() >= 16);
        assert_eq!(frontier.pop().map(|n| n.depth()), None);
    }
}
