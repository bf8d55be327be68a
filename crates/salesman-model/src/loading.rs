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

//! Text loader for cost matrices.
//!
//! The format is a whitespace-delimited token stream: the number of points
//! `n`, followed by the `n * n` entries of the matrix in row-major order.
//! An entry is either a non-negative integer or one of the markers `inf`,
//! `-` (or any negative number), all of which mean "no edge". A `#` starts a
//! comment that runs to the end of the line. Diagonal entries are read but
//! ignored. Tokens after the matrix are an error.
//!
//! Formats that encode infinity as a large integer are supported through
//! `forbid_at_least`, and `fail_on_isolated` rejects instances in which some
//! point cannot be left or cannot be reached.

use crate::{
    cost::EdgeCost,
    index::PointIndex,
    matrix::{CostMatrix, CostMatrixBuilder},
};
use num_traits::{PrimInt, Signed};
use std::{
    collections::VecDeque,
    fmt::{Debug, Display},
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
    str::FromStr,
};

/// The error type for the matrix loading process.
#[derive(Debug)]
pub enum MatrixLoaderError {
    /// An I/O error occurred while reading the input stream.
    Io(std::io::Error),
    /// The input stream ended before the matrix was complete.
    UnexpectedEof,
    /// A token could not be parsed into the expected numeric type.
    Parse(ParseTokenError),
    /// The point count is not a positive integer.
    InvalidDimensions,
    /// Tokens remain after the last matrix entry.
    TrailingInput(String),
    /// A point has no outgoing or no incoming edge.
    Isolated(IsolatedPointError),
}

/// Details about a failed token parsing attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTokenError {
    /// The string token that failed to parse.
    pub token: String,
    /// The name of the type we tried to parse into (e.g., "i64").
    pub type_name: &'static str,
}

impl std::fmt::Display for ParseTokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Could not parse token '{}' as type {}",
            self.token, self.type_name
        )
    }
}

impl std::error::Error for ParseTokenError {}

/// Which side of a point lacks edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IsolationKind {
    NoOutgoingEdge,
    NoIncomingEdge,
}

/// Details about a point that no tour can pass through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IsolatedPointError {
    pub point: PointIndex,
    pub kind: IsolationKind,
}

impl std::fmt::Display for IsolatedPointError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            IsolationKind::NoOutgoingEdge => {
                write!(f, "Point {} has no outgoing edge", self.point.get())
            }
            IsolationKind::NoIncomingEdge => {
                write!(f, "Point {} has no incoming edge", self.point.get())
            }
        }
    }
}

impl std::error::Error for IsolatedPointError {}

impl Display for MatrixLoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::UnexpectedEof => write!(f, "Unexpected end of file while parsing matrix"),
            Self::Parse(e) => write!(f, "Parse error: {}", e),
            Self::InvalidDimensions => write!(f, "Point count must be a positive integer"),
            Self::TrailingInput(token) => {
                write!(f, "Unexpected token '{}' after the last matrix entry", token)
            }
            Self::Isolated(e) => write!(f, "Feasibility error: {}", e),
        }
    }
}

impl std::error::Error for MatrixLoaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Isolated(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for MatrixLoaderError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ParseTokenError> for MatrixLoaderError {
    fn from(e: ParseTokenError) -> Self {
        Self::Parse(e)
    }
}

impl From<IsolatedPointError> for MatrixLoaderError {
    fn from(e: IsolatedPointError) -> Self {
        Self::Isolated(e)
    }
}

/// A configurable loader for cost matrices.
///
/// ```raw
/// 3            # number of points
/// 0   5   inf  # row 0
/// 2   0   7
/// -   4   0
/// ```
///
/// # Configuration
/// * `forbid_at_least`: any cost `>=` this value becomes a missing edge.
/// * `fail_on_isolated`: if true (the default), a point without an outgoing
///   or without an incoming edge is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixLoader<T> {
    forbid_at_least: Option<T>,
    fail_on_isolated: bool,
}

impl<T> Default for MatrixLoader<T> {
    fn default() -> Self {
        Self {
            forbid_at_least: None,
            fail_on_isolated: true,
        }
    }
}

impl<T> MatrixLoader<T>
where
    T: PrimInt + Signed + FromStr + Display + Debug,
{
    /// Creates a new `MatrixLoader` with default settings.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Treats every cost `>= v` as a missing edge.
    #[inline]
    pub fn forbid_at_least(mut self, v: T) -> Self {
        self.forbid_at_least = Some(v);
        self
    }

    /// Configures whether points without outgoing or incoming edges are rejected.
    #[inline]
    pub fn fail_on_isolated(mut self, yes: bool) -> Self {
        self.fail_on_isolated = yes;
        self
    }

    fn parse_entry(&self, token: &str) -> Result<EdgeCost<T>, ParseTokenError> {
        if token == "-" || token.eq_ignore_ascii_case("inf") {
            return Ok(EdgeCost::none());
        }
        let value: T = token.parse().map_err(|_| ParseTokenError {
            token: token.to_string(),
            type_name: std::any::type_name::<T>(),
        })?;
        if self.forbid_at_least.is_some_and(|limit| value >= limit) {
            return Ok(EdgeCost::none());
        }
        Ok(EdgeCost::from_raw(value))
    }

    /// Loads a matrix from a type implementing `BufRead`.
    pub fn from_bufread<R: BufRead>(&self, rdr: R) -> Result<CostMatrix<T>, MatrixLoaderError> {
        let mut tokens = Tokens::new(rdr);

        let n_token = tokens.next_token()?.ok_or(MatrixLoaderError::UnexpectedEof)?;
        let n = n_token
            .parse::<usize>()
            .map_err(|_| MatrixLoaderError::InvalidDimensions)?;
        if n == 0 {
            return Err(MatrixLoaderError::InvalidDimensions);
        }

        let mut builder = CostMatrixBuilder::new(n);
        for from in 0..n {
            for to in 0..n {
                let token = tokens.next_token()?.ok_or(MatrixLoaderError::UnexpectedEof)?;
                let cost = self.parse_entry(&token)?;
                builder.set_edge(PointIndex::new(from), PointIndex::new(to), cost);
            }
        }

        if let Some(extra) = tokens.next_token()? {
            return Err(MatrixLoaderError::TrailingInput(extra));
        }

        let matrix = builder.build();
        if self.fail_on_isolated {
            check_isolated(&matrix)?;
        }
        Ok(matrix)
    }

    /// Loads a matrix from a file path.
    #[inline]
    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<CostMatrix<T>, MatrixLoaderError> {
        let file = File::open(path)?;
        self.from_bufread(BufReader::new(file))
    }

    /// Loads a matrix from a generic reader.
    #[inline]
    pub fn from_reader<R: Read>(&self, r: R) -> Result<CostMatrix<T>, MatrixLoaderError> {
        self.from_bufread(BufReader::new(r))
    }

    /// Loads a matrix from a string slice.
    #[inline]
    pub fn from_str(&self, s: &str) -> Result<CostMatrix<T>, MatrixLoaderError> {
        self.from_reader(s.as_bytes())
    }
}

fn check_isolated<T>(matrix: &CostMatrix<T>) -> Result<(), IsolatedPointError>
where
    T: PrimInt + Signed,
{
    let n = matrix.num_points();
    if n < 2 {
        return Ok(());
    }
    for i in (0..n).map(PointIndex::new) {
        if !matrix.row(i).iter().any(|c| c.is_some()) {
            return Err(IsolatedPointError {
                point: i,
                kind: IsolationKind::NoOutgoingEdge,
            });
        }
        if !(0..n).any(|j| matrix.edge(PointIndex::new(j), i).is_some()) {
            return Err(IsolatedPointError {
                point: i,
                kind: IsolationKind::NoIncomingEdge,
            });
        }
    }
    Ok(())
}

/// Yields whitespace-delimited tokens line by line, dropping `#` comments.
struct Tokens<R> {
    rdr: R,
    line: String,
    pending: VecDeque<String>,
}

impl<R: BufRead> Tokens<R> {
    #[inline]
    fn new(rdr: R) -> Self {
        Self {
            rdr,
            line: String::new(),
            pending: VecDeque::new(),
        }
    }

    /// Returns the next token, or `None` at the end of the stream.
    fn next_token(&mut self) -> Result<Option<String>, MatrixLoaderError> {
        while self.pending.is_empty() {
            self.line.clear();
            if self.rdr.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            let content = match self.line.find('#') {
                Some(pos) => &self.line[..pos],
                None => &self.line[..],
            };
            self.pending
                .extend(content.split_whitespace().map(str::to_string));
        }
        Ok(self.pending.pop_front())
    }
}
