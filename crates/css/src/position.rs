//! Source positions attached to document nodes

use std::fmt;

use crate::error::SourceLocation;

/// Line and column of a node in the source it was parsed from.
///
/// Lines start at 1, columns at 0. Nodes built in code have no position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl From<SourceLocation> for Position {
    fn from(location: SourceLocation) -> Self {
        Self::new(location.line, location.column)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A node that may remember where it came from
pub trait Positioned {
    fn position(&self) -> Option<Position>;

    fn set_position(&mut self, position: Option<Position>);

    fn line(&self) -> Option<usize> {
        self.position().map(|p| p.line)
    }
}
