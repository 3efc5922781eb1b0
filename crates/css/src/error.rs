//! CSS parsing and rendering error types

use std::fmt;
use thiserror::Error;

/// CSS result type
pub type CssResult<T> = Result<T, CssError>;

/// Source location in CSS
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (0-indexed)
    pub column: usize,
    /// Character offset from start
    pub offset: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self { line, column, offset }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// CSS parsing and rendering errors
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CssError {
    #[error("Unexpected token at {location}: expected {expected}, found `{found}`")]
    UnexpectedToken {
        expected: String,
        found: String,
        location: SourceLocation,
    },

    #[error("Unexpected end of input at {location}: expected {expected}")]
    UnexpectedEof {
        expected: String,
        location: SourceLocation,
    },

    #[error("{message} at {location}")]
    SourceStructure {
        message: String,
        location: SourceLocation,
    },

    #[error("Cannot render: {message}")]
    Render {
        message: String,
        line: Option<usize>,
    },
}

impl CssError {
    /// Get the source location of this error, if it came from the parser
    pub fn location(&self) -> Option<SourceLocation> {
        match self {
            Self::UnexpectedToken { location, .. } => Some(*location),
            Self::UnexpectedEof { location, .. } => Some(*location),
            Self::SourceStructure { location, .. } => Some(*location),
            Self::Render { .. } => None,
        }
    }

    /// Whether lenient parsing may skip past this error and resume.
    ///
    /// End of input is never recoverable: there is nothing left to skip to.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::UnexpectedToken { .. } | Self::SourceStructure { .. })
    }

    pub fn is_eof(&self) -> bool {
        matches!(self, Self::UnexpectedEof { .. })
    }

    pub fn unexpected_token(
        expected: impl Into<String>,
        found: impl Into<String>,
        location: SourceLocation,
    ) -> Self {
        Self::UnexpectedToken {
            expected: expected.into(),
            found: found.into(),
            location,
        }
    }

    pub fn unexpected_eof(expected: impl Into<String>, location: SourceLocation) -> Self {
        Self::UnexpectedEof { expected: expected.into(), location }
    }

    pub fn source_structure(message: impl Into<String>, location: SourceLocation) -> Self {
        Self::SourceStructure { message: message.into(), location }
    }

    pub fn render(message: impl Into<String>, line: Option<usize>) -> Self {
        Self::Render { message: message.into(), line }
    }
}
