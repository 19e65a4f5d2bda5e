//! Error codes for the Parley diagnostic system.
//!
//! Codes are externally observable and render as kebab-case words:
//! - `syntax-error` - lexer, parser and tree-building errors
//! - `redeclared-identifier` - a name declared more than once
//! - `missing-participant` - a message endpoint that names nothing

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Malformed source.
    ///
    /// Reported by the lexer for unexpected characters and unterminated
    /// strings, by the parser for lines that do not match the grammar, and by
    /// the tree builder for definitions without an identifier.
    SyntaxError,

    /// Redeclared identifier.
    ///
    /// Actors, objects and sequences share one namespace; every declaration
    /// after the first one of a name is reported.
    RedeclaredIdentifier,

    /// Missing participant.
    ///
    /// A message names a source or destination that is not declared.
    MissingParticipant,
}

impl ErrorCode {
    /// Returns the code as it appears in reports (e.g., "syntax-error").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::SyntaxError => "syntax-error",
            ErrorCode::RedeclaredIdentifier => "redeclared-identifier",
            ErrorCode::MissingParticipant => "missing-participant",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::SyntaxError => "syntax error",
            ErrorCode::RedeclaredIdentifier => "redeclared identifier",
            ErrorCode::MissingParticipant => "missing participant",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
