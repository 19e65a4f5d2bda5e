//! The core diagnostic type for the Parley error system.
//!
//! A [`Diagnostic`] represents a single error or warning with its error
//! code, the line/column it is reported at, the offending name (when there is
//! one), labeled source spans, and help text.

use std::fmt;

use crate::{
    error::{ErrorCode, Label, Severity},
    span::{Position, Span},
};

/// A diagnostic message with source location information.
///
/// # Example
///
/// ```text
/// error[redeclared-identifier] at 3:6: A existing Actor is declared using this name at line: 1 column: 0
///   |
/// 1 | Actor Alice
///   |       ----- first declared here
/// 3 | Actor Alice
///   |       ^^^^^ redeclared here
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    severity: Severity,
    code: ErrorCode,
    position: Position,
    offending_symbol: Option<String>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic reported at `position`.
    ///
    /// # Example
    ///
    /// ```
    /// # use parley_parser::error::{Diagnostic, ErrorCode};
    /// # use parley_parser::{Position, Span};
    ///
    /// let diag = Diagnostic::error(
    ///     ErrorCode::MissingParticipant,
    ///     Position::new(7, 4),
    ///     "Participant Carol is not declared",
    /// )
    /// .with_offending_symbol("Carol")
    /// .with_label(Span::new(60..65), "not declared");
    /// ```
    pub fn error(code: ErrorCode, position: Position, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, code, position, message)
    }

    /// Create a warning diagnostic reported at `position`.
    pub fn warning(code: ErrorCode, position: Position, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, code, position, message)
    }

    /// Get the severity of this diagnostic.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Get the error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Get the reported position.
    pub fn position(&self) -> Position {
        self.position
    }

    /// 1-based line of the reported position.
    pub fn line(&self) -> usize {
        self.position.line()
    }

    /// 0-based column of the reported position.
    pub fn column(&self) -> usize {
        self.position.column()
    }

    /// Get the name this diagnostic is about, if any.
    pub fn offending_symbol(&self) -> Option<&str> {
        self.offending_symbol.as_deref()
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get all labels attached to this diagnostic.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the offending symbol.
    pub fn with_offending_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.offending_symbol = Some(symbol.into());
        self
    }

    /// Add a primary label to this diagnostic.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Add a secondary label to this diagnostic.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    fn new(
        severity: Severity,
        code: ErrorCode,
        position: Position,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            code,
            position,
            offending_symbol: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "error[syntax-error] at 1:0: message"
        write!(
            f,
            "{}[{}] at {}: {}",
            self.severity, self.code, self.position, self.message
        )
    }
}

impl std::error::Error for Diagnostic {}
