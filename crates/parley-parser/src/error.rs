//! Error and diagnostic system for the Parley front end and analysers.
//!
//! This module provides:
//! - Error codes shared by every phase ([`ErrorCode`])
//! - Line/column positions plus labeled spans for rich error context
//! - Severity levels
//! - A collector for accumulating multiple diagnostics
//!
//! # Example
//!
//! ```
//! # use parley_parser::error::{Diagnostic, ErrorCode};
//! # use parley_parser::{Position, Span};
//!
//! let diag = Diagnostic::error(
//!     ErrorCode::RedeclaredIdentifier,
//!     Position::new(3, 6),
//!     "A existing Actor is declared using this name at line: 2 column: 0",
//! )
//! .with_offending_symbol("Alice")
//! .with_label(Span::new(30..35), "redeclared here")
//! .with_secondary_label(Span::new(12..17), "first declared here");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
