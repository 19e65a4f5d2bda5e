use parley_parser::{
    error::{Diagnostic, ParseError},
    symbols::SymbolTable,
};

use crate::{error::ParleyError, layout::LayoutContext};

/// Outcome of compiling one source text.
///
/// `context` is present exactly when `valid` is true.
#[derive(Debug, Clone)]
pub struct Compilation {
    /// No syntax error and no error-severity diagnostic was found.
    pub valid: bool,
    /// Declarations, empty when parsing failed.
    pub symbols: SymbolTable,
    /// Syntax errors, or the semantic findings when parsing succeeded.
    pub diagnostics: Vec<Diagnostic>,
    pub context: Option<LayoutContext>,
}

impl Compilation {
    /// The layout context, or every diagnostic as a [`ParleyError::Parse`].
    pub fn into_result(self, source: &str) -> Result<LayoutContext, ParleyError> {
        match self.context {
            Some(context) if self.valid => Ok(context),
            _ => Err(ParleyError::new_parse_error(
                ParseError::new(self.diagnostics),
                source,
            )),
        }
    }
}
