//! Parley - a small language for actors, objects and the sequences of
//! messages between them.
//!
//! This crate runs the complete compilation pipeline: parsing and analysis
//! from [`parley_parser`], then the layout transformation into a
//! [`LayoutContext`](layout::LayoutContext) and its JSON export for an
//! external renderer.

pub mod config;
pub mod geometry;
pub mod layout;

mod compilation;
mod error;
mod export;

pub use compilation::Compilation;
pub use error::ParleyError;
pub use export::JsonExporter;

use std::io;

use log::{debug, info, trace};

use parley_parser::{Parsed, symbols::SymbolTable};

use config::AppConfig;
use layout::LayoutContext;

/// Compiler for Parley documents.
///
/// # Examples
///
/// ```rust
/// use parley::{Compiler, config::AppConfig};
///
/// let source = "Actor User\nObject Api\nSequence Call\n    User ask Api 'GET /'\n";
///
/// let compiler = Compiler::new(AppConfig::default());
///
/// let compilation = compiler.compile(source);
/// assert!(compilation.valid);
///
/// let context = compiler.layout(source).expect("valid document");
/// let json = compiler.render_json(&context).expect("serializable context");
/// assert!(json.contains("\"directionRight\": true"));
/// ```
#[derive(Debug, Default)]
pub struct Compiler {
    config: AppConfig,
}

impl Compiler {
    /// Create a new compiler with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Compile `source` into a [`Compilation`].
    ///
    /// Semantic analysis runs only when parsing reported no syntax error, and
    /// the layout is computed only when analysis found no error either. Each
    /// call starts from scratch.
    pub fn compile(&self, source: &str) -> Compilation {
        info!("Compiling document");
        self.compile_parsed(parley_parser::parse(source))
    }

    fn compile_parsed(&self, parsed: Parsed) -> Compilation {
        if parsed.has_errors() {
            info!(errors = parsed.diagnostics.len(); "Syntax errors found, skipping analysis");
            return Compilation {
                valid: false,
                symbols: SymbolTable::new(),
                diagnostics: parsed.diagnostics,
                context: None,
            };
        }

        let analysis = parley_parser::analyze(&parsed.document);
        let valid = !analysis.has_errors();
        let context = if valid {
            let context = layout::transform(&parsed.document, self.config.layout());
            trace!(context:?; "Layout context");
            debug!("Document compiled successfully");
            Some(context)
        } else {
            info!(errors = analysis.diagnostics.len(); "Semantic errors found, skipping layout");
            None
        };

        // Parse warnings come before analysis findings.
        let diagnostics = parsed
            .diagnostics
            .into_iter()
            .chain(analysis.diagnostics)
            .collect();

        Compilation {
            valid,
            symbols: analysis.symbols,
            diagnostics,
            context,
        }
    }

    /// Compile `source` and return its layout context.
    ///
    /// # Errors
    ///
    /// Returns [`ParleyError::Parse`] with every diagnostic when the document
    /// is not valid.
    pub fn layout(&self, source: &str) -> Result<LayoutContext, ParleyError> {
        self.compile(source).into_result(source)
    }

    /// Serialize a layout context to JSON, pretty printed per configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ParleyError::Export`] if serialization fails.
    pub fn render_json(&self, context: &LayoutContext) -> Result<String, ParleyError> {
        let json = JsonExporter::new(self.config.export()).export(context)?;
        info!(bytes = json.len(); "Layout context exported");
        Ok(json)
    }

    /// Serialize a layout context as JSON into `writer`.
    ///
    /// # Errors
    ///
    /// Returns [`ParleyError::Export`] if serialization or writing fails.
    pub fn write_json<W: io::Write>(
        &self,
        context: &LayoutContext,
        writer: W,
    ) -> Result<(), ParleyError> {
        JsonExporter::new(self.config.export()).export_to_writer(context, writer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use parley_parser::{
        Position,
        error::{Diagnostic, ErrorCode},
    };

    use super::*;

    #[test]
    fn test_valid_compilation() {
        let compilation = Compiler::default().compile("Actor A\nObject B\nSequence S\n  A tell B\n");

        assert!(compilation.valid);
        assert!(compilation.diagnostics.is_empty());
        assert_eq!(compilation.symbols.len(), 3);
        assert!(compilation.context.is_some());
    }

    #[test]
    fn test_valid_compilation_keeps_parse_warnings() {
        let mut parsed = parley_parser::parse("Actor A\nActor B\nSequence S\n  A tell B\n");
        parsed.diagnostics.push(Diagnostic::warning(
            ErrorCode::SyntaxError,
            Position::new(1, 0),
            "style nit",
        ));

        let compilation = Compiler::default().compile_parsed(parsed);

        assert!(compilation.valid);
        assert!(compilation.context.is_some());
        assert_eq!(compilation.diagnostics.len(), 1);
        assert_eq!(compilation.diagnostics[0].message(), "style nit");
    }

    #[test]
    fn test_semantic_error_blocks_layout() {
        let compilation = Compiler::default().compile("Actor A\nActor A\n");

        assert!(!compilation.valid);
        assert!(compilation.context.is_none());
        assert_eq!(compilation.diagnostics.len(), 1);
        assert_eq!(
            compilation.diagnostics[0].code(),
            ErrorCode::RedeclaredIdentifier
        );
        assert_eq!(compilation.symbols.len(), 1);
    }

    #[test]
    fn test_syntax_error_skips_analysis() {
        // The undeclared endpoint is not reported once a syntax error exists.
        let compilation = Compiler::default().compile("Actor\nSequence S\n  A tell B\n");

        assert!(!compilation.valid);
        assert!(compilation.symbols.is_empty());
        assert!(
            compilation
                .diagnostics
                .iter()
                .all(|d| d.code() == ErrorCode::SyntaxError)
        );
    }

    #[test]
    fn test_layout_error_carries_source() {
        let source = "Sequence S\n  Ghost tell Nobody\n";
        let err = Compiler::default().layout(source).unwrap_err();

        match err {
            ParleyError::Parse { err, src } => {
                assert_eq!(src, source);
                assert_eq!(err.diagnostics().len(), 2);
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
