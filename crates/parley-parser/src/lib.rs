//! # Parley Parser
//!
//! Front end and semantic analysis for the Parley sequence language. This
//! crate turns source text into a [`Document`](ast::Document), collects its
//! declarations into a [`SymbolTable`](symbols::SymbolTable) and checks it
//! for redeclared names and undeclared participants.
//!
//! ## Usage
//!
//! ```
//! use parley_parser::{analyze, parse};
//!
//! let source = r#"
//! Name "Login"
//! Actor User
//! Object Server
//! Sequence SignIn
//!     User ask Server 'credentials'
//!     Server replies User
//! "#;
//!
//! let parsed = parse(source);
//! assert!(parsed.diagnostics.is_empty());
//!
//! let analysis = analyze(&parsed.document);
//! assert!(analysis.diagnostics.is_empty());
//! assert_eq!(analysis.symbols.len(), 3);
//! ```

pub mod analysis;
pub mod ast;
pub mod builder;
pub mod error;
pub mod lexer;
pub mod parse_tree;
pub mod parser;
pub mod span;
pub mod symbols;
pub mod tokens;

pub use span::{Position, Span};

use log::{debug, info, trace};

use ast::Document;
use error::Diagnostic;
use symbols::SymbolTable;

/// Result of parsing a source text.
#[derive(Debug, Clone)]
pub struct Parsed {
    /// The built document. Lines with syntax errors are left out of it.
    pub document: Document,
    /// Every `syntax-error` raised while lexing, parsing and building.
    pub diagnostics: Vec<Diagnostic>,
}

impl Parsed {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity().is_error())
    }
}

/// Result of the semantic analysis of a document.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub symbols: SymbolTable,
    /// Redeclaration findings followed by missing participant findings.
    pub diagnostics: Vec<Diagnostic>,
}

impl Analysis {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity().is_error())
    }
}

/// Parse source text into a document.
///
/// The pipeline is:
///
/// 1. **Tokenize** - split the source into positioned tokens
/// 2. **Parse** - match tokens line by line into a parse tree
/// 3. **Build** - replay the parse tree into document nodes
///
/// Errors do not stop the pipeline; they are all returned alongside the
/// document built from the lines that were well formed.
pub fn parse(source: &str) -> Parsed {
    info!(bytes = source.len(); "Parsing source");

    let (tokens, mut diagnostics) = lexer::tokenize(source);
    debug!(tokens = tokens.len(), errors = diagnostics.len(); "Tokenized source");

    let (tree, syntax_errors) = parser::build_parse_tree(source, &tokens);
    diagnostics.extend(syntax_errors);
    trace!(tree:? = tree; "Parse tree");

    let (document, builder_errors) = builder::build_document(&tree);
    diagnostics.extend(builder_errors);

    debug!(errors = diagnostics.len(); "Parsing finished");
    Parsed {
        document,
        diagnostics,
    }
}

/// Collect the declarations of `document` and run every semantic check.
pub fn analyze(document: &Document) -> Analysis {
    info!("Analyzing document");

    let symbols = symbols::collect_declarations(document);
    let mut diagnostics = analysis::find_redeclarations(document, &symbols);
    diagnostics.extend(analysis::find_missing_participants(document, &symbols));

    debug!(symbols = symbols.len(), diagnostics = diagnostics.len(); "Analysis finished");
    Analysis {
        symbols,
        diagnostics,
    }
}
