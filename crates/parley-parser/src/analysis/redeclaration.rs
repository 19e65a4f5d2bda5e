use log::debug;

use crate::{
    ast::{Declaration, Document, Node, Visitor},
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
    symbols::{SymbolKind, SymbolTable},
};

/// Reports declarations whose name was already taken by an earlier one.
struct RedeclarationAnalyser<'a> {
    symbols: &'a SymbolTable,
    diagnostics: DiagnosticCollector,
}

impl RedeclarationAnalyser<'_> {
    fn check(&mut self, node: &Node, declaration: &Declaration) {
        let Some(identifier) = declaration.identifier() else {
            return;
        };
        let Some(original) = self.symbols.resolve(identifier.name()) else {
            return;
        };
        if original.node() == node.id() {
            return;
        }

        let kind = SymbolKind::of(node).map(|kind| kind.as_str()).unwrap_or("declaration");
        let first = original.position();
        self.diagnostics.emit(
            Diagnostic::error(
                ErrorCode::RedeclaredIdentifier,
                identifier.position(),
                format!(
                    "A existing {} is declared using this name at line: {} column: {}",
                    original.kind(),
                    first.line(),
                    first.column()
                ),
            )
            .with_offending_symbol(identifier.name())
            .with_label(identifier.span(), "name already in use")
            .with_secondary_label(original.span(), "first declared here")
            .with_help(format!(
                "Actors, Objects and Sequences share one namespace; rename this {kind}"
            )),
        );
    }
}

impl Visitor for RedeclarationAnalyser<'_> {
    fn visit_actor(&mut self, node: &Node, declaration: &Declaration) {
        self.check(node, declaration);
        self.visit_children(node);
    }

    fn visit_object(&mut self, node: &Node, declaration: &Declaration) {
        self.check(node, declaration);
        self.visit_children(node);
    }

    fn visit_sequence(&mut self, node: &Node, declaration: &Declaration) {
        self.check(node, declaration);
        self.visit_children(node);
    }
}

/// Find every declaration that reuses a name defined earlier in `symbols`.
pub fn find_redeclarations(document: &Document, symbols: &SymbolTable) -> Vec<Diagnostic> {
    let mut analyser = RedeclarationAnalyser {
        symbols,
        diagnostics: DiagnosticCollector::new(),
    };
    analyser.visit_document(document);

    let diagnostics = analyser.diagnostics.finish();
    debug!(count = diagnostics.len(); "Redeclaration analysis finished");
    diagnostics
}
