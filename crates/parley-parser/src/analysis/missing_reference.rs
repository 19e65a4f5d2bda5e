use log::debug;

use crate::{
    ast::{Document, Message, Node, Visitor},
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
    symbols::SymbolTable,
};

/// Reports message endpoints that name nothing in the symbol table.
struct MissingReferenceAnalyser<'a> {
    symbols: &'a SymbolTable,
    diagnostics: DiagnosticCollector,
}

impl Visitor for MissingReferenceAnalyser<'_> {
    fn visit_message(&mut self, node: &Node, message: &Message) {
        for endpoint in message.endpoints() {
            if self.symbols.contains(endpoint.name()) {
                continue;
            }
            self.diagnostics.emit(
                Diagnostic::error(
                    ErrorCode::MissingParticipant,
                    endpoint.position(),
                    format!("Participant {} is not declared", endpoint.name()),
                )
                .with_offending_symbol(endpoint.name())
                .with_label(endpoint.span(), "undeclared participant")
                .with_help(format!(
                    "declare it with `Actor {0}` or `Object {0}`",
                    endpoint.name()
                )),
            );
        }
        self.visit_children(node);
    }
}

/// Find every message endpoint that refers to an undeclared name.
pub fn find_missing_participants(document: &Document, symbols: &SymbolTable) -> Vec<Diagnostic> {
    let mut analyser = MissingReferenceAnalyser {
        symbols,
        diagnostics: DiagnosticCollector::new(),
    };
    analyser.visit_document(document);

    let diagnostics = analyser.diagnostics.finish();
    debug!(count = diagnostics.len(); "Missing participant analysis finished");
    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse, span::Position, symbols::collect_declarations};

    fn analyse(source: &str) -> Vec<Diagnostic> {
        let parsed = parse(source);
        assert!(parsed.diagnostics.is_empty(), "{:?}", parsed.diagnostics);
        let symbols = collect_declarations(&parsed.document);
        find_missing_participants(&parsed.document, &symbols)
    }

    #[test]
    fn test_undeclared_destination() {
        let diagnostics = analyse("Actor A\nSequence S\n  A tell Ghost\n");

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code(), ErrorCode::MissingParticipant);
        assert_eq!(diagnostics[0].message(), "Participant Ghost is not declared");
        assert_eq!(diagnostics[0].offending_symbol(), Some("Ghost"));
        assert_eq!(diagnostics[0].position(), Position::new(3, 9));
    }

    #[test]
    fn test_one_diagnostic_per_endpoint() {
        let diagnostics = analyse("Sequence S\n  X ask Y\n  Y replies X\n");

        let names: Vec<_> = diagnostics
            .iter()
            .filter_map(Diagnostic::offending_symbol)
            .collect();
        assert_eq!(names, vec!["X", "Y", "Y", "X"]);
    }

    #[test]
    fn test_sequence_names_count_as_declared() {
        assert!(analyse("Actor A\nSequence S\n  A tell S\n").is_empty());
    }

    #[test]
    fn test_declared_participants() {
        assert!(analyse("Actor A\nObject B\nSequence S\n  A ask B\n  B replies A\n").is_empty());
    }
}
