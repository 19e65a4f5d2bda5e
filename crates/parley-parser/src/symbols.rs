//! Global symbol table for declared names.
//!
//! Actors, Objects and Sequences share one flat namespace. The first
//! declaration of a name wins; later declarations of the same name are left
//! for the redeclaration analysis to report.

use std::fmt;

use indexmap::IndexMap;
use log::{debug, trace};

use crate::{
    ast::{Declaration, Document, Node, NodeId, NodeKind, Visitor},
    span::{Position, Span},
};

/// Kind of declaration a symbol came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Actor,
    Object,
    Sequence,
}

impl SymbolKind {
    /// Kind of a declaration node, `None` for other nodes.
    pub fn of(node: &Node) -> Option<Self> {
        match node.kind() {
            NodeKind::Actor(_) => Some(SymbolKind::Actor),
            NodeKind::Object(_) => Some(SymbolKind::Object),
            NodeKind::Sequence(_) => Some(SymbolKind::Sequence),
            NodeKind::Root | NodeKind::Name | NodeKind::String(_) | NodeKind::Message(_) => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolKind::Actor => "Actor",
            SymbolKind::Object => "Object",
            SymbolKind::Sequence => "Sequence",
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A declared name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    name: String,
    kind: SymbolKind,
    node: NodeId,
    position: Position,
    span: Span,
}

impl Symbol {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> SymbolKind {
        self.kind
    }

    /// Id of the declaring node.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Position of the declaring node.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Span of the declaring identifier, or of the whole node without one.
    pub fn span(&self) -> Span {
        self.span
    }
}

/// Name-keyed symbol table, iterated in definition order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    symbols: IndexMap<String, Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define `name` as declared by `node`.
    ///
    /// Returns `false` and leaves the table unchanged when the name is
    /// already defined.
    pub fn define(&mut self, name: impl Into<String>, kind: SymbolKind, node: &Node) -> bool {
        let name = name.into();
        if self.symbols.contains_key(&name) {
            return false;
        }

        let span = node
            .identifier()
            .map(|identifier| identifier.span())
            .unwrap_or_else(|| node.span());
        let symbol = Symbol {
            name: name.clone(),
            kind,
            node: node.id(),
            position: node.position(),
            span,
        };
        self.symbols.insert(name, symbol);
        true
    }

    pub fn resolve(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbols in the order they were defined.
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.values()
    }
}

impl<'a> IntoIterator for &'a SymbolTable {
    type Item = &'a Symbol;
    type IntoIter = indexmap::map::Values<'a, String, Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.symbols.values()
    }
}

/// Visitor that defines every named declaration it meets.
#[derive(Debug, Default)]
struct DeclarationCollector {
    table: SymbolTable,
}

impl DeclarationCollector {
    fn declare(&mut self, node: &Node, declaration: &Declaration, kind: SymbolKind) {
        let Some(identifier) = declaration.identifier() else {
            return;
        };
        let defined = self.table.define(identifier.name(), kind, node);
        trace!(name = identifier.name(), kind = kind.as_str(), defined = defined; "Collected declaration");
    }
}

impl Visitor for DeclarationCollector {
    fn visit_actor(&mut self, node: &Node, declaration: &Declaration) {
        self.declare(node, declaration, SymbolKind::Actor);
        self.visit_children(node);
    }

    fn visit_object(&mut self, node: &Node, declaration: &Declaration) {
        self.declare(node, declaration, SymbolKind::Object);
        self.visit_children(node);
    }

    fn visit_sequence(&mut self, node: &Node, declaration: &Declaration) {
        self.declare(node, declaration, SymbolKind::Sequence);
        self.visit_children(node);
    }
}

/// Build the symbol table for `document` in one pre-order pass.
pub fn collect_declarations(document: &Document) -> SymbolTable {
    let mut collector = DeclarationCollector::default();
    collector.visit_document(document);

    debug!(symbols = collector.table.len(); "Collected declarations");
    collector.table
}
