use super::{Declaration, Document, Message, Node, NodeKind, StringValue};

/// Traversal over a [`Document`].
///
/// Every method has a default that continues into the node's children, so an
/// implementation only overrides the node kinds it cares about. Overrides that
/// still want the nested nodes visited call [`Visitor::visit_children`].
pub trait Visitor {
    /// Visit a complete document
    fn visit_document(&mut self, document: &Document) {
        self.visit_node(document.root());
    }

    /// Dispatch on the node kind
    fn visit_node(&mut self, node: &Node) {
        match node.kind() {
            NodeKind::Root => self.visit_root(node),
            NodeKind::Name => self.visit_name(node),
            NodeKind::String(value) => self.visit_string(node, value),
            NodeKind::Actor(declaration) => self.visit_actor(node, declaration),
            NodeKind::Object(declaration) => self.visit_object(node, declaration),
            NodeKind::Sequence(declaration) => self.visit_sequence(node, declaration),
            NodeKind::Message(message) => self.visit_message(node, message),
        }
    }

    fn visit_root(&mut self, node: &Node) {
        self.visit_children(node);
    }

    fn visit_name(&mut self, node: &Node) {
        self.visit_children(node);
    }

    fn visit_string(&mut self, _node: &Node, _value: &StringValue) {}

    fn visit_actor(&mut self, node: &Node, _declaration: &Declaration) {
        self.visit_children(node);
    }

    fn visit_object(&mut self, node: &Node, _declaration: &Declaration) {
        self.visit_children(node);
    }

    fn visit_sequence(&mut self, node: &Node, _declaration: &Declaration) {
        self.visit_children(node);
    }

    fn visit_message(&mut self, node: &Node, _message: &Message) {
        self.visit_children(node);
    }

    /// Visit the children of `node` in source order
    fn visit_children(&mut self, node: &Node) {
        for child in node.children() {
            self.visit_node(child);
        }
    }
}
