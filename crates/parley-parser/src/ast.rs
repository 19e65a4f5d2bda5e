//! Document model for Parley sources.
//!
//! A [`Document`] owns a tree of [`Node`]s in source order. Every node has a
//! [`NodeId`] that is unique within the build that produced it; two nodes are
//! "the same declaration" exactly when their ids are equal.

mod visit;

use std::fmt;

pub use visit::Visitor;

use crate::span::{Position, Span};

/// Identity of a node within one built document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Pre-order index of the node in its document.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A bare name with its own location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    name: String,
    position: Position,
    span: Span,
}

impl Identifier {
    pub fn new(name: impl Into<String>, position: Position, span: Span) -> Self {
        Self {
            name: name.into(),
            position,
            span,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn span(&self) -> Span {
        self.span
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A quoted string literal and its unquoted value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringValue {
    raw: String,
    value: String,
}

impl StringValue {
    /// Create from the raw literal, quotes included.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let value = unquote(&raw);
        Self { raw, value }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Payload shared by Actor, Object and Sequence nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declaration {
    identifier: Option<Identifier>,
}

impl Declaration {
    pub fn new(identifier: Option<Identifier>) -> Self {
        Self { identifier }
    }

    pub fn identifier(&self) -> Option<&Identifier> {
        self.identifier.as_ref()
    }
}

/// How a message is delivered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MessageKind {
    #[default]
    Synchronous,
    Asynchronous,
    Reply,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Synchronous => "synchronous",
            MessageKind::Asynchronous => "asynchronous",
            MessageKind::Reply => "reply",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload of a Message node. The text, when present, is a String child.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    source: Option<Identifier>,
    destination: Option<Identifier>,
    kind: MessageKind,
}

impl Message {
    pub fn new(
        source: Option<Identifier>,
        destination: Option<Identifier>,
        kind: MessageKind,
    ) -> Self {
        Self {
            source,
            destination,
            kind,
        }
    }

    pub fn source(&self) -> Option<&Identifier> {
        self.source.as_ref()
    }

    pub fn destination(&self) -> Option<&Identifier> {
        self.destination.as_ref()
    }

    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    /// Source then destination, skipping absent endpoints.
    pub fn endpoints(&self) -> impl Iterator<Item = &Identifier> {
        self.source.iter().chain(self.destination.iter())
    }
}

/// What a node represents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    /// Document title; its single child is a String node.
    Name,
    String(StringValue),
    Actor(Declaration),
    Object(Declaration),
    Sequence(Declaration),
    Message(Message),
}

impl NodeKind {
    /// The declaration payload of Actor, Object and Sequence nodes.
    pub fn declaration(&self) -> Option<&Declaration> {
        match self {
            NodeKind::Actor(declaration)
            | NodeKind::Object(declaration)
            | NodeKind::Sequence(declaration) => Some(declaration),
            NodeKind::Root
            | NodeKind::Name
            | NodeKind::String(_)
            | NodeKind::Message(_) => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Root => "Root",
            NodeKind::Name => "Name",
            NodeKind::String(_) => "String",
            NodeKind::Actor(_) => "Actor",
            NodeKind::Object(_) => "Object",
            NodeKind::Sequence(_) => "Sequence",
            NodeKind::Message(_) => "Message",
        }
    }
}

/// A node of the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    id: NodeId,
    kind: NodeKind,
    position: Position,
    span: Span,
    text: String,
    children: Vec<Node>,
}

impl Node {
    pub(crate) fn new(
        id: NodeId,
        kind: NodeKind,
        position: Position,
        span: Span,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id,
            kind,
            position,
            span,
            text: text.into(),
            children: Vec::new(),
        }
    }

    pub(crate) fn push_child(&mut self, child: Node) {
        self.children.push(child);
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Position of the first token of the node.
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn line(&self) -> usize {
        self.position.line()
    }

    pub fn column(&self) -> usize {
        self.position.column()
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// Raw source text matched by the node.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Identifier of a declaration node.
    pub fn identifier(&self) -> Option<&Identifier> {
        self.kind.declaration().and_then(Declaration::identifier)
    }

    /// The first String child, if any.
    pub fn string(&self) -> Option<&StringValue> {
        self.children.iter().find_map(|child| match &child.kind {
            NodeKind::String(value) => Some(value),
            _ => None,
        })
    }

    /// Unquoted description of an Actor or Object, empty when absent.
    pub fn description(&self) -> &str {
        self.string().map(StringValue::value).unwrap_or_default()
    }

    /// Message children of a Sequence node, in order.
    pub fn messages(&self) -> impl Iterator<Item = (&Node, &Message)> {
        self.children.iter().filter_map(|child| match &child.kind {
            NodeKind::Message(message) => Some((child, message)),
            _ => None,
        })
    }
}

/// A built document: the root node and derived views over it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Node,
}

impl Document {
    pub(crate) fn new(root: Node) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// The `Name` node, if the document has one.
    pub fn name(&self) -> Option<&Node> {
        self.root
            .children
            .iter()
            .find(|child| matches!(child.kind, NodeKind::Name))
    }

    /// Unquoted document title.
    pub fn title(&self) -> Option<&str> {
        self.name()
            .and_then(Node::string)
            .map(StringValue::value)
    }

    pub fn actors(&self) -> impl Iterator<Item = &Node> {
        self.children_matching(|kind| matches!(kind, NodeKind::Actor(_)))
    }

    pub fn objects(&self) -> impl Iterator<Item = &Node> {
        self.children_matching(|kind| matches!(kind, NodeKind::Object(_)))
    }

    pub fn sequences(&self) -> impl Iterator<Item = &Node> {
        self.children_matching(|kind| matches!(kind, NodeKind::Sequence(_)))
    }

    /// Actors followed by Objects, each in declaration order.
    pub fn participants(&self) -> impl Iterator<Item = &Node> {
        self.actors().chain(self.objects())
    }

    fn children_matching(&self, predicate: fn(&NodeKind) -> bool) -> impl Iterator<Item = &Node> {
        self.root
            .children
            .iter()
            .filter(move |child| predicate(&child.kind))
    }
}

/// Strip the quotes from a string literal and normalise its layout.
///
/// Triple-quoted delimiters (`'''` or `"""`) are removed when present,
/// otherwise a single pair of `'` or `"`. Whitespace directly after each
/// newline is dropped (the newline stays) and the result is trimmed, so an
/// indented multi-line string loses its indentation.
///
/// ```
/// use parley_parser::ast::unquote;
///
/// assert_eq!(unquote("'hello'"), "hello");
/// assert_eq!(unquote("'''first\n    second'''"), "first\nsecond");
/// ```
pub fn unquote(raw: &str) -> String {
    let inner = strip_delimiters(raw);

    let mut value = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        value.push(c);
        if c == '\n' {
            while chars.next_if(|next| next.is_whitespace()).is_some() {}
        }
    }

    value.trim().to_string()
}

fn strip_delimiters(raw: &str) -> &str {
    for delimiter in ["'''", "\"\"\""] {
        if raw.len() >= 2 * delimiter.len() {
            if let Some(inner) = raw
                .strip_prefix(delimiter)
                .and_then(|rest| rest.strip_suffix(delimiter))
            {
                return inner;
            }
        }
    }
    for delimiter in ['\'', '"'] {
        if raw.len() >= 2 {
            if let Some(inner) = raw
                .strip_prefix(delimiter)
                .and_then(|rest| rest.strip_suffix(delimiter))
            {
                return inner;
            }
        }
    }
    raw
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(id: usize, kind: NodeKind) -> Node {
        Node::new(NodeId::new(id), kind, Position::default(), Span::default(), "")
    }

    fn declaration(name: &str) -> Declaration {
        Declaration::new(Some(Identifier::new(name, Position::default(), Span::default())))
    }

    #[test]
    fn test_unquote_single_quotes() {
        assert_eq!(unquote("'hello world'"), "hello world");
        assert_eq!(unquote("\"hello world\""), "hello world");
    }

    #[test]
    fn test_unquote_triple_quotes() {
        assert_eq!(unquote("'''it's here'''"), "it's here");
        assert_eq!(unquote("\"\"\"say \"hi\"\"\"\""), "say \"hi\"");
    }

    #[test]
    fn test_unquote_trims() {
        assert_eq!(unquote("'  padded  '"), "padded");
        assert_eq!(unquote("''"), "");
        assert_eq!(unquote("''''''"), "");
    }

    #[test]
    fn test_unquote_dedents_lines() {
        let raw = "'''\n    Line one\n      Line two\n\n    Line three\n    '''";
        assert_eq!(unquote(raw), "Line one\nLine two\nLine three");
    }

    #[test]
    fn test_unquote_keeps_inner_spacing() {
        assert_eq!(unquote("\"\"\"a  b\n\tc  d\"\"\""), "a  b\nc  d");
    }

    #[test]
    fn test_unquote_unquoted_text() {
        assert_eq!(unquote("bare"), "bare");
    }

    #[test]
    fn test_message_kind_default() {
        assert_eq!(MessageKind::default(), MessageKind::Synchronous);
        assert_eq!(MessageKind::Reply.to_string(), "reply");
    }

    #[test]
    fn test_document_views() {
        let mut root = leaf(0, NodeKind::Root);
        let mut name = leaf(1, NodeKind::Name);
        name.push_child(leaf(2, NodeKind::String(StringValue::new("'Title'"))));
        root.push_child(name);
        root.push_child(leaf(3, NodeKind::Object(declaration("Db"))));
        let mut actor = leaf(4, NodeKind::Actor(declaration("User")));
        actor.push_child(leaf(5, NodeKind::String(StringValue::new("'a person'"))));
        root.push_child(actor);
        root.push_child(leaf(6, NodeKind::Sequence(declaration("Flow"))));

        let document = Document::new(root);

        assert_eq!(document.title(), Some("Title"));
        let participants: Vec<_> = document
            .participants()
            .filter_map(|node| node.identifier().map(Identifier::name))
            .collect();
        assert_eq!(participants, vec!["User", "Db"]);
        assert_eq!(document.actors().next().unwrap().description(), "a person");
        assert_eq!(document.objects().next().unwrap().description(), "");
        assert_eq!(document.sequences().count(), 1);
    }

    #[test]
    fn test_message_endpoints() {
        let id = |name: &str| Identifier::new(name, Position::default(), Span::default());
        let message = Message::new(Some(id("A")), None, MessageKind::Reply);
        let names: Vec<_> = message.endpoints().map(Identifier::name).collect();
        assert_eq!(names, vec!["A"]);
    }
}
