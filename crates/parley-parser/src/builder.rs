//! Builds a [`Document`] from parse tree events.
//!
//! [`TreeBuilder`] keeps an explicit stack of open nodes. Entering a rule
//! pushes a node stamped with the rule's position and raw text; leaving it
//! pops that node and appends it to the node below, and the last node popped
//! becomes the document root.

use log::{debug, error, warn};

use crate::{
    ast::{Declaration, Document, Identifier, Message, MessageKind, Node, NodeId, NodeKind, StringValue},
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
    parse_tree::{ParseTreeListener, Rule, RuleKind, walk},
    span::{Position, Span},
    tokens::{Token, TokenCategory},
};

/// Listener that turns rule events into document nodes.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    stack: Vec<Node>,
    root: Option<Node>,
    next_id: usize,
    diagnostics: DiagnosticCollector,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finish building and return the document with any diagnostics raised.
    ///
    /// Nodes still open (enter events without a matching exit) are closed in
    /// stack order. Without any events the document is an empty root.
    pub fn finish(mut self) -> (Document, Vec<Diagnostic>) {
        if !self.stack.is_empty() {
            warn!(open = self.stack.len(); "Closing rules left open by the parser");
            while let Some(node) = self.stack.pop() {
                self.attach(node);
            }
        }

        let root = self.root.unwrap_or_else(|| {
            Node::new(
                NodeId::new(0),
                NodeKind::Root,
                Position::default(),
                Span::default(),
                "",
            )
        });

        (Document::new(root), self.diagnostics.finish())
    }

    fn next_id(&mut self) -> NodeId {
        let id = NodeId::new(self.next_id);
        self.next_id += 1;
        id
    }

    fn attach(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(parent) => parent.push_child(node),
            None => {
                if self.root.is_some() {
                    warn!(node = node.kind().as_str(); "Replacing previously completed root");
                }
                self.root = Some(node);
            }
        }
    }

    /// Identifier at child `index` of `rule`, if that child is an identifier token.
    fn identifier_at(rule: &Rule<'_>, index: usize) -> Option<Identifier> {
        let token = rule.token_at(index)?;
        if token.category() != TokenCategory::Identifier {
            return None;
        }
        match token.token {
            Token::Identifier(name) => Some(Identifier::new(name, token.position, token.span)),
            _ => None,
        }
    }

    fn declaration(&mut self, rule: &Rule<'_>, keyword: &str) -> Declaration {
        let identifier = Self::identifier_at(rule, 1);
        if identifier.is_none() {
            self.diagnostics.emit(
                Diagnostic::error(
                    ErrorCode::SyntaxError,
                    rule.position(),
                    format!("{keyword} declaration is missing its identifier"),
                )
                .with_label(rule.span(), "declaration without a name")
                .with_help(format!("write `{keyword} <name>`")),
            );
        }
        Declaration::new(identifier)
    }

    fn message(rule: &Rule<'_>) -> Message {
        let kind = match rule.token_at(1).map(|token| token.token) {
            Some(Token::Tell) => MessageKind::Asynchronous,
            Some(Token::Replies) => MessageKind::Reply,
            _ => MessageKind::Synchronous,
        };
        Message::new(
            Self::identifier_at(rule, 0),
            Self::identifier_at(rule, 2),
            kind,
        )
    }
}

impl<'src> ParseTreeListener<'src> for TreeBuilder {
    fn enter_rule(&mut self, rule: &Rule<'src>) {
        let kind = match rule.kind() {
            RuleKind::Root => NodeKind::Root,
            RuleKind::DocumentName => NodeKind::Name,
            RuleKind::ActorDefinition => NodeKind::Actor(self.declaration(rule, "Actor")),
            RuleKind::ObjectDefinition => NodeKind::Object(self.declaration(rule, "Object")),
            RuleKind::SequenceDefinition => {
                NodeKind::Sequence(self.declaration(rule, "Sequence"))
            }
            RuleKind::SequenceMessage => NodeKind::Message(Self::message(rule)),
            RuleKind::String => NodeKind::String(StringValue::new(rule.text())),
        };

        let id = self.next_id();
        self.stack.push(Node::new(
            id,
            kind,
            rule.position(),
            rule.span(),
            rule.text(),
        ));
    }

    fn exit_rule(&mut self, rule: &Rule<'src>) {
        match self.stack.pop() {
            Some(node) => self.attach(node),
            None => error!(rule = rule.kind().as_str(); "Ignoring exit event without an open rule"),
        }
    }
}

/// Build the document for a parse tree.
pub fn build_document(tree: &Rule<'_>) -> (Document, Vec<Diagnostic>) {
    let mut builder = TreeBuilder::new();
    walk(tree, &mut builder);
    let (document, diagnostics) = builder.finish();

    debug!(
        actors = document.actors().count(),
        objects = document.objects().count(),
        sequences = document.sequences().count();
        "Built document"
    );

    (document, diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{lexer::tokenize, parse_tree::ParseChild, parser::build_parse_tree, tokens::PositionedToken};

    fn build(source: &str) -> Document {
        let (tokens, _) = tokenize(source);
        let (tree, syntax) = build_parse_tree(source, &tokens);
        assert!(syntax.is_empty(), "syntax errors: {syntax:?}");
        let (document, diagnostics) = build_document(&tree);
        assert!(diagnostics.is_empty(), "builder errors: {diagnostics:?}");
        document
    }

    fn token<'a>(token: Token<'a>, start: usize, len: usize) -> ParseChild<'a> {
        ParseChild::Token(PositionedToken::new(
            token,
            Span::new(start..start + len),
            Position::new(1, start),
        ))
    }

    #[test]
    fn test_builds_declarations() {
        let document = build("Name 'Demo'\nActor Alice is 'a user'\nObject Store\n");

        assert_eq!(document.title(), Some("Demo"));

        let alice = document.actors().next().unwrap();
        assert_eq!(alice.identifier().unwrap().name(), "Alice");
        assert_eq!(alice.identifier().unwrap().position(), Position::new(2, 6));
        assert_eq!(alice.position(), Position::new(2, 0));
        assert_eq!(alice.text(), "Actor Alice is 'a user'");
        assert_eq!(alice.description(), "a user");

        let store = document.objects().next().unwrap();
        assert_eq!(store.description(), "");
    }

    #[test]
    fn test_builds_messages() {
        let document = build(
            "Sequence Flow\n  A ask B 'one'\n  B replies A\n  A tell B\n",
        );
        let flow = document.sequences().next().unwrap();
        let messages: Vec<_> = flow.messages().collect();

        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].1.kind(), MessageKind::Synchronous);
        assert_eq!(messages[1].1.kind(), MessageKind::Reply);
        assert_eq!(messages[2].1.kind(), MessageKind::Asynchronous);
        assert_eq!(messages[0].1.source().unwrap().name(), "A");
        assert_eq!(messages[0].1.destination().unwrap().name(), "B");
        assert_eq!(messages[0].0.string().unwrap().value(), "one");
        assert!(messages[1].0.string().is_none());
        assert_eq!(messages[1].0.position(), Position::new(3, 2));
    }

    #[test]
    fn test_node_ids_are_unique() {
        let document = build("Name 'x'\nActor A\nActor B\nSequence S\n  A tell B 'hi'\n");

        fn collect(node: &Node, ids: &mut Vec<NodeId>) {
            ids.push(node.id());
            for child in node.children() {
                collect(child, ids);
            }
        }
        let mut ids = Vec::new();
        collect(document.root(), &mut ids);

        let count = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), count);
        assert_eq!(document.root().id(), NodeId::new(0));
    }

    #[test]
    fn test_missing_identifier_is_reported() {
        let source = "Actor 'oops'";
        let definition = Rule::new(
            RuleKind::ActorDefinition,
            source,
            vec![
                token(Token::Actor, 0, 5),
                token(Token::StringLiteral("'oops'"), 6, 6),
            ],
        );
        let root = Rule::new(RuleKind::Root, source, vec![ParseChild::Rule(definition)]);

        let (document, diagnostics) = build_document(&root);

        let actor = document.actors().next().unwrap();
        assert!(actor.identifier().is_none());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code(), ErrorCode::SyntaxError);
        assert_eq!(diagnostics[0].position(), Position::new(1, 0));
    }

    #[test]
    fn test_message_endpoints_may_be_absent() {
        let source = "A tell";
        let message = Rule::new(
            RuleKind::SequenceMessage,
            source,
            vec![token(Token::Identifier("A"), 0, 1), token(Token::Tell, 2, 4)],
        );
        let sequence = Rule::new(
            RuleKind::SequenceDefinition,
            source,
            vec![ParseChild::Rule(message)],
        );

        let mut builder = TreeBuilder::new();
        walk(&sequence, &mut builder);
        let (document, diagnostics) = builder.finish();

        // The sequence itself has no identifier; the message endpoints do not report.
        assert_eq!(diagnostics.len(), 1);
        let (_, message) = document.root().messages().next().unwrap();
        assert_eq!(message.source().unwrap().name(), "A");
        assert!(message.destination().is_none());
        assert_eq!(message.kind(), MessageKind::Asynchronous);
    }

    #[test]
    fn test_unbalanced_exit_is_ignored() {
        let source = "Actor A";
        let rule = Rule::new(
            RuleKind::ActorDefinition,
            source,
            vec![token(Token::Actor, 0, 5), token(Token::Identifier("A"), 6, 1)],
        );

        let mut builder = TreeBuilder::new();
        builder.exit_rule(&rule);
        builder.enter_rule(&rule);
        builder.exit_rule(&rule);
        builder.exit_rule(&rule);
        let (document, diagnostics) = builder.finish();

        assert!(diagnostics.is_empty());
        assert_eq!(document.root().identifier().unwrap().name(), "A");
    }

    #[test]
    fn test_empty_event_stream() {
        let (document, diagnostics) = TreeBuilder::new().finish();
        assert!(diagnostics.is_empty());
        assert_eq!(document.root().kind(), &NodeKind::Root);
        assert!(document.root().children().is_empty());
    }
}
