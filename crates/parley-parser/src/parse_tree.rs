//! Concrete parse tree and its event stream.
//!
//! The parser produces a tree of [`Rule`]s whose children are the rule's
//! significant tokens and nested rules, in source order. Consumers do not
//! traverse the tree themselves: [`walk`] replays it as "enter rule" /
//! "exit rule" notifications to a [`ParseTreeListener`], which is the only
//! contract the tree builder depends on.

use std::fmt;

use crate::{
    span::{Position, Span},
    tokens::PositionedToken,
};

/// Grammar rules that produce events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Root,
    DocumentName,
    ActorDefinition,
    ObjectDefinition,
    SequenceDefinition,
    SequenceMessage,
    String,
}

impl RuleKind {
    /// Grammar name of the rule.
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::Root => "root",
            RuleKind::DocumentName => "documentName",
            RuleKind::ActorDefinition => "actorDefinition",
            RuleKind::ObjectDefinition => "objectDefinition",
            RuleKind::SequenceDefinition => "sequenceDefinition",
            RuleKind::SequenceMessage => "sequenceMessage",
            RuleKind::String => "string",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A child of a rule: a matched token or a nested rule.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseChild<'src> {
    Token(PositionedToken<'src>),
    Rule(Rule<'src>),
}

impl<'src> ParseChild<'src> {
    pub fn span(&self) -> Span {
        match self {
            ParseChild::Token(token) => token.span,
            ParseChild::Rule(rule) => rule.span,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            ParseChild::Token(token) => token.position,
            ParseChild::Rule(rule) => rule.position,
        }
    }

    pub fn as_token(&self) -> Option<&PositionedToken<'src>> {
        match self {
            ParseChild::Token(token) => Some(token),
            ParseChild::Rule(_) => None,
        }
    }
}

/// A matched grammar rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule<'src> {
    kind: RuleKind,
    span: Span,
    position: Position,
    text: &'src str,
    children: Vec<ParseChild<'src>>,
}

impl<'src> Rule<'src> {
    /// Create a rule over `children`; its span, start position and raw text
    /// are derived from the first and last child.
    pub fn new(kind: RuleKind, source: &'src str, children: Vec<ParseChild<'src>>) -> Self {
        let (span, position) = match (children.first(), children.last()) {
            (Some(first), Some(last)) => (first.span().union(last.span()), first.position()),
            _ => (Span::default(), Position::default()),
        };
        let text = source.get(span.range()).unwrap_or_default();

        Self {
            kind,
            span,
            position,
            text,
            children,
        }
    }

    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// Line/column of the rule's start token.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Raw source text matched by the rule.
    pub fn text(&self) -> &'src str {
        self.text
    }

    pub fn children(&self) -> &[ParseChild<'src>] {
        &self.children
    }

    /// The child at `index`, if it is a token.
    pub fn token_at(&self, index: usize) -> Option<&PositionedToken<'src>> {
        self.children.get(index).and_then(ParseChild::as_token)
    }

    /// Nested rules in source order.
    pub fn rules(&self) -> impl Iterator<Item = &Rule<'src>> {
        self.children.iter().filter_map(|child| match child {
            ParseChild::Rule(rule) => Some(rule),
            ParseChild::Token(_) => None,
        })
    }

    pub(crate) fn push(&mut self, child: ParseChild<'src>, source: &'src str) {
        self.children.push(child);
        *self = Self::new(self.kind, source, std::mem::take(&mut self.children));
    }
}

/// Receiver of parse tree events.
pub trait ParseTreeListener<'src> {
    /// Called before any nested rule of `rule` is visited.
    fn enter_rule(&mut self, rule: &Rule<'src>);

    /// Called after every nested rule of `rule` has been visited.
    fn exit_rule(&mut self, rule: &Rule<'src>);
}

/// Replay `rule` and its nested rules as enter/exit events, depth first.
pub fn walk<'src, L>(rule: &Rule<'src>, listener: &mut L)
where
    L: ParseTreeListener<'src> + ?Sized,
{
    listener.enter_rule(rule);
    for nested in rule.rules() {
        walk(nested, listener);
    }
    listener.exit_rule(rule);
}
