use std::fmt;

use winnow::stream::Location;

use crate::span::{Position, Span};

/// Token types for the Parley language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'src> {
    // Keywords
    Name,
    Actor,
    Object,
    Sequence,
    Is,
    Tell,
    Ask,
    Replies,

    // Literals
    /// Raw string literal text, delimiters included.
    StringLiteral(&'src str),
    Identifier(&'src str),

    // Comments
    LineComment(&'src str), // // comment

    // Whitespace
    Whitespace,
    Newline,
}

/// Lexical category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenCategory {
    Keyword,
    Identifier,
    String,
    Trivia,
}

impl<'src> Token<'src> {
    /// Map a word to its keyword token, or to an identifier.
    pub fn from_word(word: &'src str) -> Self {
        match word {
            "Name" => Token::Name,
            "Actor" => Token::Actor,
            "Object" => Token::Object,
            "Sequence" => Token::Sequence,
            "is" => Token::Is,
            "tell" => Token::Tell,
            "ask" => Token::Ask,
            "replies" => Token::Replies,
            _ => Token::Identifier(word),
        }
    }

    pub fn category(&self) -> TokenCategory {
        match self {
            Token::Name
            | Token::Actor
            | Token::Object
            | Token::Sequence
            | Token::Is
            | Token::Tell
            | Token::Ask
            | Token::Replies => TokenCategory::Keyword,
            Token::Identifier(_) => TokenCategory::Identifier,
            Token::StringLiteral(_) => TokenCategory::String,
            Token::LineComment(_) | Token::Whitespace | Token::Newline => TokenCategory::Trivia,
        }
    }

    pub fn is_trivia(&self) -> bool {
        self.category() == TokenCategory::Trivia
    }
}

/// A token with its byte span and line/column position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionedToken<'src> {
    pub token: Token<'src>,
    pub span: Span,
    pub position: Position,
}

impl<'src> PositionedToken<'src> {
    pub fn new(token: Token<'src>, span: Span, position: Position) -> Self {
        Self {
            token,
            span,
            position,
        }
    }
}

impl<'src> std::ops::Deref for PositionedToken<'src> {
    type Target = Token<'src>;

    fn deref(&self) -> &Self::Target {
        &self.token
    }
}

impl<'src> fmt::Display for PositionedToken<'src> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.token.fmt(f)
    }
}

impl<'src> Location for PositionedToken<'src> {
    fn previous_token_end(&self) -> usize {
        self.span.start()
    }

    fn current_token_start(&self) -> usize {
        self.span.start()
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Name => write!(f, "Name"),
            Token::Actor => write!(f, "Actor"),
            Token::Object => write!(f, "Object"),
            Token::Sequence => write!(f, "Sequence"),
            Token::Is => write!(f, "is"),
            Token::Tell => write!(f, "tell"),
            Token::Ask => write!(f, "ask"),
            Token::Replies => write!(f, "replies"),

            Token::StringLiteral(raw) => write!(f, "{raw}"),
            Token::Identifier(name) => write!(f, "{name}"),

            Token::LineComment(comment) => write!(f, "//{comment}"),
            Token::Whitespace => write!(f, " "),
            Token::Newline => write!(f, "\\n"),
        }
    }
}
