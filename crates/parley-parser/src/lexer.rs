//! Tokenizer for Parley source text.
//!
//! Lexing never stops at the first problem: an unexpected character is
//! reported and skipped, an unterminated string is reported and the rest of
//! the line it opens on is skipped.

use winnow::{
    Parser as _,
    combinator::{alt, cut_err, preceded},
    error::{ContextError, ErrMode},
    stream::{LocatingSlice, Location as _, Stream as _},
    token::{one_of, take_till, take_until, take_while},
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
    span::{LineIndex, Span},
    tokens::{PositionedToken, Token},
};

type Input<'src> = LocatingSlice<&'src str>;
type IResult<O> = std::result::Result<O, ErrMode<ContextError>>;

fn line_comment<'src>(input: &mut Input<'src>) -> IResult<Token<'src>> {
    preceded("//", take_till(0.., '\n'))
        .map(Token::LineComment)
        .parse_next(input)
}

/// `'''...'''` or `"""..."""`, possibly spanning lines.
fn triple_quoted<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    alt((
        ("'''", cut_err((take_until(0.., "'''"), "'''"))).take(),
        ("\"\"\"", cut_err((take_until(0.., "\"\"\""), "\"\"\""))).take(),
    ))
    .parse_next(input)
}

/// `'...'` or `"..."` on a single line.
fn single_quoted<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    alt((
        (one_of('\''), take_till(0.., ['\'', '\n']), one_of('\'')).take(),
        (one_of('"'), take_till(0.., ['"', '\n']), one_of('"')).take(),
    ))
    .parse_next(input)
}

fn string_literal<'src>(input: &mut Input<'src>) -> IResult<Token<'src>> {
    alt((triple_quoted, single_quoted))
        .map(Token::StringLiteral)
        .parse_next(input)
}

/// Identifiers and keywords.
fn word<'src>(input: &mut Input<'src>) -> IResult<Token<'src>> {
    (
        one_of(|c: char| c.is_alphabetic() || c == '_'),
        take_while(0.., |c: char| c.is_alphanumeric() || c == '_'),
    )
        .take()
        .map(Token::from_word)
        .parse_next(input)
}

fn whitespace<'src>(input: &mut Input<'src>) -> IResult<Token<'src>> {
    take_while(1.., [' ', '\t', '\r'])
        .value(Token::Whitespace)
        .parse_next(input)
}

fn newline<'src>(input: &mut Input<'src>) -> IResult<Token<'src>> {
    one_of('\n').value(Token::Newline).parse_next(input)
}

fn token<'src>(input: &mut Input<'src>) -> IResult<Token<'src>> {
    alt((line_comment, string_literal, word, whitespace, newline)).parse_next(input)
}

/// Tokenize `source`, returning every token recognized together with the
/// syntax errors found along the way.
pub fn tokenize(source: &str) -> (Vec<PositionedToken<'_>>, Vec<Diagnostic>) {
    let lines = LineIndex::new(source);
    let mut input = LocatingSlice::new(source);
    let mut tokens = Vec::new();
    let mut diagnostics = DiagnosticCollector::new();

    while input.eof_offset() > 0 {
        let checkpoint = input.checkpoint();
        match token.with_span().parse_next(&mut input) {
            Ok((token, range)) => {
                let position = lines.position(range.start);
                tokens.push(PositionedToken::new(token, Span::new(range), position));
            }
            Err(_) => {
                input.reset(&checkpoint);
                let start = input.current_token_start();
                let rest = &source[start..];
                let (skip, message) = if rest.starts_with(['\'', '"']) {
                    (
                        rest.find('\n').unwrap_or(rest.len()),
                        "unterminated string literal".to_string(),
                    )
                } else {
                    let unexpected = rest.chars().next().unwrap_or_default();
                    (
                        unexpected.len_utf8(),
                        format!("unexpected character `{unexpected}`"),
                    )
                };

                diagnostics.emit(
                    Diagnostic::error(ErrorCode::SyntaxError, lines.position(start), message)
                        .with_label(Span::new(start..start + skip), "not a valid token"),
                );
                let _ = input.next_slice(skip);
            }
        }
    }

    (tokens, diagnostics.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Position;

    fn significant(source: &str) -> Vec<Token<'_>> {
        let (tokens, diagnostics) = tokenize(source);
        assert!(diagnostics.is_empty(), "unexpected errors: {diagnostics:?}");
        tokens
            .into_iter()
            .map(|t| t.token)
            .filter(|t| !t.is_trivia())
            .collect()
    }

    #[test]
    fn test_declarations() {
        assert_eq!(
            significant("Actor Alice is 'A user'\nObject Store"),
            vec![
                Token::Actor,
                Token::Identifier("Alice"),
                Token::Is,
                Token::StringLiteral("'A user'"),
                Token::Object,
                Token::Identifier("Store"),
            ]
        );
    }

    #[test]
    fn test_message_keywords() {
        assert_eq!(
            significant("  Alice tell Bob\n  Bob ask Alice \"hi\"\n  Alice replies Bob"),
            vec![
                Token::Identifier("Alice"),
                Token::Tell,
                Token::Identifier("Bob"),
                Token::Identifier("Bob"),
                Token::Ask,
                Token::Identifier("Alice"),
                Token::StringLiteral("\"hi\""),
                Token::Identifier("Alice"),
                Token::Replies,
                Token::Identifier("Bob"),
            ]
        );
    }

    #[test]
    fn test_triple_quoted_spans_lines() {
        let source = "Name '''First\n  Second'''\nActor A";
        let (tokens, diagnostics) = tokenize(source);
        assert!(diagnostics.is_empty());

        let string = tokens
            .iter()
            .find(|t| matches!(t.token, Token::StringLiteral(_)))
            .expect("string token");
        assert_eq!(string.token, Token::StringLiteral("'''First\n  Second'''"));
        assert_eq!(string.position, Position::new(1, 5));

        let actor = tokens.iter().find(|t| t.token == Token::Actor).unwrap();
        assert_eq!(actor.position, Position::new(3, 0));
    }

    #[test]
    fn test_empty_strings() {
        assert_eq!(
            significant("'' \"\""),
            vec![Token::StringLiteral("''"), Token::StringLiteral("\"\"")]
        );
    }

    #[test]
    fn test_comments_are_trivia() {
        assert_eq!(
            significant("// a comment\nActor A // trailing"),
            vec![Token::Actor, Token::Identifier("A")]
        );
    }

    #[test]
    fn test_positions_and_spans() {
        let (tokens, _) = tokenize("Actor Alice");
        assert_eq!(tokens[2].token, Token::Identifier("Alice"));
        assert_eq!(tokens[2].span, Span::new(6..11));
        assert_eq!(tokens[2].position, Position::new(1, 6));
    }

    #[test]
    fn test_unexpected_character_is_reported_and_skipped() {
        let (tokens, diagnostics) = tokenize("Actor A$lice");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code(), ErrorCode::SyntaxError);
        assert_eq!(diagnostics[0].position(), Position::new(1, 7));
        assert_eq!(diagnostics[0].message(), "unexpected character `$`");

        let words: Vec<_> = tokens.iter().filter(|t| !t.is_trivia()).collect();
        assert_eq!(words.len(), 3);
    }

    #[test]
    fn test_unterminated_single_quoted_string() {
        let (tokens, diagnostics) = tokenize("Actor A is 'oops\nActor B");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message(), "unterminated string literal");
        assert_eq!(diagnostics[0].position(), Position::new(1, 11));
        assert!(tokens.iter().any(|t| t.token == Token::Identifier("B")));
    }

    #[test]
    fn test_unterminated_triple_quoted_string_skips_its_line() {
        let (tokens, diagnostics) = tokenize("Actor A is '''x'\nActor B\nActor C");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message(), "unterminated string literal");
        assert_eq!(diagnostics[0].position(), Position::new(1, 11));

        let names: Vec<_> = tokens
            .iter()
            .filter(|t| matches!(t.token, Token::Identifier(_)))
            .map(|t| t.token)
            .collect();
        assert_eq!(
            names,
            vec![
                Token::Identifier("A"),
                Token::Identifier("B"),
                Token::Identifier("C")
            ]
        );
    }

    #[test]
    fn test_later_lines_checked_after_unterminated_triple_quote() {
        let (_, diagnostics) = tokenize("Name \"\"\"never closed\nActor $B");
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[1].message(), "unexpected character `$`");
        assert_eq!(diagnostics[1].position(), Position::new(2, 6));
    }
}
