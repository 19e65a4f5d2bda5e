//! Parser for Parley source tokens.
//!
//! The language is line oriented, so parsing happens one logical line at a
//! time: the token stream is split at newlines (a triple-quoted string is a
//! single token even when it spans lines), each line is matched against the
//! rule its first token announces, and a line that fails produces one
//! `syntax-error` before parsing resumes on the next line.
//!
//! Grammar:
//!
//! ```text
//! root               := documentName? (actorDefinition | objectDefinition)* sequenceDefinition*
//! documentName       := "Name" string
//! actorDefinition    := "Actor" IDENTIFIER ("is" string)?
//! objectDefinition   := "Object" IDENTIFIER ("is" string)?
//! sequenceDefinition := "Sequence" IDENTIFIER NEWLINE (INDENT sequenceMessage NEWLINE)*
//! sequenceMessage    := IDENTIFIER ("tell" | "ask" | "replies") IDENTIFIER string?
//! string             := STRING
//! ```

use log::{debug, trace};
use winnow::{
    Parser as _,
    combinator::{cut_err, eof, opt},
    error::{ContextError, ErrMode},
    stream::{Stream as _, TokenSlice},
    token::any,
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
    parse_tree::{ParseChild, Rule, RuleKind},
    tokens::{PositionedToken, Token},
};

/// Context type for parser errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Context {
    /// Description of what was expected
    Label(&'static str),
}

type Input<'i, 'src> = TokenSlice<'i, PositionedToken<'src>>;
type IResult<O> = std::result::Result<O, ErrMode<ContextError<Context>>>;

/// One logical source line, trivia removed.
#[derive(Debug)]
struct Line<'src> {
    indented: bool,
    tokens: Vec<PositionedToken<'src>>,
}

/// Split tokens into non-empty logical lines.
fn split_lines<'src>(tokens: &[PositionedToken<'src>]) -> Vec<Line<'src>> {
    let mut lines = Vec::new();
    let mut current = Line {
        indented: false,
        tokens: Vec::new(),
    };
    let mut at_line_start = true;

    for token in tokens {
        match token.token {
            Token::Newline => {
                if !current.tokens.is_empty() {
                    lines.push(current);
                }
                current = Line {
                    indented: false,
                    tokens: Vec::new(),
                };
                at_line_start = true;
            }
            Token::Whitespace => {
                if at_line_start {
                    current.indented = true;
                }
                at_line_start = false;
            }
            Token::LineComment(_) => at_line_start = false,
            _ => {
                current.tokens.push(*token);
                at_line_start = false;
            }
        }
    }
    if !current.tokens.is_empty() {
        lines.push(current);
    }

    lines
}

/// Parse a specific keyword token
fn keyword<'i, 'src: 'i>(
    expected: Token<'src>,
    label: &'static str,
) -> impl FnMut(&mut Input<'i, 'src>) -> IResult<PositionedToken<'src>> {
    move |input: &mut Input<'i, 'src>| {
        any.verify_map(|token: &PositionedToken<'src>| (token.token == expected).then_some(*token))
            .context(Context::Label(label))
            .parse_next(input)
    }
}

/// Parse an identifier token
fn identifier<'i, 'src>(input: &mut Input<'i, 'src>) -> IResult<PositionedToken<'src>> {
    any.verify_map(|token: &PositionedToken<'src>| {
        matches!(token.token, Token::Identifier(_)).then_some(*token)
    })
    .context(Context::Label("identifier"))
    .parse_next(input)
}

/// Parse a message kind keyword
fn message_verb<'i, 'src>(input: &mut Input<'i, 'src>) -> IResult<PositionedToken<'src>> {
    any.verify_map(|token: &PositionedToken<'src>| {
        matches!(token.token, Token::Tell | Token::Ask | Token::Replies).then_some(*token)
    })
    .context(Context::Label("`tell`, `ask` or `replies`"))
    .parse_next(input)
}

/// Parse a string literal as a `string` rule
fn string<'i, 'src: 'i>(
    source: &'src str,
) -> impl FnMut(&mut Input<'i, 'src>) -> IResult<Rule<'src>> {
    move |input: &mut Input<'i, 'src>| {
        let literal = any
            .verify_map(|token: &PositionedToken<'src>| {
                matches!(token.token, Token::StringLiteral(_)).then_some(*token)
            })
            .context(Context::Label("string literal"))
            .parse_next(input)?;
        Ok(Rule::new(
            RuleKind::String,
            source,
            vec![ParseChild::Token(literal)],
        ))
    }
}

/// `Name <string>`
fn document_name<'i, 'src>(
    source: &'src str,
    input: &mut Input<'i, 'src>,
) -> IResult<Rule<'src>> {
    let name = keyword(Token::Name, "`Name`").parse_next(input)?;
    let title = cut_err(string(source)).parse_next(input)?;

    Ok(Rule::new(
        RuleKind::DocumentName,
        source,
        vec![ParseChild::Token(name), ParseChild::Rule(title)],
    ))
}

/// `Actor <id> [is <string>]`, `Object <id> [is <string>]`, `Sequence <id>`
fn definition<'i, 'src>(
    source: &'src str,
    kind: RuleKind,
    introducer: Token<'src>,
    input: &mut Input<'i, 'src>,
) -> IResult<Rule<'src>> {
    let introducer = keyword(introducer, "declaration keyword").parse_next(input)?;
    let name = cut_err(identifier).parse_next(input)?;
    let mut children = vec![ParseChild::Token(introducer), ParseChild::Token(name)];

    if kind != RuleKind::SequenceDefinition {
        let description =
            opt((keyword(Token::Is, "`is`"), cut_err(string(source)))).parse_next(input)?;
        if let Some((is, description)) = description {
            children.push(ParseChild::Token(is));
            children.push(ParseChild::Rule(description));
        }
    }

    Ok(Rule::new(kind, source, children))
}

/// `<id> (tell|ask|replies) <id> [<string>]`
fn sequence_message<'i, 'src>(
    source: &'src str,
    input: &mut Input<'i, 'src>,
) -> IResult<Rule<'src>> {
    let from = identifier.parse_next(input)?;
    let verb = cut_err(message_verb).parse_next(input)?;
    let to = cut_err(identifier).parse_next(input)?;
    let text = opt(string(source)).parse_next(input)?;

    let mut children = vec![
        ParseChild::Token(from),
        ParseChild::Token(verb),
        ParseChild::Token(to),
    ];
    if let Some(text) = text {
        children.push(ParseChild::Rule(text));
    }

    Ok(Rule::new(RuleKind::SequenceMessage, source, children))
}

/// Require that nothing follows on the line
fn end_of_line<'i, 'src>(input: &mut Input<'i, 'src>) -> IResult<()> {
    eof.void()
        .context(Context::Label("end of line"))
        .parse_next(input)
}

/// Turn a failed line parse into a diagnostic pointing at the offending token.
fn convert_error(
    error: ErrMode<ContextError<Context>>,
    line: &Line<'_>,
    remaining: usize,
) -> Diagnostic {
    let mut expected: Vec<&'static str> = Vec::new();
    if let ErrMode::Backtrack(e) | ErrMode::Cut(e) = &error {
        for Context::Label(label) in e.context() {
            if !expected.contains(label) {
                expected.push(*label);
            }
        }
    }

    let index = line.tokens.len() - remaining;
    let (token, found) = match line.tokens.get(index) {
        Some(token) => (token, format!("unexpected `{}`", token.token)),
        None => {
            // Ran out of tokens; point at the last one on the line.
            let last = &line.tokens[line.tokens.len() - 1];
            (last, format!("unexpected end of line after `{}`", last.token))
        }
    };

    let message = if expected.is_empty() {
        found
    } else {
        format!("{found}: expected {}", expected.join(" or "))
    };

    Diagnostic::error(ErrorCode::SyntaxError, token.position, message)
        .with_label(token.span, "unexpected token")
        .with_help("check the statement against the Parley grammar")
}

/// Run `parser` over the whole line.
fn parse_line<'src, P>(line: &Line<'src>, mut parser: P) -> Result<Rule<'src>, Diagnostic>
where
    P: for<'i> FnMut(&mut Input<'i, 'src>) -> IResult<Rule<'src>>,
{
    let mut input = TokenSlice::new(&line.tokens);
    let result = parser(&mut input).and_then(|rule| end_of_line(&mut input).map(|()| rule));

    result.map_err(|err| convert_error(err, line, input.eof_offset()))
}

/// Where in the document the parser currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Section {
    Header,
    Declarations,
    Sequences,
}

fn misplaced(token: &PositionedToken<'_>, message: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::SyntaxError, token.position, message)
        .with_label(token.span, "misplaced statement")
}

/// Build the parse tree for `source` from its tokens.
///
/// Returns the `root` rule together with every syntax error found. The tree
/// only contains lines that parsed successfully.
pub fn build_parse_tree<'src>(
    source: &'src str,
    tokens: &[PositionedToken<'src>],
) -> (Rule<'src>, Vec<Diagnostic>) {
    let lines = split_lines(tokens);
    debug!(lines = lines.len(); "Parsing source lines");

    let mut diagnostics = DiagnosticCollector::new();
    let mut root_children = Vec::new();
    let mut sequence: Option<Rule<'src>> = None;
    // Set while the most recent `Sequence` header failed to parse.
    let mut orphaned = false;
    let mut section = Section::Header;

    for line in &lines {
        let first = &line.tokens[0];
        let parsed = match first.token {
            Token::Name if section != Section::Header => Err(misplaced(
                first,
                "the document `Name` must be the first statement",
            )),
            Token::Name => {
                section = Section::Declarations;
                parse_line(line, |input| document_name(source, input))
            }
            Token::Actor | Token::Object if section == Section::Sequences => Err(misplaced(
                first,
                "Actor and Object declarations must precede every Sequence",
            )),
            Token::Actor => {
                section = Section::Declarations;
                parse_line(line, |input| {
                    definition(source, RuleKind::ActorDefinition, Token::Actor, input)
                })
            }
            Token::Object => {
                section = Section::Declarations;
                parse_line(line, |input| {
                    definition(source, RuleKind::ObjectDefinition, Token::Object, input)
                })
            }
            Token::Sequence => {
                section = Section::Sequences;
                if let Some(finished) = sequence.take() {
                    root_children.push(ParseChild::Rule(finished));
                }
                match parse_line(line, |input| {
                    definition(source, RuleKind::SequenceDefinition, Token::Sequence, input)
                }) {
                    Ok(header) => {
                        sequence = Some(header);
                        orphaned = false;
                        continue;
                    }
                    Err(diagnostic) => {
                        orphaned = true;
                        Err(diagnostic)
                    }
                }
            }
            Token::Identifier(_) if !line.indented => Err(misplaced(
                first,
                "message lines must be indented under a Sequence",
            )),
            Token::Identifier(_) => match sequence.as_mut() {
                Some(open) => {
                    match parse_line(line, |input| sequence_message(source, input)) {
                        Ok(message) => {
                            open.push(ParseChild::Rule(message), source);
                            continue;
                        }
                        Err(diagnostic) => Err(diagnostic),
                    }
                }
                None if orphaned => {
                    trace!(
                        line = first.position.line();
                        "Skipping message under a malformed Sequence header"
                    );
                    continue;
                }
                None => Err(misplaced(first, "messages must follow a Sequence header")),
            },
            _ => Err(Diagnostic::error(
                ErrorCode::SyntaxError,
                first.position,
                format!("unexpected `{}`: expected a statement", first.token),
            )
            .with_label(first.span, "unexpected token")),
        };

        match parsed {
            Ok(rule) => root_children.push(ParseChild::Rule(rule)),
            Err(diagnostic) => {
                trace!(line = diagnostic.line(); "Skipping malformed line");
                diagnostics.emit(diagnostic);
            }
        }
    }

    if let Some(finished) = sequence.take() {
        root_children.push(ParseChild::Rule(finished));
    }

    (
        Rule::new(RuleKind::Root, source, root_children),
        diagnostics.finish(),
    )
}
