//! Parser implementation using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::error::ParseError;
use crate::parser::ast::Flowchart;
use crate::parser::cst::*;
use crate::parser::lexer::{lex, Token};
use crate::parser::transform;

/// Parse a flow script into its AST
///
/// All-or-nothing: either the whole chart or every error found.
pub fn parse(input: &str) -> Result<Flowchart, Vec<ParseError>> {
    let raw = parse_raw(input)?;
    transform::flowchart(&raw, input)
}

/// Parse a flow script into the raw tree, before the transform
pub fn parse_raw(input: &str) -> Result<RawFlowchart, Vec<ParseError>> {
    let len = input.len();

    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    for (tok, span) in lex(input) {
        match tok {
            Ok(tok) => tokens.push((tok, SimpleSpan::from(span))),
            Err(()) => errors.push(ParseError::unexpected_char(input, span)),
        }
    }
    if !errors.is_empty() {
        return Err(errors);
    }

    // Turn the token list into a stream that chumsky can use
    let token_stream = Stream::from_iter(tokens)
        // Split (Token, SimpleSpan) into token and span parts
        .map((len..len).into(), |(t, s): (_, _)| (t, s));

    flowchart_parser(input)
        .parse(token_stream)
        .into_result()
        .map_err(|errs| {
            errs.into_iter()
                .map(|e| ParseError::from_rich(e, input))
                .collect()
        })
}

/// Helper to extract span range from chumsky's MapExtra
fn span_range(e: &impl chumsky::span::Span<Offset = usize>) -> std::ops::Range<usize> {
    e.start()..e.end()
}

fn flowchart_parser<'a, I>(
    source: &'a str,
) -> impl Parser<'a, I, RawFlowchart, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let ident = select! {
        Token::Ident(s) => s,
    }
    .map_with(|text, e| RawText {
        text,
        span: span_range(&e.span()),
    });

    let int = select! {
        Token::Int(digits) => digits,
    }
    .map_with(|digits, e| RawInt {
        digits,
        span: span_range(&e.span()),
    });

    // Run of identifiers and integers; the text is the source slice so
    // inner spacing and leading zeros survive.
    let words = select! {
        Token::Ident(_) => (),
        Token::Int(_) => (),
    }
    .repeated()
    .at_least(1)
    .collect::<Vec<_>>()
    .map_with(move |_, e| {
        let span = span_range(&e.span());
        RawText {
            text: source.get(span.clone()).unwrap_or_default().to_string(),
            span,
        }
    });

    let quoted = select! {
        Token::String(s) => s,
    }
    .map_with(|text, e| RawText {
        text,
        span: span_range(&e.span()),
    });

    let label = choice((quoted, words.clone())).labelled("label");

    // `a0`, `step 12`
    let step = ident
        .then(int)
        .map(|(var, num)| RawStep { var, num })
        .labelled("step");

    // `a0 --x--> b0:y`
    let statement = step
        .clone()
        .then_ignore(just(Token::Dash))
        .then(label.clone())
        .then_ignore(just(Token::Arrow))
        .then(step)
        .then_ignore(just(Token::Colon))
        .then(label)
        .map_with(|(((src, slabel), dst), dlabel), e| RawStatement {
            src,
            slabel,
            dst,
            dlabel,
            span: span_range(&e.span()),
        });

    let newline =
        just(Token::Newline).map_with(|_, e| RawItem::Newline(span_range(&e.span())));

    // Every line ends in at least one newline, or the input ends
    let separator = newline
        .clone()
        .repeated()
        .at_least(1)
        .collect::<Vec<_>>()
        .or(end().map(|_| Vec::new()));

    let line = statement
        .then(separator.clone())
        .map(|(statement, newlines)| {
            let mut items = Vec::with_capacity(newlines.len() + 1);
            items.push(RawItem::Statement(statement));
            items.extend(newlines);
            items
        });

    newline
        .repeated()
        .collect::<Vec<_>>()
        .then(words.labelled("flow type"))
        .then(separator)
        .then(line.repeated().collect::<Vec<_>>())
        .then_ignore(end())
        .map_with(|(((leading, flow_type), after_header), lines), e| {
            let mut items = leading;
            items.extend(after_header);
            items.extend(lines.into_iter().flatten());
            RawFlowchart {
                flow_type,
                items,
                span: span_range(&e.span()),
            }
        })
}
