//! Lexer for flow scripts using logos

use std::fmt;

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, PartialEq, Eq)]
#[logos(skip r"[ \t\r]+")]
pub enum Token {
    // Statement punctuation (longer pattern first)
    #[token("-->")]
    Arrow,
    #[token("--")]
    Dash,
    #[token(":")]
    Colon,

    // Statements are newline-terminated, so newlines are real tokens
    #[token("\n")]
    Newline,

    // Identifiers hold no digits: `a0` lexes as `a` followed by `0`
    #[regex(r"[a-zA-Z_]+", |lex| lex.slice().to_string())]
    Ident(String),

    // Digits are kept as text; conversion happens in the transform
    #[regex(r"[0-9]+", |lex| lex.slice().to_string())]
    Int(String),

    #[regex(r#""([^"\\\n]|\\.)*""#, |lex| unescape(&lex.slice()[1..lex.slice().len() - 1]))]
    String(String),

    #[regex(r"//[^\n]*", logos::skip)]
    LineComment,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Arrow => write!(f, "'-->'"),
            Token::Dash => write!(f, "'--'"),
            Token::Colon => write!(f, "':'"),
            Token::Newline => write!(f, "newline"),
            Token::Ident(s) => write!(f, "identifier '{}'", s),
            Token::Int(s) => write!(f, "integer {}", s),
            Token::String(s) => write!(f, "string \"{}\"", s),
            Token::LineComment => write!(f, "comment"),
        }
    }
}

fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some(other) => out.push(other),
                None => {}
            },
            c => out.push(c),
        }
    }
    out
}

/// Lex input string into tokens with spans
///
/// Characters that start no token come through as `Err(())` so the parser
/// can report them instead of silently dropping them.
pub fn lex(input: &str) -> impl Iterator<Item = (Result<Token, ()>, Span)> + '_ {
    Token::lexer(input).spanned()
}
