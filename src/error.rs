//! Error types for parsing flow scripts

use std::fmt;

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::parser::lexer::Token;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// 1-based line and column (columns count characters, not bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    /// Locate a byte offset in `source`
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let before = source.get(..offset).unwrap_or(source);
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        Position {
            line: before.matches('\n').count() + 1,
            column: before[line_start..].chars().count() + 1,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Parse error at {position}: {message}")]
    Syntax {
        span: Span,
        position: Position,
        message: String,
        expected: Vec<String>,
        found: Option<String>,
    },
}

impl ParseError {
    pub fn syntax(source: &str, span: Span, message: impl Into<String>) -> Self {
        ParseError::Syntax {
            position: Position::from_offset(source, span.start),
            span,
            message: message.into(),
            expected: Vec::new(),
            found: None,
        }
    }

    /// A character that starts no token
    pub fn unexpected_char(source: &str, span: Span) -> Self {
        let found = source.get(span.clone()).unwrap_or_default();
        ParseError::Syntax {
            position: Position::from_offset(source, span.start),
            message: format!("Unexpected character '{}'", found),
            found: Some(format!("'{}'", found)),
            expected: Vec::new(),
            span,
        }
    }

    /// Convert a chumsky error, resolving its span against `source`
    pub fn from_rich(err: chumsky::error::Rich<'_, Token>, source: &str) -> Self {
        use chumsky::error::{RichPattern, RichReason};

        let found = err.found().map(|tok| tok.to_string());

        let message = match err.reason() {
            RichReason::ExpectedFound { found, .. } => {
                let found_str = match found {
                    Some(tok) => format_token(tok),
                    None => "end of input".to_string(),
                };
                format!("Unexpected {}", found_str)
            }
            RichReason::Custom(msg) => msg.to_string(),
        };

        let expected: Vec<String> = err
            .expected()
            .filter_map(|e| match e {
                RichPattern::Token(tok) => Some(format_token(tok)),
                RichPattern::Label(label) => Some(label.to_string()),
                RichPattern::EndOfInput => Some("end of input".to_string()),
                RichPattern::Identifier(s) => Some(format!("identifier '{}'", s)),
                RichPattern::Any => Some("any token".to_string()),
                RichPattern::SomethingElse => None,
            })
            .collect();

        let span = err.span().into_range();
        ParseError::Syntax {
            position: Position::from_offset(source, span.start),
            span,
            message,
            expected,
            found,
        }
    }

    pub fn span(&self) -> &Span {
        match self {
            ParseError::Syntax { span, .. } => span,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            ParseError::Syntax { position, .. } => *position,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let mut buf = Vec::new();
        match self {
            ParseError::Syntax {
                span,
                message,
                expected,
                ..
            } => {
                let expected_str = if expected.is_empty() {
                    String::new()
                } else {
                    format!("\nExpected: {}", expected.join(", "))
                };

                // ariadne counts characters; spans here are bytes
                let span = char_span(source, span);
                let written = Report::build(ReportKind::Error, filename, span.start)
                    .with_message(message)
                    .with_label(
                        Label::new((filename, span))
                            .with_message(format!("{}{}", message, expected_str))
                            .with_color(Color::Red),
                    )
                    .finish()
                    .write((filename, Source::from(source)), &mut buf);
                if written.is_err() {
                    return self.to_string();
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }
}

/// Byte range to character range; offsets past the end clamp to it
fn char_span(source: &str, span: &Span) -> Span {
    let chars_before = |offset: usize| source.get(..offset).unwrap_or(source).chars().count();
    chars_before(span.start)..chars_before(span.end)
}

/// Format a token for human-readable error messages
fn format_token(tok: &Token) -> String {
    tok.to_string()
}
